//! Core types module

mod config;
mod device;
mod item;

#[cfg(test)]
mod tests;

pub use config::{
    CAST_SERVICE_TYPE, DEFAULT_TTS_HOST, GOOGLE_HOME_MODEL_MARKER, HomecastConfig,
    HomecastConfigBuilder,
};
pub use device::{Advertisement, DeviceInfo};
pub use item::PlayableItem;
