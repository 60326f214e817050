//! # homecast
//!
//! Discover Google Home receivers on the local network and make them play
//! audio, speak text, or load playlists.
//!
//! ## Features
//!
//! - Receiver discovery via mDNS
//! - Single-item playback and text-to-speech
//! - Playlist queue load and insert
//! - Cancellation and deadlines on every network call
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use homecast::{CallContext, SessionFactory, lookup_and_connect};
//!
//! # async fn example<F: SessionFactory>(factory: F) -> Result<(), homecast::HomecastError> {
//! let ctx = CallContext::with_timeout(Duration::from_secs(10));
//! let mut devices = lookup_and_connect(&ctx, factory).await;
//!
//! for device in &mut devices {
//!     device.speak(&ctx, "Dinner is ready", "en").await?;
//!     device.close().await;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The wire protocols stay outside the crate:
//!
//! - **Discovery**: [`ServiceLookup`] streams advertisements; [`MdnsLookup`]
//!   is the mDNS implementation.
//! - **Control**: [`ControlSession`] and [`MediaController`] carry media
//!   commands to a receiver; [`SessionFactory`] creates one session per
//!   discovered receiver.
//!
//! [`discover_and_connect`] ties them together and returns connected
//! [`CastDevice`]s.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Public modules
/// Execution context
pub mod context;
/// Error types
pub mod error;
/// Core types
pub mod types;

/// Testing utilities
pub mod testing;

pub mod control;
pub mod device;
pub mod discovery;
pub mod media;
pub mod tts;

// Re-exports
pub use context::CallContext;
pub use control::{ControlSession, MediaController, SessionFactory};
pub use device::{CastDevice, SessionState};
pub use discovery::{
    LookupQuery, MdnsLookup, ServiceLookup, discover_and_connect, is_supported,
    lookup_and_connect,
};
pub use error::{BoxError, HomecastError};
pub use media::{MediaCommand, MediaItem, MediaMetadata, MediaStatus, QueueItem};
pub use tts::TtsResolver;
pub use types::{Advertisement, DeviceInfo, HomecastConfig, PlayableItem};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for common imports
///
/// Convenient re-exports
pub mod prelude {
    pub use crate::{
        CallContext, CastDevice, ControlSession, HomecastConfig, HomecastError, MediaController,
        PlayableItem, SessionFactory, discover_and_connect, lookup_and_connect,
    };
}
