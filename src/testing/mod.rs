//! Scripted collaborators for testing without a network
//!
//! [`MockLookup`] replays a fixed list of advertisements, and
//! [`MockSessionFactory`] hands out [`MockSession`]s whose behaviour is
//! scripted per receiver address and whose traffic is recorded for
//! inspection.

pub mod mock_lookup;
pub mod mock_session;

use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub use mock_lookup::MockLookup;
pub use mock_session::{MockBehavior, MockSession, MockSessionFactory, SessionLog};

use crate::types::{Advertisement, DeviceInfo};

/// Helper to create an `Advertisement` for a Google Home at `10.0.0.<host>:8009`.
#[must_use]
pub fn google_home_advertisement(host: u8, name: &str) -> Advertisement {
    Advertisement::new(
        format!("{name}._googlecast._tcp.local."),
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, host)),
        8009,
        [
            format!("id={host:032x}"),
            "md=Google Home".to_string(),
            format!("fn={name}"),
        ],
    )
}

/// Helper to create a `DeviceInfo` for testing.
#[must_use]
pub fn create_test_device_info(name: &str, address: IpAddr, port: u16) -> DeviceInfo {
    DeviceInfo::new(name, address, port)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
