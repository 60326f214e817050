//! Cast receiver discovery
//!
//! [`discover_and_connect`] runs one lookup pass: the lookup collaborator
//! streams advertisements into a bounded queue while a collector task
//! filters them, connects to every supported receiver in arrival order and
//! gathers the connected devices. The queue is closed exactly once, when
//! the lookup returns and drops its sender; the collector then drains what
//! is left and finishes. If the caller drops the discovery future, the
//! collector stops and closes every session it opened.

mod mdns;

#[cfg(test)]
mod tests;

pub use mdns::MdnsLookup;

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::context::CallContext;
use crate::control::{ControlSession, SessionFactory};
use crate::device::CastDevice;
use crate::error::{BoxError, HomecastError};
use crate::tts::TtsResolver;
use crate::types::{Advertisement, DeviceInfo, HomecastConfig};

/// Parameters of one service lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    /// Service type to browse for
    pub service_type: String,
    /// How long to listen before returning
    pub timeout: Duration,
}

/// The service-discovery collaborator
#[async_trait]
pub trait ServiceLookup: Send + Sync {
    /// Stream advertisements for `query` into `sink` until the lookup's own
    /// deadline elapses
    ///
    /// The sender must not outlive the call: dropping it is what closes the
    /// advertisement queue.
    async fn lookup(
        &self,
        query: &LookupQuery,
        sink: mpsc::Sender<Advertisement>,
    ) -> Result<(), BoxError>;
}

/// Check whether an advertisement belongs to a supported receiver
#[must_use]
pub fn is_supported(advertisement: &Advertisement, marker: &str) -> bool {
    advertisement.has_field_prefix(marker)
}

/// Discover supported receivers and connect to each of them
///
/// Lookup failures and per-device connection failures are logged and
/// skipped; the devices connected so far are always returned, in the order
/// their advertisements arrived. Each connect is bounded by
/// `config.connection_timeout` and by `ctx`.
pub async fn discover_and_connect<L, F>(
    ctx: &CallContext,
    lookup: &L,
    factory: F,
    config: &HomecastConfig,
) -> Vec<CastDevice<F::Session>>
where
    L: ServiceLookup + ?Sized,
    F: SessionFactory,
{
    let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));

    // Cancelled when this call returns or is dropped by the caller
    let abandoned = CancellationToken::new();
    let _abandon_on_drop = abandoned.clone().drop_guard();

    let collector = tokio::spawn(collect(
        ctx.clone(),
        abandoned,
        rx,
        factory,
        Collector {
            marker: config.model_marker.clone(),
            connection_timeout: config.connection_timeout,
            tts: TtsResolver::new(config.tts_host.clone()),
        },
    ));

    let query = LookupQuery {
        service_type: config.service_type.clone(),
        timeout: config.discovery_timeout,
    };
    let looked_up = ctx
        .run(async {
            lookup
                .lookup(&query, tx)
                .await
                .map_err(|source| HomecastError::DiscoveryFailed {
                    message: format!("lookup of {} failed", query.service_type),
                    source: Some(source),
                })
        })
        .await;
    if let Err(e) = looked_up {
        error!(error = %e, "Failed to lookup devices");
    }

    match collector.await {
        Ok(devices) => devices,
        Err(e) => {
            error!(error = %e, "Discovery collector task failed");
            Vec::new()
        }
    }
}

/// Discover Google Home receivers over mDNS with the default configuration
pub async fn lookup_and_connect<F>(ctx: &CallContext, factory: F) -> Vec<CastDevice<F::Session>>
where
    F: SessionFactory,
{
    discover_and_connect(ctx, &MdnsLookup::new(), factory, &HomecastConfig::default()).await
}

struct Collector {
    marker: String,
    connection_timeout: Duration,
    tts: TtsResolver,
}

/// Connect advertised receivers until the queue closes
///
/// If `abandoned` fires first, every session opened so far is closed and
/// nothing is returned.
async fn collect<F>(
    ctx: CallContext,
    abandoned: CancellationToken,
    mut rx: mpsc::Receiver<Advertisement>,
    factory: F,
    settings: Collector,
) -> Vec<CastDevice<F::Session>>
where
    F: SessionFactory,
{
    let mut devices = Vec::new();

    loop {
        let received = tokio::select! {
            biased;
            () = abandoned.cancelled() => None,
            received = rx.recv() => Some(received),
        };
        let advertisement = match received {
            Some(Some(advertisement)) => advertisement,
            Some(None) => break,
            None => {
                close_all(&mut devices).await;
                return Vec::new();
            }
        };

        info!(
            address = %advertisement.address,
            port = advertisement.port,
            name = %advertisement.name,
            "Service entry detected"
        );

        if !is_supported(&advertisement, &settings.marker) {
            debug!(name = %advertisement.name, "Skipping unsupported receiver");
            continue;
        }

        let session = factory.session_for(advertisement.address, advertisement.port);
        let mut device = CastDevice::new(DeviceInfo::from_advertisement(&advertisement), session)
            .with_tts(settings.tts.clone());

        let connect_ctx = ctx.child_with_timeout(settings.connection_timeout);
        let connected = tokio::select! {
            biased;
            () = abandoned.cancelled() => None,
            connected = device.connect(&connect_ctx) => Some(connected),
        };
        match connected {
            Some(Ok(())) => devices.push(device),
            Some(Err(e)) => {
                error!(device = %device.name(), error = %e, "Failed to connect");
                device.close().await;
            }
            None => {
                device.close().await;
                close_all(&mut devices).await;
                return Vec::new();
            }
        }
    }

    devices
}

async fn close_all<S: ControlSession>(devices: &mut Vec<CastDevice<S>>) {
    warn!(devices = devices.len(), "Discovery abandoned, closing sessions");
    for mut device in devices.drain(..) {
        device.close().await;
    }
}
