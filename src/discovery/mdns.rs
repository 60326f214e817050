use std::collections::HashSet;
use std::net::IpAddr;

use async_trait::async_trait;
use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::{LookupQuery, ServiceLookup};
use crate::error::BoxError;
use crate::types::Advertisement;

/// Service lookup over multicast DNS
#[derive(Debug, Clone, Copy, Default)]
pub struct MdnsLookup;

impl MdnsLookup {
    /// Create an mDNS lookup
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ServiceLookup for MdnsLookup {
    async fn lookup(
        &self,
        query: &LookupQuery,
        sink: mpsc::Sender<Advertisement>,
    ) -> Result<(), BoxError> {
        let mdns = ServiceDaemon::new()?;

        let receiver = match mdns.browse(&query.service_type) {
            Ok(receiver) => receiver,
            Err(e) => {
                let _ = mdns.shutdown();
                return Err(e.into());
            }
        };

        let deadline = Instant::now() + query.timeout;
        // mDNS re-announces resolved services; forward each instance once
        let mut seen: HashSet<String> = HashSet::new();

        loop {
            let event = match tokio::time::timeout_at(deadline, receiver.recv_async()).await {
                Ok(Ok(event)) => event,
                Ok(Err(e)) => {
                    warn!(error = %e, "mDNS browse channel closed early");
                    break;
                }
                Err(_) => break,
            };

            let ServiceEvent::ServiceResolved(info) = event else {
                continue;
            };

            if seen.contains(info.get_fullname()) {
                continue;
            }

            let Some(advertisement) = to_advertisement(&info) else {
                debug!(name = %info.get_fullname(), "Resolved service has no address");
                continue;
            };
            seen.insert(info.get_fullname().to_string());

            if sink.send(advertisement).await.is_err() {
                break;
            }
        }

        let _ = mdns.stop_browse(&query.service_type);
        let _ = mdns.shutdown();
        Ok(())
    }
}

/// Convert a resolved service into an advertisement, preferring IPv4
fn to_advertisement(info: &ServiceInfo) -> Option<Advertisement> {
    let addresses = info.get_addresses();
    let address: IpAddr = addresses
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addresses.iter().next())
        .copied()?;

    let info_fields = info
        .get_properties()
        .iter()
        .map(|prop| match prop.val() {
            Some(_) => format!("{}={}", prop.key(), prop.val_str()),
            None => prop.key().to_string(),
        })
        .collect::<Vec<_>>();

    Some(Advertisement::new(
        info.get_fullname(),
        address,
        info.get_port(),
        info_fields,
    ))
}
