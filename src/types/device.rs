use std::net::{IpAddr, SocketAddr};

/// Descriptor field holding the receiver's friendly name
const FRIENDLY_NAME_FIELD: &str = "fn=";

/// A service record produced by the discovery collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    /// Full service instance name (e.g. `Google-Home-1234._googlecast._tcp.local.`)
    pub name: String,

    /// Resolved address of the receiver
    pub address: IpAddr,

    /// Control port of the receiver
    pub port: u16,

    /// Free-text descriptor fields, usually `key=value`
    pub info_fields: Vec<String>,
}

impl Advertisement {
    /// Create an advertisement
    pub fn new(
        name: impl Into<String>,
        address: IpAddr,
        port: u16,
        info_fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            port,
            info_fields: info_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether any descriptor field starts with `prefix`
    #[must_use]
    pub fn has_field_prefix(&self, prefix: &str) -> bool {
        self.info_fields.iter().any(|field| field.starts_with(prefix))
    }

    /// Value of the first `key=value` field with the given key
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.info_fields.iter().find_map(|field| {
            let (k, v) = field.split_once('=')?;
            (k == key).then_some(v)
        })
    }
}

/// Identity of a discovered receiver, detached from the discovery record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Human-readable device name (e.g., "Living Room speaker")
    pub name: String,

    /// Receiver address
    pub address: IpAddr,

    /// Receiver control port
    pub port: u16,

    /// Descriptor fields as advertised
    pub info_fields: Vec<String>,
}

impl DeviceInfo {
    /// Create device info from its parts
    pub fn new(name: impl Into<String>, address: IpAddr, port: u16) -> Self {
        Self {
            name: name.into(),
            address,
            port,
            info_fields: Vec::new(),
        }
    }

    /// Build device info from an advertisement
    ///
    /// The name comes from the `fn` field when present, otherwise from the
    /// instance name before its first dot.
    #[must_use]
    pub fn from_advertisement(advertisement: &Advertisement) -> Self {
        let name = advertisement
            .info_fields
            .iter()
            .find_map(|field| field.strip_prefix(FRIENDLY_NAME_FIELD))
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
            .or_else(|| {
                advertisement
                    .name
                    .split('.')
                    .next()
                    .filter(|name| !name.is_empty())
                    .map(ToString::to_string)
            })
            .unwrap_or_else(|| "Cast Device".to_string());

        Self {
            name,
            address: advertisement.address,
            port: advertisement.port,
            info_fields: advertisement.info_fields.clone(),
        }
    }

    /// Socket address of the receiver's control endpoint
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}
