use thiserror::Error;

/// Boxed error returned by the external discovery and control collaborators
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while discovering or controlling cast receivers
#[derive(Debug, Error)]
pub enum HomecastError {
    // ===== Discovery Errors =====
    /// The service lookup failed
    #[error("discovery failed: {message}")]
    DiscoveryFailed {
        /// Description of the failure
        message: String,
        /// The underlying source of the error
        #[source]
        source: Option<BoxError>,
    },

    // ===== Connection Errors =====
    /// Failed to establish the control session
    #[error("connection failed to {device_name}: {source}")]
    ConnectionFailed {
        /// The name of the device
        device_name: String,
        /// The underlying source of the error
        #[source]
        source: BoxError,
    },

    /// The device session was already closed
    #[error("session closed: {device_name}")]
    SessionClosed {
        /// The name of the device
        device_name: String,
    },

    // ===== Playback Errors =====
    /// Control session is up but the media channel is unavailable
    #[error("media channel unavailable on {device_name}: {source}")]
    MediaUnavailable {
        /// The name of the device
        device_name: String,
        /// The underlying source of the error
        #[source]
        source: BoxError,
    },

    /// The receiver rejected or failed a media command
    #[error("{command} failed on {device_name}: {source}")]
    PlaybackFailed {
        /// The name of the device
        device_name: String,
        /// Wire name of the command that failed
        command: &'static str,
        /// The underlying source of the error
        #[source]
        source: BoxError,
    },

    // ===== Resolve Errors =====
    /// A text-to-speech URI could not be built
    #[error("malformed URI: {uri}")]
    MalformedUri {
        /// The string that failed to parse
        uri: String,
        /// The parse failure
        #[source]
        source: url::ParseError,
    },

    // ===== Context Errors =====
    /// The call context was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// The call context deadline elapsed
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl HomecastError {
    /// Check if this error came from the call context rather than the device
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// Name of the device this error concerns, if any
    #[must_use]
    pub fn device_name(&self) -> Option<&str> {
        match self {
            Self::ConnectionFailed { device_name, .. }
            | Self::SessionClosed { device_name }
            | Self::MediaUnavailable { device_name, .. }
            | Self::PlaybackFailed { device_name, .. } => Some(device_name),
            _ => None,
        }
    }
}

/// Result type alias for homecast operations
pub type Result<T> = std::result::Result<T, HomecastError>;
