use std::time::Duration;

/// mDNS service type advertised by cast receivers
pub const CAST_SERVICE_TYPE: &str = "_googlecast._tcp.local.";

/// Descriptor field prefix identifying Google Home receivers
pub const GOOGLE_HOME_MODEL_MARKER: &str = "md=Google Home";

/// Host of the text-to-speech endpoint
pub const DEFAULT_TTS_HOST: &str = "translate.google.com";

/// Configuration for discovery and device sessions
#[derive(Debug, Clone)]
pub struct HomecastConfig {
    /// Service type to look up (default: `_googlecast._tcp.local.`)
    pub service_type: String,

    /// Descriptor field prefix a receiver must advertise (default: `md=Google Home`)
    pub model_marker: String,

    /// How long the lookup listens for advertisements (default: 1 second)
    pub discovery_timeout: Duration,

    /// Upper bound for each device connect during discovery (default: 10 seconds)
    pub connection_timeout: Duration,

    /// Capacity of the advertisement queue between lookup and collector (default: 4)
    pub queue_capacity: usize,

    /// Host of the text-to-speech endpoint (default: `translate.google.com`)
    pub tts_host: String,
}

impl Default for HomecastConfig {
    fn default() -> Self {
        Self {
            service_type: CAST_SERVICE_TYPE.to_string(),
            model_marker: GOOGLE_HOME_MODEL_MARKER.to_string(),
            discovery_timeout: Duration::from_secs(1),
            connection_timeout: Duration::from_secs(10),
            queue_capacity: 4,
            tts_host: DEFAULT_TTS_HOST.to_string(),
        }
    }
}

impl HomecastConfig {
    /// Create a new config builder
    #[must_use]
    pub fn builder() -> HomecastConfigBuilder {
        HomecastConfigBuilder::default()
    }
}

/// Builder for `HomecastConfig`
#[derive(Debug, Clone, Default)]
pub struct HomecastConfigBuilder {
    config: HomecastConfig,
}

impl HomecastConfigBuilder {
    /// Set the service type to look up
    #[must_use]
    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.config.service_type = service_type.into();
        self
    }

    /// Set the descriptor field prefix receivers must advertise
    #[must_use]
    pub fn model_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.model_marker = marker.into();
        self
    }

    /// Set discovery timeout
    #[must_use]
    pub fn discovery_timeout(mut self, timeout: Duration) -> Self {
        self.config.discovery_timeout = timeout;
        self
    }

    /// Set per-device connection timeout
    #[must_use]
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.config.connection_timeout = timeout;
        self
    }

    /// Set advertisement queue capacity (clamped to at least 1)
    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity.max(1);
        self
    }

    /// Set the text-to-speech endpoint host
    #[must_use]
    pub fn tts_host(mut self, host: impl Into<String>) -> Self {
        self.config.tts_host = host.into();
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> HomecastConfig {
        self.config
    }
}
