//! Text-to-speech URL resolution
//!
//! Speech is synthesized by an unofficial web endpoint; this module only
//! builds the URL that the receiver will fetch. Nothing here touches the
//! network.


use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::error::{HomecastError, Result};
use crate::types::DEFAULT_TTS_HOST;

/// Resolves text into a playable speech URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsResolver {
    host: String,
}

impl Default for TtsResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TTS_HOST)
    }
}

impl TtsResolver {
    /// Create a resolver for the given endpoint host
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// Endpoint host
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build the speech URL for `text` spoken in `lang`
    ///
    /// # Errors
    ///
    /// Returns `MalformedUri` if the templated string is not a valid URL,
    /// which only happens with an invalid host.
    pub fn resolve(&self, text: &str, lang: &str) -> Result<Url> {
        let uri = format!(
            "https://{}/translate_tts?client=tw-ob&ie=UTF-8&q={}&tl={}",
            self.host,
            encode(text),
            encode(lang),
        );
        Url::parse(&uri).map_err(|source| HomecastError::MalformedUri { uri, source })
    }
}

/// Build the speech URL using the default endpoint host
///
/// # Errors
///
/// Returns `MalformedUri` if the URL cannot be parsed.
pub fn resolve(text: &str, lang: &str) -> Result<Url> {
    TtsResolver::default().resolve(text, lang)
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
