use url::Url;

/// A playable resource with an optional display title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableItem {
    /// Location of the audio resource
    pub url: Url,

    /// Title shown by the receiver
    pub title: Option<String>,
}

impl PlayableItem {
    /// Create an item without a title
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self { url, title: None }
    }

    /// Builder method to set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl From<Url> for PlayableItem {
    fn from(url: Url) -> Self {
        Self::new(url)
    }
}
