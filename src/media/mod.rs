//! Content references and media commands for cast receivers
//!
//! Builds the protocol-facing item descriptors (`MediaItem`) from playable
//! resources, and the three command shapes the media channel accepts:
//! `LOAD`, `QUEUE_LOAD` and `QUEUE_INSERT`.


use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::PlayableItem;

/// Content type sent for every item
pub const CONTENT_TYPE: &str = "audio/mp3";

/// Stream type sent for every item
pub const STREAM_TYPE: &str = "BUFFERED";

/// Metadata kind tag for music tracks
pub const METADATA_TYPE_MUSIC_TRACK: u32 = 3;

/// Protocol-facing descriptor of one playable item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Resource locator as a string
    pub content_id: String,
    /// MIME type of the content
    pub content_type: &'static str,
    /// Stream kind
    pub stream_type: &'static str,
    /// Display metadata, attached on queue paths only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MediaMetadata>,
}

/// Display metadata of a media item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    /// Metadata kind tag
    pub metadata_type: u32,
    /// Display title, omitted on the wire when empty
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
}

/// One entry of a queue command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueItem {
    /// The item to queue
    pub media: MediaItem,
}

/// Build the reference for a single `LOAD`, without metadata
#[must_use]
pub fn build_single(url: &Url) -> MediaItem {
    MediaItem {
        content_id: url.as_str().to_string(),
        content_type: CONTENT_TYPE,
        stream_type: STREAM_TYPE,
        metadata: None,
    }
}

/// Build queue references, one per item, in input order
///
/// Every reference carries metadata; a missing title becomes an empty one.
#[must_use]
pub fn build_many(items: &[PlayableItem]) -> Vec<MediaItem> {
    items
        .iter()
        .map(|item| MediaItem {
            metadata: Some(MediaMetadata {
                metadata_type: METADATA_TYPE_MUSIC_TRACK,
                title: item.title.clone().unwrap_or_default(),
            }),
            ..build_single(&item.url)
        })
        .collect()
}

/// A command on the receiver's media channel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum MediaCommand {
    /// Load and play a single item
    Load {
        /// The item to load
        media: MediaItem,
        /// Start position in seconds
        current_time: f64,
        /// Start playing once loaded
        autoplay: bool,
    },
    /// Replace the queue
    QueueLoad {
        /// Ordered queue entries
        items: Vec<QueueItem>,
        /// Index of the entry to start with
        start_index: u32,
    },
    /// Add entries to the existing queue at the receiver's default position
    QueueInsert {
        /// Ordered entries to insert
        items: Vec<QueueItem>,
    },
}

impl MediaCommand {
    /// `LOAD` that starts playing `media` from the beginning
    #[must_use]
    pub fn load(media: MediaItem) -> Self {
        Self::Load {
            media,
            current_time: 0.0,
            autoplay: true,
        }
    }

    /// `QUEUE_LOAD` that starts at the first entry
    #[must_use]
    pub fn queue_load(items: Vec<MediaItem>) -> Self {
        Self::QueueLoad {
            items: wrap(items),
            start_index: 0,
        }
    }

    /// `QUEUE_INSERT` with no explicit insertion index
    #[must_use]
    pub fn queue_insert(items: Vec<MediaItem>) -> Self {
        Self::QueueInsert { items: wrap(items) }
    }

    /// Wire name of the command
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "LOAD",
            Self::QueueLoad { .. } => "QUEUE_LOAD",
            Self::QueueInsert { .. } => "QUEUE_INSERT",
        }
    }

    /// JSON message body for the media namespace
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_payload(&self, request_id: u32) -> serde_json::Result<serde_json::Value> {
        let mut payload = serde_json::to_value(self)?;
        if let Some(object) = payload.as_object_mut() {
            object.insert("requestId".to_string(), request_id.into());
        }
        Ok(payload)
    }
}

fn wrap(items: Vec<MediaItem>) -> Vec<QueueItem> {
    items.into_iter().map(|media| QueueItem { media }).collect()
}

/// Status reported by the receiver after a media command
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaStatus {
    /// Media session the command applied to
    pub media_session_id: Option<i64>,
    /// Player state (e.g. `PLAYING`, `BUFFERING`)
    pub player_state: Option<String>,
    /// Queue item currently selected
    pub current_item_id: Option<i64>,
}
