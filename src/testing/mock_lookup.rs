//! Scripted service lookup.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::lock;
use crate::discovery::{LookupQuery, ServiceLookup};
use crate::error::BoxError;
use crate::types::Advertisement;

/// Replays advertisements, then optionally fails.
#[derive(Debug, Clone, Default)]
pub struct MockLookup {
    advertisements: Vec<Advertisement>,
    interval: Option<Duration>,
    failure: Option<String>,
    queries: Arc<Mutex<Vec<LookupQuery>>>,
}

impl MockLookup {
    /// Create a lookup that emits `advertisements` in order.
    #[must_use]
    pub fn new(advertisements: Vec<Advertisement>) -> Self {
        Self {
            advertisements,
            ..Self::default()
        }
    }

    /// Wait `interval` before each advertisement.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Fail with `message` after emitting the advertisements.
    #[must_use]
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Queries received so far.
    #[must_use]
    pub fn queries(&self) -> Vec<LookupQuery> {
        lock(&self.queries).clone()
    }
}

#[async_trait]
impl ServiceLookup for MockLookup {
    async fn lookup(
        &self,
        query: &LookupQuery,
        sink: mpsc::Sender<Advertisement>,
    ) -> Result<(), BoxError> {
        lock(&self.queries).push(query.clone());

        for advertisement in &self.advertisements {
            if let Some(interval) = self.interval {
                tokio::time::sleep(interval).await;
            }
            if sink.send(advertisement.clone()).await.is_err() {
                break;
            }
        }

        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}
