//! Scripted control sessions.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::lock;
use crate::control::{ControlSession, MediaController, SessionFactory};
use crate::error::BoxError;
use crate::media::{MediaCommand, MediaStatus};

/// How a mock session responds.
#[derive(Debug, Clone, Default)]
pub struct MockBehavior {
    /// Reject `connect`.
    pub fail_connect: bool,
    /// Delay before `connect` resolves.
    pub connect_delay: Option<Duration>,
    /// Reject requests for the media channel.
    pub fail_media: bool,
    /// Reject every media command.
    pub fail_commands: bool,
}

impl MockBehavior {
    /// A session whose connect is refused.
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            fail_connect: true,
            ..Self::default()
        }
    }

    /// A session whose connect never completes.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            connect_delay: Some(Duration::MAX),
            ..Self::default()
        }
    }
}

/// Everything a mock session observed.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    /// Number of `connect` calls.
    pub connects: usize,
    /// Number of `close` calls.
    pub closes: usize,
    /// Number of media-channel requests.
    pub media_requests: usize,
    /// Commands received, in order.
    pub commands: Vec<MediaCommand>,
}

/// A control session driven by a [`MockBehavior`].
#[derive(Debug, Clone)]
pub struct MockSession {
    behavior: MockBehavior,
    log: Arc<Mutex<SessionLog>>,
}

impl MockSession {
    /// Create a session with the given behaviour.
    #[must_use]
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            log: Arc::new(Mutex::new(SessionLog::default())),
        }
    }

    /// Snapshot of what this session has observed.
    #[must_use]
    pub fn log(&self) -> SessionLog {
        lock(&self.log).clone()
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new(MockBehavior::default())
    }
}

#[async_trait]
impl ControlSession for MockSession {
    type Media = MockMedia;

    async fn connect(&mut self) -> Result<(), BoxError> {
        lock(&self.log).connects += 1;
        match self.behavior.connect_delay {
            Some(delay) if delay == Duration::MAX => std::future::pending::<()>().await,
            Some(delay) => tokio::time::sleep(delay).await,
            None => {}
        }
        if self.behavior.fail_connect {
            return Err("connection refused".into());
        }
        Ok(())
    }

    async fn media(&mut self) -> Result<MockMedia, BoxError> {
        lock(&self.log).media_requests += 1;
        if self.behavior.fail_media {
            return Err("media namespace unavailable".into());
        }
        Ok(MockMedia {
            fail: self.behavior.fail_commands,
            log: Arc::clone(&self.log),
        })
    }

    async fn close(&mut self) {
        lock(&self.log).closes += 1;
    }
}

/// Media channel of a [`MockSession`].
#[derive(Debug)]
pub struct MockMedia {
    fail: bool,
    log: Arc<Mutex<SessionLog>>,
}

#[async_trait]
impl MediaController for MockMedia {
    async fn send(&mut self, command: MediaCommand) -> Result<MediaStatus, BoxError> {
        let mut log = lock(&self.log);
        log.commands.push(command);
        if self.fail {
            return Err("LOAD_FAILED".into());
        }
        let session_id = i64::try_from(log.commands.len()).unwrap_or(i64::MAX);
        Ok(MediaStatus {
            media_session_id: Some(session_id),
            player_state: Some("BUFFERING".to_string()),
            current_item_id: None,
        })
    }
}

/// Hands out [`MockSession`]s scripted per receiver address.
#[derive(Debug, Clone, Default)]
pub struct MockSessionFactory {
    behaviors: HashMap<SocketAddr, MockBehavior>,
    created: Arc<Mutex<Vec<(SocketAddr, MockSession)>>>,
}

impl MockSessionFactory {
    /// Create a factory whose sessions all succeed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the session created for `addr`.
    #[must_use]
    pub fn with_behavior(mut self, addr: SocketAddr, behavior: MockBehavior) -> Self {
        self.behaviors.insert(addr, behavior);
        self
    }

    /// Addresses sessions were created for, in creation order.
    #[must_use]
    pub fn created(&self) -> Vec<SocketAddr> {
        lock(&self.created).iter().map(|(addr, _)| *addr).collect()
    }

    /// Log of the most recent session created for `addr`.
    #[must_use]
    pub fn log_for(&self, addr: SocketAddr) -> Option<SessionLog> {
        lock(&self.created)
            .iter()
            .rev()
            .find(|(a, _)| *a == addr)
            .map(|(_, session)| session.log())
    }
}

impl SessionFactory for MockSessionFactory {
    type Session = MockSession;

    fn session_for(&self, address: IpAddr, port: u16) -> MockSession {
        let addr = SocketAddr::new(address, port);
        let behavior = self.behaviors.get(&addr).cloned().unwrap_or_default();
        let session = MockSession::new(behavior);
        lock(&self.created).push((addr, session.clone()));
        session
    }
}
