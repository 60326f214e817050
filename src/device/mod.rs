//! Device sessions
//!
//! A [`CastDevice`] is the handle to one discovered receiver. It owns the
//! receiver's identity and its control session exclusively, and turns
//! playback requests into media commands. Calls on one device are not
//! serialized internally; callers issuing concurrent requests to the same
//! device must order them themselves.


use std::net::{IpAddr, SocketAddr};

use tracing::{debug, info};
use url::Url;

use crate::context::CallContext;
use crate::control::{ControlSession, MediaController};
use crate::error::{HomecastError, Result};
use crate::media::{self, MediaCommand, MediaStatus};
use crate::tts::TtsResolver;
use crate::types::{DeviceInfo, PlayableItem};

/// Lifecycle of a device's control session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, not yet connected
    Disconnected,
    /// Session open
    Connected,
    /// Session released; the device cannot be reused
    Closed,
}

/// A discovered receiver with its control session
#[derive(Debug)]
pub struct CastDevice<S> {
    info: DeviceInfo,
    session: S,
    state: SessionState,
    tts: TtsResolver,
}

impl<S: ControlSession> CastDevice<S> {
    /// Wrap an unconnected session
    #[must_use]
    pub fn new(info: DeviceInfo, session: S) -> Self {
        Self {
            info,
            session,
            state: SessionState::Disconnected,
            tts: TtsResolver::default(),
        }
    }

    /// Use a specific text-to-speech resolver
    #[must_use]
    pub fn with_tts(mut self, tts: TtsResolver) -> Self {
        self.tts = tts;
        self
    }

    /// Device identity
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Device name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Device address
    #[must_use]
    pub fn address(&self) -> IpAddr {
        self.info.address
    }

    /// Device control port
    #[must_use]
    pub fn port(&self) -> u16 {
        self.info.port
    }

    /// Socket address of the control endpoint
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.info.socket_addr()
    }

    /// Current session state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check whether the session is open
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    /// Open the control session
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailed` if the session cannot be established,
    /// `SessionClosed` after `close`, or a cancellation error from `ctx`.
    pub async fn connect(&mut self, ctx: &CallContext) -> Result<()> {
        self.ensure_open()?;

        let Self {
            info: identity,
            session,
            ..
        } = self;
        ctx.run(async {
            session
                .connect()
                .await
                .map_err(|source| HomecastError::ConnectionFailed {
                    device_name: identity.name.clone(),
                    source,
                })
        })
        .await?;

        self.state = SessionState::Connected;
        info!(device = %self.info.name, addr = %self.socket_addr(), "Connected");
        Ok(())
    }

    /// Release the control session
    ///
    /// Safe to call repeatedly or after a failed connect.
    pub async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.session.close().await;
        self.state = SessionState::Closed;
        debug!(device = %self.info.name, "Session closed");
    }

    /// Play a single resource from the beginning
    ///
    /// # Errors
    ///
    /// Returns `MediaUnavailable` if the media channel cannot be obtained,
    /// `PlaybackFailed` if the receiver rejects the load, or a cancellation
    /// error from `ctx`.
    pub async fn play(&mut self, ctx: &CallContext, url: &Url) -> Result<()> {
        let item = media::build_single(url);
        info!(device = %self.info.name, content_id = %item.content_id, "Load media");
        self.send(ctx, MediaCommand::load(item)).await
    }

    /// Speak `text` in `lang` through the text-to-speech endpoint
    ///
    /// # Errors
    ///
    /// Returns `MalformedUri` without contacting the device if the speech
    /// URL cannot be built, otherwise any error from [`Self::play`].
    pub async fn speak(&mut self, ctx: &CallContext, text: &str, lang: &str) -> Result<()> {
        let url = self.tts.resolve(text, lang)?;
        self.play(ctx, &url).await
    }

    /// Replace the receiver's queue with `items`, starting at the first
    ///
    /// # Errors
    ///
    /// Same as [`Self::play`].
    pub async fn queue_load(&mut self, ctx: &CallContext, items: &[PlayableItem]) -> Result<()> {
        info!(device = %self.info.name, items = items.len(), "Queue load");
        self.send(ctx, MediaCommand::queue_load(media::build_many(items)))
            .await
    }

    /// Insert `items` into the receiver's existing queue
    ///
    /// The insertion point is chosen by the receiver.
    ///
    /// # Errors
    ///
    /// Same as [`Self::play`].
    pub async fn queue_insert(&mut self, ctx: &CallContext, items: &[PlayableItem]) -> Result<()> {
        info!(device = %self.info.name, items = items.len(), "Queue insert");
        self.send(ctx, MediaCommand::queue_insert(media::build_many(items)))
            .await
    }

    async fn send(&mut self, ctx: &CallContext, command: MediaCommand) -> Result<()> {
        self.ensure_open()?;

        let Self {
            info: identity,
            session,
            ..
        } = self;
        let command_name = command.name();
        let status: MediaStatus = ctx
            .run(async {
                let mut channel =
                    session
                        .media()
                        .await
                        .map_err(|source| HomecastError::MediaUnavailable {
                            device_name: identity.name.clone(),
                            source,
                        })?;
                channel
                    .send(command)
                    .await
                    .map_err(|source| HomecastError::PlaybackFailed {
                        device_name: identity.name.clone(),
                        command: command_name,
                        source,
                    })
            })
            .await?;

        debug!(
            device = %self.info.name,
            command = command_name,
            media_session_id = ?status.media_session_id,
            player_state = ?status.player_state,
            "Media status"
        );
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state == SessionState::Closed {
            return Err(HomecastError::SessionClosed {
                device_name: self.info.name.clone(),
            });
        }
        Ok(())
    }
}
