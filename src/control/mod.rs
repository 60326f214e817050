//! Device-control collaborator seams
//!
//! The wire protocol to a receiver (TLS channel, framing, heartbeats,
//! authentication) lives behind these traits. A [`CastDevice`] drives one
//! [`ControlSession`]; the discovery orchestrator asks a
//! [`SessionFactory`] for a fresh session per receiver it finds.
//!
//! [`CastDevice`]: crate::device::CastDevice

use std::net::IpAddr;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::media::{MediaCommand, MediaStatus};

/// A control session to one receiver
///
/// Calling `connect` twice without `close` is left to the implementation.
#[async_trait]
pub trait ControlSession: Send {
    /// Media-channel handle produced by this session
    type Media: MediaController;

    /// Open the session
    async fn connect(&mut self) -> Result<(), BoxError>;

    /// Obtain the media-channel handle of an open session
    async fn media(&mut self) -> Result<Self::Media, BoxError>;

    /// Release the session
    ///
    /// Must tolerate a session that never connected or only partly did.
    async fn close(&mut self);
}

/// The media channel of a control session
#[async_trait]
pub trait MediaController: Send {
    /// Send a command and wait for the receiver's status or error
    async fn send(&mut self, command: MediaCommand) -> Result<MediaStatus, BoxError>;
}

/// Creates unconnected control sessions for discovered receivers
pub trait SessionFactory: Send + Sync + 'static {
    /// Session type produced
    type Session: ControlSession + 'static;

    /// Create a session targeting `address:port`
    fn session_for(&self, address: IpAddr, port: u16) -> Self::Session;
}
