//! The seam between the sans-IO session core and a real bidirectional
//! channel. Production embeds supply a [`Socket`] backed by a websocket
//! addressed with the client-session id in its URL path; tests use
//! [`mock::MockSocket`].

pub mod mock;

/// Opening the channel failed; the session will retry after its fixed delay.
#[derive(Debug)]
pub struct ConnectError;

/// The channel rejected an outbound frame (closed or closing).
#[derive(Debug)]
pub struct SendError;

/// The channel is no longer readable; the connection is considered lost.
#[derive(Debug)]
pub struct RecvError;

pub trait Socket: Send {
    /// Attempt to open the channel, yielding its send/receive halves.
    /// Called again for every reconnect attempt.
    fn connect(&mut self) -> Result<(Box<dyn FrameSender>, Box<dyn FrameReceiver>), ConnectError>;
}

pub trait FrameSender: Send {
    /// Transmit one text frame.
    fn send(&self, text: &str) -> Result<(), SendError>;
}

pub trait FrameReceiver: Send {
    /// Poll for the next inbound text frame. `Ok(None)` means nothing is
    /// pending right now; `Err` means the connection dropped.
    fn receive(&mut self) -> Result<Option<String>, RecvError>;
}
