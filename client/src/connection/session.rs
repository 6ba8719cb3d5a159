use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info, warn};
use serde_json::json;

use palsync_shared::{Frame, MessageKind, Timer};

use crate::transport::{FrameReceiver, FrameSender, Socket};

use super::config::SessionConfig;

struct Io {
    sender: Box<dyn FrameSender>,
    receiver: Box<dyn FrameReceiver>,
}

enum TransmitError {
    /// The channel is gone; the frame was not sent and closure handling ran.
    Closed,
    /// The frame could not be serialized and was dropped.
    Dropped,
}

/// Owns the persistent connection: connect, unconditional fixed-delay
/// reconnect, outbound queueing until the channel is open, and inbound
/// frame draining.
///
/// Connection loss is surfaced to the caller as a synthetic `error`-kind
/// push in the [`Session::receive`] output, so the same error path that
/// handles backend errors can redirect the UI. Frames sent while the
/// channel is down are deferred, never dropped.
pub struct Session {
    socket: Box<dyn Socket>,
    reconnect_delay: Duration,
    io: Option<Io>,
    retry: Option<Timer>,
    outbound: VecDeque<Frame>,
    synthetic: Vec<Frame>,
    opened: bool,
    closed: bool,
}

impl Session {
    pub fn new(socket: Box<dyn Socket>, config: &SessionConfig) -> Self {
        Self {
            socket,
            reconnect_delay: config.reconnect_delay,
            io: None,
            retry: None,
            outbound: VecDeque::new(),
            synthetic: Vec::new(),
            opened: false,
            closed: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.io.is_some()
    }

    /// Number of frames deferred until the channel opens.
    pub fn queued_frames(&self) -> usize {
        self.outbound.len()
    }

    /// Open the channel. Idempotent: a no-op while the channel is open or a
    /// reconnect is already scheduled.
    pub fn connect(&mut self) {
        if self.io.is_some() {
            debug!("Session: connect() while open is a no-op");
            return;
        }
        if self.retry.is_some() {
            debug!("Session: connect() while a reconnect is scheduled is a no-op");
            return;
        }
        self.try_open();
    }

    /// Transmit a frame, or defer it until the channel opens.
    pub fn send(&mut self, frame: Frame) {
        if self.io.is_none() {
            self.outbound.push_back(frame);
            return;
        }
        if let Err(TransmitError::Closed) = self.transmit(&frame) {
            self.outbound.push_front(frame);
        }
    }

    /// Advance the session: attempt a due reconnect, then drain every
    /// pending inbound frame in arrival order. Synthetic pushes (connection
    /// loss) are included in the output.
    pub fn receive(&mut self) -> Vec<Frame> {
        if let Some(timer) = &self.retry {
            if timer.ringing() {
                self.retry = None;
                self.try_open();
            }
        }

        let mut frames: Vec<Frame> = std::mem::take(&mut self.synthetic);

        let mut lost = false;
        if let Some(io) = self.io.as_mut() {
            loop {
                match io.receiver.receive() {
                    Ok(Some(text)) => match Frame::from_text(&text) {
                        Ok(frame) => frames.push(frame),
                        Err(err) => warn!("Session: dropping inbound frame: {err}"),
                    },
                    Ok(None) => break,
                    Err(_) => {
                        lost = true;
                        break;
                    }
                }
            }
        }
        if lost {
            self.handle_closure();
        }

        frames.append(&mut self.synthetic);
        frames
    }

    /// True once per successful open, then false until the next one.
    pub fn take_opened(&mut self) -> bool {
        std::mem::take(&mut self.opened)
    }

    /// True once per detected closure, then false until the next one.
    pub fn take_closed(&mut self) -> bool {
        std::mem::take(&mut self.closed)
    }

    fn try_open(&mut self) {
        match self.socket.connect() {
            Ok((sender, receiver)) => {
                info!("Session: channel open");
                self.io = Some(Io { sender, receiver });
                self.retry = None;
                self.opened = true;
                // Ask the backend to replay current truth to the fresh
                // connection before anything queued goes out.
                let _ = self.transmit(&Frame::push(MessageKind::SyncAppState));
                let _ = self.transmit(&Frame::push(MessageKind::GetVersion));
                self.flush_outbound();
            }
            Err(_) => {
                debug!(
                    "Session: connect attempt failed; retrying in {:?}",
                    self.reconnect_delay
                );
                self.retry = Some(Timer::new(self.reconnect_delay));
            }
        }
    }

    fn flush_outbound(&mut self) {
        while self.io.is_some() {
            let Some(frame) = self.outbound.pop_front() else {
                break;
            };
            match self.transmit(&frame) {
                Ok(()) | Err(TransmitError::Dropped) => {}
                Err(TransmitError::Closed) => {
                    self.outbound.push_front(frame);
                    break;
                }
            }
        }
    }

    fn transmit(&mut self, frame: &Frame) -> Result<(), TransmitError> {
        let text = match frame.to_text() {
            Ok(text) => text,
            Err(err) => {
                warn!("Session: dropping outbound frame: {err}");
                return Err(TransmitError::Dropped);
            }
        };
        let sent = match self.io.as_ref() {
            Some(io) => io.sender.send(&text),
            None => return Err(TransmitError::Closed),
        };
        if sent.is_err() {
            self.handle_closure();
            return Err(TransmitError::Closed);
        }
        Ok(())
    }

    fn handle_closure(&mut self) {
        if self.io.take().is_none() {
            return;
        }
        warn!(
            "Session: connection to backend lost; reconnecting in {:?}",
            self.reconnect_delay
        );
        self.closed = true;
        self.retry = Some(Timer::new(self.reconnect_delay));
        self.synthetic.push(Frame::new(
            MessageKind::Error,
            json!({ "message": "Connection to the backend was lost" }),
        ));
    }
}
