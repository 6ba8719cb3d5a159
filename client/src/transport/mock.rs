//! In-memory transport for tests and simulations. A [`MockLink`] is the
//! far end of the channel: tests clone it to inject inbound frames, inspect
//! outbound ones, and sever or refuse connections.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use palsync_shared::Frame;

use super::{ConnectError, FrameReceiver, FrameSender, RecvError, SendError, Socket};

struct LinkState {
    open: bool,
    refuse_connects: bool,
    /// Bumped on every successful connect; stale halves from a severed
    /// connection stop working even after a reconnect.
    generation: u64,
    to_client: VecDeque<String>,
    from_client: Vec<String>,
    connect_attempts: u32,
}

/// Shared far-end handle. Cheap to clone; all clones observe one channel.
#[derive(Clone)]
pub struct MockLink {
    state: Arc<Mutex<LinkState>>,
}

impl MockLink {
    fn lock(&self) -> MutexGuard<'_, LinkState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    pub fn connect_attempts(&self) -> u32 {
        self.lock().connect_attempts
    }

    /// Queue an inbound frame for the client to pick up on its next poll.
    pub fn push_inbound(&self, frame: &Frame) {
        let text = frame.to_text().expect("mock frame must serialize");
        self.lock().to_client.push_back(text);
    }

    /// Queue raw inbound text, for malformed-frame tests.
    pub fn push_inbound_text(&self, text: &str) {
        self.lock().to_client.push_back(text.to_owned());
    }

    /// Drain everything the client transmitted since the last call.
    pub fn take_outbound(&self) -> Vec<Frame> {
        let texts = std::mem::take(&mut self.lock().from_client);
        texts
            .iter()
            .map(|text| Frame::from_text(text).expect("client sent malformed frame"))
            .collect()
    }

    /// Drop the connection abnormally. Frames queued for the client are
    /// discarded, as a real channel would lose them.
    pub fn sever(&self) {
        let mut state = self.lock();
        state.open = false;
        state.to_client.clear();
    }

    /// Make subsequent connect attempts fail until re-enabled.
    pub fn refuse_connects(&self, refuse: bool) {
        self.lock().refuse_connects = refuse;
    }
}

/// Client-side [`Socket`] bound to a [`MockLink`].
pub struct MockSocket {
    state: Arc<Mutex<LinkState>>,
}

impl MockSocket {
    /// Build a socket plus the far-end handle observing it.
    pub fn new() -> (Self, MockLink) {
        let state = Arc::new(Mutex::new(LinkState {
            open: false,
            refuse_connects: false,
            generation: 0,
            to_client: VecDeque::new(),
            from_client: Vec::new(),
            connect_attempts: 0,
        }));
        (
            Self {
                state: state.clone(),
            },
            MockLink { state },
        )
    }
}

impl Socket for MockSocket {
    fn connect(&mut self) -> Result<(Box<dyn FrameSender>, Box<dyn FrameReceiver>), ConnectError> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.connect_attempts += 1;
        if state.refuse_connects {
            return Err(ConnectError);
        }
        state.open = true;
        state.generation += 1;
        let generation = state.generation;
        drop(state);

        let sender = MockSender {
            state: self.state.clone(),
            generation,
        };
        let receiver = MockReceiver {
            state: self.state.clone(),
            generation,
        };
        Ok((Box::new(sender), Box::new(receiver)))
    }
}

struct MockSender {
    state: Arc<Mutex<LinkState>>,
    generation: u64,
}

impl FrameSender for MockSender {
    fn send(&self, text: &str) -> Result<(), SendError> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !state.open || state.generation != self.generation {
            return Err(SendError);
        }
        state.from_client.push(text.to_owned());
        Ok(())
    }
}

struct MockReceiver {
    state: Arc<Mutex<LinkState>>,
    generation: u64,
}

impl FrameReceiver for MockReceiver {
    fn receive(&mut self) -> Result<Option<String>, RecvError> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !state.open || state.generation != self.generation {
            return Err(RecvError);
        }
        Ok(state.to_client.pop_front())
    }
}
