use std::time::Duration;

use log::{info, warn};
use serde_json::json;

use palsync_shared::{
    DeletePalsPayload, Frame, FrameError, GuildId, MessageKind, PalId, PlayerUid, Timer,
};

use crate::{
    connection::{config::SessionConfig, session::Session},
    diff, dispatch,
    events::ClientEvent,
    loader::{FetchOutcome, LazyLoader},
    request::RequestManager,
    request::ResponseKey,
    store::EntityStore,
    transport::Socket,
};

/// What a save trigger actually did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A change-set with this many entries was transmitted.
    Submitted { entries: usize },
    /// Nothing was dirty; no request went out.
    NothingToSave,
    /// A previous change-set is still awaiting its acknowledgement.
    AlreadySaving,
}

/// The synchronization core, assembled. Owns the session, the correlation
/// registry, the entity store, and the lazy loader; everything runs on the
/// caller's single logical task.
///
/// Drive it by calling [`Client::receive`] from the embedding event loop
/// and reacting to the returned [`ClientEvent`]s.
pub struct Client {
    session: Session,
    requests: RequestManager,
    store: EntityStore,
    loader: LazyLoader,
    save_key: Option<ResponseKey>,
    save_grace: Option<Timer>,
    save_grace_delay: Duration,
}

impl Client {
    pub fn new(socket: Box<dyn Socket>, config: SessionConfig) -> Self {
        Self {
            session: Session::new(socket, &config),
            requests: RequestManager::new(),
            store: EntityStore::new(),
            loader: LazyLoader::new(),
            save_key: None,
            save_grace: None,
            save_grace_delay: config.save_grace_delay,
        }
    }

    pub fn connect(&mut self) {
        self.session.connect();
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_open()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// Outstanding correlated calls. Grows only if the backend never
    /// answers; entries survive reconnects by design.
    pub fn pending_requests(&self) -> usize {
        self.requests.pending_len()
    }

    /// The event pump. Drains the channel, resolves correlated replies
    /// (which never reach the push dispatch), routes pushes, advances the
    /// loader and the save indicator, and returns everything that happened.
    pub fn receive(&mut self) -> Vec<ClientEvent> {
        let mut events = Vec::new();

        let frames = self.session.receive();
        if self.session.take_opened() {
            events.push(ClientEvent::Connected);
        }
        if self.session.take_closed() {
            events.push(ClientEvent::Disconnected);
        }

        for frame in frames {
            if self.requests.accept_reply(&frame) {
                continue;
            }
            dispatch::dispatch(frame, &mut self.store, &mut events);
        }

        self.loader
            .poll(&mut self.requests, &mut self.store, &mut events);
        self.poll_save(&mut events);

        events
    }

    // Lazy loading

    pub fn select_player(&mut self, uid: PlayerUid) -> FetchOutcome {
        self.loader
            .select_player(uid, &mut self.store, &mut self.session, &mut self.requests)
    }

    pub fn load_guild(&mut self, id: GuildId) -> FetchOutcome {
        self.loader
            .load_guild(id, &self.store, &mut self.session, &mut self.requests)
    }

    pub fn request_player_summaries(&mut self) -> FetchOutcome {
        self.loader
            .request_player_summaries(&mut self.session, &mut self.requests)
    }

    pub fn request_guild_summaries(&mut self) -> FetchOutcome {
        self.loader
            .request_guild_summaries(&mut self.session, &mut self.requests)
    }

    // Saving

    /// Extract the current change-set and submit it as one batched request.
    /// An empty diff is a no-op: nothing is transmitted at all.
    pub fn save(&mut self) -> Result<SaveOutcome, FrameError> {
        if self.save_key.is_some() {
            return Ok(SaveOutcome::AlreadySaving);
        }
        let change_set = diff::extract_change_set(&mut self.store);
        if change_set.is_empty() {
            return Ok(SaveOutcome::NothingToSave);
        }
        let entries = change_set.len();
        let data = serde_json::to_value(&change_set)
            .map_err(|source| FrameError::Serialize { source })?;

        let (frame, key) = self.requests.queue(MessageKind::UpdateSaveFile, data);
        self.session.send(frame);
        self.save_key = Some(key);
        self.save_grace = Some(Timer::new(self.save_grace_delay));
        info!("Client: submitted change-set with {entries} entries");
        Ok(SaveOutcome::Submitted { entries })
    }

    /// Whether the autosave indicator should still be shown. Stays up for
    /// the grace period after a submit, giving the backend time to persist
    /// before the UI reports idle.
    pub fn is_saving(&self) -> bool {
        self.save_grace.is_some()
    }

    /// Ask the backend to write the loaded world out to disk.
    pub fn write_save(&mut self, target: &str) {
        self.session
            .send(Frame::new(MessageKind::SaveModdedSave, json!(target)));
    }

    /// Delete pals locally and mirror the deletion to the backend. The
    /// local removal is immediate; confirmation is asynchronous.
    pub fn delete_pals(&mut self, pal_ids: Vec<PalId>) -> usize {
        let removed = self.store.delete_pals(&pal_ids);
        if removed == 0 {
            return 0;
        }
        match serde_json::to_value(&DeletePalsPayload { pal_ids }) {
            Ok(data) => self.session.send(Frame::new(MessageKind::DeletePals, data)),
            Err(err) => warn!("Client: delete_pals payload not serializable: {err}"),
        }
        removed
    }

    fn poll_save(&mut self, events: &mut Vec<ClientEvent>) {
        if let Some(timer) = &self.save_grace {
            if timer.ringing() {
                self.save_grace = None;
            }
        }
        if let Some(key) = self.save_key.take() {
            match self.requests.take_response(&key) {
                None => self.save_key = Some(key),
                Some(Ok(_)) => events.push(ClientEvent::SaveAcknowledged),
                Some(Err(err)) => events.push(ClientEvent::SaveFailed {
                    message: err.to_string(),
                }),
            }
        }
    }
}
