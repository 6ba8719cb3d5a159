use log::warn;
use serde_json::json;

use palsync_shared::{
    GuildDetailResponse, GuildId, GuildSummaries, MessageKind, PlayerDetailResponse,
    PlayerSummaries, PlayerUid,
};

use crate::{
    connection::session::Session,
    events::ClientEvent,
    request::{RequestManager, ResponseKey},
    store::EntityStore,
};

/// What a detail or summary request actually did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Full detail was already in the store; no request went out.
    Cached,
    /// Exactly one request was issued.
    Requested,
    /// A fetch for this category is already in flight; the call was
    /// dropped. Not an error.
    AlreadyLoading,
}

struct DetailFetch<I> {
    id: I,
    key: ResponseKey,
    /// Select the entity as active once it arrives (the user is navigating
    /// to it).
    navigate: bool,
}

/// Fetches full detail for one entity at a time, on first access, and keeps
/// only summaries for the rest. Single-flight per category: while a player
/// detail is loading, further player requests are dropped, whichever id
/// they name.
pub struct LazyLoader {
    player_fetch: Option<DetailFetch<PlayerUid>>,
    guild_fetch: Option<DetailFetch<GuildId>>,
    player_summaries_fetch: Option<ResponseKey>,
    guild_summaries_fetch: Option<ResponseKey>,
}

impl LazyLoader {
    pub fn new() -> Self {
        Self {
            player_fetch: None,
            guild_fetch: None,
            player_summaries_fetch: None,
            guild_summaries_fetch: None,
        }
    }

    pub fn player_fetch_in_flight(&self) -> bool {
        self.player_fetch.is_some()
    }

    pub fn guild_fetch_in_flight(&self) -> bool {
        self.guild_fetch.is_some()
    }

    /// Navigate to a player: select it if cached, otherwise fetch its
    /// detail and select it on arrival.
    pub fn select_player(
        &mut self,
        uid: PlayerUid,
        store: &mut EntityStore,
        session: &mut Session,
        requests: &mut RequestManager,
    ) -> FetchOutcome {
        if store.select_player(uid).is_ok() {
            return FetchOutcome::Cached;
        }
        if self.player_fetch.is_some() {
            return FetchOutcome::AlreadyLoading;
        }
        let (frame, key) = requests.queue(MessageKind::GetPlayerDetails, json!(uid));
        session.send(frame);
        self.player_fetch = Some(DetailFetch {
            id: uid,
            key,
            navigate: true,
        });
        FetchOutcome::Requested
    }

    /// Fetch a guild's full detail without changing the active selection.
    pub fn load_guild(
        &mut self,
        id: GuildId,
        store: &EntityStore,
        session: &mut Session,
        requests: &mut RequestManager,
    ) -> FetchOutcome {
        if store.guild(&id).is_some() {
            return FetchOutcome::Cached;
        }
        if self.guild_fetch.is_some() {
            return FetchOutcome::AlreadyLoading;
        }
        let (frame, key) = requests.queue(MessageKind::GetGuildDetails, json!(id));
        session.send(frame);
        self.guild_fetch = Some(DetailFetch {
            id,
            key,
            navigate: false,
        });
        FetchOutcome::Requested
    }

    pub fn request_player_summaries(
        &mut self,
        session: &mut Session,
        requests: &mut RequestManager,
    ) -> FetchOutcome {
        if self.player_summaries_fetch.is_some() {
            return FetchOutcome::AlreadyLoading;
        }
        let (frame, key) = requests.queue(MessageKind::GetPlayerSummaries, json!(null));
        session.send(frame);
        self.player_summaries_fetch = Some(key);
        FetchOutcome::Requested
    }

    pub fn request_guild_summaries(
        &mut self,
        session: &mut Session,
        requests: &mut RequestManager,
    ) -> FetchOutcome {
        if self.guild_summaries_fetch.is_some() {
            return FetchOutcome::AlreadyLoading;
        }
        let (frame, key) = requests.queue(MessageKind::GetGuildSummaries, json!(null));
        session.send(frame);
        self.guild_summaries_fetch = Some(key);
        FetchOutcome::Requested
    }

    /// Check every in-flight fetch against the resolved replies. Errors —
    /// explicit or malformed — clear the in-flight flag so a retry is
    /// possible, and never crash the store.
    pub fn poll(
        &mut self,
        requests: &mut RequestManager,
        store: &mut EntityStore,
        events: &mut Vec<ClientEvent>,
    ) {
        if let Some(fetch) = self.player_fetch.take() {
            match requests.take_response(&fetch.key) {
                None => self.player_fetch = Some(fetch),
                Some(Ok(value)) => match serde_json::from_value::<PlayerDetailResponse>(value) {
                    Ok(response) => {
                        let uid = response.player_id;
                        store.insert_player_detail(response.player);
                        if fetch.navigate && store.select_player(uid).is_err() {
                            warn!("LazyLoader: loaded player {uid} vanished before selection");
                        }
                        events.push(ClientEvent::PlayerLoaded { uid });
                    }
                    Err(err) => {
                        warn!("LazyLoader: malformed player detail reply: {err}");
                        events.push(ClientEvent::PlayerLoadFailed {
                            uid: fetch.id,
                            message: err.to_string(),
                        });
                    }
                },
                Some(Err(err)) => {
                    events.push(ClientEvent::PlayerLoadFailed {
                        uid: fetch.id,
                        message: err.to_string(),
                    });
                }
            }
        }

        if let Some(fetch) = self.guild_fetch.take() {
            match requests.take_response(&fetch.key) {
                None => self.guild_fetch = Some(fetch),
                Some(Ok(value)) => match serde_json::from_value::<GuildDetailResponse>(value) {
                    Ok(response) => {
                        let id = response.guild_id;
                        store.insert_guild_detail(response.guild);
                        events.push(ClientEvent::GuildLoaded { id });
                    }
                    Err(err) => {
                        warn!("LazyLoader: malformed guild detail reply: {err}");
                        events.push(ClientEvent::GuildLoadFailed {
                            id: fetch.id,
                            message: err.to_string(),
                        });
                    }
                },
                Some(Err(err)) => {
                    events.push(ClientEvent::GuildLoadFailed {
                        id: fetch.id,
                        message: err.to_string(),
                    });
                }
            }
        }

        if let Some(key) = self.player_summaries_fetch.take() {
            match requests.take_response(&key) {
                None => self.player_summaries_fetch = Some(key),
                Some(Ok(value)) => match serde_json::from_value::<PlayerSummaries>(value) {
                    Ok(summaries) => {
                        events.push(ClientEvent::PlayerSummariesLoaded {
                            count: summaries.len(),
                        });
                        store.set_player_summaries(summaries);
                    }
                    Err(err) => warn!("LazyLoader: malformed player summaries reply: {err}"),
                },
                Some(Err(err)) => {
                    events.push(ClientEvent::BackendError {
                        message: err.to_string(),
                        trace: None,
                    });
                }
            }
        }

        if let Some(key) = self.guild_summaries_fetch.take() {
            match requests.take_response(&key) {
                None => self.guild_summaries_fetch = Some(key),
                Some(Ok(value)) => match serde_json::from_value::<GuildSummaries>(value) {
                    Ok(summaries) => {
                        events.push(ClientEvent::GuildSummariesLoaded {
                            count: summaries.len(),
                        });
                        store.set_guild_summaries(summaries);
                    }
                    Err(err) => warn!("LazyLoader: malformed guild summaries reply: {err}"),
                },
                Some(Err(err)) => {
                    events.push(ClientEvent::BackendError {
                        message: err.to_string(),
                        trace: None,
                    });
                }
            }
        }
    }
}

impl Default for LazyLoader {
    fn default() -> Self {
        Self::new()
    }
}
