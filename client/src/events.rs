use palsync_shared::{GuildId, PalId, PlayerUid};

/// Everything the embedding UI needs to react to, produced by one
/// [`crate::Client::receive`] pump.
///
/// Interactive failures (loading, saving) get their own variants so the UI
/// can surface them; passive push errors are only logged.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    /// The channel (re)opened.
    Connected,
    /// The channel dropped; a reconnect is already scheduled.
    Disconnected,
    /// Backend progress report, e.g. during a slow detail load.
    Progress { message: String },
    /// An `error` push from the backend (or the synthetic one emitted on
    /// connection loss).
    BackendError {
        message: String,
        trace: Option<String>,
    },
    /// Version probe answered.
    VersionReported { version: String },
    /// Settings snapshot replaced the local copy.
    SettingsUpdated,
    /// Bulk load seeded the summaries for a fresh session.
    SnapshotLoaded {
        player_count: usize,
        guild_count: usize,
    },
    /// A pal appeared server-side (capture, clone) and was merged in.
    PalAdded {
        player_uid: Option<PlayerUid>,
        pal_id: PalId,
    },
    /// Full player detail arrived and was merged into the store.
    PlayerLoaded { uid: PlayerUid },
    /// Full guild detail arrived and was merged into the store.
    GuildLoaded { id: GuildId },
    PlayerLoadFailed { uid: PlayerUid, message: String },
    GuildLoadFailed { id: GuildId, message: String },
    /// Summaries for a category arrived.
    PlayerSummariesLoaded { count: usize },
    GuildSummariesLoaded { count: usize },
    /// The backend acknowledged a submitted change-set.
    SaveAcknowledged,
    SaveFailed { message: String },
}
