//! Typed payloads for the frames whose `data` is more than a bare scalar.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::world::{
    guild::Guild,
    ids::{GuildId, PalId, PlayerUid},
    pal::Pal,
    player::Player,
    summary::{GuildSummary, PlayerSummary},
};

/// Payload of an `error` push and of error-marked replies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Reply to `get_player_details`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerDetailResponse {
    pub player: Player,
    pub player_id: PlayerUid,
}

/// Reply to `get_guild_details`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuildDetailResponse {
    pub guild: Guild,
    pub guild_id: GuildId,
}

/// Payload of an `add_pal` push: a pal captured or created server-side.
/// Without a player uid the pal lands in the universal pal store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PalAddedPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_uid: Option<PlayerUid>,
    pub pal: Pal,
}

/// Payload of a `loaded_save_files` push: the bulk load that seeds a fresh
/// session with summaries for every player and guild.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_name: Option<String>,
    #[serde(default)]
    pub players: HashMap<PlayerUid, PlayerSummary>,
    #[serde(default)]
    pub guilds: HashMap<GuildId, GuildSummary>,
}

/// Keyed summary maps returned by the category fetches.
pub type PlayerSummaries = HashMap<PlayerUid, PlayerSummary>;
pub type GuildSummaries = HashMap<GuildId, GuildSummary>;

/// Payload of the fire-and-forget `delete_pals` request mirroring a local
/// deletion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeletePalsPayload {
    pub pal_ids: Vec<PalId>,
}
