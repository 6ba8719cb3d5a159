use serde::{Deserialize, Serialize};

use super::ids::{GuildId, PlayerUid};

/// Lightweight projection of a player, held before full detail is fetched.
/// Never authoritative for field-level data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub uid: PlayerUid,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default)]
    pub pal_count: u32,
    #[serde(default)]
    pub loaded: bool,
}

/// Lightweight projection of a guild.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuildSummary {
    pub id: GuildId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_player_uid: Option<PlayerUid>,
    #[serde(default)]
    pub player_count: u32,
    #[serde(default)]
    pub base_count: u32,
    #[serde(default)]
    pub loaded: bool,
}
