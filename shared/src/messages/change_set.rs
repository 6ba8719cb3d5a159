use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::world::{
    guild::Guild,
    ids::{BaseId, ContainerId, GuildId, PalId, PlayerUid},
    item_container::ItemContainer,
    pal::Pal,
    player::Player,
};

/// The changed storage stacks of one base. Only containers whose tag was
/// dirty at extraction time appear here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BasePatch {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub storage_containers: HashMap<ContainerId, ItemContainer>,
}

impl BasePatch {
    pub fn is_empty(&self) -> bool {
        self.storage_containers.is_empty()
    }
}

/// Partial update for one guild: only the changed sub-parts, never the
/// whole guild.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GuildPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub bases: HashMap<BaseId, BasePatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_chest: Option<ItemContainer>,
}

impl GuildPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.bases.is_empty() && self.guild_chest.is_none()
    }

    /// Seed a patch with the guild's changed scalar fields.
    pub fn from_scalars(guild: &Guild) -> Self {
        Self {
            name: Some(guild.name.clone()),
            ..Default::default()
        }
    }
}

/// The minimal collection of modified entities captured by one diff pass,
/// sent as the payload of one batched save request.
///
/// A category key is present iff at least one entity of that category was
/// dirty at extraction time; the backend relies on absent keys to mean "no
/// changes in that category".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Pals keyed by instance id, regardless of current owner (player box,
    /// base, or universal store — the backend addresses them uniformly).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub modified_pals: HashMap<PalId, Pal>,
    /// Dps-slot pals keyed by slot index; the owner travels in the pal's
    /// own `owner_uid` field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modified_dps_pals: BTreeMap<u8, Pal>,
    /// Player entries, serialized without their owned pal graphs.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub modified_players: HashMap<PlayerUid, Player>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub modified_guilds: HashMap<GuildId, GuildPatch>,
}

impl ChangeSet {
    /// An empty change-set means the save is a no-op and nothing must be
    /// transmitted.
    pub fn is_empty(&self) -> bool {
        self.modified_pals.is_empty()
            && self.modified_dps_pals.is_empty()
            && self.modified_players.is_empty()
            && self.modified_guilds.is_empty()
    }

    /// Total number of entity entries across all categories.
    pub fn len(&self) -> usize {
        self.modified_pals.len()
            + self.modified_dps_pals.len()
            + self.modified_players.len()
            + self.modified_guilds.len()
    }
}
