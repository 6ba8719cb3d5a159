use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    entry_state::EntryState,
    ids::{BaseId, ContainerId, GuildId, PalId, PlayerUid},
    item_container::ItemContainer,
    pal::Pal,
};

/// A camp owned by a guild: worker pals plus named storage stacks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub id: BaseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub pals: HashMap<PalId, Pal>,
    #[serde(default)]
    pub storage_containers: HashMap<ContainerId, ItemContainer>,
}

/// A guild: bases plus an optional shared chest. The guild's own `state`
/// tracks its scalar fields (the name); base containers and pals carry
/// their own tags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_player_uid: Option<PlayerUid>,
    #[serde(default)]
    pub bases: HashMap<BaseId, Base>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_chest: Option<ItemContainer>,
    #[serde(default, skip_serializing)]
    pub state: EntryState,
}

impl Guild {
    pub fn mark_modified(&mut self) {
        self.state.mark_modified();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.mark_modified();
    }
}
