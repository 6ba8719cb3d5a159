use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    entry_state::EntryState,
    ids::{ContainerId, GuildId, PalId, PlayerUid},
    item_container::ItemContainer,
    pal::Pal,
};

/// One player character and everything it owns.
///
/// The player's scalar fields are tracked by `state`, independently of the
/// tags on its pals and containers. `pals` and `dps_pals` are never
/// serialized outbound: a player-update entry on the wire deliberately
/// excludes the owned pal graphs, which travel in their own change-set
/// buckets keyed by instance id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub uid: PlayerUid,
    pub nickname: String,
    pub level: u32,
    pub exp: u64,
    #[serde(default)]
    pub hp: u64,
    #[serde(default)]
    pub stomach: f32,
    #[serde(default)]
    pub sanity: f32,
    #[serde(default)]
    pub status_point_list: HashMap<String, i32>,
    #[serde(default)]
    pub ext_status_point_list: HashMap<String, i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pal_box_id: Option<ContainerId>,
    #[serde(default)]
    pub technology_points: i32,
    #[serde(default)]
    pub boss_technology_points: i32,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing)]
    pub pals: HashMap<PalId, Pal>,
    #[serde(default, skip_serializing)]
    pub dps_pals: BTreeMap<u8, Pal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_container: Option<ItemContainer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essential_container: Option<ItemContainer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_load_out_container: Option<ItemContainer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_equipment_armor_container: Option<ItemContainer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_equip_container: Option<ItemContainer>,
    #[serde(default, skip_serializing)]
    pub state: EntryState,
}

impl Player {
    pub fn mark_modified(&mut self) {
        self.state.mark_modified();
    }

    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = nickname.into();
        self.mark_modified();
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
        self.mark_modified();
    }

    pub fn set_exp(&mut self, exp: u64) {
        self.exp = exp;
        self.mark_modified();
    }

    pub fn set_status_point(&mut self, name: impl Into<String>, value: i32) {
        self.status_point_list.insert(name.into(), value);
        self.mark_modified();
    }

    pub fn set_technology_points(&mut self, points: i32) {
        self.technology_points = points;
        self.mark_modified();
    }

    pub fn unlock_technology(&mut self, tech: impl Into<String>) {
        self.technologies.push(tech.into());
        self.mark_modified();
    }

    /// The fixed role containers, for walks that treat them uniformly.
    pub fn containers_mut(&mut self) -> impl Iterator<Item = &mut ItemContainer> {
        [
            self.common_container.as_mut(),
            self.essential_container.as_mut(),
            self.weapon_load_out_container.as_mut(),
            self.player_equipment_armor_container.as_mut(),
            self.food_equip_container.as_mut(),
        ]
        .into_iter()
        .flatten()
    }

    pub fn containers(&self) -> impl Iterator<Item = &ItemContainer> {
        [
            self.common_container.as_ref(),
            self.essential_container.as_ref(),
            self.weapon_load_out_container.as_ref(),
            self.player_equipment_armor_container.as_ref(),
            self.food_equip_container.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Whether the player itself (scalars or any role container) needs to be
    /// included in the next change-set. Owned pals are judged separately.
    pub fn has_own_changes(&self) -> bool {
        self.state.is_dirty() || self.containers().any(|c| c.state.is_dirty())
    }
}
