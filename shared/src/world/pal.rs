use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    entry_state::EntryState,
    ids::{ContainerId, PalId, PlayerUid},
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PalGender {
    #[default]
    Male,
    Female,
}

/// One creature instance. A pal belongs to exactly one owner context at a
/// time (a player's box, a dps slot, a base, or the universal pal store);
/// `owner_uid` and `storage_id` name that context.
///
/// Mutate through the `set_*` methods (or call [`Pal::mark_modified`] after
/// a direct field write) so the lifecycle tag tracks the change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pal {
    pub instance_id: PalId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_uid: Option<PlayerUid>,
    pub character_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default)]
    pub gender: PalGender,
    pub level: u32,
    pub exp: u64,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub rank_hp: u32,
    #[serde(default)]
    pub rank_attack: u32,
    #[serde(default)]
    pub rank_defense: u32,
    #[serde(default)]
    pub rank_craftspeed: u32,
    #[serde(default)]
    pub talent_hp: u32,
    #[serde(default)]
    pub talent_shot: u32,
    #[serde(default)]
    pub talent_defense: u32,
    pub hp: u64,
    pub max_hp: u64,
    #[serde(default)]
    pub stomach: f32,
    #[serde(default)]
    pub sanity: f32,
    #[serde(default)]
    pub is_lucky: bool,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub is_sick: bool,
    #[serde(default)]
    pub friendship_point: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_id: Option<ContainerId>,
    #[serde(default)]
    pub storage_slot: u32,
    #[serde(default)]
    pub learned_skills: Vec<String>,
    #[serde(default)]
    pub active_skills: Vec<String>,
    #[serde(default)]
    pub passive_skills: Vec<String>,
    #[serde(default)]
    pub work_suitability: HashMap<String, u32>,
    #[serde(default, skip_serializing)]
    pub state: EntryState,
}

impl Pal {
    pub fn mark_modified(&mut self) {
        self.state.mark_modified();
    }

    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = Some(nickname.into());
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

    pub fn set_gender(&mut self, gender: PalGender) {
        self.gender = gender;
        self.mark_modified();
    }

    pub fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
        self.mark_modified();
    }

    pub fn set_talents(&mut self, hp: u32, shot: u32, defense: u32) {
        self.talent_hp = hp;
        self.talent_shot = shot;
        self.talent_defense = defense;
        self.mark_modified();
    }

    pub fn add_passive_skill(&mut self, skill: impl Into<String>) {
        self.passive_skills.push(skill.into());
        self.mark_modified();
    }

    pub fn set_active_skills(&mut self, skills: Vec<String>) {
        self.active_skills = skills;
        self.mark_modified();
    }

    /// Full heal: hp, sanity, hunger, sickness.
    pub fn heal(&mut self) {
        self.hp = self.max_hp;
        self.sanity = 100.0;
        self.stomach = 150.0;
        self.is_sick = false;
        self.mark_modified();
    }

    /// Re-home the pal into a different owner context. Called by the store's
    /// move operation after the pal has been detached from its old owner.
    pub fn set_owner(
        &mut self,
        owner_uid: Option<PlayerUid>,
        storage_id: Option<ContainerId>,
        storage_slot: u32,
    ) {
        self.owner_uid = owner_uid;
        self.storage_id = storage_id;
        self.storage_slot = storage_slot;
        self.mark_modified();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn pal() -> Pal {
        Pal {
            instance_id: PalId::new(Uuid::nil()),
            owner_uid: None,
            character_id: "SheepBall".into(),
            nickname: None,
            gender: PalGender::Female,
            level: 12,
            exp: 3400,
            rank: 1,
            rank_hp: 0,
            rank_attack: 0,
            rank_defense: 0,
            rank_craftspeed: 0,
            talent_hp: 50,
            talent_shot: 40,
            talent_defense: 30,
            hp: 200,
            max_hp: 540,
            stomach: 80.0,
            sanity: 70.0,
            is_lucky: false,
            is_boss: false,
            is_sick: true,
            friendship_point: 0,
            storage_id: None,
            storage_slot: 0,
            learned_skills: vec![],
            active_skills: vec![],
            passive_skills: vec![],
            work_suitability: HashMap::new(),
            state: EntryState::Unchanged,
        }
    }

    #[test]
    fn setters_flip_the_tag() {
        let mut p = pal();
        p.set_nickname("Rex");
        assert_eq!(p.state, EntryState::Modified);
        assert_eq!(p.nickname.as_deref(), Some("Rex"));
    }

    #[test]
    fn heal_restores_everything() {
        let mut p = pal();
        p.heal();
        assert_eq!(p.hp, p.max_hp);
        assert!(!p.is_sick);
        assert_eq!(p.state, EntryState::Modified);
    }

    #[test]
    fn state_is_not_serialized() {
        let mut p = pal();
        p.set_level(20);
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("state").is_none());
    }
}
