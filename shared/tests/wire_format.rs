/// Integration tests for the wire format: the `{type, data}` frame shape,
/// omit-empty change-set categories, and the exact key formats the backend
/// relies on.

use std::collections::HashMap;

use serde_json::json;
use uuid::Uuid;

use palsync_shared::{
    BasePatch, BaseId, ChangeSet, ContainerId, EntryState, Frame, GuildId, GuildPatch,
    ItemContainer, MessageKind, Pal, PalGender, PalId, PlayerUid, RequestId,
};

fn sample_pal() -> Pal {
    Pal {
        instance_id: PalId::new(Uuid::from_u128(11)),
        owner_uid: Some(PlayerUid::new(Uuid::from_u128(1))),
        character_id: "SheepBall".into(),
        nickname: Some("Rex".into()),
        gender: PalGender::Female,
        level: 10,
        exp: 1000,
        rank: 1,
        rank_hp: 0,
        rank_attack: 0,
        rank_defense: 0,
        rank_craftspeed: 0,
        talent_hp: 50,
        talent_shot: 40,
        talent_defense: 30,
        hp: 400,
        max_hp: 500,
        stomach: 100.0,
        sanity: 100.0,
        is_lucky: false,
        is_boss: false,
        is_sick: false,
        friendship_point: 0,
        storage_id: None,
        storage_slot: 0,
        learned_skills: vec![],
        active_skills: vec![],
        passive_skills: vec![],
        work_suitability: HashMap::new(),
        state: EntryState::Modified,
    }
}

// ========== Frames ==========

#[test]
fn frame_uses_the_type_field_on_the_wire() {
    let frame = Frame::new(MessageKind::ProgressMessage, json!("Loading players"));
    let value: serde_json::Value = serde_json::from_str(&frame.to_text().unwrap()).unwrap();
    assert_eq!(value["type"], json!("progress_message"));
    assert_eq!(value["data"], json!("Loading players"));
}

#[test]
fn reply_without_request_id_parses() {
    let frame =
        Frame::from_text(r#"{"type":"get_version","data":"0.3.0"}"#).unwrap();
    assert_eq!(frame.kind, MessageKind::GetVersion);
    assert_eq!(frame.request_id, None);
}

#[test]
fn reply_with_request_id_parses() {
    let frame =
        Frame::from_text(r#"{"type":"update_save_file","request_id":42,"data":{}}"#).unwrap();
    assert_eq!(frame.request_id, Some(RequestId::new(42)));
}

// ========== Change-set: omit-empty ==========

#[test]
fn empty_change_set_serializes_to_an_empty_object() {
    let change_set = ChangeSet::default();
    assert!(change_set.is_empty());
    assert_eq!(serde_json::to_value(&change_set).unwrap(), json!({}));
}

#[test]
fn only_dirty_categories_appear() {
    let mut change_set = ChangeSet::default();
    let pal = sample_pal();
    change_set.modified_pals.insert(pal.instance_id, pal);

    let value = serde_json::to_value(&change_set).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["modified_pals"]);
}

#[test]
fn absent_categories_deserialize_as_empty() {
    let change_set: ChangeSet = serde_json::from_value(json!({})).unwrap();
    assert!(change_set.modified_pals.is_empty());
    assert!(change_set.modified_guilds.is_empty());
}

// ========== Change-set: key formats ==========

#[test]
fn pal_bucket_is_keyed_by_instance_id() {
    let mut change_set = ChangeSet::default();
    let pal = sample_pal();
    change_set.modified_pals.insert(pal.instance_id, pal);

    let value = serde_json::to_value(&change_set).unwrap();
    let keys: Vec<_> = value["modified_pals"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec![Uuid::from_u128(11).to_string()]);
}

#[test]
fn dps_bucket_is_keyed_by_slot_index() {
    let mut change_set = ChangeSet::default();
    change_set.modified_dps_pals.insert(2, sample_pal());

    let value = serde_json::to_value(&change_set).unwrap();
    assert!(value["modified_dps_pals"].as_object().unwrap().contains_key("2"));

    let back: ChangeSet = serde_json::from_value(value).unwrap();
    assert!(back.modified_dps_pals.contains_key(&2));
}

#[test]
fn guild_patch_omits_untouched_sub_parts() {
    let mut patch = GuildPatch::default();
    let base_id = BaseId::new(Uuid::from_u128(90));
    let container_id = ContainerId::new(Uuid::from_u128(900));
    let mut base_patch = BasePatch::default();
    base_patch
        .storage_containers
        .insert(container_id, ItemContainer::new(container_id, 2));
    patch.bases.insert(base_id, base_patch);

    let mut change_set = ChangeSet::default();
    change_set
        .modified_guilds
        .insert(GuildId::new(Uuid::from_u128(9)), patch);

    let value = serde_json::to_value(&change_set).unwrap();
    let guild = &value["modified_guilds"][Uuid::from_u128(9).to_string()];
    assert!(guild.get("name").is_none());
    assert!(guild.get("guild_chest").is_none());
    assert!(guild["bases"][Uuid::from_u128(90).to_string()]
        .get("storage_containers")
        .is_some());
}

// ========== Lifecycle tags stay client-side ==========

#[test]
fn entity_tags_are_not_part_of_the_wire_payload() {
    let value = serde_json::to_value(sample_pal()).unwrap();
    assert!(value.get("state").is_none());

    // Inbound entities without a tag default to Unchanged.
    let pal: Pal = serde_json::from_value(value).unwrap();
    assert_eq!(pal.state, EntryState::Unchanged);
}
