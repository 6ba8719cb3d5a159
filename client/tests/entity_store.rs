/// Integration tests for the entity store: lifecycle tagging, selection,
/// exclusive pal ownership, snapshot loads, and eviction.

mod common;

use std::collections::HashMap;

use common::*;
use palsync_client::{EntityStore, OwnerRef};
use palsync_shared::{Base, EntryState, PalAddedPayload, SnapshotPayload, WorldError};

fn base_id(n: u128) -> palsync_shared::BaseId {
    palsync_shared::BaseId::new(uuid::Uuid::from_u128(n))
}

fn store_with_player_and_guild() -> EntityStore {
    let mut store = EntityStore::new();
    store.insert_player_detail(test_player_with_pals(1, &[10, 11]));

    let mut guild = test_guild(9);
    guild.bases.insert(
        base_id(90),
        Base {
            id: base_id(90),
            name: None,
            pals: HashMap::new(),
            storage_containers: HashMap::new(),
        },
    );
    store.insert_guild_detail(guild);
    store
}

// ========== Lifecycle tags ==========

#[test]
fn detail_merge_resets_every_tag_to_unchanged() {
    let mut store = EntityStore::new();
    let mut player = test_player_with_pals(1, &[10]);
    player.state = EntryState::Modified;
    player.pals.get_mut(&pal_id(10)).unwrap().state = EntryState::Modified;

    store.insert_player_detail(player);

    let merged = store.player(&player_uid(1)).unwrap();
    assert_eq!(merged.state, EntryState::Unchanged);
    assert_eq!(merged.pals[&pal_id(10)].state, EntryState::Unchanged);
}

#[test]
fn selecting_a_player_marks_it_modified_eagerly() {
    let mut store = store_with_player_and_guild();
    store.select_player(player_uid(1)).unwrap();
    assert_eq!(
        store.player(&player_uid(1)).unwrap().state,
        EntryState::Modified
    );
}

#[test]
fn selecting_a_pal_marks_the_pal_not_the_player() {
    let mut store = store_with_player_and_guild();
    store.select_pal(player_uid(1), pal_id(10)).unwrap();
    let player = store.player(&player_uid(1)).unwrap();
    assert_eq!(player.pals[&pal_id(10)].state, EntryState::Modified);
    assert_eq!(player.pals[&pal_id(11)].state, EntryState::Unchanged);
}

#[test]
fn selecting_a_missing_player_is_an_error() {
    let mut store = EntityStore::new();
    assert_eq!(
        store.select_player(player_uid(5)),
        Err(WorldError::PlayerNotFound {
            uid: player_uid(5)
        })
    );
}

// ========== Ownership exclusivity ==========

#[test]
fn moving_a_pal_never_leaves_it_double_registered() {
    let mut store = store_with_player_and_guild();

    store
        .move_pal(pal_id(10), OwnerRef::Base(guild_id(9), base_id(90)))
        .unwrap();

    let player = store.player(&player_uid(1)).unwrap();
    assert!(!player.pals.contains_key(&pal_id(10)));
    let base = &store.guild(&guild_id(9)).unwrap().bases[&base_id(90)];
    let moved = &base.pals[&pal_id(10)];
    assert_eq!(moved.owner_uid, None);
    assert_eq!(moved.state, EntryState::Modified);
}

#[test]
fn moving_into_a_dps_slot_respects_occupancy() {
    let mut store = store_with_player_and_guild();
    store
        .move_pal(pal_id(10), OwnerRef::DpsSlot(player_uid(1), 0))
        .unwrap();

    assert_eq!(
        store.move_pal(pal_id(11), OwnerRef::DpsSlot(player_uid(1), 0)),
        Err(WorldError::DpsSlotOccupied {
            uid: player_uid(1),
            slot: 0
        })
    );
    // The refused pal stayed where it was.
    assert!(store
        .player(&player_uid(1))
        .unwrap()
        .pals
        .contains_key(&pal_id(11)));
}

#[test]
fn moving_to_ups_and_back() {
    let mut store = store_with_player_and_guild();

    store.move_pal(pal_id(10), OwnerRef::Ups).unwrap();
    assert!(store.ups_pals().contains_key(&pal_id(10)));
    assert!(!store
        .player(&player_uid(1))
        .unwrap()
        .pals
        .contains_key(&pal_id(10)));

    store
        .move_pal(pal_id(10), OwnerRef::Player(player_uid(1)))
        .unwrap();
    assert!(!store.ups_pals().contains_key(&pal_id(10)));
    assert_eq!(
        store.player(&player_uid(1)).unwrap().pals[&pal_id(10)].owner_uid,
        Some(player_uid(1))
    );
}

#[test]
fn moving_an_unknown_pal_is_an_error() {
    let mut store = store_with_player_and_guild();
    assert_eq!(
        store.move_pal(pal_id(99), OwnerRef::Ups),
        Err(WorldError::PalNotFound { id: pal_id(99) })
    );
}

#[test]
fn local_creation_is_tagged_new_and_unique() {
    let mut store = store_with_player_and_guild();

    store
        .add_local_pal(OwnerRef::Ups, test_pal(50, None))
        .unwrap();
    assert_eq!(store.ups_pals()[&pal_id(50)].state, EntryState::New);

    assert_eq!(
        store.add_local_pal(OwnerRef::Ups, test_pal(10, None)),
        Err(WorldError::DuplicatePal { id: pal_id(10) })
    );
}

// ========== Pushes ==========

#[test]
fn pushed_pal_is_server_truth() {
    let mut store = store_with_player_and_guild();
    let mut pal = test_pal(60, Some(player_uid(1)));
    pal.state = EntryState::Modified;

    store.add_pal_from_push(PalAddedPayload {
        player_uid: Some(player_uid(1)),
        pal,
    });

    let merged = &store.player(&player_uid(1)).unwrap().pals[&pal_id(60)];
    assert_eq!(merged.state, EntryState::Unchanged);
}

#[test]
fn pushed_pal_without_a_loaded_owner_lands_in_ups() {
    let mut store = EntityStore::new();
    store.add_pal_from_push(PalAddedPayload {
        player_uid: Some(player_uid(1)),
        pal: test_pal(60, Some(player_uid(1))),
    });
    assert!(store.ups_pals().contains_key(&pal_id(60)));
}

// ========== Snapshot & reset ==========

#[test]
fn snapshot_evicts_entities_and_seeds_summaries() {
    let mut store = store_with_player_and_guild();
    store.select_player(player_uid(1)).unwrap();

    let mut players = HashMap::new();
    players.insert(player_uid(3), player_summary(3, "Cal"));
    store.load_snapshot(SnapshotPayload {
        world_name: Some("Palpagos".into()),
        players,
        guilds: HashMap::new(),
    });

    assert!(store.player(&player_uid(1)).is_none());
    assert!(store.selected_player().is_none());
    assert_eq!(store.player_summaries().len(), 1);
    assert_eq!(store.world_name(), Some("Palpagos"));
}

#[test]
fn heal_and_delete_operate_across_contexts() {
    let mut store = store_with_player_and_guild();
    store
        .move_pal(pal_id(10), OwnerRef::Base(guild_id(9), base_id(90)))
        .unwrap();
    store
        .player_mut(&player_uid(1))
        .unwrap()
        .pals
        .get_mut(&pal_id(11))
        .unwrap()
        .hp = 1;

    assert_eq!(store.heal_pals(&[pal_id(10), pal_id(11)]), 2);

    assert_eq!(store.delete_pals(&[pal_id(10), pal_id(11), pal_id(99)]), 2);
    assert!(store.player(&player_uid(1)).unwrap().pals.is_empty());
    let base = &store.guild(&guild_id(9)).unwrap().bases[&base_id(90)];
    assert!(base.pals.is_empty());
}
