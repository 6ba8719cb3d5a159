#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use palsync_client::transport::mock::{MockLink, MockSocket};
use palsync_client::{Client, SessionConfig};
use palsync_shared::{
    EntryState, Frame, Guild, GuildId, GuildSummary, MessageKind, Pal, PalGender, PalId, Player,
    PlayerSummary, PlayerUid,
};

pub fn player_uid(n: u128) -> PlayerUid {
    PlayerUid::new(Uuid::from_u128(n))
}

pub fn pal_id(n: u128) -> PalId {
    PalId::new(Uuid::from_u128(n))
}

pub fn guild_id(n: u128) -> GuildId {
    GuildId::new(Uuid::from_u128(n))
}

pub fn test_pal(id: u128, owner: Option<PlayerUid>) -> Pal {
    Pal {
        instance_id: pal_id(id),
        owner_uid: owner,
        character_id: "SheepBall".into(),
        nickname: None,
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
        state: EntryState::Unchanged,
    }
}

pub fn test_player(uid: u128) -> Player {
    Player {
        uid: player_uid(uid),
        nickname: "Ari".into(),
        level: 30,
        exp: 100_000,
        hp: 5000,
        stomach: 100.0,
        sanity: 100.0,
        status_point_list: HashMap::new(),
        ext_status_point_list: HashMap::new(),
        instance_id: None,
        guild_id: None,
        pal_box_id: None,
        technology_points: 0,
        boss_technology_points: 0,
        technologies: vec![],
        pals: HashMap::new(),
        dps_pals: BTreeMap::new(),
        common_container: None,
        essential_container: None,
        weapon_load_out_container: None,
        player_equipment_armor_container: None,
        food_equip_container: None,
        state: EntryState::Unchanged,
    }
}

pub fn test_player_with_pals(uid: u128, pal_ids: &[u128]) -> Player {
    let mut player = test_player(uid);
    for id in pal_ids {
        let pal = test_pal(*id, Some(player.uid));
        player.pals.insert(pal.instance_id, pal);
    }
    player
}

pub fn test_guild(id: u128) -> Guild {
    Guild {
        id: guild_id(id),
        name: "Night Shift".into(),
        admin_player_uid: None,
        bases: HashMap::new(),
        guild_chest: None,
        state: EntryState::Unchanged,
    }
}

pub fn player_summary(uid: u128, nickname: &str) -> PlayerSummary {
    PlayerSummary {
        uid: player_uid(uid),
        nickname: nickname.into(),
        level: Some(1),
        guild_id: None,
        pal_count: 0,
        loaded: false,
    }
}

pub fn guild_summary(id: u128, name: &str) -> GuildSummary {
    GuildSummary {
        id: guild_id(id),
        name: name.into(),
        admin_player_uid: None,
        player_count: 0,
        base_count: 0,
        loaded: false,
    }
}

/// A client with zero reconnect delay and zero save grace, already
/// connected, with the on-open greeting frames drained.
pub fn connected_client() -> (Client, MockLink) {
    let (socket, link) = MockSocket::new();
    let config = SessionConfig {
        reconnect_delay: Duration::ZERO,
        save_grace_delay: Duration::ZERO,
    };
    let mut client = Client::new(Box::new(socket), config);
    client.connect();
    link.take_outbound();
    (client, link)
}

/// Build the reply to a captured `get_player_details` request, echoing its
/// correlation nonce.
pub fn player_detail_reply(request: &Frame, player: &Player) -> Frame {
    Frame::with_request_id(
        MessageKind::GetPlayerDetails,
        request.request_id.expect("detail request carries a nonce"),
        json!({ "player": player, "player_id": player.uid }),
    )
}

/// Build the reply to a captured `get_guild_details` request.
pub fn guild_detail_reply(request: &Frame, guild: &Guild) -> Frame {
    Frame::with_request_id(
        MessageKind::GetGuildDetails,
        request.request_id.expect("detail request carries a nonce"),
        json!({ "guild": guild, "guild_id": guild.id }),
    )
}
