//! # Palsync Shared
//! Wire protocol and world model shared between the palsync client and its
//! backend session.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod backends;
mod messages;
mod world;

pub use backends::Timer;
pub use messages::{
    change_set::{BasePatch, ChangeSet, GuildPatch},
    error::FrameError,
    frame::{Frame, RequestId},
    kind::MessageKind,
    payloads::{
        DeletePalsPayload, ErrorPayload, GuildDetailResponse, GuildSummaries, PalAddedPayload,
        PlayerDetailResponse, PlayerSummaries, SnapshotPayload,
    },
};
pub use world::{
    entry_state::EntryState,
    error::WorldError,
    guild::{Base, Guild},
    ids::{BaseId, ContainerId, GuildId, PalId, PlayerUid},
    item_container::{ContainerSlot, DynamicItem, ItemContainer},
    pal::{Pal, PalGender},
    player::Player,
    settings::AppSettings,
    summary::{GuildSummary, PlayerSummary},
};
