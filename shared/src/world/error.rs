use thiserror::Error;

use super::ids::{BaseId, ContainerId, GuildId, PalId, PlayerUid};

/// Errors raised by operations on the world model and the entity store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    /// Slot index past the end of a container
    #[error("Slot index {index} is out of range for a container with {len} slots")]
    SlotOutOfRange { index: u32, len: usize },

    /// Pal instance id not present in any owner context
    #[error("Pal {id} is not registered in any owner context")]
    PalNotFound { id: PalId },

    /// Destination already holds a pal with the same instance id
    #[error("Pal {id} is already registered at the destination; ownership must stay exclusive")]
    DuplicatePal { id: PalId },

    /// Player uid not present in the store
    #[error("Player {uid} is not loaded. Fetch detail before mutating")]
    PlayerNotFound { uid: PlayerUid },

    /// Guild id not present in the store
    #[error("Guild {id} is not loaded. Fetch detail before mutating")]
    GuildNotFound { id: GuildId },

    /// Base id not present under the guild
    #[error("Base {base} does not belong to guild {guild}")]
    BaseNotFound { guild: GuildId, base: BaseId },

    /// Container id not found on the addressed entity
    #[error("Container {id} does not exist on the addressed entity")]
    ContainerNotFound { id: ContainerId },

    /// Dps slot already occupied
    #[error("Dps slot {slot} of player {uid} is already occupied")]
    DpsSlotOccupied { uid: PlayerUid, slot: u8 },
}
