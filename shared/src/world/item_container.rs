use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{entry_state::EntryState, error::WorldError, ids::ContainerId, pal::PalGender};

/// Per-instance payload for unique items (weapons with durability, eggs,
/// blueprints). Plain stacks carry no dynamic item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicItem {
    pub local_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_bullets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egg_character_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<PalGender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passive_skill_list: Option<Vec<String>>,
}

/// One fixed slot in a container. An empty slot has no static id and a
/// count of zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerSlot {
    pub slot_index: u32,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_item: Option<DynamicItem>,
}

impl ContainerSlot {
    pub fn empty(slot_index: u32) -> Self {
        Self {
            slot_index,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.static_id.is_none() || self.count == 0
    }
}

/// An ordered list of fixed-size slots. The container's lifecycle tag is
/// independent of its parent entity's tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemContainer {
    pub id: ContainerId,
    pub slots: Vec<ContainerSlot>,
    #[serde(default, skip_serializing)]
    pub state: EntryState,
}

impl ItemContainer {
    pub fn new(id: ContainerId, slot_count: u32) -> Self {
        Self {
            id,
            slots: (0..slot_count).map(ContainerSlot::empty).collect(),
            state: EntryState::Unchanged,
        }
    }

    pub fn slot(&self, index: u32) -> Result<&ContainerSlot, WorldError> {
        self.slots
            .get(index as usize)
            .ok_or(WorldError::SlotOutOfRange {
                index,
                len: self.slots.len(),
            })
    }

    /// Place a stack, replacing whatever the slot held.
    pub fn set_slot(
        &mut self,
        index: u32,
        static_id: String,
        count: u32,
        dynamic_item: Option<DynamicItem>,
    ) -> Result<(), WorldError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index as usize)
            .ok_or(WorldError::SlotOutOfRange { index, len })?;
        slot.static_id = Some(static_id);
        slot.count = count;
        slot.dynamic_item = dynamic_item;
        self.state.mark_modified();
        Ok(())
    }

    pub fn clear_slot(&mut self, index: u32) -> Result<(), WorldError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index as usize)
            .ok_or(WorldError::SlotOutOfRange { index, len })?;
        *slot = ContainerSlot::empty(index);
        self.state.mark_modified();
        Ok(())
    }

    /// Exchange the contents of two slots (drag-and-drop within one
    /// container).
    pub fn swap_slots(&mut self, a: u32, b: u32) -> Result<(), WorldError> {
        let len = self.slots.len();
        if a as usize >= len {
            return Err(WorldError::SlotOutOfRange { index: a, len });
        }
        if b as usize >= len {
            return Err(WorldError::SlotOutOfRange { index: b, len });
        }
        self.slots.swap(a as usize, b as usize);
        self.slots[a as usize].slot_index = a;
        self.slots[b as usize].slot_index = b;
        self.state.mark_modified();
        Ok(())
    }
}
