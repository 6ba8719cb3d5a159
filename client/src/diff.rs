//! Change-set extraction: one pass over the replica that collects every
//! entity tagged dirty, groups it by kind, and resets the tags in the same
//! pass. The reset is the signal that the batch was captured for send; a
//! mutation landing during network transit re-dirties its entity and is
//! simply picked up by the next pass.

use palsync_shared::{BasePatch, ChangeSet, EntryState, GuildPatch};

use crate::store::EntityStore;

/// Walk the store and produce the minimal change-set for one save
/// round-trip. Categories with nothing dirty are left absent so the backend
/// can tell "no guild changes" from "guild changes to an empty set".
pub fn extract_change_set(store: &mut EntityStore) -> ChangeSet {
    let mut change_set = ChangeSet::default();

    for player in store.players.values_mut() {
        // Owned pals travel in their own bucket keyed by instance id, so a
        // player entry never duplicates the large nested graphs.
        for pal in player.pals.values_mut() {
            if pal.state.is_dirty() {
                pal.state = EntryState::Unchanged;
                change_set.modified_pals.insert(pal.instance_id, pal.clone());
            }
        }
        for (slot, pal) in player.dps_pals.iter_mut() {
            if pal.state.is_dirty() {
                pal.state = EntryState::Unchanged;
                change_set.modified_dps_pals.insert(*slot, pal.clone());
            }
        }
        if player.has_own_changes() {
            player.state = EntryState::Unchanged;
            for container in player.containers_mut() {
                container.state = EntryState::Unchanged;
            }
            let mut entry = player.clone();
            entry.pals.clear();
            entry.dps_pals.clear();
            change_set.modified_players.insert(entry.uid, entry);
        }
    }

    for guild in store.guilds.values_mut() {
        let mut patch = if guild.state.is_dirty() {
            guild.state = EntryState::Unchanged;
            GuildPatch::from_scalars(guild)
        } else {
            GuildPatch::default()
        };

        for base in guild.bases.values_mut() {
            // Base pals share the pal bucket: the backend addresses pals by
            // instance id regardless of current owner.
            for pal in base.pals.values_mut() {
                if pal.state.is_dirty() {
                    pal.state = EntryState::Unchanged;
                    change_set.modified_pals.insert(pal.instance_id, pal.clone());
                }
            }
            let mut base_patch = BasePatch::default();
            for container in base.storage_containers.values_mut() {
                if container.state.is_dirty() {
                    container.state = EntryState::Unchanged;
                    base_patch
                        .storage_containers
                        .insert(container.id, container.clone());
                }
            }
            if !base_patch.is_empty() {
                patch.bases.insert(base.id, base_patch);
            }
        }

        if let Some(chest) = guild.guild_chest.as_mut() {
            if chest.state.is_dirty() {
                chest.state = EntryState::Unchanged;
                patch.guild_chest = Some(chest.clone());
            }
        }

        if !patch.is_empty() {
            change_set.modified_guilds.insert(guild.id, patch);
        }
    }

    // Universal-store pals are addressed by instance id like any other.
    for pal in store.ups_pals.values_mut() {
        if pal.state.is_dirty() {
            pal.state = EntryState::Unchanged;
            change_set.modified_pals.insert(pal.instance_id, pal.clone());
        }
    }

    change_set
}
