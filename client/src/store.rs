use std::collections::HashMap;

use log::{debug, info};

use palsync_shared::{
    AppSettings, BaseId, EntryState, Guild, GuildId, GuildSummary, Pal, PalAddedPayload, PalId,
    Player, PlayerSummary, PlayerUid, SnapshotPayload, WorldError,
};

/// The owner context a pal can live in. Exactly one at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OwnerRef {
    /// A player's pal box.
    Player(PlayerUid),
    /// A player's indexed dps slot.
    DpsSlot(PlayerUid, u8),
    /// A worker slot at a guild base.
    Base(GuildId, BaseId),
    /// The universal pal store, outside any save file.
    Ups,
}

/// The in-memory replica of the save document, mutated directly by UI code
/// and by inbound-message handlers. Single-threaded by construction: the
/// owning [`crate::Client`] serializes all access.
///
/// Summaries are held for every player and guild; full entities appear only
/// once their detail has been fetched or a push delivered them.
pub struct EntityStore {
    pub(crate) players: HashMap<PlayerUid, Player>,
    pub(crate) guilds: HashMap<GuildId, Guild>,
    pub(crate) player_summaries: HashMap<PlayerUid, PlayerSummary>,
    pub(crate) guild_summaries: HashMap<GuildId, GuildSummary>,
    pub(crate) ups_pals: HashMap<PalId, Pal>,
    selected_player: Option<PlayerUid>,
    selected_pal: Option<PalId>,
    world_name: Option<String>,
    version: String,
    progress_message: String,
    settings: AppSettings,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
            guilds: HashMap::new(),
            player_summaries: HashMap::new(),
            guild_summaries: HashMap::new(),
            ups_pals: HashMap::new(),
            selected_player: None,
            selected_pal: None,
            world_name: None,
            version: String::new(),
            progress_message: String::new(),
            settings: AppSettings::default(),
        }
    }

    // Lookups

    pub fn player(&self, uid: &PlayerUid) -> Option<&Player> {
        self.players.get(uid)
    }

    pub fn player_mut(&mut self, uid: &PlayerUid) -> Option<&mut Player> {
        self.players.get_mut(uid)
    }

    pub fn guild(&self, id: &GuildId) -> Option<&Guild> {
        self.guilds.get(id)
    }

    pub fn guild_mut(&mut self, id: &GuildId) -> Option<&mut Guild> {
        self.guilds.get_mut(id)
    }

    pub fn player_summaries(&self) -> &HashMap<PlayerUid, PlayerSummary> {
        &self.player_summaries
    }

    pub fn guild_summaries(&self) -> &HashMap<GuildId, GuildSummary> {
        &self.guild_summaries
    }

    pub fn ups_pals(&self) -> &HashMap<PalId, Pal> {
        &self.ups_pals
    }

    pub fn world_name(&self) -> Option<&str> {
        self.world_name.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn progress_message(&self) -> &str {
        &self.progress_message
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Find a pal in any owner context.
    pub fn find_pal_mut(&mut self, id: &PalId) -> Option<&mut Pal> {
        for player in self.players.values_mut() {
            if player.pals.contains_key(id) {
                return player.pals.get_mut(id);
            }
            for pal in player.dps_pals.values_mut() {
                if pal.instance_id == *id {
                    return Some(pal);
                }
            }
        }
        for guild in self.guilds.values_mut() {
            for base in guild.bases.values_mut() {
                if base.pals.contains_key(id) {
                    return base.pals.get_mut(id);
                }
            }
        }
        self.ups_pals.get_mut(id)
    }

    // Selection. Opening an entity for editing is treated as a
    // potential-mutation event: it is tagged Modified eagerly, trading a few
    // unnecessary diff entries for not having to watch every field.

    pub fn select_player(&mut self, uid: PlayerUid) -> Result<&mut Player, WorldError> {
        let player = self
            .players
            .get_mut(&uid)
            .ok_or(WorldError::PlayerNotFound { uid })?;
        player.mark_modified();
        self.selected_player = Some(uid);
        self.selected_pal = None;
        Ok(player)
    }

    pub fn select_pal(&mut self, uid: PlayerUid, pal_id: PalId) -> Result<&mut Pal, WorldError> {
        let player = self
            .players
            .get_mut(&uid)
            .ok_or(WorldError::PlayerNotFound { uid })?;
        let pal = player
            .pals
            .get_mut(&pal_id)
            .ok_or(WorldError::PalNotFound { id: pal_id })?;
        pal.mark_modified();
        self.selected_player = Some(uid);
        self.selected_pal = Some(pal_id);
        Ok(pal)
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.players.get(self.selected_player.as_ref()?)
    }

    pub fn selected_pal(&self) -> Option<&Pal> {
        let player = self.players.get(self.selected_player.as_ref()?)?;
        player.pals.get(self.selected_pal.as_ref()?)
    }

    // Inbound server truth

    /// Replace everything with a fresh bulk load. Summaries only; details
    /// are fetched lazily afterwards.
    pub fn load_snapshot(&mut self, snapshot: SnapshotPayload) {
        info!(
            "EntityStore: snapshot loaded ({} players, {} guilds)",
            snapshot.players.len(),
            snapshot.guilds.len()
        );
        self.reset();
        self.world_name = snapshot.world_name;
        self.player_summaries = snapshot.players;
        self.guild_summaries = snapshot.guilds;
    }

    pub fn set_player_summaries(&mut self, summaries: HashMap<PlayerUid, PlayerSummary>) {
        self.player_summaries = summaries;
    }

    pub fn set_guild_summaries(&mut self, summaries: HashMap<GuildId, GuildSummary>) {
        self.guild_summaries = summaries;
    }

    /// Merge a full player fetched from the backend. Bulk replacement
    /// reflects confirmed server truth, so every tag in the subtree is
    /// reset to Unchanged and the summary is marked loaded.
    pub fn insert_player_detail(&mut self, mut player: Player) {
        normalize_player(&mut player);
        if let Some(summary) = self.player_summaries.get_mut(&player.uid) {
            summary.loaded = true;
        }
        debug!("EntityStore: player {} detail cached", player.uid);
        self.players.insert(player.uid, player);
    }

    /// Merge a full guild fetched from the backend.
    pub fn insert_guild_detail(&mut self, mut guild: Guild) {
        normalize_guild(&mut guild);
        if let Some(summary) = self.guild_summaries.get_mut(&guild.id) {
            summary.loaded = true;
        }
        debug!("EntityStore: guild {} detail cached", guild.id);
        self.guilds.insert(guild.id, guild);
    }

    /// Merge a pal delivered by an entity-added push. Server truth, so the
    /// tag stays Unchanged. Without a loaded owning player it lands in the
    /// universal pal store.
    pub fn add_pal_from_push(&mut self, payload: PalAddedPayload) {
        let mut pal = payload.pal;
        pal.state = EntryState::Unchanged;
        let id = pal.instance_id;
        match payload.player_uid.and_then(|uid| self.players.get_mut(&uid)) {
            Some(player) => {
                player.pals.insert(id, pal);
            }
            None => {
                self.ups_pals.insert(id, pal);
            }
        }
    }

    // Client-side mutations

    /// Register a pal created locally (clone, UPS import) that the backend
    /// has not seen yet.
    pub fn add_local_pal(&mut self, owner: OwnerRef, mut pal: Pal) -> Result<(), WorldError> {
        let id = pal.instance_id;
        if self.find_pal_mut(&id).is_some() {
            return Err(WorldError::DuplicatePal { id });
        }
        self.validate_destination(&owner, &id)?;
        pal.state = EntryState::New;
        self.attach(pal, owner)
    }

    /// Re-home a pal into a different owner context. Ownership is
    /// exclusive: the pal leaves its old context in the same operation and
    /// is never registered twice.
    pub fn move_pal(&mut self, id: PalId, to: OwnerRef) -> Result<(), WorldError> {
        self.validate_destination(&to, &id)?;
        let mut pal = self
            .detach_pal(&id)
            .ok_or(WorldError::PalNotFound { id })?;
        pal.mark_modified();
        self.attach(pal, to)
    }

    /// Mirror a deletion locally, across all owner contexts. The confirming
    /// backend request is the caller's concern. Returns how many were
    /// removed.
    pub fn delete_pals(&mut self, ids: &[PalId]) -> usize {
        let mut removed = 0;
        for id in ids {
            if self.detach_pal(id).is_some() {
                removed += 1;
            }
            if self.selected_pal == Some(*id) {
                self.selected_pal = None;
            }
        }
        removed
    }

    /// Restore hp, sanity, and hunger for each pal found. Returns how many
    /// were healed.
    pub fn heal_pals(&mut self, ids: &[PalId]) -> usize {
        let mut healed = 0;
        for id in ids {
            if let Some(pal) = self.find_pal_mut(id) {
                pal.heal();
                healed += 1;
            }
        }
        healed
    }

    // Push-applied app state

    pub fn set_version(&mut self, version: String) {
        self.version = version;
    }

    pub fn set_progress_message(&mut self, message: String) {
        self.progress_message = message;
    }

    pub fn set_settings(&mut self, settings: AppSettings) {
        self.settings = settings;
    }

    /// Session-reset eviction: drop every entity, summary, and selection.
    pub fn reset(&mut self) {
        self.players.clear();
        self.guilds.clear();
        self.player_summaries.clear();
        self.guild_summaries.clear();
        self.ups_pals.clear();
        self.selected_player = None;
        self.selected_pal = None;
        self.world_name = None;
        self.progress_message.clear();
    }

    fn validate_destination(&self, to: &OwnerRef, moving: &PalId) -> Result<(), WorldError> {
        match to {
            OwnerRef::Player(uid) => {
                if !self.players.contains_key(uid) {
                    return Err(WorldError::PlayerNotFound { uid: *uid });
                }
            }
            OwnerRef::DpsSlot(uid, slot) => {
                let player = self
                    .players
                    .get(uid)
                    .ok_or(WorldError::PlayerNotFound { uid: *uid })?;
                if let Some(occupant) = player.dps_pals.get(slot) {
                    if occupant.instance_id != *moving {
                        return Err(WorldError::DpsSlotOccupied {
                            uid: *uid,
                            slot: *slot,
                        });
                    }
                }
            }
            OwnerRef::Base(guild_id, base_id) => {
                let guild = self
                    .guilds
                    .get(guild_id)
                    .ok_or(WorldError::GuildNotFound { id: *guild_id })?;
                if !guild.bases.contains_key(base_id) {
                    return Err(WorldError::BaseNotFound {
                        guild: *guild_id,
                        base: *base_id,
                    });
                }
            }
            OwnerRef::Ups => {}
        }
        Ok(())
    }

    fn attach(&mut self, mut pal: Pal, to: OwnerRef) -> Result<(), WorldError> {
        let id = pal.instance_id;
        match to {
            OwnerRef::Player(uid) => {
                let player = self
                    .players
                    .get_mut(&uid)
                    .ok_or(WorldError::PlayerNotFound { uid })?;
                pal.owner_uid = Some(uid);
                pal.storage_id = player.pal_box_id;
                player.pals.insert(id, pal);
            }
            OwnerRef::DpsSlot(uid, slot) => {
                let player = self
                    .players
                    .get_mut(&uid)
                    .ok_or(WorldError::PlayerNotFound { uid })?;
                pal.owner_uid = Some(uid);
                pal.storage_id = None;
                pal.storage_slot = u32::from(slot);
                player.dps_pals.insert(slot, pal);
            }
            OwnerRef::Base(guild_id, base_id) => {
                let base = self
                    .guilds
                    .get_mut(&guild_id)
                    .ok_or(WorldError::GuildNotFound { id: guild_id })?
                    .bases
                    .get_mut(&base_id)
                    .ok_or(WorldError::BaseNotFound {
                        guild: guild_id,
                        base: base_id,
                    })?;
                pal.owner_uid = None;
                pal.storage_id = None;
                base.pals.insert(id, pal);
            }
            OwnerRef::Ups => {
                pal.owner_uid = None;
                pal.storage_id = None;
                self.ups_pals.insert(id, pal);
            }
        }
        Ok(())
    }

    fn detach_pal(&mut self, id: &PalId) -> Option<Pal> {
        for player in self.players.values_mut() {
            if let Some(pal) = player.pals.remove(id) {
                return Some(pal);
            }
            if let Some(slot) = player
                .dps_pals
                .iter()
                .find(|(_, pal)| pal.instance_id == *id)
                .map(|(slot, _)| *slot)
            {
                return player.dps_pals.remove(&slot);
            }
        }
        for guild in self.guilds.values_mut() {
            for base in guild.bases.values_mut() {
                if let Some(pal) = base.pals.remove(id) {
                    return Some(pal);
                }
            }
        }
        self.ups_pals.remove(id)
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_player(player: &mut Player) {
    player.state = EntryState::Unchanged;
    for pal in player.pals.values_mut() {
        pal.state = EntryState::Unchanged;
    }
    for pal in player.dps_pals.values_mut() {
        pal.state = EntryState::Unchanged;
    }
    for container in player.containers_mut() {
        container.state = EntryState::Unchanged;
    }
}

fn normalize_guild(guild: &mut Guild) {
    guild.state = EntryState::Unchanged;
    for base in guild.bases.values_mut() {
        for pal in base.pals.values_mut() {
            pal.state = EntryState::Unchanged;
        }
        for container in base.storage_containers.values_mut() {
            container.state = EntryState::Unchanged;
        }
    }
    if let Some(chest) = guild.guild_chest.as_mut() {
        chest.state = EntryState::Unchanged;
    }
}
