use serde::{Deserialize, Serialize};

/// Discriminator carried in every frame's `type` field.
///
/// The same kind names a request and its correlated reply; kinds with no
/// outbound counterpart are pushes originated by the backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    // Correlated request/reply pairs
    GetPlayerSummaries,
    GetGuildSummaries,
    GetPlayerDetails,
    GetGuildDetails,
    UpdateSaveFile,

    // Fire-and-forget, client to backend
    SyncAppState,
    GetVersion,
    SaveModdedSave,
    DeletePals,

    // Pushes, backend to client
    ProgressMessage,
    Error,
    AddPal,
    GetSettings,
    LoadedSaveFiles,
}

impl MessageKind {
    /// Wire string, for logging. Serialization goes through serde.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetPlayerSummaries => "get_player_summaries",
            Self::GetGuildSummaries => "get_guild_summaries",
            Self::GetPlayerDetails => "get_player_details",
            Self::GetGuildDetails => "get_guild_details",
            Self::UpdateSaveFile => "update_save_file",
            Self::SyncAppState => "sync_app_state",
            Self::GetVersion => "get_version",
            Self::SaveModdedSave => "save_modded_save",
            Self::DeletePals => "delete_pals",
            Self::ProgressMessage => "progress_message",
            Self::Error => "error",
            Self::AddPal => "add_pal",
            Self::GetSettings => "get_settings",
            Self::LoadedSaveFiles => "loaded_save_files",
        }
    }
}
