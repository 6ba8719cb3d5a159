use serde::{Deserialize, Serialize};

/// Backend-owned application settings, replicated to the client via the
/// settings push. Set verbatim from the push, never diffed back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub language: String,
    #[serde(default)]
    pub clone_prefix: String,
    #[serde(default)]
    pub new_pal_prefix: String,
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default)]
    pub cheat_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: "en".into(),
            clone_prefix: String::new(),
            new_pal_prefix: String::new(),
            debug_mode: false,
            cheat_mode: false,
        }
    }
}
