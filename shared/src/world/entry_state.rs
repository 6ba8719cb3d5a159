use serde::{Deserialize, Serialize};

/// Dirty-tracking lifecycle tag carried by every mutable entity.
///
/// `Unchanged` is spelled `"None"` on the wire. A tag moves
/// `Unchanged -> Modified` through the entity's setter paths, and back to
/// `Unchanged` only when a diff pass captures the entity or a server
/// snapshot replaces it wholesale. `New` and `Deleted` mark entities
/// created or removed client-side before their first sync.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryState {
    #[default]
    #[serde(rename = "None")]
    Unchanged,
    Modified,
    New,
    Deleted,
}

impl EntryState {
    /// Whether a diff pass should pick this entity up.
    pub fn is_dirty(&self) -> bool {
        !matches!(self, EntryState::Unchanged)
    }

    /// The setter-path transition: `Unchanged -> Modified`. `New` and
    /// `Deleted` are sticky; further edits do not downgrade them.
    pub fn mark_modified(&mut self) {
        if *self == EntryState::Unchanged {
            *self = EntryState::Modified;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_becomes_modified() {
        let mut state = EntryState::Unchanged;
        state.mark_modified();
        assert_eq!(state, EntryState::Modified);
    }

    #[test]
    fn new_is_sticky() {
        let mut state = EntryState::New;
        state.mark_modified();
        assert_eq!(state, EntryState::New);
    }

    #[test]
    fn unchanged_serializes_as_none() {
        let json = serde_json::to_string(&EntryState::Unchanged).unwrap();
        assert_eq!(json, "\"None\"");
        let back: EntryState = serde_json::from_str("\"None\"").unwrap();
        assert_eq!(back, EntryState::Unchanged);
    }
}
