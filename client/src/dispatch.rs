//! Routing for inbound frames that are not replies to outstanding
//! requests: progress reports, backend errors, entity-added pushes, and
//! snapshot loads. The handler set is closed at compile time; unknown
//! kinds are logged and dropped, never fatal.

use log::{debug, warn};

use palsync_shared::{AppSettings, ErrorPayload, Frame, MessageKind, PalAddedPayload, SnapshotPayload};

use crate::{events::ClientEvent, store::EntityStore};

pub(crate) fn dispatch(frame: Frame, store: &mut EntityStore, events: &mut Vec<ClientEvent>) {
    match frame.kind {
        MessageKind::ProgressMessage => {
            let message = frame.data.as_str().unwrap_or_default().to_owned();
            store.set_progress_message(message.clone());
            events.push(ClientEvent::Progress { message });
        }
        MessageKind::Error => match serde_json::from_value::<ErrorPayload>(frame.data) {
            Ok(payload) => {
                warn!("Dispatch: backend error: {}", payload.message);
                events.push(ClientEvent::BackendError {
                    message: payload.message,
                    trace: payload.trace,
                });
            }
            Err(err) => warn!("Dispatch: malformed error push: {err}"),
        },
        MessageKind::GetVersion => {
            let version = frame.data.as_str().unwrap_or_default().to_owned();
            store.set_version(version.clone());
            events.push(ClientEvent::VersionReported { version });
        }
        MessageKind::GetSettings => match serde_json::from_value::<AppSettings>(frame.data) {
            Ok(settings) => {
                store.set_settings(settings);
                events.push(ClientEvent::SettingsUpdated);
            }
            Err(err) => warn!("Dispatch: malformed settings push: {err}"),
        },
        MessageKind::AddPal => match serde_json::from_value::<PalAddedPayload>(frame.data) {
            Ok(payload) => {
                let pal_id = payload.pal.instance_id;
                let player_uid = payload.player_uid;
                store.add_pal_from_push(payload);
                events.push(ClientEvent::PalAdded { player_uid, pal_id });
            }
            Err(err) => warn!("Dispatch: malformed add_pal push: {err}"),
        },
        MessageKind::LoadedSaveFiles => {
            match serde_json::from_value::<SnapshotPayload>(frame.data) {
                Ok(snapshot) => {
                    events.push(ClientEvent::SnapshotLoaded {
                        player_count: snapshot.players.len(),
                        guild_count: snapshot.guilds.len(),
                    });
                    store.load_snapshot(snapshot);
                }
                Err(err) => warn!("Dispatch: malformed snapshot push: {err}"),
            }
        }
        other => {
            debug!("Dispatch: no handler for push kind {}", other.as_str());
        }
    }
}
