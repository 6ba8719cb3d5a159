use std::collections::HashMap;

use log::warn;
use serde_json::Value;
use thiserror::Error;

use palsync_shared::{Frame, MessageKind, RequestId};

/// Errors resolved into a pending request instead of a reply payload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// The reply carried an explicit error marker in its payload
    #[error("Backend rejected the request: {message}")]
    Backend { message: String },
}

/// Handle to one outstanding request. Redeem it against
/// [`RequestManager::take_response`] once the matching reply has been
/// accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseKey {
    id: RequestId,
    kind: MessageKind,
}

impl ResponseKey {
    pub fn kind(&self) -> MessageKind {
        self.kind
    }
}

struct Pending {
    id: RequestId,
    kind: MessageKind,
}

/// Turns the event-driven channel into request/response calls: every
/// outbound request carries a per-call nonce, and the matching inbound
/// frame is consumed here before the dispatch layer ever sees it.
///
/// Replies that omit the nonce fall back to the oldest pending request of
/// the same kind, which preserves the behavior of backends that correlate
/// by message kind alone. Pending entries survive reconnects deliberately:
/// a fresh reply after the channel comes back still resolves the original
/// caller.
pub struct RequestManager {
    next_id: u64,
    pending: Vec<Pending>,
    resolved: HashMap<RequestId, Result<Value, RequestError>>,
}

impl RequestManager {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
            resolved: HashMap::new(),
        }
    }

    /// Register a one-shot pending entry and build the frame to transmit.
    pub fn queue(&mut self, kind: MessageKind, data: Value) -> (Frame, ResponseKey) {
        let id = RequestId::new(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { id, kind });
        let frame = Frame::with_request_id(kind, id, data);
        (frame, ResponseKey { id, kind })
    }

    /// Offer an inbound frame. Returns true if it matched a pending request
    /// and was consumed; such a frame must not reach the dispatch layer.
    pub fn accept_reply(&mut self, frame: &Frame) -> bool {
        let position = match frame.request_id {
            Some(id) => self.pending.iter().position(|p| p.id == id),
            // No nonce echoed: oldest pending call of the same kind.
            None => self.pending.iter().position(|p| p.kind == frame.kind),
        };
        let Some(position) = position else {
            return false;
        };

        let entry = self.pending.remove(position);
        self.resolved.insert(entry.id, resolve(&frame.data));
        true
    }

    /// Redeem a key. `None` while the reply has not arrived yet; at most
    /// one redemption per key.
    pub fn take_response(&mut self, key: &ResponseKey) -> Option<Result<Value, RequestError>> {
        self.resolved.remove(&key.id)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl Default for RequestManager {
    fn default() -> Self {
        Self::new()
    }
}

/// A reply payload carrying an explicit `error` marker resolves the call as
/// a failure, never as success.
fn resolve(data: &Value) -> Result<Value, RequestError> {
    if let Some(message) = data.get("error").and_then(Value::as_str) {
        warn!("Request resolved with backend error: {message}");
        return Err(RequestError::Backend {
            message: message.to_owned(),
        });
    }
    Ok(data.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_with_nonce_resolves_exactly_its_call() {
        let mut requests = RequestManager::new();
        let (frame_a, key_a) = requests.queue(MessageKind::GetPlayerDetails, json!("a"));
        let (_frame_b, key_b) = requests.queue(MessageKind::GetPlayerDetails, json!("b"));

        let reply = Frame::with_request_id(
            MessageKind::GetPlayerDetails,
            frame_a.request_id.unwrap(),
            json!({"player_id": "a"}),
        );
        assert!(requests.accept_reply(&reply));

        assert!(requests.take_response(&key_a).unwrap().is_ok());
        assert!(requests.take_response(&key_b).is_none());
        assert_eq!(requests.pending_len(), 1);
    }

    #[test]
    fn reply_without_nonce_resolves_oldest_of_kind() {
        let mut requests = RequestManager::new();
        let (_, key_a) = requests.queue(MessageKind::GetGuildDetails, json!("a"));
        let (_, key_b) = requests.queue(MessageKind::GetGuildDetails, json!("b"));

        let reply = Frame::new(MessageKind::GetGuildDetails, json!({}));
        assert!(requests.accept_reply(&reply));
        assert!(requests.take_response(&key_a).is_some());
        assert!(requests.take_response(&key_b).is_none());
    }

    #[test]
    fn unrelated_frames_are_not_consumed() {
        let mut requests = RequestManager::new();
        let (_, _key) = requests.queue(MessageKind::GetPlayerDetails, json!("a"));

        let push = Frame::new(MessageKind::ProgressMessage, json!("working"));
        assert!(!requests.accept_reply(&push));
    }

    #[test]
    fn error_marker_rejects_the_call() {
        let mut requests = RequestManager::new();
        let (frame, key) = requests.queue(MessageKind::GetPlayerDetails, json!("a"));

        let reply = Frame::with_request_id(
            MessageKind::GetPlayerDetails,
            frame.request_id.unwrap(),
            json!({"error": "No save file loaded"}),
        );
        requests.accept_reply(&reply);

        let result = requests.take_response(&key).unwrap();
        assert_eq!(
            result,
            Err(RequestError::Backend {
                message: "No save file loaded".into()
            })
        );
    }
}
