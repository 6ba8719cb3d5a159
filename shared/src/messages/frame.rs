use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{error::FrameError, kind::MessageKind};

/// Per-call correlation nonce embedded in a request frame and echoed by the
/// backend in the matching reply.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// One discriminated message on the wire: `{ "type": ..., "data": ... }`,
/// with an optional `request_id` for correlated request/reply pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Frame {
    pub fn new(kind: MessageKind, data: Value) -> Self {
        Self {
            kind,
            request_id: None,
            data,
        }
    }

    /// A frame with no payload, for fire-and-forget pushes.
    pub fn push(kind: MessageKind) -> Self {
        Self::new(kind, Value::Null)
    }

    pub fn with_request_id(kind: MessageKind, request_id: RequestId, data: Value) -> Self {
        Self {
            kind,
            request_id: Some(request_id),
            data,
        }
    }

    pub fn to_text(&self) -> Result<String, FrameError> {
        serde_json::to_string(self).map_err(|source| FrameError::Serialize { source })
    }

    pub fn from_text(text: &str) -> Result<Self, FrameError> {
        serde_json::from_str(text).map_err(|source| FrameError::Malformed { source })
    }
}
