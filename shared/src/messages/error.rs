use thiserror::Error;

/// Errors that can occur while encoding or decoding wire frames
#[derive(Debug, Error)]
pub enum FrameError {
    /// Inbound text was not a valid frame
    #[error("Malformed frame received from backend: {source}. The frame is dropped; the session stays up")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// Outbound frame could not be serialized
    #[error("Failed to serialize outbound frame: {source}. This indicates a non-serializable payload was constructed")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}
