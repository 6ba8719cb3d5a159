use std::time::Duration;

/// Knobs for the session manager, set once at construction.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Fixed delay between reconnect attempts after an abnormal closure.
    /// No back-off growth, no attempt ceiling: this is a long-lived
    /// foreground session, not a batch job.
    pub reconnect_delay: Duration,
    /// How long the autosave indicator stays up after a change-set is
    /// transmitted, giving the backend time to persist before the UI
    /// reports idle.
    pub save_grace_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: Duration::from_secs(5),
            save_grace_delay: Duration::from_secs(2),
        }
    }
}
