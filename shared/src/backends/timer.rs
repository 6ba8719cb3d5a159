use std::time::{Duration, Instant};

/// A fixed-interval timer that "rings" once the interval has elapsed since
/// the last reset. Used for the session reconnect delay and the post-save
/// grace period.
pub struct Timer {
    duration: Duration,
    last: Instant,
    rung: bool,
}

impl Timer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            last: Instant::now(),
            rung: false,
        }
    }

    /// Restart the interval from now.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.rung = false;
    }

    pub fn ringing(&self) -> bool {
        self.rung || self.last.elapsed() >= self.duration
    }

    /// Force the timer into the ringing state regardless of elapsed time.
    pub fn ring_manual(&mut self) {
        self.rung = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_rings_immediately() {
        let timer = Timer::new(Duration::ZERO);
        assert!(timer.ringing());
    }

    #[test]
    fn long_duration_does_not_ring() {
        let timer = Timer::new(Duration::from_secs(3600));
        assert!(!timer.ringing());
    }

    #[test]
    fn ring_manual_overrides_elapsed() {
        let mut timer = Timer::new(Duration::from_secs(3600));
        timer.ring_manual();
        assert!(timer.ringing());

        timer.reset();
        assert!(!timer.ringing());
    }
}
