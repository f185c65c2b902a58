//! Trigger rate limit.
//!
//! A held fist fires again every cooldown period. This is a rate limiter,
//! not an edge detector.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Cooldown {
    period: Duration,
    last_fired_at: Option<Instant>,
}

impl Cooldown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_fired_at: None,
        }
    }

    /// Returns true, and restarts the cooldown, when `active` and more than
    /// one period has passed since the last firing. The first firing is
    /// never held back.
    pub fn try_fire(&mut self, active: bool, now: Instant) -> bool {
        if !active {
            return false;
        }
        let ready = self
            .last_fired_at
            .is_none_or(|last| now.duration_since(last) > self.period);
        if ready {
            self.last_fired_at = Some(now);
        }
        ready
    }

    pub fn last_fired_at(&self) -> Option<Instant> {
        self.last_fired_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(2);

    #[test]
    fn fires_immediately_then_waits() {
        let mut cooldown = Cooldown::new(PERIOD);
        let t0 = Instant::now();
        assert!(cooldown.try_fire(true, t0));
        assert!(!cooldown.try_fire(true, t0 + Duration::from_millis(1)));
        assert!(!cooldown.try_fire(true, t0 + PERIOD));
        assert!(cooldown.try_fire(true, t0 + PERIOD + Duration::from_millis(1)));
    }

    #[test]
    fn inactive_signal_never_fires() {
        let mut cooldown = Cooldown::new(PERIOD);
        let t0 = Instant::now();
        assert!(!cooldown.try_fire(false, t0));
        assert_eq!(cooldown.last_fired_at(), None);
    }

    #[test]
    fn held_signal_fires_once_per_period() {
        let mut cooldown = Cooldown::new(PERIOD);
        let t0 = Instant::now();
        let frame = Duration::from_millis(10);
        let total = Duration::from_secs(11);

        let mut fired = 0;
        let mut t = t0;
        while t < t0 + total {
            if cooldown.try_fire(true, t) {
                fired += 1;
            }
            t += frame;
        }
        // Fires at 0, ~2.01, ~4.02, ~6.03, ~8.04, ~10.05.
        assert_eq!(fired, 6);
        let expected = total.as_millis() / PERIOD.as_millis();
        assert!((fired as u128).abs_diff(expected) <= 1);
    }

    #[test]
    fn release_does_not_reset_the_clock() {
        let mut cooldown = Cooldown::new(PERIOD);
        let t0 = Instant::now();
        assert!(cooldown.try_fire(true, t0));
        assert!(!cooldown.try_fire(false, t0 + Duration::from_millis(500)));
        assert!(!cooldown.try_fire(true, t0 + Duration::from_millis(1000)));
    }
}
