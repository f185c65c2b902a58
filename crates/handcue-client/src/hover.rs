//! Dwell selection.
//!
//! The pointer has to stay on the same zone for `hover_time` before the zone
//! counts as chosen. Any change of target, including leaving every zone,
//! restarts the clock. No smoothing: a one-frame flicker also restarts it.

use handcue_core::ZoneId;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct HoverTracker {
    hover_time: Duration,
    current: Option<ZoneId>,
    dwell_started_at: Option<Instant>,
}

impl HoverTracker {
    pub fn new(hover_time: Duration) -> Self {
        Self {
            hover_time,
            current: None,
            dwell_started_at: None,
        }
    }

    /// Zone currently under the pointer, as last reported.
    pub fn current(&self) -> Option<&ZoneId> {
        self.current.as_ref()
    }

    pub fn dwell_started_at(&self) -> Option<Instant> {
        self.dwell_started_at
    }

    pub fn reset(&mut self) {
        self.current = None;
        self.dwell_started_at = None;
    }

    /// Feed the zone under the pointer at `now`. Returns the zone once its
    /// dwell completes; the same dwell never confirms twice.
    pub fn update(&mut self, target: Option<&ZoneId>, now: Instant) -> Option<ZoneId> {
        if target != self.current.as_ref() {
            self.current = target.cloned();
            self.dwell_started_at = target.map(|_| now);
            return None;
        }

        let zone = target?;
        let started = self.dwell_started_at?;
        if now.duration_since(started) >= self.hover_time {
            self.dwell_started_at = None;
            return Some(zone.clone());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOVER: Duration = Duration::from_millis(800);
    const FRAME: Duration = Duration::from_millis(10);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn steady_dwell_confirms_exactly_once() {
        let a = ZoneId::new("A");
        let mut tracker = HoverTracker::new(HOVER);
        let t0 = Instant::now();

        let mut confirmations = Vec::new();
        let mut t = t0;
        while t <= t0 + ms(3000) {
            if let Some(zone) = tracker.update(Some(&a), t) {
                confirmations.push((zone, t - t0));
            }
            t += FRAME;
        }

        assert_eq!(confirmations.len(), 1);
        assert_eq!(confirmations[0].0, a);
        assert_eq!(confirmations[0].1, HOVER);
    }

    #[test]
    fn first_sighting_only_starts_the_clock() {
        let b = ZoneId::new("B");
        let mut tracker = HoverTracker::new(HOVER);
        let t0 = Instant::now();

        assert_eq!(tracker.update(Some(&b), t0), None);
        assert_eq!(tracker.current(), Some(&b));
        assert_eq!(tracker.dwell_started_at(), Some(t0));
        assert_eq!(tracker.update(Some(&b), t0 + ms(799)), None);
        assert_eq!(tracker.update(Some(&b), t0 + ms(800)), Some(b));
    }

    #[test]
    fn crossing_zones_never_confirms() {
        let a = ZoneId::new("A");
        let b = ZoneId::new("B");
        let mut tracker = HoverTracker::new(HOVER);
        let t0 = Instant::now();

        // Alternate every 500ms for 5 seconds.
        let mut t = t0;
        while t <= t0 + ms(5000) {
            let phase = (t - t0).as_millis() / 500;
            let target = if phase % 2 == 0 { &a } else { &b };
            let before = tracker.current().cloned();
            assert_eq!(tracker.update(Some(target), t), None);
            if before.as_ref() != Some(target) {
                assert_eq!(tracker.dwell_started_at(), Some(t));
            }
            t += FRAME;
        }
    }

    #[test]
    fn leaving_all_zones_resets() {
        let a = ZoneId::new("A");
        let mut tracker = HoverTracker::new(HOVER);
        let t0 = Instant::now();

        tracker.update(Some(&a), t0);
        assert_eq!(tracker.update(None, t0 + ms(700)), None);
        assert_eq!(tracker.current(), None);
        assert_eq!(tracker.dwell_started_at(), None);

        // Coming back starts a fresh dwell.
        assert_eq!(tracker.update(Some(&a), t0 + ms(750)), None);
        assert_eq!(tracker.update(Some(&a), t0 + ms(1000)), None);
        assert_eq!(tracker.update(Some(&a), t0 + ms(1550)), Some(a));
    }

    #[test]
    fn reset_clears_target() {
        let a = ZoneId::new("A");
        let mut tracker = HoverTracker::new(HOVER);
        let t0 = Instant::now();
        tracker.update(Some(&a), t0);
        tracker.reset();
        assert_eq!(tracker.current(), None);
        assert_eq!(tracker.update(Some(&a), t0 + ms(900)), None);
    }
}
