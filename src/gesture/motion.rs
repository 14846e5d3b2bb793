//! Horizontal swipe detection from frame-to-frame hand movement

use std::collections::HashMap;

use super::center::HandCenter;
use super::{GestureEvent, Handedness};

/// Default horizontal deadband in normalized image units
pub const DEFAULT_SWIPE_DEADBAND: f64 = 0.05;

/// Tracks the last seen hand center and reports horizontal swipes.
///
/// Every update replaces the stored position, so slow drift never adds up
/// to a swipe and a fast move re-triggers on each frame it lasts.
#[derive(Debug, Clone)]
pub struct MotionTracker {
    previous: Option<HandCenter>,
    deadband: f64,
}

impl Default for MotionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_DEADBAND)
    }
}

impl MotionTracker {
    pub fn new(deadband: f64) -> Self {
        Self {
            previous: None,
            deadband,
        }
    }

    /// Feed the current hand center, returning a swipe if the hand moved
    /// further than the deadband since the previous update
    pub fn update(&mut self, current: HandCenter) -> Option<GestureEvent> {
        let event = self.previous.and_then(|previous| {
            let dx = current.x - previous.x;
            if dx > self.deadband {
                Some(GestureEvent::SwipeRight)
            } else if dx < -self.deadband {
                Some(GestureEvent::SwipeLeft)
            } else {
                None
            }
        });

        self.previous = Some(current);
        event
    }

    pub fn previous(&self) -> Option<HandCenter> {
        self.previous
    }

    pub fn deadband(&self) -> f64 {
        self.deadband
    }
}

/// How detected hands map onto motion trackers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    /// All hands feed one tracker
    #[default]
    Shared,
    /// One tracker per reported handedness
    PerHand,
}

/// Set of motion trackers selected by [`TrackingMode`]
#[derive(Debug, Clone)]
pub struct MotionTrackers {
    mode: TrackingMode,
    deadband: f64,
    shared: MotionTracker,
    per_hand: HashMap<Handedness, MotionTracker>,
}

impl MotionTrackers {
    pub fn new(mode: TrackingMode, deadband: f64) -> Self {
        Self {
            mode,
            deadband,
            shared: MotionTracker::new(deadband),
            per_hand: HashMap::new(),
        }
    }

    /// Tracker responsible for a hand. Unlabelled hands use the shared one.
    pub fn tracker_for(&mut self, handedness: Option<Handedness>) -> &mut MotionTracker {
        match (self.mode, handedness) {
            (TrackingMode::PerHand, Some(side)) => {
                let deadband = self.deadband;
                self.per_hand
                    .entry(side)
                    .or_insert_with(|| MotionTracker::new(deadband))
            }
            _ => &mut self.shared,
        }
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64) -> HandCenter {
        HandCenter { x, y: 0.5 }
    }

    #[test]
    fn test_first_update_sets_baseline_only() {
        let mut tracker = MotionTracker::default();
        assert_eq!(tracker.update(at(0.9)), None);
        assert_eq!(tracker.previous(), Some(at(0.9)));
    }

    #[test]
    fn test_swipe_right() {
        let mut tracker = MotionTracker::default();
        tracker.update(at(0.40));
        assert_eq!(tracker.update(at(0.47)), Some(GestureEvent::SwipeRight));
    }

    #[test]
    fn test_swipe_left() {
        let mut tracker = MotionTracker::default();
        tracker.update(at(0.60));
        assert_eq!(tracker.update(at(0.50)), Some(GestureEvent::SwipeLeft));
    }

    #[test]
    fn test_small_move_updates_baseline() {
        let mut tracker = MotionTracker::default();
        tracker.update(at(0.40));
        assert_eq!(tracker.update(at(0.43)), None);
        assert_eq!(tracker.previous(), Some(at(0.43)));
    }

    #[test]
    fn test_boundary_is_exclusive() {
        // Exact binary values so dx is exactly the deadband
        let mut tracker = MotionTracker::new(0.25);
        tracker.update(at(0.5));
        assert_eq!(tracker.update(at(0.75)), None);
        assert_eq!(tracker.update(at(0.5)), None);
    }

    #[test]
    fn test_default_deadband_near_boundary() {
        // Both steps land a hair under 0.05 in double precision
        let mut tracker = MotionTracker::default();
        tracker.update(at(0.10));
        assert_eq!(tracker.update(at(0.15)), None);
        assert_eq!(tracker.update(at(0.10)), None);

        let mut tracker = MotionTracker::default();
        tracker.update(at(0.40));
        assert_eq!(tracker.update(at(0.45)), None);
        assert_eq!(tracker.update(at(0.51)), Some(GestureEvent::SwipeRight));
    }

    #[test]
    fn test_slow_drift_never_swipes() {
        let mut tracker = MotionTracker::default();
        let events: Vec<_> = (0..20)
            .filter_map(|i| tracker.update(at(0.1 + i as f64 * 0.03)))
            .collect();
        assert!(events.is_empty());
    }

    #[test]
    fn test_sustained_fast_move_retriggers() {
        let mut tracker = MotionTracker::default();
        tracker.update(at(0.1));
        for i in 1..5 {
            assert_eq!(
                tracker.update(at(0.1 + i as f64 * 0.1)),
                Some(GestureEvent::SwipeRight)
            );
        }
    }

    #[test]
    fn test_vertical_motion_ignored() {
        let mut tracker = MotionTracker::default();
        tracker.update(HandCenter { x: 0.5, y: 0.1 });
        assert_eq!(tracker.update(HandCenter { x: 0.5, y: 0.9 }), None);
    }

    #[test]
    fn test_shared_mode_uses_one_tracker() {
        let mut trackers = MotionTrackers::new(TrackingMode::Shared, DEFAULT_SWIPE_DEADBAND);
        trackers.tracker_for(Some(Handedness::Left)).update(at(0.2));
        let event = trackers.tracker_for(Some(Handedness::Right)).update(at(0.8));
        assert_eq!(event, Some(GestureEvent::SwipeRight));
    }

    #[test]
    fn test_per_hand_mode_separates_sides() {
        let mut trackers = MotionTrackers::new(TrackingMode::PerHand, DEFAULT_SWIPE_DEADBAND);
        assert_eq!(trackers.tracker_for(Some(Handedness::Left)).update(at(0.2)), None);
        assert_eq!(trackers.tracker_for(Some(Handedness::Right)).update(at(0.8)), None);
        assert_eq!(
            trackers.tracker_for(Some(Handedness::Left)).update(at(0.21)),
            None
        );
        assert_eq!(
            trackers.tracker_for(Some(Handedness::Right)).update(at(0.6)),
            Some(GestureEvent::SwipeLeft)
        );
    }

    #[test]
    fn test_per_hand_mode_falls_back_for_unlabelled() {
        let mut trackers = MotionTrackers::new(TrackingMode::PerHand, DEFAULT_SWIPE_DEADBAND);
        trackers.tracker_for(None).update(at(0.2));
        assert_eq!(
            trackers.tracker_for(None).update(at(0.4)),
            Some(GestureEvent::SwipeRight)
        );
    }
}
