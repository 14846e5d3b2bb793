//! Static hand pose classification
//!
//! A finger counts as curled when its tip sits lower in the image than its
//! PIP knuckle and as extended when the tip sits higher. A fist needs all four
//! non-thumb fingers curled, an open palm needs all four extended. Anything in
//! between (including exact ties) is left unclassified.

use super::landmarks::{Finger, LandmarkFrame};
use super::GestureEvent;

/// Bend state of a single finger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerState {
    Curled,
    Extended,
    /// Tip and knuckle at the same height
    Level,
}

/// Compare a finger's tip height against its PIP knuckle
pub fn finger_state(frame: &LandmarkFrame, finger: Finger) -> FingerState {
    let tip = frame.get(finger.tip());
    let pip = frame.get(finger.pip());

    if tip.y > pip.y {
        FingerState::Curled
    } else if tip.y < pip.y {
        FingerState::Extended
    } else {
        FingerState::Level
    }
}

/// Classify a hand as `Fist`, `OpenPalm`, or neither
pub fn classify_pose(frame: &LandmarkFrame) -> Option<GestureEvent> {
    let states = Finger::ALL.map(|finger| finger_state(frame, finger));

    if states.iter().all(|&s| s == FingerState::Curled) {
        Some(GestureEvent::Fist)
    } else if states.iter().all(|&s| s == FingerState::Extended) {
        Some(GestureEvent::OpenPalm)
    } else {
        None
    }
}
