//! Gesture recognition
//!
//! Pure decision logic turning hand landmarks into control events:
//! - Hand centroid calculation
//! - Static pose classification (fist / open palm)
//! - Horizontal swipe tracking

pub mod center;
pub mod classifier;
pub mod landmarks;
pub mod motion;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DispatchError;

pub use center::{hand_center, HandCenter};
pub use classifier::classify_pose;
pub use landmarks::{Finger, HandLandmark, Landmark, LandmarkFrame};
pub use motion::{MotionTracker, MotionTrackers, TrackingMode};

/// A discrete control event sent to the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureEvent {
    SwipeLeft,
    SwipeRight,
    Fist,
    OpenPalm,
}

impl GestureEvent {
    pub const ALL: [GestureEvent; 4] = [
        GestureEvent::SwipeLeft,
        GestureEvent::SwipeRight,
        GestureEvent::Fist,
        GestureEvent::OpenPalm,
    ];

    /// Wire token for this event
    pub const fn token(self) -> &'static str {
        match self {
            GestureEvent::SwipeLeft => "swipe_left",
            GestureEvent::SwipeRight => "swipe_right",
            GestureEvent::Fist => "fist",
            GestureEvent::OpenPalm => "open_palm",
        }
    }

    pub const fn is_swipe(self) -> bool {
        matches!(self, GestureEvent::SwipeLeft | GestureEvent::SwipeRight)
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for GestureEvent {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.token() == s)
            .ok_or_else(|| DispatchError::UnknownToken(s.to_string()))
    }
}

/// Which hand the provider believes it saw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}
