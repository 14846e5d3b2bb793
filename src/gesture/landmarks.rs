//! Hand landmark model
//!
//! MediaPipe Hands reports 21 joints per detected hand in a fixed anatomical
//! order. Coordinates are normalized to the image: x and y in [0, 1] with y
//! growing downward, z relative to the wrist.

use serde::{Deserialize, Serialize};

use crate::error::TrackingError;

/// Number of landmarks MediaPipe reports per hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Named hand joints, in MediaPipe index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    /// Position of this joint in the provider's landmark list
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The four non-thumb fingers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Fingertip joint
    pub const fn tip(self) -> HandLandmark {
        match self {
            Finger::Index => HandLandmark::IndexTip,
            Finger::Middle => HandLandmark::MiddleTip,
            Finger::Ring => HandLandmark::RingTip,
            Finger::Pinky => HandLandmark::PinkyTip,
        }
    }

    /// Middle knuckle, the bend reference for this finger
    pub const fn pip(self) -> HandLandmark {
        match self {
            Finger::Index => HandLandmark::IndexPip,
            Finger::Middle => HandLandmark::MiddlePip,
            Finger::Ring => HandLandmark::RingPip,
            Finger::Pinky => HandLandmark::PinkyPip,
        }
    }
}

/// A single normalized 3D joint position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Landmark {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// All 21 joints of one hand for one video frame
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    points: [Landmark; NUM_HAND_LANDMARKS],
}

impl LandmarkFrame {
    pub fn new(points: [Landmark; NUM_HAND_LANDMARKS]) -> Self {
        Self { points }
    }

    /// Build a frame from a provider list, which must hold exactly 21 points
    pub fn from_points(points: &[Landmark]) -> Result<Self, TrackingError> {
        let points: [Landmark; NUM_HAND_LANDMARKS] = points
            .try_into()
            .map_err(|_| TrackingError::LandmarkCount(points.len()))?;
        Ok(Self { points })
    }

    pub fn get(&self, landmark: HandLandmark) -> Landmark {
        self.points[landmark.index()]
    }

    pub fn points(&self) -> &[Landmark; NUM_HAND_LANDMARKS] {
        &self.points
    }
}
