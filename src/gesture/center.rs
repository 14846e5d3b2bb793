//! Hand centroid used as the swipe position proxy

use super::landmarks::{HandLandmark, LandmarkFrame};

/// Landmarks averaged into the hand center
pub const CENTER_LANDMARKS: [HandLandmark; 6] = [
    HandLandmark::Wrist,
    HandLandmark::ThumbTip,
    HandLandmark::IndexTip,
    HandLandmark::MiddleTip,
    HandLandmark::RingTip,
    HandLandmark::PinkyTip,
];

/// 2D hand position in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandCenter {
    pub x: f64,
    pub y: f64,
}

/// Unweighted mean of the wrist, thumb tip and four fingertips
pub fn hand_center(frame: &LandmarkFrame) -> HandCenter {
    let (sum_x, sum_y) = CENTER_LANDMARKS
        .iter()
        .map(|&id| frame.get(id))
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));

    let n = CENTER_LANDMARKS.len() as f64;
    HandCenter {
        x: sum_x / n,
        y: sum_y / n,
    }
}
