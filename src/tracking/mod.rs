//! Tracking module
//!
//! Hand landmark input from the MediaPipe Hands helper:
//! - JSON-over-UDP receiver
//! - Helper subprocess management

pub mod mediapipe;
pub mod subprocess;

pub use mediapipe::{DetectedHand, HandPacket, HandReceiver};
