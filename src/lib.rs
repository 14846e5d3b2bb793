//! gesturecast - Hand gesture controller service
//!
//! Turns MediaPipe hand landmarks into discrete control events:
//! - Static poses (fist, open palm) from finger bend state
//! - Horizontal swipes from frame-to-frame hand movement
//! - One UDP datagram per event to a game or other consumer

pub mod config;
pub mod error;
pub mod gesture;
pub mod output;
pub mod pipeline;
pub mod tracking;

pub use config::Config;
pub use error::{GesturecastError, Result};
pub use gesture::GestureEvent;
pub use pipeline::{FrameSource, GesturePipeline, PipelineStats};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
