//! Error types for gesturecast

use thiserror::Error;

/// Main error type for gesturecast
#[derive(Error, Debug)]
pub enum GesturecastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Landmark provider errors (receiver, packet decoding, subprocess)
#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Hand receiver error: {0}")]
    Receiver(String),

    #[error("Hand packet parse error: {0}")]
    Parse(String),

    #[error("Expected 21 hand landmarks, got {0}")]
    LandmarkCount(usize),

    #[error("Hand tracker subprocess error: {0}")]
    Subprocess(String),
}

/// Gesture event transport errors
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Failed to resolve dispatch destination {0}")]
    Resolve(String),

    #[error("Failed to bind dispatch socket: {0}")]
    Bind(String),

    #[error("Failed to send '{token}' to {destination}: {message}")]
    Send {
        token: &'static str,
        destination: String,
        message: String,
    },

    #[error("Unknown gesture token: {0:?}")]
    UnknownToken(String),

    #[error("Failed to receive gesture token: {0}")]
    Receive(String),
}

/// Result type alias for gesturecast operations
pub type Result<T> = std::result::Result<T, GesturecastError>;
