//! Configuration parsing and management for gesturecast

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, GesturecastError};
use crate::gesture::motion::{TrackingMode, DEFAULT_SWIPE_DEADBAND};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dispatch: DispatchConfig,
    pub tracker: TrackerConfig,
    pub gestures: GestureConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GesturecastError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, GesturecastError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Load configuration from default paths
    pub fn load() -> Result<Self, GesturecastError> {
        let paths = [
            PathBuf::from("gesturecast.toml"),
            PathBuf::from("config/default.toml"),
            dirs_path().join("config.toml"),
        ];

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), GesturecastError> {
        if self.dispatch.port == 0 {
            return Err(invalid("dispatch.port", "Port must be greater than 0"));
        }

        if self.dispatch.host.trim().is_empty() {
            return Err(invalid("dispatch.host", "Host must not be empty"));
        }

        if self.tracker.port == 0 {
            return Err(invalid("tracker.port", "Port must be greater than 0"));
        }

        if self.tracker.max_hands == 0 {
            return Err(invalid("tracker.max_hands", "At least one hand must be tracked"));
        }

        for (field, value) in [
            ("tracker.min_detection_confidence", self.tracker.min_detection_confidence),
            ("tracker.min_tracking_confidence", self.tracker.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, "Confidence must be between 0.0 and 1.0"));
            }
        }

        let deadband = self.gestures.swipe_deadband;
        if !deadband.is_finite() || deadband <= 0.0 {
            return Err(invalid(
                "gestures.swipe_deadband",
                "Deadband must be a positive number",
            ));
        }

        if self.tracker.auto_launch {
            let path = Path::new(&self.tracker.tracker_script);
            if !path.exists() {
                tracing::warn!(
                    "Tracker auto_launch enabled but script not found at: {}",
                    self.tracker.tracker_script
                );
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> GesturecastError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

/// Where gesture tokens are sent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Consumer host
    pub host: String,
    /// Consumer UDP port
    pub port: u16,
    /// Local address to send from
    pub bind_address: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 12345,
            bind_address: "0.0.0.0:0".to_string(),
        }
    }
}

impl DispatchConfig {
    pub fn destination(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// MediaPipe Hands landmark provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// UDP port to receive hand landmarks on
    pub port: u16,
    /// Listen address for UDP socket
    pub listen_address: String,
    /// How long one receive may block before the stop flag is rechecked
    pub read_timeout_ms: u64,
    /// Auto-launch the Python tracker subprocess
    pub auto_launch: bool,
    /// Python interpreter used to run the tracker script
    pub interpreter: String,
    /// Path to the hand tracker script
    pub tracker_script: String,
    /// Camera device index
    pub camera_device: u32,
    /// Camera capture width
    pub capture_width: u32,
    /// Camera capture height
    pub capture_height: u32,
    /// Camera capture FPS
    pub capture_fps: u32,
    /// Maximum number of hands to detect per frame
    pub max_hands: u32,
    /// Minimum palm detection confidence (0.0 - 1.0)
    pub min_detection_confidence: f32,
    /// Minimum landmark tracking confidence (0.0 - 1.0)
    pub min_tracking_confidence: f32,
    /// Mirror the camera image before detection
    pub flip_horizontal: bool,
    /// Auto-restart subprocess on crash
    pub auto_restart: bool,
    /// Delay before restarting crashed subprocess (seconds)
    pub restart_delay_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            port: 12346,
            listen_address: "127.0.0.1".to_string(),
            read_timeout_ms: 100,
            auto_launch: true,
            interpreter: "python3".to_string(),
            tracker_script: "scripts/hand_tracker.py".to_string(),
            camera_device: 0,
            capture_width: 640,
            capture_height: 480,
            capture_fps: 30,
            max_hands: 2,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
            flip_horizontal: true,
            auto_restart: true,
            restart_delay_secs: 3,
        }
    }
}

/// Gesture recognition tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum horizontal center movement between frames for a swipe
    pub swipe_deadband: f64,
    /// How multiple hands share swipe tracking: "shared" or "per_hand"
    pub tracking_mode: TrackingMode,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_deadband: DEFAULT_SWIPE_DEADBAND,
            tracking_mode: TrackingMode::Shared,
        }
    }
}

/// Get the platform-specific configuration directory
fn dirs_path() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        if let Some(config_dir) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(config_dir).join("gesturecast");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config/gesturecast");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Library/Application Support/gesturecast");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("gesturecast");
        }
    }

    PathBuf::from(".")
}
