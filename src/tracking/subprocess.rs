//! Hand tracker subprocess manager
//!
//! Launches the Python MediaPipe Hands helper as a child process with
//! automatic cleanup on drop. [`HandTrackerSubprocess::supervise`] keeps it
//! alive from a runtime task so the frame loop never waits on restarts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time::Instant;

use crate::config::TrackerConfig;
use crate::error::{GesturecastError, TrackingError};

/// How often the supervisor checks the child and the stop flag
const SUPERVISE_INTERVAL: Duration = Duration::from_millis(100);

/// Manages the `scripts/hand_tracker.py` subprocess
pub struct HandTrackerSubprocess {
    child: Option<Child>,
    config: TrackerConfig,
}

impl HandTrackerSubprocess {
    /// Create a new subprocess manager (does not start the process)
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            child: None,
            config: config.clone(),
        }
    }

    /// Command-line arguments passed to the tracker script
    pub fn args(&self) -> Vec<String> {
        let c = &self.config;
        let mut args = vec![
            c.tracker_script.clone(),
            "--ip".to_string(),
            c.listen_address.clone(),
            "--port".to_string(),
            c.port.to_string(),
            "--capture".to_string(),
            c.camera_device.to_string(),
            "--width".to_string(),
            c.capture_width.to_string(),
            "--height".to_string(),
            c.capture_height.to_string(),
            "--fps".to_string(),
            c.capture_fps.to_string(),
            "--max-hands".to_string(),
            c.max_hands.to_string(),
            "--min-detection-confidence".to_string(),
            c.min_detection_confidence.to_string(),
            "--min-tracking-confidence".to_string(),
            c.min_tracking_confidence.to_string(),
        ];
        if c.flip_horizontal {
            args.push("--flip".to_string());
        }
        args
    }

    /// Launch the tracker subprocess. Must be called inside a tokio runtime.
    pub fn start(&mut self) -> Result<(), GesturecastError> {
        if self.is_running() {
            return Ok(());
        }

        let child = Command::new(&self.config.interpreter)
            .args(self.args())
            .kill_on_drop(true)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                TrackingError::Subprocess(format!(
                    "Failed to launch hand tracker at '{}': {}",
                    self.config.tracker_script, e
                ))
            })?;

        tracing::info!(
            "Hand tracker subprocess started (pid: {:?}, camera: {}, port: {})",
            child.id(),
            self.config.camera_device,
            self.config.port,
        );

        self.child = Some(child);
        Ok(())
    }

    /// Check if the subprocess is still running (non-blocking)
    pub fn is_running(&mut self) -> bool {
        match &mut self.child {
            Some(child) => match child.try_wait() {
                Ok(None) => true,
                Ok(Some(status)) => {
                    tracing::warn!("Hand tracker subprocess exited with: {}", status);
                    self.child = None;
                    false
                }
                Err(e) => {
                    tracing::error!("Failed to check hand tracker status: {}", e);
                    false
                }
            },
            None => false,
        }
    }

    /// Keep the tracker running until `stop` is set, then kill it.
    ///
    /// With `auto_restart` on, an exited or failed child is relaunched once
    /// `restart_delay_secs` has passed. Failed launches are retried on the
    /// same schedule.
    pub async fn supervise(mut self, stop: Arc<AtomicBool>) {
        let delay = Duration::from_secs(self.config.restart_delay_secs);
        let mut next_restart: Option<Instant> = None;
        let mut ticker = tokio::time::interval(SUPERVISE_INTERVAL);

        while !stop.load(Ordering::Relaxed) {
            ticker.tick().await;
            if !self.config.auto_restart || self.is_running() {
                continue;
            }

            match next_restart {
                None => {
                    tracing::info!(
                        "Hand tracker not running, restarting in {}s",
                        self.config.restart_delay_secs
                    );
                    next_restart = Some(Instant::now() + delay);
                }
                Some(at) if Instant::now() >= at => {
                    next_restart = None;
                    if let Err(e) = self.start() {
                        tracing::error!("Failed to restart hand tracker: {}", e);
                    }
                }
                Some(_) => {}
            }
        }

        self.stop().await;
    }

    /// Stop the subprocess by killing it
    pub async fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            tracing::info!("Stopping hand tracker subprocess (pid: {:?})", child.id());
            let _ = child.kill().await;
            let _ = child.wait().await;
        }
    }
}

/// Check if the `mediapipe` Python package is available.
///
/// Runs `<interpreter> -c "import mediapipe"` and returns true if it succeeds.
pub fn check_mediapipe_available(interpreter: &str) -> bool {
    match std::process::Command::new(interpreter)
        .args(["-c", "import mediapipe"])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_include_tracker_settings() {
        let config = TrackerConfig {
            port: 5000,
            max_hands: 1,
            ..TrackerConfig::default()
        };
        let args = HandTrackerSubprocess::new(&config).args();

        assert_eq!(args[0], "scripts/hand_tracker.py");
        let port_at = args.iter().position(|a| a == "--port").unwrap();
        assert_eq!(args[port_at + 1], "5000");
        let hands_at = args.iter().position(|a| a == "--max-hands").unwrap();
        assert_eq!(args[hands_at + 1], "1");
        assert_eq!(args.last().map(String::as_str), Some("--flip"));
    }

    #[test]
    fn test_args_without_flip() {
        let config = TrackerConfig {
            flip_horizontal: false,
            ..TrackerConfig::default()
        };
        let args = HandTrackerSubprocess::new(&config).args();
        assert!(!args.iter().any(|a| a == "--flip"));
    }

    #[test]
    fn test_not_running_before_start() {
        let mut sp = HandTrackerSubprocess::new(&TrackerConfig::default());
        assert!(!sp.is_running());
    }

    fn missing_interpreter() -> TrackerConfig {
        TrackerConfig {
            interpreter: "gesturecast-no-such-interpreter".to_string(),
            restart_delay_secs: 3,
            ..TrackerConfig::default()
        }
    }

    #[test]
    fn test_mediapipe_check_with_missing_interpreter() {
        assert!(!check_mediapipe_available("gesturecast-no-such-interpreter"));
    }

    #[tokio::test]
    async fn test_start_reports_launch_failure() {
        let mut sp = HandTrackerSubprocess::new(&missing_interpreter());
        assert!(matches!(
            sp.start(),
            Err(GesturecastError::Tracking(TrackingError::Subprocess(_)))
        ));
        assert!(!sp.is_running());
    }

    #[tokio::test]
    async fn test_supervisor_stops_while_waiting_to_restart() {
        let sp = HandTrackerSubprocess::new(&missing_interpreter());
        let stop = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(sp.supervise(Arc::clone(&stop)));

        // Restart is pending for another ~3s at this point
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!task.is_finished());

        stop.store(true, Ordering::Relaxed);
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("supervisor kept waiting on the restart delay")
            .unwrap();
    }

    #[tokio::test]
    async fn test_supervisor_without_auto_restart_only_waits_for_stop() {
        let config = TrackerConfig {
            auto_restart: false,
            ..missing_interpreter()
        };
        let stop = Arc::new(AtomicBool::new(true));
        tokio::time::timeout(
            Duration::from_secs(1),
            HandTrackerSubprocess::new(&config).supervise(stop),
        )
        .await
        .unwrap();
    }
}
