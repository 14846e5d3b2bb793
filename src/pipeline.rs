//! Frame processing loop
//!
//! Pulls detected hands from a [`FrameSource`], runs pose classification and
//! swipe tracking on each hand in arrival order, and hands every resulting
//! event to an [`EventSink`]. Runs on a single thread; the stop flag is only
//! checked between cycles.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::GestureConfig;
use crate::error::GesturecastError;
use crate::gesture::{classify_pose, hand_center, GestureEvent, MotionTrackers};
use crate::output::EventSink;
use crate::tracking::DetectedHand;

/// Provider of detected hands, one call per camera frame
pub trait FrameSource {
    /// Block until the next frame's hands are available.
    ///
    /// `Ok(None)` means no frame arrived this cycle; `Ok(Some(vec![]))` means
    /// a frame arrived with no hands in it.
    fn next_hands(&mut self) -> Result<Option<Vec<DetectedHand>>, GesturecastError>;
}

/// Counters kept across the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames: u64,
    pub hands: u64,
    pub events_sent: u64,
    pub send_failures: u64,
    pub skipped_frames: u64,
}

/// What a single cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A frame was processed; holds the events produced, in dispatch order
    Processed(Vec<GestureEvent>),
    /// Provider had nothing this cycle
    NoFrame,
    /// Provider failed; the frame was dropped
    Skipped,
}

/// Gesture recognition pipeline writing to `S`
pub struct GesturePipeline<S: EventSink> {
    trackers: MotionTrackers,
    sink: S,
    stats: PipelineStats,
}

impl<S: EventSink> GesturePipeline<S> {
    pub fn new(config: &GestureConfig, sink: S) -> Self {
        Self {
            trackers: MotionTrackers::new(config.tracking_mode, config.swipe_deadband),
            sink,
            stats: PipelineStats::default(),
        }
    }

    /// Run recognition on one frame's hands and dispatch the results.
    ///
    /// Per hand, the static pose event (if any) goes out before the swipe.
    pub fn process_hands(&mut self, hands: &[DetectedHand]) -> Vec<GestureEvent> {
        self.stats.frames += 1;
        let mut events = Vec::new();

        for hand in hands {
            self.stats.hands += 1;

            if let Some(pose) = classify_pose(&hand.landmarks) {
                events.push(pose);
                self.dispatch(pose);
            }

            let center = hand_center(&hand.landmarks);
            if let Some(swipe) = self.trackers.tracker_for(hand.handedness).update(center) {
                events.push(swipe);
                self.dispatch(swipe);
            }
        }

        events
    }

    fn dispatch(&mut self, event: GestureEvent) {
        match self.sink.send(event) {
            Ok(()) => {
                self.stats.events_sent += 1;
                tracing::debug!("Gesture: {}", event);
            }
            Err(e) => {
                self.stats.send_failures += 1;
                tracing::warn!("Gesture dispatch failed: {}", e);
            }
        }
    }

    /// Fetch one frame from `source` and process it
    pub fn run_cycle<F: FrameSource + ?Sized>(&mut self, source: &mut F) -> CycleOutcome {
        match source.next_hands() {
            Ok(Some(hands)) => CycleOutcome::Processed(self.process_hands(&hands)),
            Ok(None) => CycleOutcome::NoFrame,
            Err(e) => {
                self.stats.skipped_frames += 1;
                tracing::warn!("Skipping frame: {}", e);
                CycleOutcome::Skipped
            }
        }
    }

    /// Process frames until `stop` is set
    pub fn run<F: FrameSource + ?Sized>(&mut self, source: &mut F, stop: &AtomicBool) {
        while !stop.load(Ordering::Relaxed) {
            self.run_cycle(source);
        }
        tracing::info!("Gesture pipeline stopped: {:?}", self.stats);
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
