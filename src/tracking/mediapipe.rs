//! MediaPipe hand landmark receiver
//!
//! Receives JSON-over-UDP packets from the `scripts/hand_tracker.py` helper.
//! Each packet describes one processed camera frame:
//!
//! ```json
//! {"hands": [{"handedness": "Right", "landmarks": [[x, y, z], ...]}]}
//! ```

use serde::Deserialize;
use std::net::UdpSocket;
use std::time::Duration;

use crate::config::TrackerConfig;
use crate::error::{GesturecastError, TrackingError};
use crate::gesture::{Handedness, Landmark, LandmarkFrame};
use crate::pipeline::FrameSource;

/// One hand as sent by the tracker helper
#[derive(Debug, Clone, Deserialize)]
pub struct HandEntry {
    /// "Left" / "Right" as classified by MediaPipe
    #[serde(default)]
    pub handedness: Option<Handedness>,
    /// 21 landmarks as [x, y, z]
    pub landmarks: Vec<[f64; 3]>,
}

/// A single JSON packet from the hand tracker
#[derive(Debug, Clone, Deserialize)]
pub struct HandPacket {
    /// Hands detected this frame (empty when none)
    #[serde(default)]
    pub hands: Vec<HandEntry>,
}

impl HandPacket {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TrackingError> {
        serde_json::from_slice(bytes)
            .map_err(|e| TrackingError::Parse(format!("JSON parse error: {}", e)))
    }

    /// Convert the hands into validated landmark frames.
    ///
    /// A hand with the wrong number of landmarks is logged and dropped; the
    /// other hands of the frame are kept.
    pub fn into_hands(self) -> Vec<DetectedHand> {
        self.hands
            .into_iter()
            .filter_map(|entry| {
                let points: Vec<Landmark> =
                    entry.landmarks.into_iter().map(Landmark::from).collect();
                match LandmarkFrame::from_points(&points) {
                    Ok(landmarks) => Some(DetectedHand {
                        handedness: entry.handedness,
                        landmarks,
                    }),
                    Err(e) => {
                        tracing::warn!("Dropping hand: {}", e);
                        None
                    }
                }
            })
            .collect()
    }
}

/// A hand ready for gesture recognition
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedHand {
    pub handedness: Option<Handedness>,
    pub landmarks: LandmarkFrame,
}

impl DetectedHand {
    pub fn new(landmarks: LandmarkFrame) -> Self {
        Self {
            handedness: None,
            landmarks,
        }
    }

    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = Some(handedness);
        self
    }
}

/// MediaPipe JSON-over-UDP receiver
pub struct HandReceiver {
    config: TrackerConfig,
    socket: Option<UdpSocket>,
}

impl HandReceiver {
    /// Create a new receiver (does not bind yet)
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            config: config.clone(),
            socket: None,
        }
    }

    /// Bind the UDP socket and start receiving
    pub fn start(&mut self) -> Result<(), GesturecastError> {
        let addr = format!("{}:{}", self.config.listen_address, self.config.port);

        let socket = UdpSocket::bind(&addr).map_err(|e| {
            TrackingError::Receiver(format!("Failed to bind to {}: {}", addr, e))
        })?;

        socket
            .set_read_timeout(Some(Duration::from_millis(self.config.read_timeout_ms.max(1))))
            .map_err(|e| TrackingError::Receiver(format!("Failed to set read timeout: {}", e)))?;

        tracing::info!("Hand receiver listening on {}", addr);
        self.socket = Some(socket);

        Ok(())
    }

    /// Address the socket is bound to, once started
    pub fn local_addr(&self) -> Option<std::net::SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }

    /// Wait for the next packet. `Ok(None)` means nothing arrived before
    /// the read timeout.
    pub fn recv_packet(&self) -> Result<Option<HandPacket>, GesturecastError> {
        let socket = match &self.socket {
            Some(s) => s,
            None => return Ok(None),
        };

        let mut buf = [0u8; 65536];

        match socket.recv(&mut buf) {
            Ok(size) if size > 0 => {
                tracing::trace!("Hand packet: {} bytes", size);
                Ok(Some(HandPacket::from_slice(&buf[..size])?))
            }
            Ok(_) => Ok(None),
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(TrackingError::Receiver(format!("Receive error: {}", e)).into()),
        }
    }

    /// Stop the receiver
    pub fn stop(&mut self) {
        self.socket = None;
        tracing::info!("Hand receiver stopped");
    }
}

impl FrameSource for HandReceiver {
    fn next_hands(&mut self) -> Result<Option<Vec<DetectedHand>>, GesturecastError> {
        match self.recv_packet()? {
            Some(packet) => Ok(Some(packet.into_hands())),
            None => Ok(None),
        }
    }
}
