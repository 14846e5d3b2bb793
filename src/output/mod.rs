//! Output module
//!
//! Delivers recognized gestures to the consumer:
//! - UDP token dispatch
//! - Consumer-side token listener

pub mod udp;

use crate::error::DispatchError;
use crate::gesture::GestureEvent;

pub use udp::{TokenListener, UdpDispatcher};

/// Destination for recognized gesture events
pub trait EventSink {
    /// Make one delivery attempt for `event`
    fn send(&mut self, event: GestureEvent) -> Result<(), DispatchError>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn send(&mut self, event: GestureEvent) -> Result<(), DispatchError> {
        (**self).send(event)
    }
}

impl EventSink for Vec<GestureEvent> {
    fn send(&mut self, event: GestureEvent) -> Result<(), DispatchError> {
        self.push(event);
        Ok(())
    }
}
