//! UDP gesture token transport
//!
//! Every event goes out as its own datagram holding just the ASCII token.
//! Nothing is acknowledged or retried.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use super::EventSink;
use crate::config::DispatchConfig;
use crate::error::{DispatchError, GesturecastError};
use crate::gesture::GestureEvent;

/// Sends gesture tokens to the configured consumer
pub struct UdpDispatcher {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl UdpDispatcher {
    /// Resolve the consumer address once and bind the local send socket
    pub fn new(config: &DispatchConfig) -> Result<Self, GesturecastError> {
        let destination = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| DispatchError::Resolve(format!("{}: {}", config.destination(), e)))?
            .next()
            .ok_or_else(|| {
                DispatchError::Resolve(format!("{}: no addresses found", config.destination()))
            })?;

        let socket = UdpSocket::bind(&config.bind_address).map_err(|e| {
            DispatchError::Bind(format!("{}: {}", config.bind_address, e))
        })?;

        tracing::info!("Dispatching gestures to {}", destination);

        Ok(Self {
            socket,
            destination,
        })
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }
}

impl EventSink for UdpDispatcher {
    fn send(&mut self, event: GestureEvent) -> Result<(), DispatchError> {
        let token = event.token();
        self.socket
            .send_to(token.as_bytes(), self.destination)
            .map_err(|e| DispatchError::Send {
                token,
                destination: self.destination.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("Sent {} to {}", token, self.destination);
        Ok(())
    }
}

/// Consumer-side receiver that decodes incoming gesture tokens
pub struct TokenListener {
    socket: UdpSocket,
}

impl TokenListener {
    /// Bind to `addr` and wait at most `timeout` per receive
    pub fn bind<A: ToSocketAddrs>(addr: A, timeout: Duration) -> Result<Self, GesturecastError> {
        let socket = UdpSocket::bind(addr).map_err(|e| DispatchError::Bind(e.to_string()))?;
        socket
            .set_read_timeout(Some(timeout))
            .map_err(|e| DispatchError::Bind(e.to_string()))?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, GesturecastError> {
        Ok(self.socket.local_addr()?)
    }

    /// Wait for the next datagram. `Ok(None)` on timeout, `UnknownToken`
    /// for anything outside the gesture vocabulary.
    pub fn recv(&self) -> Result<Option<GestureEvent>, DispatchError> {
        let mut buf = [0u8; 64];
        match self.socket.recv(&mut buf) {
            Ok(size) => {
                let text = String::from_utf8_lossy(&buf[..size]);
                text.parse().map(Some)
            }
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(DispatchError::Receive(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listener() -> (TokenListener, DispatchConfig) {
        let listener = TokenListener::bind("127.0.0.1:0", Duration::from_secs(2)).unwrap();
        let config = DispatchConfig {
            host: "127.0.0.1".to_string(),
            port: listener.local_addr().unwrap().port(),
            bind_address: "127.0.0.1:0".to_string(),
        };
        (listener, config)
    }

    #[test]
    fn test_each_event_is_one_datagram() {
        let (listener, config) = listener();
        let mut dispatcher = UdpDispatcher::new(&config).unwrap();

        for event in GestureEvent::ALL {
            dispatcher.send(event).unwrap();
        }
        for event in GestureEvent::ALL {
            assert_eq!(listener.recv().unwrap(), Some(event));
        }
    }

    #[test]
    fn test_raw_payload_is_bare_token() {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
        let config = DispatchConfig {
            host: "127.0.0.1".to_string(),
            port: socket.local_addr().unwrap().port(),
            bind_address: "127.0.0.1:0".to_string(),
        };

        UdpDispatcher::new(&config)
            .unwrap()
            .send(GestureEvent::OpenPalm)
            .unwrap();

        let mut buf = [0u8; 64];
        let size = socket.recv(&mut buf).unwrap();
        assert_eq!(&buf[..size], b"open_palm");
    }

    #[test]
    fn test_listener_rejects_unknown_token() {
        let (listener, config) = listener();
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(b"jump", config.destination()).unwrap();

        assert!(matches!(
            listener.recv(),
            Err(DispatchError::UnknownToken(token)) if token == "jump"
        ));
    }

    #[test]
    fn test_destination_resolved_at_startup() {
        let (_listener, config) = listener();
        let dispatcher = UdpDispatcher::new(&config).unwrap();
        let expected: SocketAddr = format!("127.0.0.1:{}", config.port).parse().unwrap();
        assert_eq!(dispatcher.destination(), expected);
    }

    #[test]
    fn test_send_failure_is_reported() {
        // IPv4 socket cannot reach an IPv6 destination
        let config = DispatchConfig {
            host: "::1".to_string(),
            port: 9,
            bind_address: "127.0.0.1:0".to_string(),
        };
        let mut dispatcher = UdpDispatcher::new(&config).unwrap();
        assert!(matches!(
            dispatcher.send(GestureEvent::Fist),
            Err(DispatchError::Send { token: "fist", .. })
        ));
    }
}
