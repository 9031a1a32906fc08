//! Fire-and-forget UDP client
//!
//! The client resolves its endpoint once, at construction. If resolution or
//! socket setup fails the client stays unready for its whole lifetime and
//! every send is a no-op; callers check [`Client::ready`] and build a new
//! client if they want another attempt.
//!
//! # Design
//!
//! - IPv4 only, first resolved address only
//! - One datagram per record, no acknowledgment or retry
//! - Non-blocking socket: a full send buffer drops the datagram
//! - Frames above [`BUFFER_SIZE`] are dropped before reaching the socket
//!
//! # Example
//!
//! ```no_run
//! use ffwd_client::{Client, Event};
//!
//! let client = Client::connect("localhost", 19091);
//! if !client.ready() {
//!     eprintln!("collector not reachable");
//! }
//!
//! client.send(&Event::for_key("deploy").with_state("ok"));
//! ```

use std::format;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::frame::{FrameEncoder, FrameHeader};
use crate::record::Record;
use crate::BUFFER_SIZE;

/// Result of a single [`Client::send`] call
///
/// Callers are free to ignore it; it exists so that drops can be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// One write of `length` bytes was attempted (delivery not confirmed)
    Sent {
        /// Frame length, header included
        length: usize,
    },
    /// Client is unready; nothing was written
    NotReady,
    /// Frame would exceed [`BUFFER_SIZE`]; nothing was written
    Oversized {
        /// Frame length that was rejected
        length: usize,
    },
}

impl SendOutcome {
    /// Check if a write was attempted
    #[inline]
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent { .. })
    }
}

#[derive(Debug)]
enum State {
    Unready,
    Ready { socket: UdpSocket, peer: SocketAddr },
}

/// UDP client for a single collector endpoint
#[derive(Debug)]
pub struct Client {
    state: State,
}

impl Client {
    /// Resolve `host:port` and connect a UDP socket to it
    ///
    /// Never fails: on error the client is unready.
    pub fn connect(host: &str, port: u16) -> Self {
        let state = match open_socket(host, port) {
            Ok((socket, peer)) => {
                debug!(%peer, "collector endpoint ready");
                State::Ready { socket, peer }
            }
            Err(e) => {
                debug!(host, port, error = %e, "collector endpoint unavailable, client unready");
                State::Unready
            }
        };

        Self { state }
    }

    /// Connect to the endpoint described by `config`
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::connect(&config.host, config.port)
    }

    /// Check if the socket is connected
    #[inline]
    pub fn ready(&self) -> bool {
        matches!(self.state, State::Ready { .. })
    }

    /// Resolved collector address, if ready
    #[inline]
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        match &self.state {
            State::Ready { peer, .. } => Some(*peer),
            State::Unready => None,
        }
    }

    /// Serialize, frame and write a record
    ///
    /// A no-op when unready. OS-level write errors are ignored.
    pub fn send<R: Record + ?Sized>(&self, record: &R) -> SendOutcome {
        let socket = match &self.state {
            State::Ready { socket, .. } => socket,
            State::Unready => return SendOutcome::NotReady,
        };

        send_frame(socket, &record.serialize())
    }
}

fn send_frame(socket: &UdpSocket, payload: &[u8]) -> SendOutcome {
    let mut buf = [0u8; BUFFER_SIZE];

    let length = match FrameEncoder::new(&mut buf).encode(payload) {
        Ok(length) => length,
        Err(_) => {
            let length = payload.len().saturating_add(FrameHeader::SIZE);
            trace!(length, max = BUFFER_SIZE, "dropping oversized frame");
            return SendOutcome::Oversized { length };
        }
    };

    if let Err(e) = socket.send(&buf[..length]) {
        trace!(length, error = %e, "frame write failed");
    }

    SendOutcome::Sent { length }
}

fn open_socket(host: &str, port: u16) -> io::Result<(UdpSocket, SocketAddr)> {
    let peer = resolve_ipv4(host, port)?;

    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(peer)?;
    socket.set_nonblocking(true)?;

    Ok((socket, peer))
}

/// First IPv4 address of `host:port`
fn resolve_ipv4(host: &str, port: u16) -> io::Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()?
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("no IPv4 address for {}", host),
            )
        })
}
