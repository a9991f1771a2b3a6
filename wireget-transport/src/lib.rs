//! Wireget transport layer
//!
//! This crate provides the blocking TCP transport used by the wireget HTTP
//! client. Everything here is synchronous: each call blocks the calling
//! thread until it completes or fails. The client performs exactly one
//! request over exactly one connection, so there is no multiplexing, no
//! connection pooling, and no timeout handling.
//!
//! ## Transport API
//!
//! The [`Transport`] trait defines the connection lifecycle: connect, send,
//! receive, close. [`TcpTransport`] is the single implementation, backed by
//! `std::net::TcpStream`.
//!
//! ```rust,no_run
//! use wireget_transport::{resolve, TcpTransport, Transport};
//!
//! let addr = resolve("example.com").unwrap();
//! let mut transport = TcpTransport::new();
//! transport.connect(&addr).unwrap();
//! transport.send(b"GET / HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n").unwrap();
//! while let Some(chunk) = transport.recv().unwrap() {
//!     println!("{} bytes", chunk.len());
//! }
//! transport.close().unwrap();
//! ```

use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};

/// The one port this client speaks to. Plain HTTP only; TLS is out of scope.
pub const HTTP_PORT: u16 = 80;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Transport layer error types
#[derive(Debug)]
pub enum Error {
    /// Hostname lookup failed or produced no usable address
    Resolution(String),

    /// The connection attempt was refused, timed out, or otherwise failed
    Connection(std::io::Error),

    /// The request could not be written in full
    Send(std::io::Error),

    /// The underlying read reported a transport error mid-response
    Receive(std::io::Error),

    /// Operation attempted on a transport that is not connected
    NotConnected,

    /// I/O errors outside the socket itself, e.g. writing the output stream
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Resolution(msg) => write!(f, "Name resolution error: {msg}"),
            Error::Connection(e) => write!(f, "Connection error: {e}"),
            Error::Send(e) => write!(f, "Send error: {e}"),
            Error::Receive(e) => write!(f, "Receive error: {e}"),
            Error::NotConnected => write!(f, "Connection error: not connected"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Connection(e) | Error::Send(e) | Error::Receive(e) | Error::Io(e) => Some(e),
            Error::Resolution(_) | Error::NotConnected => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Resolve a hostname or IP literal to a socket address on port 80.
///
/// The first address the resolver returns is accepted; there is no
/// preference policy among multiple results. The hostname is not validated
/// beyond non-emptiness.
pub fn resolve(hostname: &str) -> Result<SocketAddr> {
    if hostname.is_empty() {
        return Err(Error::Resolution("hostname is empty".to_string()));
    }

    let mut addrs = (hostname, HTTP_PORT)
        .to_socket_addrs()
        .map_err(|e| Error::Resolution(format!("{hostname}: {e}")))?;

    addrs
        .next()
        .ok_or_else(|| Error::Resolution(format!("{hostname}: no addresses found")))
}

/// Transport trait for a single blocking connection
///
/// All methods block the calling thread. A transport owns at most one
/// connection at a time; once closed, the connection is gone and `send`/
/// `recv` return [`Error::NotConnected`] until `connect` is called again.
pub trait Transport {
    /// Connect to a target address.
    fn connect(&mut self, target: &SocketAddr) -> Result<()>;

    /// Send data in full, blocking until every byte is written.
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive the next chunk of data.
    ///
    /// Blocks until data arrives. Returns `Ok(None)` when the peer has
    /// closed the connection in an orderly fashion (a zero-length read),
    /// which is the normal end of a response.
    fn recv(&mut self) -> Result<Option<Vec<u8>>>;

    /// Close the connection and release the socket.
    ///
    /// Closing an already-closed transport is a no-op.
    fn close(&mut self) -> Result<()>;
}

pub mod tcp;

pub use tcp::TcpTransport;
