//! Orchestration of a single HTTP GET request
//!
//! The whole client is the sequence resolve → connect → send → relay →
//! close, run once on one thread with blocking I/O. Errors propagate up to
//! `main`, which alone decides the exit code; nothing in here terminates
//! the process.

use std::io::Write;
use wireget_transport::{resolve, Error, Result, TcpTransport, Transport};

use crate::request::GetRequest;

/// The caller-supplied target of one request.
#[derive(Debug, Clone)]
pub struct Target {
    /// Hostname or IP literal; also used verbatim for the Host header.
    pub hostname: String,
    /// Request path, inserted verbatim into the GET line.
    pub path: String,
}

/// Perform one GET request against `target`, streaming the raw response
/// into `out`.
///
/// The connection is closed on every exit path; when both the exchange and
/// the close fail, the exchange error wins.
pub fn fetch<W: Write>(target: &Target, out: &mut W) -> Result<()> {
    let addr = resolve(&target.hostname)?;
    tracing::debug!("resolved {} to {}", target.hostname, addr);

    let mut transport = TcpTransport::new();
    transport.connect(&addr)?;

    let result = exchange(&mut transport, target, out);
    let closed = transport.close();
    result.and(closed)
}

/// Send the request and relay the response over an already-open transport.
pub fn exchange<T: Transport, W: Write>(
    transport: &mut T,
    target: &Target,
    out: &mut W,
) -> Result<()> {
    let request = GetRequest::new(&target.hostname, &target.path);
    transport.send(&request.to_bytes())?;
    tracing::info!("HTTP GET request sent to {}", target.hostname);

    relay(transport, out)
}

/// Copy response bytes to `out` until the peer closes the connection.
///
/// Each chunk is forwarded as soon as it arrives; nothing is accumulated
/// and no HTTP framing is interpreted. On a receive error, everything
/// received so far has already been written, so the output is flushed
/// before the error propagates.
fn relay<T: Transport, W: Write>(transport: &mut T, out: &mut W) -> Result<()> {
    loop {
        match transport.recv() {
            Ok(Some(chunk)) => out.write_all(&chunk).map_err(Error::Io)?,
            Ok(None) => break,
            Err(err) => {
                out.flush().map_err(Error::Io)?;
                return Err(err);
            }
        }
    }

    out.flush().map_err(Error::Io)
}
