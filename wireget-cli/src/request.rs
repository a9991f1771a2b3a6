//! HTTP/1.1 GET request formatting
//!
//! The request shape is fixed: one GET line, a Host header echoing the
//! caller-supplied hostname (not the resolved address), `Connection: close`
//! so the response is delimited by the peer closing the socket, and a
//! User-Agent. Nothing is configurable.

/// User-Agent header value sent with every request.
pub const USER_AGENT: &str = "SimpleHTTPClient/1.0";

/// Request path used when the caller does not supply one.
pub const DEFAULT_PATH: &str = "/";

/// A single GET request against a host.
///
/// `host` and `path` are inserted into the request verbatim. There is no
/// escaping and no CRLF filtering, so caller-supplied control characters
/// end up on the wire as-is. This mirrors the reference client, which has
/// the same header-injection weakness; sanitising here would change the
/// observable wire bytes for such inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub host: String,
    pub path: String,
}

impl GetRequest {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }

    /// Format the request as wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\nUser-Agent: {}\r\n\r\n",
            self.path, self.host, USER_AGENT
        )
        .into_bytes()
    }
}
