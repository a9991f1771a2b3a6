//! Blocking TCP transport implementation

use super::Transport;
use crate::{Error, Result};
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

// The reference client reads into a 4096-byte buffer with one byte reserved
// for a terminator, so 4095 bytes of payload per read is the compatible
// chunk size.
const RECV_CHUNK_SIZE: usize = 4095;

pub struct TcpTransport {
    stream: Option<TcpStream>,
    recv_buffer: Vec<u8>,
}

impl TcpTransport {
    pub fn new() -> Self {
        Self {
            stream: None,
            recv_buffer: vec![0u8; RECV_CHUNK_SIZE],
        }
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for TcpTransport {
    fn connect(&mut self, target: &SocketAddr) -> Result<()> {
        // Socket creation and connect are a single call; both failure modes
        // surface as a connection error.
        let stream = TcpStream::connect(target).map_err(Error::Connection)?;
        self.stream = Some(stream);
        Ok(())
    }

    fn send(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        // write_all retries short writes; a partial transmission can only
        // end in an error.
        stream.write_all(data).map_err(Error::Send)?;
        stream.flush().map_err(Error::Send)
    }

    fn recv(&mut self) -> Result<Option<Vec<u8>>> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        match stream.read(&mut self.recv_buffer) {
            Ok(0) => Ok(None), // orderly close by the peer
            Ok(n) => Ok(Some(self.recv_buffer[..n].to_vec())),
            Err(e) => Err(Error::Receive(e)),
        }
    }

    fn close(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            // Dropping the stream closes the fd; the shutdown is a courtesy
            // to the peer and its failure is irrelevant at this point.
            let _ = stream.shutdown(Shutdown::Both);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn spawn_echo_server() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut buf = vec![0u8; 1024];
            loop {
                let n = socket.read(&mut buf).unwrap_or(0);
                if n == 0 {
                    break;
                }
                socket.write_all(&buf[..n]).unwrap();
            }
        });

        addr
    }

    #[test]
    fn test_tcp_connect() {
        let addr = spawn_echo_server();

        let mut transport = TcpTransport::new();
        assert!(transport.connect(&addr).is_ok());
    }

    #[test]
    fn test_tcp_connect_refused() {
        // Nothing listens on this address after the listener is dropped.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let mut transport = TcpTransport::new();
        match transport.connect(&addr) {
            Err(Error::Connection(_)) => {}
            other => panic!("expected connection error, got {:?}", other),
        }
    }

    #[test]
    fn test_tcp_send_recv() {
        let addr = spawn_echo_server();

        let mut transport = TcpTransport::new();
        transport.connect(&addr).unwrap();

        let test_data = b"Hello, World!";
        transport.send(test_data).unwrap();

        let chunk = transport.recv().unwrap().expect("peer closed early");
        assert_eq!(chunk, test_data);
    }

    #[test]
    fn test_tcp_recv_peer_close() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (socket, _) = listener.accept().unwrap();
            drop(socket);
        });

        let mut transport = TcpTransport::new();
        transport.connect(&addr).unwrap();

        // Orderly close is reported as None, not as an error.
        assert!(transport.recv().unwrap().is_none());
    }

    #[test]
    fn test_tcp_send_without_connect() {
        let mut transport = TcpTransport::new();
        match transport.send(b"test") {
            Err(Error::NotConnected) => {}
            other => panic!("expected NotConnected, got {:?}", other),
        }
    }

    #[test]
    fn test_tcp_recv_without_connect() {
        let mut transport = TcpTransport::new();
        assert!(matches!(transport.recv(), Err(Error::NotConnected)));
    }

    #[test]
    fn test_tcp_close() {
        let addr = spawn_echo_server();

        let mut transport = TcpTransport::new();
        transport.connect(&addr).unwrap();
        assert!(transport.close().is_ok());
        assert!(transport.stream.is_none());

        // Closing twice is harmless, but the connection cannot be reused.
        assert!(transport.close().is_ok());
        assert!(matches!(transport.send(b"x"), Err(Error::NotConnected)));
    }

    #[test]
    fn test_resolve_loopback_literal() {
        let addr = resolve("127.0.0.1").unwrap();
        assert_eq!(addr.port(), crate::HTTP_PORT);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_resolve_ipv6_literal() {
        let addr = resolve("::1").unwrap();
        assert_eq!(addr.port(), crate::HTTP_PORT);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_resolve_empty_hostname() {
        assert!(matches!(resolve(""), Err(Error::Resolution(_))));
    }

    #[test]
    fn test_resolve_unknown_host() {
        // .invalid is reserved and never resolves (RFC 2606).
        assert!(matches!(
            resolve("no-such-host.invalid"),
            Err(Error::Resolution(_))
        ));
    }
}
