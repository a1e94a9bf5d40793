// src/adapters/transport/record_stream.rs
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::ports::transport::{Transport, TransportError};
use crate::protocol::record::HEADER_LEN;

/// Record framing over a byte stream.
///
/// Implements `Transport` for any `Read + Write`: `send` writes the bytes as
/// given, `receive` reads exactly one `TLSPlaintext` (5-byte header, then
/// `length` bytes) and returns it with the header attached. Records longer
/// than `max_record_len` (header included) are refused before the body is read.
///
/// Error mapping:
/// - `WouldBlock` / `TimedOut` become `TransportError::Timeout`, so a socket
///   read timeout surfaces as a transport error.
/// - `UnexpectedEof` becomes `TransportError::Closed`.
/// - Anything else is passed through as `TransportError::Io`.
#[derive(Debug)]
pub struct RecordStream<S> {
    stream: S,
    max_record_len: usize,
}

impl<S: Read + Write> RecordStream<S> {
    pub fn new(stream: S, max_record_len: usize) -> Self {
        Self { stream, max_record_len }
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl RecordStream<TcpStream> {
    /// Connect to the first reachable address within `timeout`, applying the
    /// same timeout to every later read and write.
    ///
    /// # Errors
    /// Returns `TransportError::Timeout` if no address answers in time, or
    /// `TransportError::Io` for resolution and socket errors.
    pub fn connect<A: ToSocketAddrs>(
        addr: A,
        timeout: Duration,
        max_record_len: usize,
    ) -> Result<Self, TransportError> {
        let mut last = io::Error::new(io::ErrorKind::AddrNotAvailable, "no addresses resolved");
        for sa in addr.to_socket_addrs().map_err(map_io)? {
            match TcpStream::connect_timeout(&sa, timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(timeout)).map_err(map_io)?;
                    stream.set_write_timeout(Some(timeout)).map_err(map_io)?;
                    stream.set_nodelay(true).map_err(map_io)?;
                    tracing::debug!(peer = %sa, "transport connected");
                    return Ok(Self::new(stream, max_record_len));
                }
                Err(e) => last = e,
            }
        }
        Err(map_io(last))
    }
}

fn map_io(e: io::Error) -> TransportError {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => TransportError::Timeout,
        io::ErrorKind::UnexpectedEof => TransportError::Closed,
        _ => TransportError::Io(e),
    }
}

impl<S: Read + Write> Transport for RecordStream<S> {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.stream.write_all(bytes).map_err(map_io)?;
        self.stream.flush().map_err(map_io)
    }

    fn receive(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut header = [0u8; HEADER_LEN];
        self.stream.read_exact(&mut header).map_err(map_io)?;
        let len = HEADER_LEN + usize::from(u16::from_be_bytes([header[3], header[4]]));
        if len > self.max_record_len {
            return Err(TransportError::RecordTooLarge { len, max: self.max_record_len });
        }
        let mut record = vec![0u8; len];
        record[..HEADER_LEN].copy_from_slice(&header);
        self.stream.read_exact(&mut record[HEADER_LEN..]).map_err(map_io)?;
        tracing::trace!(len, "record received");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::net::TcpListener;

    /// Reads from a fixed buffer, collects writes separately.
    struct Duplex {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl Duplex {
        fn new(input: Vec<u8>) -> Self {
            Self { input: Cursor::new(input), output: Vec::new() }
        }
    }

    impl Read for Duplex {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for Duplex {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Stalled;

    impl Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::ErrorKind::WouldBlock.into())
        }
    }

    impl Write for Stalled {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::TimedOut.into())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn rec(body: &[u8]) -> Vec<u8> {
        let mut v = vec![22, 3, 3];
        v.extend_from_slice(&u16::try_from(body.len()).unwrap().to_be_bytes());
        v.extend_from_slice(body);
        v
    }

    #[test]
    fn reads_one_record_at_a_time() {
        let a = rec(&[20, 0, 0, 1, 9]);
        let b = rec(&[20, 0, 0, 0]);
        let mut input = a.clone();
        input.extend_from_slice(&b);
        let mut rs = RecordStream::new(Duplex::new(input), 64);
        assert_eq!(rs.receive().unwrap(), a);
        assert_eq!(rs.receive().unwrap(), b);
        assert!(matches!(rs.receive(), Err(TransportError::Closed)));
    }

    #[test]
    fn send_writes_verbatim() {
        let mut rs = RecordStream::new(Duplex::new(Vec::new()), 64);
        rs.send(&[1, 2, 3]).unwrap();
        rs.send(&[4]).unwrap();
        assert_eq!(rs.get_ref().output, vec![1, 2, 3, 4]);
    }

    #[test]
    fn oversized_record_refused() {
        let mut rs = RecordStream::new(Duplex::new(rec(&[0; 100])), 50);
        assert!(matches!(rs.receive(), Err(TransportError::RecordTooLarge { len: 105, max: 50 })));
    }

    #[test]
    fn truncated_body_is_closed() {
        let mut bytes = rec(&[0; 10]);
        bytes.truncate(8);
        let mut rs = RecordStream::new(Duplex::new(bytes), 64);
        assert!(matches!(rs.receive(), Err(TransportError::Closed)));
    }

    #[test]
    fn would_block_and_timed_out_map_to_timeout() {
        let mut rs = RecordStream::new(Stalled, 64);
        assert!(matches!(rs.receive(), Err(TransportError::Timeout)));
        assert!(matches!(rs.send(&[1]), Err(TransportError::Timeout)));
    }

    #[test]
    fn other_io_errors_pass_through() {
        let e = map_io(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert!(matches!(e, TransportError::Io(_)));
    }

    #[test]
    fn tcp_loopback() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut sock, _) = listener.accept().unwrap();
            let mut got = [0u8; 4];
            sock.read_exact(&mut got).unwrap();
            sock.write_all(&rec(&got)).unwrap();
        });
        let mut rs = RecordStream::connect(addr, Duration::from_secs(5), 64).unwrap();
        rs.send(&[20, 0, 0, 0]).unwrap();
        assert_eq!(rs.receive().unwrap(), rec(&[20, 0, 0, 0]));
        server.join().unwrap();
    }
}
