//! Byte-stream boundary used by the handshake orchestrator.
//!
//! The core never opens or closes the underlying connection; it only hands
//! serialized records to `send` and takes whole records back from `receive`.

/// Errors surfaced by a transport implementation.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("connection closed by peer")]
    Closed,
    #[error("record of {len} bytes exceeds limit {max}")]
    RecordTooLarge { len: usize, max: usize },
    #[error("transport timed out")]
    Timeout,
}

/// Record-oriented transport.
///
/// `receive` must return exactly one framed unit: one `TLSPlaintext` record's
/// full bytes, header included.
pub trait Transport {
    /// Send one serialized record.
    /// # Errors
    /// Returns `TransportError` if the bytes cannot be written.
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Receive one serialized record.
    /// # Errors
    /// Returns `TransportError` on I/O failure, close, timeout or oversize record.
    fn receive(&mut self) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).send(bytes)
    }

    fn receive(&mut self) -> Result<Vec<u8>, TransportError> {
        (**self).receive()
    }
}
