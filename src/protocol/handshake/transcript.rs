//! Handshake transcript.
//!
//! ## Responsibilities
//! - Record every handshake message (`msg_type || length || body`, no record
//!   header) in the exact order it was sent or received.
//! - Provide `Transcript-Hash` over the concatenation for any hash algorithm,
//!   so the hash can be chosen after the ServerHello fixes the cipher suite.
//!
//! ## Non-responsibilities
//! - No decoding or validation of the messages it stores.
//! - No key derivation (see `keyschedule`).

use crate::core::codec::{CodecError, Enumeration};
use crate::core::crypto::HashAlgorithm;
use crate::domain::HandshakeType;
use crate::protocol::handshake::frame::Handshake;

/// Append-only list of serialized handshake messages for one connection.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    messages: Vec<Vec<u8>>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handshake message by re-encoding it.
    ///
    /// # Errors
    /// Returns `Err` if encoding the message fails.
    pub fn push(&mut self, msg: &Handshake) -> Result<(), CodecError> {
        self.messages.push(msg.to_bytes()?);
        Ok(())
    }

    /// Append an already serialized handshake message verbatim.
    pub fn push_raw(&mut self, bytes: &[u8]) {
        self.messages.push(bytes.to_vec());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message types recorded so far, in order.
    #[must_use]
    pub fn msg_types(&self) -> Vec<HandshakeType> {
        self.messages
            .iter()
            .filter_map(|m| m.first())
            .filter_map(|b| HandshakeType::from_raw(u32::from(*b)).ok())
            .collect()
    }

    /// Concatenation of all messages.
    #[must_use]
    pub fn concatenated(&self) -> Vec<u8> {
        self.messages.concat()
    }

    /// `Hash(messages...)`.
    #[must_use]
    pub fn hash(&self, alg: HashAlgorithm) -> Vec<u8> {
        alg.digest_all(self.messages.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::handshake::Finished;
    use crate::protocol::handshake::frame::HandshakeBody;
    use crate::test_support::sample_client_hello;

    #[test]
    fn hash_covers_messages_in_order() {
        let ch = Handshake::new(HandshakeBody::ClientHello(sample_client_hello()));
        let fin = Handshake::new(HandshakeBody::Finished(Finished { verify_data: vec![1; 32] }));

        let mut a = Transcript::new();
        a.push(&ch).unwrap();
        a.push(&fin).unwrap();

        let mut b = Transcript::new();
        b.push(&fin).unwrap();
        b.push(&ch).unwrap();

        assert_eq!(a.len(), 2);
        assert_ne!(a.hash(HashAlgorithm::Sha256), b.hash(HashAlgorithm::Sha256));
        assert_eq!(a.hash(HashAlgorithm::Sha256), HashAlgorithm::Sha256.digest(&a.concatenated()));
        assert_eq!(a.msg_types(), vec![HandshakeType::CLIENT_HELLO, HandshakeType::FINISHED]);
    }

    #[test]
    fn raw_and_encoded_pushes_agree() {
        let ch = Handshake::new(HandshakeBody::ClientHello(sample_client_hello()));
        let mut a = Transcript::new();
        a.push(&ch).unwrap();
        let mut b = Transcript::new();
        b.push_raw(&ch.to_bytes().unwrap());
        assert_eq!(a.hash(HashAlgorithm::Sha384), b.hash(HashAlgorithm::Sha384));
    }

    #[test]
    fn empty_transcript_hashes_empty_string() {
        let t = Transcript::new();
        assert!(t.is_empty());
        assert_eq!(t.hash(HashAlgorithm::Sha256), HashAlgorithm::Sha256.digest(b""));
    }
}
