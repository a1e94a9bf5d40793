// src/ports/crypto.rs
use crate::core::crypto::Secret;
use crate::domain::NamedGroup;

/// Ephemeral key-exchange share for one named group.
///
/// An implementor owns the private half for the lifetime of one handshake and
/// exposes only the public value that is placed in the `key_share` extension.
///
/// Encoding:
/// - `public_key()` returns the exact `key_exchange` bytes sent on the wire.
/// - `complete()` receives the peer's `key_exchange` bytes verbatim.
///
/// Security recommendations:
/// - Zeroize private material on drop.
/// - Validate the peer value before using it; never derive from an invalid share.
/// - Do not log private or shared material.
pub trait KeyExchange {
    /// Group this share belongs to.
    fn group(&self) -> NamedGroup;

    /// Wire form of the public value.
    fn public_key(&self) -> &[u8];

    /// Compute the shared secret with the peer's public value.
    /// # Errors
    /// - `KeyExchangeError::LengthMismatch` if `peer_public` has the wrong length.
    /// - `KeyExchangeError::InvalidPublicValue` if it fails group validation.
    fn complete(&self, peer_public: &[u8]) -> Result<Secret, KeyExchangeError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyExchangeError {
    #[error("unsupported group {0}")]
    UnsupportedGroup(NamedGroup),
    #[error("peer public value out of range")]
    InvalidPublicValue,
    #[error("key share length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
