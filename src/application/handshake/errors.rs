use thiserror::Error;

use crate::config::ConfigError;
use crate::core::codec::CodecError;
use crate::core::crypto::hkdf::HkdfError;
use crate::domain::handshake::HandshakeError;
use crate::domain::{CipherSuite, ExtensionType, HandshakeType, NamedGroup, ProtocolVersion};
use crate::ports::crypto::KeyExchangeError;
use crate::ports::transport::TransportError;

use super::fsm_types::{ClientEvent, ClientState};

/// Errors that abort the client handshake.
///
/// Every variant is terminal: once returned, the state machine is `Failed`
/// and further calls yield `Aborted`.
#[derive(Debug, Error)]
pub enum ClientHandshakeError {
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("message validation failed: {0}")]
    Handshake(#[from] HandshakeError),

    #[error("key schedule error: {0}")]
    Hkdf(#[from] HkdfError),

    #[error("key exchange failed: {0}")]
    KeyExchange(#[from] KeyExchangeError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("server selected group {0} which was not offered")]
    UnsupportedGroup(NamedGroup),

    #[error("server selected cipher suite {0} which was not offered")]
    UnsupportedCipherSuite(CipherSuite),

    #[error("server selected version {0} which was not offered")]
    UnsupportedVersion(ProtocolVersion),

    #[error("expected {expected}, got {got}")]
    UnexpectedMessage { expected: HandshakeType, got: HandshakeType },

    #[error("ServerHello is missing the {0} extension")]
    MissingExtension(ExtensionType),

    #[error("invalid transition: {event:?} in state {state:?}")]
    InvalidTransition { state: ClientState, event: ClientEvent },

    #[error("handshake already failed")]
    Aborted,
}
