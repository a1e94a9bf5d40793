use thiserror::Error;

use crate::core::codec::CodecError;

/// ---- Domain error type (idiomatic, typed) ----
/// Captures semantic validation failures of handshake bodies that the wire
/// grammar alone cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandshakeError {
    // ClientHello
    /// `cipher_suites<2..2^16-2>` must carry at least one suite.
    #[error("ClientHello.cipher_suites must not be empty")]
    EmptyCipherSuites,
    /// `legacy_session_id<0..32>` exceeded its bound.
    #[error("legacy_session_id exceeds 32 bytes")]
    SessionIdTooLong,
    /// TLS 1.3 requires exactly the null compression method.
    #[error("legacy_compression_methods must be the single null method")]
    BadCompressionMethods,

    // Extensions
    /// Same extension type appeared twice in one message.
    #[error("duplicate extension type")]
    DuplicateExtension,
    /// A list-valued extension whose grammar forbids an empty list.
    #[error("extension list must not be empty")]
    EmptyExtensionList,
}

impl HandshakeError {
    /// Field the violated rule applies to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmptyCipherSuites => "cipher_suites",
            Self::SessionIdTooLong => "legacy_session_id",
            Self::BadCompressionMethods => "legacy_compression_methods",
            Self::DuplicateExtension | Self::EmptyExtensionList => "extensions",
        }
    }

    const fn reason(self) -> &'static str {
        match self {
            Self::EmptyCipherSuites => "empty",
            Self::SessionIdTooLong => "longer than 32 bytes",
            Self::BadCompressionMethods => "must be [0]",
            Self::DuplicateExtension => "duplicate type",
            Self::EmptyExtensionList => "empty list",
        }
    }
}

impl From<HandshakeError> for CodecError {
    fn from(e: HandshakeError) -> Self {
        CodecError::Invalid { field: e.field(), reason: e.reason() }
    }
}
