use std::fmt;

use crate::core::codec::{Codec, CodecError, List, Opaque, Reader, Uint8, Writer};
use crate::domain::handshake::errors::HandshakeError;
use crate::domain::handshake::extension::{
    Extension, ExtensionPayload, check_unique, decode_extensions, encode_extensions, extensions_len, find,
};
use crate::domain::handshake::key_share::KeyShareEntry;
use crate::domain::handshake::params::{LEGACY_VERSION, RANDOM_LEN, SESSION_ID_MAX};
use crate::domain::{CipherSuite, ExtensionType, HandshakeType, NamedGroup, ProtocolVersion, SignatureScheme};

/// 32-byte hello random.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Random(pub [u8; RANDOM_LEN]);

/// `ServerHello.random` value that marks a HelloRetryRequest (SHA-256 of "HelloRetryRequest").
pub const HELLO_RETRY_REQUEST_RANDOM: Random = Random([
    0xcf, 0x21, 0xad, 0x74, 0xe5, 0x9a, 0x61, 0x11, 0xbe, 0x1d, 0x8c, 0x02, 0x1e, 0x65, 0xb8, 0x91, 0xc2, 0xa2,
    0x11, 0x16, 0x7a, 0xbb, 0x8c, 0x5e, 0x07, 0x9e, 0x09, 0xe2, 0xc8, 0xa8, 0x33, 0x9c,
]);

impl fmt::Debug for Random {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Random(")?;
        for b in &self.0[..4] {
            write!(f, "{b:02x}")?;
        }
        write!(f, "…)")
    }
}

impl Codec for Random {
    const FIXED_WIDTH: Option<usize> = Some(RANDOM_LEN);

    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.write_raw(&self.0);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let mut out = [0u8; RANDOM_LEN];
        out.copy_from_slice(r.take(RANDOM_LEN, "random")?);
        Ok(Self(out))
    }

    fn encoded_len(&self) -> usize {
        RANDOM_LEN
    }
}

/// `ClientHello` handshake body (RFC 8446 §4.1.2).
///
/// Extension order is preserved exactly as constructed or received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHello {
    /// Always `0x0303` in TLS 1.3.
    pub legacy_version: ProtocolVersion,
    pub random: Random,
    pub legacy_session_id: Opaque<1>,
    pub cipher_suites: List<CipherSuite, 2>,
    /// Must be the single null method.
    pub legacy_compression_methods: Opaque<1>,
    pub extensions: Vec<Extension>,
}

impl ClientHello {
    /// Validate semantic invariants (cipher suites, session id, compression, extensions).
    ///
    /// # Errors
    ///
    /// Returns `Err` if any of the following invariants are violated:
    /// - `cipher_suites` is empty
    /// - `legacy_session_id` is longer than 32 bytes
    /// - `legacy_compression_methods` is not `[0]`
    /// - an extension type appears more than once
    pub fn validate(&self) -> Result<(), HandshakeError> {
        if self.cipher_suites.is_empty() {
            return Err(HandshakeError::EmptyCipherSuites);
        }
        if self.legacy_session_id.as_bytes().len() > SESSION_ID_MAX {
            return Err(HandshakeError::SessionIdTooLong);
        }
        if self.legacy_compression_methods.as_bytes() != &[0u8][..] {
            return Err(HandshakeError::BadCompressionMethods);
        }
        check_unique(&self.extensions)
    }

    /// Construct a `ClientHello` and immediately validate it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if semantic validation fails (see [`ClientHello::validate`]).
    pub fn new(
        random: Random,
        legacy_session_id: Vec<u8>,
        cipher_suites: Vec<CipherSuite>,
        extensions: Vec<Extension>,
    ) -> Result<Self, HandshakeError> {
        let ch = ClientHello {
            legacy_version: LEGACY_VERSION,
            random,
            legacy_session_id: Opaque::new(legacy_session_id),
            cipher_suites: List::new(cipher_suites),
            legacy_compression_methods: Opaque::new(vec![0]),
            extensions,
        };
        ch.validate()?;
        Ok(ch)
    }

    #[must_use]
    pub fn extension(&self, ty: ExtensionType) -> Option<&Extension> {
        find(&self.extensions, ty)
    }

    #[must_use]
    pub fn supported_versions(&self) -> Option<&[ProtocolVersion]> {
        match self.extension(ExtensionType::SUPPORTED_VERSIONS)?.payload() {
            ExtensionPayload::SupportedVersionsClient(v) => Some(&v[..]),
            _ => None,
        }
    }

    #[must_use]
    pub fn supported_groups(&self) -> Option<&[NamedGroup]> {
        match self.extension(ExtensionType::SUPPORTED_GROUPS)?.payload() {
            ExtensionPayload::SupportedGroups(v) => Some(&v[..]),
            _ => None,
        }
    }

    #[must_use]
    pub fn signature_algorithms(&self) -> Option<&[SignatureScheme]> {
        match self.extension(ExtensionType::SIGNATURE_ALGORITHMS)?.payload() {
            ExtensionPayload::SignatureAlgorithms(v) => Some(&v[..]),
            _ => None,
        }
    }

    #[must_use]
    pub fn key_shares(&self) -> Option<&[KeyShareEntry]> {
        match self.extension(ExtensionType::KEY_SHARE)?.payload() {
            ExtensionPayload::KeyShareClient(v) => Some(&v[..]),
            _ => None,
        }
    }
}

impl Codec for ClientHello {
    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        self.legacy_version.encode(w)?;
        self.random.encode(w)?;
        self.legacy_session_id.encode(w)?;
        self.cipher_suites.encode(w)?;
        self.legacy_compression_methods.encode(w)?;
        encode_extensions(&self.extensions, w)
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let ch = ClientHello {
            legacy_version: ProtocolVersion::decode(r)?,
            random: Random::decode(r)?,
            legacy_session_id: Opaque::decode(r)?,
            cipher_suites: List::decode(r)?,
            legacy_compression_methods: Opaque::decode(r)?,
            extensions: decode_extensions(r, HandshakeType::CLIENT_HELLO)?,
        };
        ch.validate()?;
        Ok(ch)
    }

    fn encoded_len(&self) -> usize {
        2 + RANDOM_LEN
            + self.legacy_session_id.encoded_len()
            + self.cipher_suites.encoded_len()
            + self.legacy_compression_methods.encoded_len()
            + extensions_len(&self.extensions)
    }
}

/// `ServerHello` handshake body (RFC 8446 §4.1.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHello {
    pub legacy_version: ProtocolVersion,
    pub random: Random,
    pub legacy_session_id_echo: Opaque<1>,
    pub cipher_suite: CipherSuite,
    pub legacy_compression_method: Uint8,
    pub extensions: Vec<Extension>,
}

impl ServerHello {
    /// Validate semantic invariants (session id echo, compression, extensions).
    ///
    /// # Errors
    /// Returns `Err` if the session id echo is too long, the compression
    /// method is not null, or an extension type repeats.
    pub fn validate(&self) -> Result<(), HandshakeError> {
        if self.legacy_session_id_echo.as_bytes().len() > SESSION_ID_MAX {
            return Err(HandshakeError::SessionIdTooLong);
        }
        if self.legacy_compression_method.value() != 0 {
            return Err(HandshakeError::BadCompressionMethods);
        }
        check_unique(&self.extensions)
    }

    /// Construct a `ServerHello` and immediately validate it.
    ///
    /// # Errors
    /// Returns `Err` if semantic validation fails (see [`ServerHello::validate`]).
    pub fn new(
        random: Random,
        legacy_session_id_echo: Vec<u8>,
        cipher_suite: CipherSuite,
        extensions: Vec<Extension>,
    ) -> Result<Self, HandshakeError> {
        let sh = ServerHello {
            legacy_version: LEGACY_VERSION,
            random,
            legacy_session_id_echo: Opaque::new(legacy_session_id_echo),
            cipher_suite,
            legacy_compression_method: Uint8::default(),
            extensions,
        };
        sh.validate()?;
        Ok(sh)
    }

    #[must_use]
    pub fn cipher_suite(&self) -> CipherSuite {
        self.cipher_suite
    }

    #[must_use]
    pub fn extension(&self, ty: ExtensionType) -> Option<&Extension> {
        find(&self.extensions, ty)
    }

    /// Version from `supported_versions`; `None` means a pre-1.3 server.
    #[must_use]
    pub fn selected_version(&self) -> Option<ProtocolVersion> {
        match self.extension(ExtensionType::SUPPORTED_VERSIONS)?.payload() {
            ExtensionPayload::SupportedVersionsServer(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn key_share(&self) -> Option<&KeyShareEntry> {
        match self.extension(ExtensionType::KEY_SHARE)?.payload() {
            ExtensionPayload::KeyShareServer(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_hello_retry_request(&self) -> bool {
        self.random == HELLO_RETRY_REQUEST_RANDOM
    }
}

impl Codec for ServerHello {
    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        self.legacy_version.encode(w)?;
        self.random.encode(w)?;
        self.legacy_session_id_echo.encode(w)?;
        self.cipher_suite.encode(w)?;
        self.legacy_compression_method.encode(w)?;
        encode_extensions(&self.extensions, w)
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let sh = ServerHello {
            legacy_version: ProtocolVersion::decode(r)?,
            random: Random::decode(r)?,
            legacy_session_id_echo: Opaque::decode(r)?,
            cipher_suite: CipherSuite::decode(r)?,
            legacy_compression_method: Uint8::decode(r)?,
            extensions: decode_extensions(r, HandshakeType::SERVER_HELLO)?,
        };
        sh.validate()?;
        Ok(sh)
    }

    fn encoded_len(&self) -> usize {
        2 + RANDOM_LEN + self.legacy_session_id_echo.encoded_len() + 2 + 1 + extensions_len(&self.extensions)
    }
}
