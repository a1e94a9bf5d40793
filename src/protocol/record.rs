//! Record layer: `TLSPlaintext`.
//!
//! ```text
//! struct {
//!     ContentType type;
//!     ProtocolVersion legacy_record_version;   /* 0x0303 */
//!     uint16 length;
//!     opaque fragment[TLSPlaintext.length];
//! } TLSPlaintext;
//! ```
//!
//! Only handshake content is decoded; any other content type is reported as
//! `Unsupported`. The outer record exposes the inner message through explicit
//! accessors.

use crate::core::codec::{Codec, CodecError, Reader, Uint16, Writer};
use crate::domain::handshake::{ClientHello, Extension, ServerHello};
use crate::domain::{CipherSuite, ContentType, ExtensionType, HandshakeType, ProtocolVersion};
use crate::protocol::handshake::frame::Handshake;

/// Bytes in the record header (`type || version || length`).
pub const HEADER_LEN: usize = 5;

/// Largest plaintext fragment a record may carry (2^14).
pub const MAX_FRAGMENT_LEN: usize = 1 << 14;

/// `legacy_record_version` written on every record.
pub const LEGACY_RECORD_VERSION: ProtocolVersion = ProtocolVersion::TLS12;

/// Parsed record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub content_type: ContentType,
    pub legacy_record_version: ProtocolVersion,
    pub length: usize,
}

impl RecordHeader {
    /// Parse the fixed 5-byte header at the start of `data`.
    ///
    /// # Errors
    /// Returns `CodecError::Truncated` if fewer than five bytes are present.
    pub fn parse(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(data);
        Self::read(&mut r)
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let content_type = ContentType::decode(r)?;
        let legacy_record_version = ProtocolVersion::decode(r)?;
        let length = Uint16::decode(r)?.value() as usize;
        Ok(Self { content_type, legacy_record_version, length })
    }
}

/// One plaintext record wrapping a handshake message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPlaintext {
    pub content_type: ContentType,
    pub legacy_record_version: ProtocolVersion,
    pub fragment: Handshake,
}

impl TlsPlaintext {
    #[must_use]
    pub fn handshake(fragment: Handshake) -> Self {
        Self {
            content_type: ContentType::HANDSHAKE,
            legacy_record_version: LEGACY_RECORD_VERSION,
            fragment,
        }
    }

    /// Serialize header and fragment; the length is computed from the fragment.
    ///
    /// # Errors
    /// Returns `CodecError::Invalid` if the fragment exceeds 2^14 bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut w = Writer::new();
        self.encode(&mut w)?;
        Ok(w.into_bytes())
    }

    /// Parse one complete record.
    ///
    /// # Errors
    /// - `CodecError::Truncated` if the header is incomplete.
    /// - `CodecError::LengthMismatch` if `length` differs from the remaining bytes.
    /// - `CodecError::Unsupported` for any content type other than handshake.
    /// - Any error from decoding the handshake fragment.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(data);
        let header = RecordHeader::read(&mut r)?;
        let fragment = r.read_rest();
        if header.length != fragment.len() {
            return Err(CodecError::LengthMismatch {
                field: "TLSPlaintext.length",
                expected: header.length,
                actual: fragment.len(),
            });
        }
        if header.length > MAX_FRAGMENT_LEN {
            return Err(CodecError::Invalid { field: "TLSPlaintext.length", reason: "exceeds 2^14" });
        }
        match header.content_type {
            ContentType::HANDSHAKE => Ok(Self {
                content_type: header.content_type,
                legacy_record_version: header.legacy_record_version,
                fragment: Handshake::from_bytes(fragment)?,
            }),
            other => Err(CodecError::Unsupported(format!("content type {other}"))),
        }
    }

    /// Declared fragment length.
    #[must_use]
    pub fn length(&self) -> usize {
        self.fragment.encoded_len()
    }

    #[must_use]
    pub fn msg_type(&self) -> HandshakeType {
        self.fragment.msg_type()
    }

    #[must_use]
    pub fn client_hello(&self) -> Option<&ClientHello> {
        self.fragment.client_hello()
    }

    #[must_use]
    pub fn server_hello(&self) -> Option<&ServerHello> {
        self.fragment.server_hello()
    }

    /// Negotiated suite when the record carries a ServerHello.
    #[must_use]
    pub fn cipher_suite(&self) -> Option<CipherSuite> {
        self.server_hello().map(ServerHello::cipher_suite)
    }

    /// Extension of the inner hello message.
    #[must_use]
    pub fn extension(&self, ty: ExtensionType) -> Option<&Extension> {
        self.server_hello()
            .and_then(|sh| sh.extension(ty))
            .or_else(|| self.client_hello().and_then(|ch| ch.extension(ty)))
    }
}

impl Codec for TlsPlaintext {
    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        if self.length() > MAX_FRAGMENT_LEN {
            return Err(CodecError::Invalid { field: "TLSPlaintext.length", reason: "exceeds 2^14" });
        }
        self.content_type.encode(w)?;
        self.legacy_record_version.encode(w)?;
        w.write_length_prefixed::<2>(|w| self.fragment.encode(w))
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let header = RecordHeader::read(&mut r.clone())?;
        let whole = r.take(HEADER_LEN + header.length, "TLSPlaintext")?;
        Self::from_bytes(whole)
    }

    fn encoded_len(&self) -> usize {
        HEADER_LEN + self.length()
    }
}
