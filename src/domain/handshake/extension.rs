//! Hello extensions.
//!
//! `Extension { ExtensionType extension_type; opaque extension_data<0..2^16-1>; }`
//!
//! The payload shape is chosen by the pair (extension type, containing message
//! type): `supported_versions` is a one-byte-prefixed list in a ClientHello but
//! a single bare version in a ServerHello, and `key_share` likewise. Types
//! without a modelled shape are carried verbatim as [`ExtensionPayload::Unknown`].

use std::collections::HashSet;

use crate::core::codec::{Codec, CodecError, List, Reader, Writer, decode_exact};
use crate::domain::handshake::errors::HandshakeError;
use crate::domain::handshake::key_share::KeyShareEntry;
use crate::domain::{ExtensionType, HandshakeType, NamedGroup, ProtocolVersion, SignatureScheme};

/// Typed extension body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionPayload {
    /// `ProtocolVersion versions<2..254>` (ClientHello).
    SupportedVersionsClient(List<ProtocolVersion, 1>),
    /// `ProtocolVersion selected_version` (ServerHello).
    SupportedVersionsServer(ProtocolVersion),
    /// `NamedGroup named_group_list<2..2^16-1>`.
    SupportedGroups(List<NamedGroup, 2>),
    /// `SignatureScheme supported_signature_algorithms<2..2^16-2>`.
    SignatureAlgorithms(List<SignatureScheme, 2>),
    /// `KeyShareEntry client_shares<0..2^16-1>` (ClientHello).
    KeyShareClient(List<KeyShareEntry, 2>),
    /// `KeyShareEntry server_share` (ServerHello).
    KeyShareServer(KeyShareEntry),
    /// Unrecognized or unmodelled extension data.
    Unknown(Vec<u8>),
}

impl ExtensionPayload {
    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        match self {
            Self::SupportedVersionsClient(v) => v.encode(w),
            Self::SupportedVersionsServer(v) => v.encode(w),
            Self::SupportedGroups(v) => v.encode(w),
            Self::SignatureAlgorithms(v) => v.encode(w),
            Self::KeyShareClient(v) => v.encode(w),
            Self::KeyShareServer(v) => v.encode(w),
            Self::Unknown(bytes) => {
                w.write_raw(bytes);
                Ok(())
            }
        }
    }

    fn encoded_len(&self) -> usize {
        match self {
            Self::SupportedVersionsClient(v) => v.encoded_len(),
            Self::SupportedVersionsServer(v) => v.encoded_len(),
            Self::SupportedGroups(v) => v.encoded_len(),
            Self::SignatureAlgorithms(v) => v.encoded_len(),
            Self::KeyShareClient(v) => v.encoded_len(),
            Self::KeyShareServer(v) => v.encoded_len(),
            Self::Unknown(bytes) => bytes.len(),
        }
    }

    fn decode(ty: ExtensionType, context: HandshakeType, data: &[u8]) -> Result<Self, CodecError> {
        let payload = match (ty, context) {
            (ExtensionType::SUPPORTED_VERSIONS, HandshakeType::CLIENT_HELLO) => {
                let versions: List<ProtocolVersion, 1> = decode_exact(data, "supported_versions")?;
                non_empty(&versions)?;
                Self::SupportedVersionsClient(versions)
            }
            (ExtensionType::SUPPORTED_VERSIONS, HandshakeType::SERVER_HELLO) => {
                Self::SupportedVersionsServer(decode_exact(data, "supported_versions")?)
            }
            (ExtensionType::SUPPORTED_GROUPS, _) => {
                let groups: List<NamedGroup, 2> = decode_exact(data, "supported_groups")?;
                non_empty(&groups)?;
                Self::SupportedGroups(groups)
            }
            (ExtensionType::SIGNATURE_ALGORITHMS, _) => {
                let schemes: List<SignatureScheme, 2> = decode_exact(data, "signature_algorithms")?;
                non_empty(&schemes)?;
                Self::SignatureAlgorithms(schemes)
            }
            (ExtensionType::KEY_SHARE, HandshakeType::CLIENT_HELLO) => {
                Self::KeyShareClient(decode_exact(data, "key_share")?)
            }
            (ExtensionType::KEY_SHARE, HandshakeType::SERVER_HELLO) => {
                Self::KeyShareServer(decode_exact(data, "key_share")?)
            }
            _ => Self::Unknown(data.to_vec()),
        };
        Ok(payload)
    }
}

fn non_empty<T>(items: &[T]) -> Result<(), CodecError> {
    if items.is_empty() {
        return Err(HandshakeError::EmptyExtensionList.into());
    }
    Ok(())
}

/// One extension; the type and payload shape are kept consistent by the
/// constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    extension_type: ExtensionType,
    payload: ExtensionPayload,
}

impl Extension {
    #[must_use]
    pub fn supported_versions_client(versions: Vec<ProtocolVersion>) -> Self {
        Self {
            extension_type: ExtensionType::SUPPORTED_VERSIONS,
            payload: ExtensionPayload::SupportedVersionsClient(List::new(versions)),
        }
    }

    #[must_use]
    pub fn supported_versions_server(selected: ProtocolVersion) -> Self {
        Self {
            extension_type: ExtensionType::SUPPORTED_VERSIONS,
            payload: ExtensionPayload::SupportedVersionsServer(selected),
        }
    }

    #[must_use]
    pub fn supported_groups(groups: Vec<NamedGroup>) -> Self {
        Self {
            extension_type: ExtensionType::SUPPORTED_GROUPS,
            payload: ExtensionPayload::SupportedGroups(List::new(groups)),
        }
    }

    #[must_use]
    pub fn signature_algorithms(schemes: Vec<SignatureScheme>) -> Self {
        Self {
            extension_type: ExtensionType::SIGNATURE_ALGORITHMS,
            payload: ExtensionPayload::SignatureAlgorithms(List::new(schemes)),
        }
    }

    #[must_use]
    pub fn key_share_client(shares: Vec<KeyShareEntry>) -> Self {
        Self {
            extension_type: ExtensionType::KEY_SHARE,
            payload: ExtensionPayload::KeyShareClient(List::new(shares)),
        }
    }

    #[must_use]
    pub fn key_share_server(share: KeyShareEntry) -> Self {
        Self {
            extension_type: ExtensionType::KEY_SHARE,
            payload: ExtensionPayload::KeyShareServer(share),
        }
    }

    /// Opaque extension of any type.
    #[must_use]
    pub fn unknown(extension_type: ExtensionType, data: Vec<u8>) -> Self {
        Self { extension_type, payload: ExtensionPayload::Unknown(data) }
    }

    #[must_use]
    pub fn extension_type(&self) -> ExtensionType {
        self.extension_type
    }

    #[must_use]
    pub fn payload(&self) -> &ExtensionPayload {
        &self.payload
    }

    /// Append `type || len || data`.
    ///
    /// # Errors
    /// Returns `CodecError::OutOfRange` if the data exceeds 2^16-1 bytes.
    pub fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        self.extension_type.encode(w)?;
        w.write_length_prefixed::<2>(|w| self.payload.encode(w))
    }

    #[must_use]
    pub fn encoded_len(&self) -> usize {
        2 + 2 + self.payload.encoded_len()
    }

    /// Decode one extension found inside a `context` message.
    ///
    /// # Errors
    /// Returns `CodecError` if the frame is short or a known payload is malformed.
    pub fn decode(r: &mut Reader<'_>, context: HandshakeType) -> Result<Self, CodecError> {
        let extension_type = ExtensionType::decode(r)?;
        let data = r.read_opaque::<2>("extension_data")?;
        let payload = ExtensionPayload::decode(extension_type, context, data)?;
        Ok(Self { extension_type, payload })
    }
}

/// Write `Extension extensions<..2^16-1>` in the given order.
///
/// # Errors
/// Returns `CodecError::OutOfRange` if the block exceeds 2^16-1 bytes.
pub fn encode_extensions(extensions: &[Extension], w: &mut Writer) -> Result<(), CodecError> {
    w.write_length_prefixed::<2>(|w| extensions.iter().try_for_each(|e| e.encode(w)))
}

#[must_use]
pub fn extensions_len(extensions: &[Extension]) -> usize {
    2 + extensions.iter().map(Extension::encoded_len).sum::<usize>()
}

/// Read an extension block, accepting any order and preserving it.
///
/// # Errors
/// Returns `CodecError` on malformed input or a repeated extension type.
pub fn decode_extensions(r: &mut Reader<'_>, context: HandshakeType) -> Result<Vec<Extension>, CodecError> {
    let mut block = r.sub_reader::<2>("extensions")?;
    let mut out = Vec::new();
    while !block.is_empty() {
        out.push(Extension::decode(&mut block, context)?);
    }
    check_unique(&out)?;
    Ok(out)
}

/// At most one extension of each type per message.
///
/// # Errors
/// Returns `HandshakeError::DuplicateExtension` on a repeat.
pub fn check_unique(extensions: &[Extension]) -> Result<(), HandshakeError> {
    let mut seen = HashSet::new();
    if extensions.iter().all(|e| seen.insert(e.extension_type())) {
        Ok(())
    } else {
        Err(HandshakeError::DuplicateExtension)
    }
}

/// First extension of type `ty`.
#[must_use]
pub fn find(extensions: &[Extension], ty: ExtensionType) -> Option<&Extension> {
    extensions.iter().find(|e| e.extension_type() == ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(e: &Extension) -> Vec<u8> {
        let mut w = Writer::new();
        e.encode(&mut w).unwrap();
        w.into_bytes()
    }

    #[test]
    fn client_versions_use_one_byte_prefix() {
        let e = Extension::supported_versions_client(vec![ProtocolVersion::TLS13]);
        assert_eq!(encode(&e), vec![0x00, 0x2b, 0x00, 0x03, 0x02, 0x03, 0x04]);
        assert_eq!(e.encoded_len(), 7);
    }

    #[test]
    fn server_version_is_bare() {
        let e = Extension::supported_versions_server(ProtocolVersion::TLS13);
        let bytes = encode(&e);
        assert_eq!(bytes, vec![0x00, 0x2b, 0x00, 0x02, 0x03, 0x04]);
        let back = Extension::decode(&mut Reader::new(&bytes), HandshakeType::SERVER_HELLO).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn shape_follows_containing_message() {
        let bytes = encode(&Extension::supported_versions_server(ProtocolVersion::TLS13));
        // A bare version read as a ClientHello list: prefix 0x03 > remaining 1 byte.
        let err = Extension::decode(&mut Reader::new(&bytes), HandshakeType::CLIENT_HELLO).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { .. }));
    }

    #[test]
    fn groups_list_length_must_be_even() {
        // supported_groups with a 3-byte inner list
        let bytes = [0x00, 0x0a, 0x00, 0x05, 0x00, 0x03, 0x01, 0x00, 0x01];
        let err = Extension::decode(&mut Reader::new(&bytes), HandshakeType::CLIENT_HELLO).unwrap_err();
        assert!(matches!(err, CodecError::LengthMismatch { actual: 3, .. }));
    }

    #[test]
    fn empty_groups_rejected() {
        let bytes = [0x00, 0x0a, 0x00, 0x02, 0x00, 0x00];
        let err = Extension::decode(&mut Reader::new(&bytes), HandshakeType::CLIENT_HELLO).unwrap_err();
        assert!(matches!(err, CodecError::Invalid { field: "extensions", .. }));
    }

    #[test]
    fn unknown_types_are_kept_raw() {
        let bytes = [0xfa, 0xfa, 0x00, 0x02, 0xde, 0xad];
        let e = Extension::decode(&mut Reader::new(&bytes), HandshakeType::CLIENT_HELLO).unwrap();
        assert_eq!(e.payload(), &ExtensionPayload::Unknown(vec![0xde, 0xad]));
        assert_eq!(encode(&e), bytes.to_vec());
    }

    #[test]
    fn block_preserves_order_and_rejects_duplicates() {
        let exts = vec![
            Extension::signature_algorithms(vec![SignatureScheme::RSA_PKCS1_SHA256]),
            Extension::supported_groups(vec![NamedGroup::FFDHE2048]),
        ];
        let mut w = Writer::new();
        encode_extensions(&exts, &mut w).unwrap();
        assert_eq!(w.len(), extensions_len(&exts));
        let bytes = w.into_bytes();
        let back = decode_extensions(&mut Reader::new(&bytes), HandshakeType::CLIENT_HELLO).unwrap();
        assert_eq!(back, exts);

        let dup = vec![exts[1].clone(), exts[1].clone()];
        let mut w = Writer::new();
        encode_extensions(&dup, &mut w).unwrap();
        let err = decode_extensions(&mut Reader::new(w.as_slice()), HandshakeType::CLIENT_HELLO).unwrap_err();
        assert_eq!(err, CodecError::from(HandshakeError::DuplicateExtension));
    }
}
