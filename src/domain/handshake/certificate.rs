//! Server authentication bodies carried after ServerHello.
//!
//! Framing only: certificate contents are kept as opaque DER and are neither
//! parsed nor verified here.

use crate::core::codec::{Codec, CodecError, List, Opaque, Reader, Writer};
use crate::domain::HandshakeType;
use crate::domain::handshake::extension::{
    Extension, decode_extensions, encode_extensions, extensions_len,
};

crate::tls_struct! {
    /// `CertificateEntry { opaque cert_data<1..2^24-1>; Extension extensions<0..2^16-1>; }`
    ///
    /// Per-entry extensions are kept undecoded.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CertificateEntry {
        pub cert_data: Opaque<3>,
        pub extensions: Opaque<2>,
    }
}

crate::tls_struct! {
    /// `Certificate { opaque certificate_request_context<0..2^8-1>; CertificateEntry certificate_list<0..2^24-1>; }`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Certificate {
        pub certificate_request_context: Opaque<1>,
        pub certificate_list: List<CertificateEntry, 3>,
    }
}

impl Certificate {
    /// Server certificate message from a chain of DER blobs, leaf first.
    #[must_use]
    pub fn from_chain(chain: Vec<Vec<u8>>) -> Self {
        Self {
            certificate_request_context: Opaque::default(),
            certificate_list: List::new(
                chain
                    .into_iter()
                    .map(|der| CertificateEntry { cert_data: Opaque::new(der), extensions: Opaque::default() })
                    .collect(),
            ),
        }
    }

    /// Leaf certificate DER, if any.
    #[must_use]
    pub fn leaf(&self) -> Option<&[u8]> {
        self.certificate_list.first().map(|e| e.cert_data.as_bytes())
    }
}

/// `EncryptedExtensions { Extension extensions<0..2^16-1>; }`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncryptedExtensions {
    pub extensions: Vec<Extension>,
}

impl Codec for EncryptedExtensions {
    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        encode_extensions(&self.extensions, w)
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self { extensions: decode_extensions(r, HandshakeType::ENCRYPTED_EXTENSIONS)? })
    }

    fn encoded_len(&self) -> usize {
        extensions_len(&self.extensions)
    }
}

/// `Finished { opaque verify_data[Hash.length]; }`
///
/// The length is implied by the negotiated hash, so decoding takes the rest
/// of the handshake body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finished {
    pub verify_data: Vec<u8>,
}

impl Codec for Finished {
    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.write_raw(&self.verify_data);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self { verify_data: r.read_rest().to_vec() })
    }

    fn encoded_len(&self) -> usize {
        self.verify_data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::{decode_exact, encode_to_vec};
    use crate::domain::NamedGroup;

    #[test]
    fn certificate_layout() {
        let c = Certificate::from_chain(vec![vec![0x30, 0x82], vec![0x30]]);
        let bytes = encode_to_vec(&c).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x00, // context
                0x00, 0x00, 0x0d, // list length
                0x00, 0x00, 0x02, 0x30, 0x82, 0x00, 0x00, // entry 1
                0x00, 0x00, 0x01, 0x30, 0x00, 0x00, // entry 2
            ]
        );
        assert_eq!(c.encoded_len(), bytes.len());
        let back: Certificate = decode_exact(&bytes, "certificate").unwrap();
        assert_eq!(back.leaf(), Some(&[0x30, 0x82][..]));
        assert_eq!(back, c);
    }

    #[test]
    fn certificate_entry_overrun_is_truncated() {
        // list declares 5 bytes but the entry claims 9 bytes of cert_data
        let bytes = [0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x09, 0x30, 0x00];
        let err = decode_exact::<Certificate>(&bytes, "certificate").unwrap_err();
        assert!(matches!(err, CodecError::Truncated { .. }));
    }

    #[test]
    fn encrypted_extensions_round_trip() {
        let ee = EncryptedExtensions { extensions: vec![Extension::supported_groups(vec![NamedGroup::FFDHE2048])] };
        let bytes = encode_to_vec(&ee).unwrap();
        assert_eq!(decode_exact::<EncryptedExtensions>(&bytes, "ee").unwrap(), ee);
        assert_eq!(decode_exact::<EncryptedExtensions>(&[0, 0], "ee").unwrap(), EncryptedExtensions::default());
    }

    #[test]
    fn finished_takes_whole_body() {
        let f: Finished = decode_exact(&[7u8; 32], "finished").unwrap();
        assert_eq!(f.verify_data.len(), 32);
    }
}
