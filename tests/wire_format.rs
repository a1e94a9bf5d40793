//! Byte-level checks against hand-built records.

use proptest::prelude::*;
use tls13::core::codec::{CodecError, Enumeration, Reader, Uint, Uint16, Uint24};
use tls13::domain::handshake::{ClientHello, Extension, KeyShareEntry, Random};
use tls13::domain::{CipherSuite, HandshakeType, NamedGroup, ProtocolVersion, SignatureScheme};
use tls13::protocol::handshake::{Handshake, HandshakeBody};
use tls13::protocol::record::TlsPlaintext;

fn offer() -> ClientHello {
    ClientHello::new(
        Random([7; 32]),
        Vec::new(),
        vec![CipherSuite::TLS_AES_128_GCM_SHA256],
        vec![
            Extension::supported_versions_client(vec![ProtocolVersion::TLS13]),
            Extension::supported_groups(vec![NamedGroup::FFDHE2048]),
            Extension::signature_algorithms(vec![SignatureScheme::RSA_PKCS1_SHA256]),
            Extension::key_share_client(vec![KeyShareEntry::new(NamedGroup::FFDHE2048, vec![0xab; 256])]),
        ],
    )
    .unwrap()
}

#[test]
fn client_hello_reencodes_byte_identically() {
    let rec = TlsPlaintext::handshake(Handshake::new(HandshakeBody::ClientHello(offer())));
    let bytes = rec.to_bytes().unwrap();
    let decoded = TlsPlaintext::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.to_bytes().unwrap(), bytes);
    assert_eq!(decoded.client_hello().unwrap().extensions, offer().extensions);
}

#[test]
fn client_hello_extension_bytes() {
    let rec = TlsPlaintext::handshake(Handshake::new(HandshakeBody::ClientHello(offer())));
    let bytes = rec.to_bytes().unwrap();
    // supported_versions: type 43, len 3, list len 2, 0x0304
    let sv = [0x00, 0x2b, 0x00, 0x03, 0x02, 0x03, 0x04];
    assert!(bytes.windows(sv.len()).any(|w| w == sv));
    // supported_groups: type 10, len 4, list len 2, 0x0100
    let sg = [0x00, 0x0a, 0x00, 0x04, 0x00, 0x02, 0x01, 0x00];
    assert!(bytes.windows(sg.len()).any(|w| w == sg));
    // signature_algorithms: type 13, len 4, list len 2, 0x0401
    let sa = [0x00, 0x0d, 0x00, 0x04, 0x00, 0x02, 0x04, 0x01];
    assert!(bytes.windows(sa.len()).any(|w| w == sa));
}

#[test]
fn record_length_field_disagreeing_with_payload() {
    let rec = TlsPlaintext::handshake(Handshake::new(HandshakeBody::ClientHello(offer())));
    let mut bytes = rec.to_bytes().unwrap();
    let declared = u16::from_be_bytes([bytes[3], bytes[4]]);
    bytes[3..5].copy_from_slice(&(declared + 10).to_be_bytes());
    let err = TlsPlaintext::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::LengthMismatch { .. }));

    bytes[3..5].copy_from_slice(&(declared - 10).to_be_bytes());
    let err = TlsPlaintext::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::LengthMismatch { .. }));
}

#[test]
fn reserved_handshake_types_are_not_members() {
    for raw in [0u32, 3, 6, 12, 14, 16] {
        let t = HandshakeType::from_raw(raw).unwrap();
        assert!(!t.is_member(), "{raw} should be reserved");
    }
    assert_eq!(HandshakeType::CLIENT_HELLO.name().unwrap(), "client_hello");
}

proptest! {
    #[test]
    fn uint16_round_trip(v in any::<u16>()) {
        let u = Uint16::new(u32::from(v)).unwrap();
        let back = Uint16::from_bytes(&u.to_bytes()).unwrap();
        prop_assert_eq!(back.value(), u32::from(v));
    }

    #[test]
    fn uint24_round_trip(v in 0u32..(1 << 24)) {
        let bytes = Uint24::new(v).unwrap().to_bytes();
        prop_assert_eq!(bytes.len(), 3);
        let mut r = Reader::new(&bytes);
        prop_assert_eq!(r.read_fixed::<3>().unwrap().value(), v);
    }

    #[test]
    fn uint24_rejects_out_of_range(v in (1u32 << 24)..) {
        prop_assert!(Uint::<3>::new(v).is_err());
    }
}
