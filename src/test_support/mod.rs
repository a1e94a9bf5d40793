#![allow(dead_code)]
//! Shared fixtures for unit tests.

use crate::domain::handshake::{ClientHello, Extension, KeyShareEntry, Random, ServerHello};
use crate::domain::{CipherSuite, NamedGroup, ProtocolVersion, SignatureScheme};

/// Simple byte filler
pub fn bytes_of(b: u8, len: usize) -> Vec<u8> {
    vec![b; len]
}

/// ClientHello offering one suite, TLS 1.3, ffdhe2048, rsa_pkcs1_sha256 and
/// one 256-byte key share, in that extension order.
pub fn sample_client_hello() -> ClientHello {
    ClientHello::new(
        Random([0x11; 32]),
        Vec::new(),
        vec![CipherSuite::TLS_AES_128_GCM_SHA256],
        vec![
            Extension::supported_versions_client(vec![ProtocolVersion::TLS13]),
            Extension::supported_groups(vec![NamedGroup::FFDHE2048]),
            Extension::signature_algorithms(vec![SignatureScheme::RSA_PKCS1_SHA256]),
            Extension::key_share_client(vec![KeyShareEntry::new(NamedGroup::FFDHE2048, bytes_of(0x42, 256))]),
        ],
    )
    .unwrap()
}

/// ServerHello selecting TLS_AES_128_GCM_SHA256 / TLS 1.3 with the given share.
pub fn sample_server_hello(group: NamedGroup, key_exchange: Vec<u8>) -> ServerHello {
    ServerHello::new(
        Random([0x22; 32]),
        Vec::new(),
        CipherSuite::TLS_AES_128_GCM_SHA256,
        vec![
            Extension::supported_versions_server(ProtocolVersion::TLS13),
            Extension::key_share_server(KeyShareEntry::new(group, key_exchange)),
        ],
    )
    .unwrap()
}
