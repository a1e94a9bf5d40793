//! TLS 1.3 code-point registries (draft-26 IANA values).

use crate::core::crypto::hash::HashAlgorithm;

crate::tls_enum! {
    /// Record-layer content type.
    pub struct ContentType: 1 {
        INVALID = 0 => "invalid",
        CHANGE_CIPHER_SPEC = 20 => "change_cipher_spec",
        ALERT = 21 => "alert",
        HANDSHAKE = 22 => "handshake",
        APPLICATION_DATA = 23 => "application_data",
    }
    reserved {}
}

crate::tls_enum! {
    /// Handshake message type.
    pub struct HandshakeType: 1 {
        CLIENT_HELLO = 1 => "client_hello",
        SERVER_HELLO = 2 => "server_hello",
        NEW_SESSION_TICKET = 4 => "new_session_ticket",
        END_OF_EARLY_DATA = 5 => "end_of_early_data",
        ENCRYPTED_EXTENSIONS = 8 => "encrypted_extensions",
        CERTIFICATE = 11 => "certificate",
        CERTIFICATE_REQUEST = 13 => "certificate_request",
        CERTIFICATE_VERIFY = 15 => "certificate_verify",
        FINISHED = 20 => "finished",
        KEY_UPDATE = 24 => "key_update",
        MESSAGE_HASH = 254 => "message_hash",
    }
    // hello_request, hello_verify_request, hello_retry_request,
    // server_key_exchange, server_hello_done, client_key_exchange
    reserved { 0..=0, 3..=3, 6..=6, 12..=12, 14..=14, 16..=16 }
}

crate::tls_enum! {
    /// Extension type.
    pub struct ExtensionType: 2 {
        SERVER_NAME = 0 => "server_name",
        MAX_FRAGMENT_LENGTH = 1 => "max_fragment_length",
        STATUS_REQUEST = 5 => "status_request",
        SUPPORTED_GROUPS = 10 => "supported_groups",
        SIGNATURE_ALGORITHMS = 13 => "signature_algorithms",
        USE_SRTP = 14 => "use_srtp",
        HEARTBEAT = 15 => "heartbeat",
        APPLICATION_LAYER_PROTOCOL_NEGOTIATION = 16 => "application_layer_protocol_negotiation",
        SIGNED_CERTIFICATE_TIMESTAMP = 18 => "signed_certificate_timestamp",
        CLIENT_CERTIFICATE_TYPE = 19 => "client_certificate_type",
        SERVER_CERTIFICATE_TYPE = 20 => "server_certificate_type",
        PADDING = 21 => "padding",
        PRE_SHARED_KEY = 41 => "pre_shared_key",
        EARLY_DATA = 42 => "early_data",
        SUPPORTED_VERSIONS = 43 => "supported_versions",
        COOKIE = 44 => "cookie",
        PSK_KEY_EXCHANGE_MODES = 45 => "psk_key_exchange_modes",
        CERTIFICATE_AUTHORITIES = 47 => "certificate_authorities",
        OID_FILTERS = 48 => "oid_filters",
        POST_HANDSHAKE_AUTH = 49 => "post_handshake_auth",
        SIGNATURE_ALGORITHMS_CERT = 50 => "signature_algorithms_cert",
        KEY_SHARE = 51 => "key_share",
    }
    reserved {}
}

crate::tls_enum! {
    /// Key-exchange group.
    pub struct NamedGroup: 2 {
        SECP256R1 = 0x0017 => "secp256r1",
        SECP384R1 = 0x0018 => "secp384r1",
        SECP521R1 = 0x0019 => "secp521r1",
        X25519 = 0x001d => "x25519",
        X448 = 0x001e => "x448",
        FFDHE2048 = 0x0100 => "ffdhe2048",
        FFDHE3072 = 0x0101 => "ffdhe3072",
        FFDHE4096 = 0x0102 => "ffdhe4096",
        FFDHE6144 = 0x0103 => "ffdhe6144",
        FFDHE8192 = 0x0104 => "ffdhe8192",
    }
    reserved {
        0x0001..=0x0016,
        0x001a..=0x001c,
        0x01fc..=0x01ff,
        0xfe00..=0xfeff,
        0xff01..=0xff02,
    }
}

impl NamedGroup {
    /// Finite-field (RFC 7919) group.
    #[must_use]
    pub fn is_ffdhe(self) -> bool {
        (0x0100..=0x0104).contains(&self.to_uint().value())
    }
}

crate::tls_enum! {
    /// Signature algorithm advertised in `signature_algorithms`.
    pub struct SignatureScheme: 2 {
        RSA_PKCS1_SHA256 = 0x0401 => "rsa_pkcs1_sha256",
        RSA_PKCS1_SHA384 = 0x0501 => "rsa_pkcs1_sha384",
        RSA_PKCS1_SHA512 = 0x0601 => "rsa_pkcs1_sha512",
        ECDSA_SECP256R1_SHA256 = 0x0403 => "ecdsa_secp256r1_sha256",
        ECDSA_SECP384R1_SHA384 = 0x0503 => "ecdsa_secp384r1_sha384",
        ECDSA_SECP521R1_SHA512 = 0x0603 => "ecdsa_secp521r1_sha512",
        RSA_PSS_RSAE_SHA256 = 0x0804 => "rsa_pss_rsae_sha256",
        RSA_PSS_RSAE_SHA384 = 0x0805 => "rsa_pss_rsae_sha384",
        RSA_PSS_RSAE_SHA512 = 0x0806 => "rsa_pss_rsae_sha512",
        ED25519 = 0x0807 => "ed25519",
        ED448 = 0x0808 => "ed448",
        RSA_PSS_PSS_SHA256 = 0x0809 => "rsa_pss_pss_sha256",
        RSA_PSS_PSS_SHA384 = 0x080a => "rsa_pss_pss_sha384",
        RSA_PSS_PSS_SHA512 = 0x080b => "rsa_pss_pss_sha512",
        RSA_PKCS1_SHA1 = 0x0201 => "rsa_pkcs1_sha1",
        ECDSA_SHA1 = 0x0203 => "ecdsa_sha1",
    }
    reserved {
        0x0000..=0x0200,
        0x0202..=0x0202,
        0x0204..=0x0400,
        0x0402..=0x0402,
        0x0404..=0x0500,
        0x0502..=0x0502,
        0x0504..=0x0600,
        0x0602..=0x0602,
        0x0604..=0x06ff,
        0xfe00..=0xffff,
    }
}

crate::tls_enum! {
    /// TLS 1.3 cipher suite.
    pub struct CipherSuite: 2 {
        TLS_AES_128_GCM_SHA256 = 0x1301 => "TLS_AES_128_GCM_SHA256",
        TLS_AES_256_GCM_SHA384 = 0x1302 => "TLS_AES_256_GCM_SHA384",
        TLS_CHACHA20_POLY1305_SHA256 = 0x1303 => "TLS_CHACHA20_POLY1305_SHA256",
        TLS_AES_128_CCM_SHA256 = 0x1304 => "TLS_AES_128_CCM_SHA256",
        TLS_AES_128_CCM_8_SHA256 = 0x1305 => "TLS_AES_128_CCM_8_SHA256",
    }
    reserved {}
}

impl CipherSuite {
    /// Hash used by HKDF and the transcript; `None` for unregistered suites.
    #[must_use]
    pub fn hash_algorithm(self) -> Option<HashAlgorithm> {
        match self {
            Self::TLS_AES_256_GCM_SHA384 => Some(HashAlgorithm::Sha384),
            Self::TLS_AES_128_GCM_SHA256
            | Self::TLS_CHACHA20_POLY1305_SHA256
            | Self::TLS_AES_128_CCM_SHA256
            | Self::TLS_AES_128_CCM_8_SHA256 => Some(HashAlgorithm::Sha256),
            _ => None,
        }
    }

    /// AEAD key length in bytes for the suite's record protection.
    #[must_use]
    pub fn key_len(self) -> Option<usize> {
        match self {
            Self::TLS_AES_128_GCM_SHA256 | Self::TLS_AES_128_CCM_SHA256 | Self::TLS_AES_128_CCM_8_SHA256 => {
                Some(16)
            }
            Self::TLS_AES_256_GCM_SHA384 | Self::TLS_CHACHA20_POLY1305_SHA256 => Some(32),
            _ => None,
        }
    }
}

crate::tls_enum! {
    /// Protocol version carried in `supported_versions` and legacy fields.
    pub struct ProtocolVersion: 2 {
        TLS12 = 0x0303 => "TLSv1.2",
        TLS13 = 0x0304 => "TLSv1.3",
        TLS13_DRAFT26 = 0x7f1a => "TLSv1.3-draft26",
    }
    reserved {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::{CodecError, Enumeration};
    use proptest::prelude::*;

    #[test]
    fn every_declared_handshake_type_is_a_member() {
        for (value, name) in HandshakeType::TABLE {
            let t = HandshakeType::from_raw(*value).unwrap();
            assert!(t.is_member(), "{name}");
            assert_eq!(t.name().unwrap(), *name);
        }
    }

    #[test]
    fn reserved_handshake_types_are_unknown() {
        for v in [0u32, 3, 6, 12, 14, 16] {
            let t = HandshakeType::from_raw(v).unwrap();
            assert!(!t.is_member());
            assert!(matches!(t.name(), Err(CodecError::UnknownConstant { .. })));
        }
    }

    #[test]
    fn ffdhe_groups_are_recognised() {
        assert!(NamedGroup::FFDHE2048.is_ffdhe());
        assert!(NamedGroup::FFDHE8192.is_ffdhe());
        assert!(!NamedGroup::X25519.is_ffdhe());
        assert_eq!(NamedGroup::FFDHE3072.to_string(), "ffdhe3072");
    }

    #[test]
    fn cipher_suite_codes_are_distinct() {
        let mut values: Vec<u32> = CipherSuite::TABLE.iter().map(|(v, _)| *v).collect();
        values.dedup();
        assert_eq!(values, vec![0x1301, 0x1302, 0x1303, 0x1304, 0x1305]);
    }

    #[test]
    fn cipher_suite_hash_selection() {
        assert_eq!(CipherSuite::TLS_AES_256_GCM_SHA384.hash_algorithm(), Some(HashAlgorithm::Sha384));
        assert_eq!(CipherSuite::TLS_AES_128_GCM_SHA256.hash_algorithm(), Some(HashAlgorithm::Sha256));
        let unknown = CipherSuite::from_raw(0x00ff).unwrap();
        assert_eq!(unknown.hash_algorithm(), None);
    }

    #[test]
    fn signature_scheme_reserved_singletons() {
        assert!(SignatureScheme::RSA_PKCS1_SHA256.is_member());
        assert!(!SignatureScheme::from_raw(0x0402).unwrap().is_member());
        assert!(!SignatureScheme::from_raw(0x0100).unwrap().is_member());
    }

    proptest! {
        #[test]
        fn prop_named_group_reserved_ranges_never_members(v in prop_oneof![
            0x0001u32..=0x0016, 0x001au32..=0x001c, 0x01fcu32..=0x01ff,
            0xfe00u32..=0xfeff, 0xff01u32..=0xff02,
        ]) {
            prop_assert!(!NamedGroup::from_raw(v).unwrap().is_member());
        }
    }
}
