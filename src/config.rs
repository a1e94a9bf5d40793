//! Client handshake parameters.
//!
//! ```json
//! {
//!   "cipher_suites": ["TLS_AES_128_GCM_SHA256"],
//!   "versions": ["TLSv1.3"],
//!   "named_groups": ["ffdhe2048"],
//!   "signature_schemes": ["rsa_pss_rsae_sha256", "rsa_pkcs1_sha256"],
//!   "max_record_len": 16389
//! }
//! ```
//!
//! Registry values may be given by name or by numeric code.

use serde::{Deserialize, Serialize};

use crate::core::codec::Enumeration;
use crate::domain::{CipherSuite, NamedGroup, ProtocolVersion, SignatureScheme};
use crate::protocol::record::{HEADER_LEN, MAX_FRAGMENT_LEN};

/// Largest record the transport accepts by default: header plus a full fragment.
pub const DEFAULT_MAX_RECORD_LEN: usize = HEADER_LEN + MAX_FRAGMENT_LEN;

/// Protected records may carry up to 256 bytes of expansion.
const MAX_RECORD_LEN_LIMIT: usize = HEADER_LEN + MAX_FRAGMENT_LEN + 256;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field `{0}` must not be empty")]
    Empty(&'static str),
    #[error("unsupported config value: {0}")]
    Unsupported(String),
}

/// What the client offers in its ClientHello.
///
/// The first entry of `named_groups` receives the key share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub cipher_suites: Vec<CipherSuite>,
    pub versions: Vec<ProtocolVersion>,
    pub named_groups: Vec<NamedGroup>,
    pub signature_schemes: Vec<SignatureScheme>,
    pub max_record_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cipher_suites: vec![CipherSuite::TLS_AES_128_GCM_SHA256],
            versions: vec![ProtocolVersion::TLS13],
            named_groups: vec![NamedGroup::FFDHE2048],
            signature_schemes: vec![SignatureScheme::RSA_PSS_RSAE_SHA256, SignatureScheme::RSA_PKCS1_SHA256],
            max_record_len: DEFAULT_MAX_RECORD_LEN,
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    /// - `ConfigError::Parse` for malformed JSON or unknown registry names.
    /// - Any error from [`ClientConfig::validate`].
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every list is non-empty and that the client can complete a
    /// handshake with each value it would offer.
    ///
    /// # Errors
    /// - `ConfigError::Empty` naming the first empty list.
    /// - `ConfigError::Unsupported` for a suite without a known hash, a version
    ///   other than TLS 1.3, a non-FFDHE group, an unregistered signature
    ///   scheme, or a record limit outside `HEADER_LEN..=2^14 + 261`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cipher_suites.is_empty() {
            return Err(ConfigError::Empty("cipher_suites"));
        }
        if self.versions.is_empty() {
            return Err(ConfigError::Empty("versions"));
        }
        if self.named_groups.is_empty() {
            return Err(ConfigError::Empty("named_groups"));
        }
        if self.signature_schemes.is_empty() {
            return Err(ConfigError::Empty("signature_schemes"));
        }
        if let Some(cs) = self.cipher_suites.iter().find(|cs| cs.hash_algorithm().is_none()) {
            return Err(ConfigError::Unsupported(format!("cipher suite {cs}")));
        }
        if let Some(v) = self.versions.iter().find(|v| !is_tls13(**v)) {
            return Err(ConfigError::Unsupported(format!("version {v}")));
        }
        if let Some(g) = self.named_groups.iter().find(|g| !g.is_ffdhe()) {
            return Err(ConfigError::Unsupported(format!("named group {g}")));
        }
        if let Some(s) = self.signature_schemes.iter().find(|s| !s.is_member()) {
            return Err(ConfigError::Unsupported(format!("signature scheme {s}")));
        }
        if !(HEADER_LEN + 1..=MAX_RECORD_LEN_LIMIT).contains(&self.max_record_len) {
            return Err(ConfigError::Unsupported(format!("max_record_len {}", self.max_record_len)));
        }
        Ok(())
    }

    /// Group the key share is generated for.
    #[must_use]
    pub fn key_share_group(&self) -> Option<NamedGroup> {
        self.named_groups.first().copied()
    }
}

fn is_tls13(v: ProtocolVersion) -> bool {
    v == ProtocolVersion::TLS13 || v == ProtocolVersion::TLS13_DRAFT26
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let c = ClientConfig::default();
        c.validate().unwrap();
        assert_eq!(c.key_share_group(), Some(NamedGroup::FFDHE2048));
        assert_eq!(c.max_record_len, 16389);
    }

    #[test]
    fn parses_names_and_codes() {
        let c = ClientConfig::from_json_str(
            r#"{
                "cipher_suites": ["TLS_AES_256_GCM_SHA384", 4865],
                "versions": ["TLSv1.3"],
                "named_groups": ["ffdhe3072"],
                "signature_schemes": [1025]
            }"#,
        )
        .unwrap();
        assert_eq!(
            c.cipher_suites,
            vec![CipherSuite::TLS_AES_256_GCM_SHA384, CipherSuite::TLS_AES_128_GCM_SHA256]
        );
        assert_eq!(c.named_groups, vec![NamedGroup::FFDHE3072]);
        assert_eq!(c.signature_schemes, vec![SignatureScheme::RSA_PKCS1_SHA256]);
        assert_eq!(c.max_record_len, DEFAULT_MAX_RECORD_LEN);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c = ClientConfig::from_json_str("{}").unwrap();
        assert_eq!(c, ClientConfig::default());
    }

    #[test]
    fn serializes_by_name() {
        let json = serde_json::to_string(&ClientConfig::default()).unwrap();
        assert!(json.contains("\"TLS_AES_128_GCM_SHA256\""));
        assert!(json.contains("\"ffdhe2048\""));
        let back = ClientConfig::from_json_str(&json).unwrap();
        assert_eq!(back, ClientConfig::default());
    }

    #[test]
    fn rejects_empty_lists() {
        let err = ClientConfig::from_json_str(r#"{"named_groups": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Empty("named_groups")));
    }

    #[test]
    fn rejects_elliptic_curve_group() {
        let err = ClientConfig::from_json_str(r#"{"named_groups": ["x25519"]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Unsupported(_)));
    }

    #[test]
    fn rejects_tls12() {
        let err = ClientConfig::from_json_str(r#"{"versions": ["TLSv1.2"]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Unsupported(_)));
    }

    #[test]
    fn rejects_unknown_names_and_fields() {
        assert!(matches!(
            ClientConfig::from_json_str(r#"{"named_groups": ["ffdhe1024"]}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(ClientConfig::from_json_str(r#"{"psk": true}"#), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_record_limit_out_of_range() {
        let c = ClientConfig { max_record_len: 4, ..ClientConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::Unsupported(_))));
        let c = ClientConfig { max_record_len: 1 << 20, ..ClientConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::Unsupported(_))));
    }
}
