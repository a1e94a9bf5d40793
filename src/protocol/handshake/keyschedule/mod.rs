use crate::core::crypto::hkdf::{HkdfError, derive_secret, derive_secret_from_hash, hkdf_expand_label, hkdf_extract};
use crate::core::crypto::{HashAlgorithm, Secret};

/// AEAD nonce length for every TLS 1.3 suite.
pub const IV_LEN: usize = 12;

// Labels (RFC 8446 §7.1); the "tls13 " prefix is added by HKDF-Expand-Label.
const L_DERIVED: &[u8] = b"derived";
const L_CLIENT_HS: &[u8] = b"c hs traffic";
const L_SERVER_HS: &[u8] = b"s hs traffic";
const L_CLIENT_AP: &[u8] = b"c ap traffic";
const L_SERVER_AP: &[u8] = b"s ap traffic";
const L_KEY: &[u8] = b"key";
const L_IV: &[u8] = b"iv";

/// Client/server pair of traffic secrets at one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficSecrets {
    pub client: Secret,
    pub server: Secret,
}

/// Record-protection key material expanded from one traffic secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficKeys {
    pub key: Secret,
    pub iv: Secret,
}

/// Secret chain for one handshake:
///
/// ```text
///   early     = HKDF-Extract(0, PSK or 0)
///   handshake = HKDF-Extract(Derive-Secret(early, "derived", ""), (EC)DHE)
///   master    = HKDF-Extract(Derive-Secret(handshake, "derived", ""), 0)
/// ```
///
/// Every secret is `HashLen` bytes and is zeroized when the schedule drops.
#[derive(Debug)]
pub struct KeySchedule {
    alg: HashAlgorithm,
    early: Secret,
    handshake: Secret,
    master: Secret,
}

impl KeySchedule {
    /// Run the extract chain with no PSK.
    ///
    /// # Errors
    /// Propagates `HkdfError` from the "derived" expansions.
    pub fn new(alg: HashAlgorithm, shared_secret: &Secret) -> Result<Self, HkdfError> {
        let zero = Secret::zero(alg.output_len());
        let early = hkdf_extract(alg, zero.as_bytes(), zero.as_bytes());
        let salt = derive_secret(alg, &early, L_DERIVED, b"")?;
        let handshake = hkdf_extract(alg, salt.as_bytes(), shared_secret.as_bytes());
        let salt = derive_secret(alg, &handshake, L_DERIVED, b"")?;
        let master = hkdf_extract(alg, salt.as_bytes(), zero.as_bytes());
        Ok(Self { alg, early, handshake, master })
    }

    #[must_use]
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.alg
    }

    #[must_use]
    pub fn early_secret(&self) -> &Secret {
        &self.early
    }

    #[must_use]
    pub fn handshake_secret(&self) -> &Secret {
        &self.handshake
    }

    #[must_use]
    pub fn master_secret(&self) -> &Secret {
        &self.master
    }

    /// `{c,s} hs traffic` over `Hash(ClientHello..ServerHello)`.
    ///
    /// # Errors
    /// Propagates `HkdfError`.
    pub fn handshake_traffic_secrets(&self, transcript_hash: &[u8]) -> Result<TrafficSecrets, HkdfError> {
        Ok(TrafficSecrets {
            client: derive_secret_from_hash(self.alg, &self.handshake, L_CLIENT_HS, transcript_hash)?,
            server: derive_secret_from_hash(self.alg, &self.handshake, L_SERVER_HS, transcript_hash)?,
        })
    }

    /// `{c,s} ap traffic` over the transcript hash supplied by the caller.
    ///
    /// # Errors
    /// Propagates `HkdfError`.
    pub fn application_traffic_secrets(&self, transcript_hash: &[u8]) -> Result<TrafficSecrets, HkdfError> {
        Ok(TrafficSecrets {
            client: derive_secret_from_hash(self.alg, &self.master, L_CLIENT_AP, transcript_hash)?,
            server: derive_secret_from_hash(self.alg, &self.master, L_SERVER_AP, transcript_hash)?,
        })
    }
}

/// Expand a traffic secret into an AEAD key of `key_len` bytes and a 12-byte IV.
///
/// # Errors
/// Propagates `HkdfError` if the secret is not a valid PRK.
pub fn derive_traffic_keys(alg: HashAlgorithm, secret: &Secret, key_len: usize) -> Result<TrafficKeys, HkdfError> {
    Ok(TrafficKeys {
        key: hkdf_expand_label(alg, secret, L_KEY, b"", key_len)?,
        iv: hkdf_expand_label(alg, secret, L_IV, b"", IV_LEN)?,
    })
}
