//! Finite-field Diffie-Hellman over the RFC 7919 named groups.
//!
//! Private exponents are drawn uniformly from `[2, p-2]` by rejection
//! sampling. Public values, peer values and the shared secret are fixed-length
//! big-endian strings padded to the modulus byte length.

mod params;

use std::fmt;
use std::sync::LazyLock;

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::core::crypto::Secret;
use crate::domain::NamedGroup;
use crate::ports::crypto::{KeyExchange, KeyExchangeError};
use params::{GENERATOR, PARAMS};

/// Parsed group: modulus plus byte length. Built once, never mutated.
pub struct FfdheGroup {
    group: NamedGroup,
    bits: usize,
    p: BigUint,
    p_minus_2: BigUint,
}

static GROUPS: LazyLock<Vec<FfdheGroup>> = LazyLock::new(|| {
    PARAMS
        .iter()
        .filter_map(|params| {
            let p = BigUint::parse_bytes(params.p_hex.as_bytes(), 16)?;
            let p_minus_2 = &p - 2u32;
            Some(FfdheGroup { group: params.group, bits: params.bits, p, p_minus_2 })
        })
        .collect()
});

impl FfdheGroup {
    /// Look up a finite-field group.
    ///
    /// # Errors
    /// Returns `KeyExchangeError::UnsupportedGroup` for non-FFDHE groups.
    pub fn lookup(group: NamedGroup) -> Result<&'static Self, KeyExchangeError> {
        GROUPS
            .iter()
            .find(|g| g.group == group)
            .ok_or(KeyExchangeError::UnsupportedGroup(group))
    }

    #[must_use]
    pub fn group(&self) -> NamedGroup {
        self.group
    }

    #[must_use]
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Length of every encoded group element.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.bits / 8
    }

    #[must_use]
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    fn in_range(&self, v: &BigUint) -> bool {
        *v >= BigUint::from(2u32) && *v <= self.p_minus_2
    }

    fn encode(&self, v: &BigUint) -> Vec<u8> {
        let mut raw = v.to_bytes_be();
        let mut out = vec![0u8; self.byte_len().saturating_sub(raw.len())];
        out.extend_from_slice(&raw);
        raw.zeroize();
        out
    }

    /// Uniform exponent in `[2, p-2]`. `scratch` must be `byte_len()` long and
    /// is zeroed before returning.
    fn draw_exponent<R: RngCore + CryptoRng>(&self, rng: &mut R, scratch: &mut [u8]) -> BigUint {
        // p is within 2^-64 of 2^bits, so rejections are rare.
        let x = loop {
            rng.fill_bytes(scratch);
            let mut candidate = BigUint::from_bytes_be(scratch);
            if self.in_range(&candidate) {
                break candidate;
            }
            candidate.zeroize();
        };
        scratch.zeroize();
        x
    }
}

impl fmt::Debug for FfdheGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FfdheGroup").field("group", &self.group).field("bits", &self.bits).finish()
    }
}

/// Ephemeral FFDHE key pair for one handshake.
pub struct FfdheKeyPair {
    group: &'static FfdheGroup,
    private: Secret,
    public: Vec<u8>,
}

impl FfdheKeyPair {
    /// Generate a fresh key pair.
    ///
    /// # Errors
    /// Returns `KeyExchangeError::UnsupportedGroup` if `group` is not an FFDHE group.
    pub fn generate<R: RngCore + CryptoRng>(group: NamedGroup, rng: &mut R) -> Result<Self, KeyExchangeError> {
        let params = FfdheGroup::lookup(group)?;
        let mut scratch = vec![0u8; params.byte_len()];
        let mut x = params.draw_exponent(rng, &mut scratch);
        let private = Secret::new(params.encode(&x));
        let public = params.encode(&BigUint::from(GENERATOR).modpow(&x, &params.p));
        x.zeroize();
        Ok(Self { group: params, private, public })
    }

    #[must_use]
    pub fn params(&self) -> &'static FfdheGroup {
        self.group
    }
}

impl KeyExchange for FfdheKeyPair {
    fn group(&self) -> NamedGroup {
        self.group.group
    }

    fn public_key(&self) -> &[u8] {
        &self.public
    }

    fn complete(&self, peer_public: &[u8]) -> Result<Secret, KeyExchangeError> {
        let params = self.group;
        if peer_public.len() != params.byte_len() {
            return Err(KeyExchangeError::LengthMismatch {
                expected: params.byte_len(),
                actual: peer_public.len(),
            });
        }
        let y = BigUint::from_bytes_be(peer_public);
        if !params.in_range(&y) {
            return Err(KeyExchangeError::InvalidPublicValue);
        }
        let mut x = BigUint::from_bytes_be(self.private.as_bytes());
        let mut shared = y.modpow(&x, &params.p);
        let secret = Secret::new(params.encode(&shared));
        x.zeroize();
        shared.zeroize();
        Ok(secret)
    }
}

impl fmt::Debug for FfdheKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FfdheKeyPair")
            .field("group", &self.group.group)
            .field("public_len", &self.public.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn rng(seed: u8) -> ChaCha20Rng {
        ChaCha20Rng::from_seed([seed; 32])
    }

    #[test]
    fn exponent_scratch_is_cleared() {
        let params = FfdheGroup::lookup(NamedGroup::FFDHE2048).unwrap();
        let mut scratch = vec![0u8; params.byte_len()];
        let x = params.draw_exponent(&mut rng(9), &mut scratch);
        assert!(params.in_range(&x));
        assert!(scratch.iter().all(|b| *b == 0));
    }

    #[test]
    fn all_groups_parse_with_declared_bit_length() {
        for (group, bits) in [
            (NamedGroup::FFDHE2048, 2048u64),
            (NamedGroup::FFDHE3072, 3072),
            (NamedGroup::FFDHE4096, 4096),
            (NamedGroup::FFDHE6144, 6144),
            (NamedGroup::FFDHE8192, 8192),
        ] {
            let g = FfdheGroup::lookup(group).unwrap();
            assert_eq!(g.modulus().bits() as u64, bits, "{group}");
            assert_eq!(g.byte_len() as u64 * 8, bits);
        }
    }

    #[test]
    fn moduli_share_rfc7919_framing() {
        // top and bottom 64 bits are all ones
        let g = FfdheGroup::lookup(NamedGroup::FFDHE2048).unwrap();
        let bytes = g.modulus().to_bytes_be();
        assert!(bytes[..8].iter().all(|b| *b == 0xff));
        assert!(bytes[bytes.len() - 8..].iter().all(|b| *b == 0xff));
    }

    #[test]
    fn unsupported_group_rejected() {
        let err = FfdheKeyPair::generate(NamedGroup::X25519, &mut rng(1)).unwrap_err();
        assert_eq!(err, KeyExchangeError::UnsupportedGroup(NamedGroup::X25519));
    }

    #[test]
    fn both_sides_agree_on_shared_secret() {
        let a = FfdheKeyPair::generate(NamedGroup::FFDHE2048, &mut rng(1)).unwrap();
        let b = FfdheKeyPair::generate(NamedGroup::FFDHE2048, &mut rng(2)).unwrap();
        assert_eq!(a.public_key().len(), 256);
        assert_ne!(a.public_key(), b.public_key());
        let s_ab = a.complete(b.public_key()).unwrap();
        let s_ba = b.complete(a.public_key()).unwrap();
        assert_eq!(s_ab, s_ba);
        assert_eq!(s_ab.len(), 256);
    }

    #[test]
    fn same_seed_same_key() {
        let a = FfdheKeyPair::generate(NamedGroup::FFDHE2048, &mut rng(9)).unwrap();
        let b = FfdheKeyPair::generate(NamedGroup::FFDHE2048, &mut rng(9)).unwrap();
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn peer_value_range_checked() {
        let a = FfdheKeyPair::generate(NamedGroup::FFDHE2048, &mut rng(3)).unwrap();
        let g = a.params();
        for bad in [BigUint::from(0u32), BigUint::from(1u32), g.modulus() - 1u32, g.modulus().clone()] {
            assert_eq!(a.complete(&g.encode(&bad)), Err(KeyExchangeError::InvalidPublicValue));
        }
        assert!(a.complete(&g.encode(&BigUint::from(2u32))).is_ok());
    }

    #[test]
    fn peer_value_length_checked() {
        let a = FfdheKeyPair::generate(NamedGroup::FFDHE2048, &mut rng(4)).unwrap();
        assert_eq!(
            a.complete(&[2u8; 255]),
            Err(KeyExchangeError::LengthMismatch { expected: 256, actual: 255 })
        );
    }

    #[test]
    fn debug_omits_private_value() {
        let a = FfdheKeyPair::generate(NamedGroup::FFDHE2048, &mut rng(5)).unwrap();
        let d = format!("{a:?}");
        assert!(d.contains("ffdhe2048"));
        assert!(!d.contains("private"));
    }
}
