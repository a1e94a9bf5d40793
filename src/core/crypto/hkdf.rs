/*
    HKDF helpers for the TLS 1.3 key schedule.

    - RFC5869: https://datatracker.ietf.org/doc/html/rfc5869
    - RFC8446 §7.1: HKDF-Expand-Label / Derive-Secret

    Provides:
    - Raw `hkdf_extract` / `hkdf_expand` over SHA-256 or SHA-384
    - `hkdf_expand_label` with the "tls13 " label prefix
    - `derive_secret` over a transcript
    - `finished_verify_data` (HMAC keyed by the "finished" key)

    Note: `hkdf` crate uses `sha2` for hash implementations.
*/

use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384};

use super::hash::HashAlgorithm;
use super::secret::Secret;

const LABEL_PREFIX: &[u8] = b"tls13 ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HkdfError {
    #[error("invalid PRK")]
    InvalidPrk,
    #[error("invalid length")]
    InvalidLength,
}

/// HKDF-Extract (RFC5869 §2.2). An empty `salt` is equivalent to `HashLen` zeros.
#[must_use]
pub fn hkdf_extract(alg: HashAlgorithm, salt: &[u8], ikm: &[u8]) -> Secret {
    let prk = match alg {
        HashAlgorithm::Sha256 => Hkdf::<Sha256>::extract(Some(salt), ikm).0.to_vec(),
        HashAlgorithm::Sha384 => Hkdf::<Sha384>::extract(Some(salt), ikm).0.to_vec(),
    };
    Secret::new(prk)
}

/// HKDF-Expand (RFC5869 §2.3); `out.len()` is the OKM length.
///
/// # Errors
/// - `HkdfError::InvalidPrk` if `prk` is shorter than `HashLen`.
/// - `HkdfError::InvalidLength` if `out.len()` exceeds `255 * HashLen`.
pub fn hkdf_expand(alg: HashAlgorithm, prk: &[u8], info: &[u8], out: &mut [u8]) -> Result<(), HkdfError> {
    match alg {
        HashAlgorithm::Sha256 => Hkdf::<Sha256>::from_prk(prk)
            .map_err(|_| HkdfError::InvalidPrk)?
            .expand(info, out)
            .map_err(|_| HkdfError::InvalidLength),
        HashAlgorithm::Sha384 => Hkdf::<Sha384>::from_prk(prk)
            .map_err(|_| HkdfError::InvalidPrk)?
            .expand(info, out)
            .map_err(|_| HkdfError::InvalidLength),
    }
}

/// Serialized `HkdfLabel { uint16 length; opaque label<7..255>; opaque context<0..255>; }`.
fn hkdf_label(len: usize, label: &[u8], context: &[u8]) -> Result<Vec<u8>, HkdfError> {
    let out_len = u16::try_from(len).map_err(|_| HkdfError::InvalidLength)?;
    let label_len = u8::try_from(LABEL_PREFIX.len() + label.len()).map_err(|_| HkdfError::InvalidLength)?;
    let ctx_len = u8::try_from(context.len()).map_err(|_| HkdfError::InvalidLength)?;

    let mut info = Vec::with_capacity(4 + label_len as usize + context.len());
    info.extend_from_slice(&out_len.to_be_bytes());
    info.push(label_len);
    info.extend_from_slice(LABEL_PREFIX);
    info.extend_from_slice(label);
    info.push(ctx_len);
    info.extend_from_slice(context);
    Ok(info)
}

/// `HKDF-Expand-Label(secret, label, context, len)`.
///
/// # Errors
/// Returns `HkdfError` if the label/context exceed their one-byte prefixes,
/// `len` exceeds the HKDF limit, or `secret` is not a valid PRK.
pub fn hkdf_expand_label(
    alg: HashAlgorithm,
    secret: &Secret,
    label: &[u8],
    context: &[u8],
    len: usize,
) -> Result<Secret, HkdfError> {
    let info = hkdf_label(len, label, context)?;
    let mut out = vec![0u8; len];
    hkdf_expand(alg, secret.as_bytes(), &info, &mut out)?;
    Ok(Secret::new(out))
}

/// `Derive-Secret(secret, label, messages)`: Expand-Label over `Hash(messages)`.
///
/// # Errors
/// Propagates `HkdfError` from [`hkdf_expand_label`].
pub fn derive_secret(alg: HashAlgorithm, secret: &Secret, label: &[u8], messages: &[u8]) -> Result<Secret, HkdfError> {
    derive_secret_from_hash(alg, secret, label, &alg.digest(messages))
}

/// Like [`derive_secret`] when the transcript hash is already computed.
///
/// # Errors
/// Propagates `HkdfError` from [`hkdf_expand_label`].
pub fn derive_secret_from_hash(
    alg: HashAlgorithm,
    secret: &Secret,
    label: &[u8],
    transcript_hash: &[u8],
) -> Result<Secret, HkdfError> {
    hkdf_expand_label(alg, secret, label, transcript_hash, alg.output_len())
}

/// Finished `verify_data = HMAC(finished_key, transcript_hash)` where
/// `finished_key = HKDF-Expand-Label(base_key, "finished", "", HashLen)`.
///
/// # Errors
/// Propagates `HkdfError` from the finished-key derivation.
pub fn finished_verify_data(
    alg: HashAlgorithm,
    base_key: &Secret,
    transcript_hash: &[u8],
) -> Result<Vec<u8>, HkdfError> {
    let finished_key = hkdf_expand_label(alg, base_key, b"finished", b"", alg.output_len())?;
    let tag = match alg {
        HashAlgorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(finished_key.as_bytes()).map_err(|_| HkdfError::InvalidPrk)?;
            mac.update(transcript_hash);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlgorithm::Sha384 => {
            let mut mac = Hmac::<Sha384>::new_from_slice(finished_key.as_bytes()).map_err(|_| HkdfError::InvalidPrk)?;
            mac.update(transcript_hash);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA256: HashAlgorithm = HashAlgorithm::Sha256;

    fn unhex(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    #[test]
    fn extract_length_and_different_salt_changes_prk() {
        let ikm = b"input keying material";
        let prk1 = hkdf_extract(HashAlgorithm::Sha384, b"salt-a", ikm);
        let prk2 = hkdf_extract(HashAlgorithm::Sha384, b"salt-b", ikm);
        assert_eq!(prk1.len(), 48);
        assert_ne!(prk1, prk2, "different salt should yield different PRK");
    }

    #[test]
    fn empty_salt_equals_zero_salt() {
        let a = hkdf_extract(SHA256, b"", b"ikm");
        let b = hkdf_extract(SHA256, &[0u8; 32], b"ikm");
        assert_eq!(a, b);
    }

    #[test]
    fn expand_too_large_length_errors() {
        let prk = hkdf_extract(SHA256, b"salt", b"ikm");
        let mut out = vec![0u8; 32 * 255 + 1];
        let err = hkdf_expand(SHA256, prk.as_bytes(), b"info", &mut out).unwrap_err();
        assert_eq!(err, HkdfError::InvalidLength);
    }

    #[test]
    fn expand_rejects_short_prk() {
        let mut out = [0u8; 16];
        assert_eq!(hkdf_expand(SHA256, &[0u8; 8], b"", &mut out), Err(HkdfError::InvalidPrk));
    }

    #[test]
    fn label_layout() {
        let info = hkdf_label(32, b"derived", b"").unwrap();
        assert_eq!(&info[..3], &[0x00, 0x20, 13]);
        assert_eq!(&info[3..16], b"tls13 derived");
        assert_eq!(info[16], 0);
        assert_eq!(info.len(), 17);
    }

    #[test]
    fn label_too_long_rejected() {
        let long = vec![b'a'; 250];
        assert_eq!(hkdf_label(32, &long, b""), Err(HkdfError::InvalidLength));
    }

    // RFC 8448 §3 (simple 1-RTT handshake), SHA-256.
    #[test]
    fn rfc8448_early_and_derived_secrets() {
        let early = hkdf_extract(SHA256, &[0u8; 32], &[0u8; 32]);
        assert_eq!(
            early.as_bytes(),
            unhex("33ad0a1c607ec03b09e6cd9893680ce210adf300aa1f2660e1b22e10f170f92a").as_slice()
        );
        let derived = derive_secret(SHA256, &early, b"derived", b"").unwrap();
        assert_eq!(
            derived.as_bytes(),
            unhex("6f2615a108c702c5678f54fc9dbab69716c076189c48250cebeac3576c3611ba").as_slice()
        );
    }

    #[test]
    fn rfc8448_handshake_secret() {
        let salt = unhex("6f2615a108c702c5678f54fc9dbab69716c076189c48250cebeac3576c3611ba");
        let ikm = unhex("8bd4054fb55b9d63fdfbacf9f04b9f0d35e6d63f537563efd46272900f89492d");
        let hs = hkdf_extract(SHA256, &salt, &ikm);
        assert_eq!(
            hs.as_bytes(),
            unhex("1dc826e93606aa6fdc0aadc12f741b01046aa6b99f691ed221a9f0ca043fbeac").as_slice()
        );
    }

    #[test]
    fn derive_secret_is_deterministic_and_label_scoped() {
        let s = hkdf_extract(SHA256, b"", b"shared");
        let a = derive_secret(SHA256, &s, b"c ap traffic", b"transcript").unwrap();
        let b = derive_secret(SHA256, &s, b"c ap traffic", b"transcript").unwrap();
        let c = derive_secret(SHA256, &s, b"s ap traffic", b"transcript").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn verify_data_has_hash_length() {
        let base = hkdf_extract(HashAlgorithm::Sha384, b"", b"traffic");
        let th = HashAlgorithm::Sha384.digest(b"messages");
        let vd = finished_verify_data(HashAlgorithm::Sha384, &base, &th).unwrap();
        assert_eq!(vd.len(), 48);
        let other = finished_verify_data(HashAlgorithm::Sha384, &base, &HashAlgorithm::Sha384.digest(b"x")).unwrap();
        assert_ne!(vd, other);
    }
}
