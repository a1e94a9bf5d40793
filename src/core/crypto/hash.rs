//! Hash selection for the key schedule and transcript.

use sha2::{Digest, Sha256, Sha384};

/// Hash algorithm bound to the negotiated cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
}

impl HashAlgorithm {
    /// Digest size in bytes; every secret in the schedule has this length.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
        }
    }

    #[must_use]
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
        }
    }

    /// Digest over several slices, hashed as their concatenation.
    #[must_use]
    pub fn digest_all<'a>(self, parts: impl IntoIterator<Item = &'a [u8]>) -> Vec<u8> {
        match self {
            Self::Sha256 => {
                let mut h = Sha256::new();
                parts.into_iter().for_each(|p| h.update(p));
                h.finalize().to_vec()
            }
            Self::Sha384 => {
                let mut h = Sha384::new();
                parts.into_iter().for_each(|p| h.update(p));
                h.finalize().to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_lengths() {
        assert_eq!(HashAlgorithm::Sha256.digest(b"").len(), 32);
        assert_eq!(HashAlgorithm::Sha384.digest(b"").len(), HashAlgorithm::Sha384.output_len());
    }

    #[test]
    fn empty_sha256_vector() {
        assert_eq!(
            hex::encode(HashAlgorithm::Sha256.digest(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_all_matches_concatenation() {
        let parts: [&[u8]; 3] = [b"client", b"", b"server"];
        assert_eq!(
            HashAlgorithm::Sha384.digest_all(parts),
            HashAlgorithm::Sha384.digest(b"clientserver")
        );
    }
}
