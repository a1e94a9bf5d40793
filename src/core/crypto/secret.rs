//! Owned secret bytes, zeroized on drop.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key-schedule secret or shared key. Length is the hash output length (or the
/// modulus length for a raw FFDHE shared secret).
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(Vec<u8>);

impl Secret {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// All-zero secret of `len` bytes (the "no PSK" / "no DH" input).
    #[must_use]
    pub fn zero(len: usize) -> Self {
        Self(vec![0u8; len])
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({} bytes, ..)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let s = Secret::new(vec![0x41; 32]);
        let d = format!("{s:?}");
        assert_eq!(d, "Secret(32 bytes, ..)");
        assert!(!d.contains("41"));
    }

    #[test]
    fn zeroize_clears_contents() {
        let mut s = Secret::new(vec![7u8; 16]);
        s.zeroize();
        assert!(s.is_empty());
    }
}
