//! Big-endian fixed-width unsigned integers (`uint8`, `uint16`, `uint24`, `uint32`).
//!
//! One generic type parameterized by its byte width replaces a family of
//! per-width types: the range check and the encoding are pure functions of `W`.

use std::fmt;

use super::codec::CodecError;

/// Unsigned integer serialized as exactly `W` big-endian bytes (`1 <= W <= 4`).
///
/// Equality, ordering and hashing are by numeric value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uint<const W: usize>(u32);

pub type Uint8 = Uint<1>;
pub type Uint16 = Uint<2>;
pub type Uint24 = Uint<3>;
pub type Uint32 = Uint<4>;

impl<const W: usize> Uint<W> {
    const VALID_WIDTH: () = assert!(W >= 1 && W <= 4, "Uint width must be 1..=4 bytes");

    /// Byte width on the wire.
    pub const WIDTH: usize = W;

    /// Largest value representable in `W` bytes.
    pub const MAX: u32 = if W >= 4 { u32::MAX } else { (1u32 << (8 * W)) - 1 };

    /// Construct from a raw integer.
    ///
    /// # Errors
    /// Returns `CodecError::OutOfRange` if `value` does not fit in `W` bytes.
    pub fn new(value: u32) -> Result<Self, CodecError> {
        let () = Self::VALID_WIDTH;
        if value > Self::MAX {
            return Err(CodecError::OutOfRange { value: u64::from(value), width: W });
        }
        Ok(Self(value))
    }

    /// Like [`Uint::new`] but for a `usize` length (common for length prefixes).
    ///
    /// # Errors
    /// Returns `CodecError::OutOfRange` if `len` does not fit in `W` bytes.
    pub fn from_len(len: usize) -> Result<Self, CodecError> {
        let v = u32::try_from(len)
            .map_err(|_| CodecError::OutOfRange { value: len as u64, width: W })?;
        Self::new(v)
    }

    /// Compile-time constructor for registry constants; panics during const
    /// evaluation if the value does not fit.
    #[must_use]
    pub const fn from_const(value: u32) -> Self {
        assert!(value <= Self::MAX, "constant does not fit declared width");
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn byte_length(self) -> usize {
        W
    }

    /// Big-endian encoding of exactly `W` bytes.
    #[must_use]
    pub fn to_bytes(self) -> [u8; W] {
        let be = self.0.to_be_bytes();
        let mut out = [0u8; W];
        out.copy_from_slice(&be[4 - W..]);
        out
    }

    /// Decode from a slice of exactly `W` bytes (left inverse of [`Uint::to_bytes`]).
    ///
    /// # Errors
    /// Returns `CodecError::LengthMismatch` if `bytes.len() != W`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let () = Self::VALID_WIDTH;
        if bytes.len() != W {
            return Err(CodecError::LengthMismatch {
                field: "uint",
                expected: W,
                actual: bytes.len(),
            });
        }
        let v = bytes.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b));
        Ok(Self(v))
    }
}

impl<const W: usize> fmt::Debug for Uint<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint{}(0x{:0width$x})", W * 8, self.0, width = W * 2)
    }
}

impl<const W: usize> fmt::Display for Uint<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:0width$x}", self.0, width = W * 2)
    }
}

impl<const W: usize> TryFrom<u32> for Uint<W> {
    type Error = CodecError;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const W: usize> From<Uint<W>> for u32 {
    fn from(v: Uint<W>) -> Self {
        v.0
    }
}
