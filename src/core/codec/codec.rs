//! core/codec/codec.rs — cursor reader / append-only writer for TLS wire structures.
//!
//! This module is *infrastructure*, not protocol-specific:
//! - [`Reader`] consumes fixed-width integers, length-prefixed vectors and the
//!   remaining tail of a borrowed byte slice.
//! - [`Writer`] accumulates serialized fields; length prefixes are always
//!   computed from the bytes actually written, never from a stored value.
//! - [`Codec`] is implemented by every protocol structure; [`encode_to_vec`] and
//!   [`decode_exact`] are the strict whole-buffer entry points.
//!
//! Notes:
//! - All multi-byte integers are big-endian.
//! - Decode failures never yield partially built values; the error propagates
//!   to the caller, which abandons the message.

use super::uint::Uint;

/// Errors produced by the binary codec.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Not enough bytes left to decode `field`.
    #[error("truncated {field}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A declared length disagrees with the actual content.
    #[error("{field} length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Integer does not fit the declared width.
    #[error("value {value:#x} does not fit in {width} byte(s)")]
    OutOfRange { value: u64, width: usize },

    /// Enumeration value is reserved or was never declared.
    #[error("unknown {enumeration} constant {value:#x}")]
    UnknownConstant {
        enumeration: &'static str,
        value: u32,
    },

    /// Structurally valid input that this implementation does not handle.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Bytes left over after a structure that must consume its whole input.
    #[error("{count} trailing byte(s) after {field}")]
    TrailingBytes { field: &'static str, count: usize },

    /// Semantic violation of a wire-format bound (e.g. an empty mandatory list).
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Current cursor offset from the start of the wrapped slice.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consume exactly `n` bytes.
    ///
    /// # Errors
    /// Returns `CodecError::Truncated` if fewer than `n` bytes remain.
    pub fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::Truncated {
                field,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Read a `W`-byte big-endian integer.
    ///
    /// # Errors
    /// Returns `CodecError::Truncated` if fewer than `W` bytes remain.
    pub fn read_fixed<const W: usize>(&mut self) -> Result<Uint<W>, CodecError> {
        let bytes = self.take(W, "uint")?;
        Uint::from_bytes(bytes)
    }

    /// Read an `L`-byte length field followed by that many opaque bytes.
    ///
    /// # Errors
    /// Returns `CodecError::Truncated` if the prefix or the body is short.
    pub fn read_opaque<const L: usize>(&mut self, field: &'static str) -> Result<&'a [u8], CodecError> {
        let len = self.read_fixed::<L>()?.value() as usize;
        self.take(len, field)
    }

    /// Read an `L`-byte length field and return a sub-reader bounded to exactly
    /// that many bytes; the outer cursor advances past them.
    ///
    /// # Errors
    /// Returns `CodecError::Truncated` if the prefix or the body is short.
    pub fn sub_reader<const L: usize>(&mut self, field: &'static str) -> Result<Reader<'a>, CodecError> {
        Ok(Reader::new(self.read_opaque::<L>(field)?))
    }

    /// Read an `L`-byte length prefix, then consecutive `E`-byte integers
    /// covering exactly the declared byte length.
    ///
    /// # Errors
    /// - `CodecError::Truncated` if fewer bytes remain than declared.
    /// - `CodecError::LengthMismatch` if the declared length is not a multiple of `E`.
    pub fn read_length_prefixed_list<const E: usize, const L: usize>(
        &mut self,
        field: &'static str,
    ) -> Result<Vec<Uint<E>>, CodecError> {
        let body = self.read_opaque::<L>(field)?;
        if body.len() % E != 0 {
            return Err(CodecError::LengthMismatch {
                field,
                expected: body.len() - body.len() % E,
                actual: body.len(),
            });
        }
        body.chunks_exact(E).map(Uint::<E>::from_bytes).collect()
    }

    /// Consume all remaining bytes.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let out = &self.buf[self.pos..];
        self.pos = self.buf.len();
        out
    }

    /// Require that the reader is exhausted.
    ///
    /// # Errors
    /// Returns `CodecError::TrailingBytes` if any bytes remain.
    pub fn expect_empty(&self, field: &'static str) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            count => Err(CodecError::TrailingBytes { field, count }),
        }
    }
}

/// Append-only byte accumulator.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    #[must_use]
    pub fn new() -> Self {
        Self { buf: Vec::with_capacity(256) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_fixed<const W: usize>(&mut self, v: Uint<W>) {
        self.buf.extend_from_slice(&v.to_bytes());
    }

    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write an `L`-byte length prefix followed by `bytes`.
    ///
    /// # Errors
    /// Returns `CodecError::OutOfRange` if `bytes.len()` does not fit in `L` bytes.
    pub fn write_opaque<const L: usize>(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.write_fixed(Uint::<L>::from_len(bytes.len())?);
        self.write_raw(bytes);
        Ok(())
    }

    /// Write `elements` preceded by their total byte length in `L` bytes.
    ///
    /// # Errors
    /// Returns `CodecError::OutOfRange` if the total does not fit in `L` bytes.
    pub fn write_length_prefixed_list<const E: usize, const L: usize>(
        &mut self,
        elements: &[Uint<E>],
    ) -> Result<(), CodecError> {
        self.write_fixed(Uint::<L>::from_len(elements.len() * E)?);
        for e in elements {
            self.write_fixed(*e);
        }
        Ok(())
    }

    /// Run `body` against this writer, then back-patch an `L`-byte prefix with
    /// the number of bytes `body` produced.
    ///
    /// # Errors
    /// Propagates errors from `body`; returns `CodecError::OutOfRange` if the
    /// produced length does not fit in `L` bytes.
    pub fn write_length_prefixed<const L: usize>(
        &mut self,
        body: impl FnOnce(&mut Writer) -> Result<(), CodecError>,
    ) -> Result<(), CodecError> {
        let at = self.buf.len();
        self.buf.extend_from_slice(&[0u8; L]);
        body(self)?;
        let len = Uint::<L>::from_len(self.buf.len() - at - L)?;
        self.buf[at..at + L].copy_from_slice(&len.to_bytes());
        Ok(())
    }
}

/// Binary encoding for a TLS wire structure.
pub trait Codec: Sized {
    /// Byte width of every value of this type, when it is constant.
    const FIXED_WIDTH: Option<usize> = None;

    /// Append the wire form of `self` to `w`.
    ///
    /// # Errors
    /// Returns `CodecError::OutOfRange` if a length does not fit its prefix.
    fn encode(&self, w: &mut Writer) -> Result<(), CodecError>;

    /// Decode one value from the front of `r`.
    ///
    /// # Errors
    /// Returns any `CodecError` describing why the bytes are not a valid `Self`.
    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError>;

    /// Serialized byte length; the sum of the field lengths.
    ///
    /// Computed from the contents without encoding, so it stays correct for
    /// values that `encode` would reject.
    fn encoded_len(&self) -> usize;
}

impl<const W: usize> Codec for Uint<W> {
    const FIXED_WIDTH: Option<usize> = Some(W);

    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.write_fixed(*self);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        r.read_fixed::<W>()
    }

    fn encoded_len(&self) -> usize {
        W
    }
}

/// Serialize any `T: Codec` into a fresh buffer.
///
/// # Errors
/// Propagates `CodecError` from [`Codec::encode`].
pub fn encode_to_vec<T: Codec>(v: &T) -> Result<Vec<u8>, CodecError> {
    let mut w = Writer::new();
    v.encode(&mut w)?;
    Ok(w.into_bytes())
}

/// Decode a `T` that must consume `bytes` entirely.
///
/// # Errors
/// Returns the decode error, or `CodecError::TrailingBytes` if input remains.
pub fn decode_exact<T: Codec>(bytes: &[u8], field: &'static str) -> Result<T, CodecError> {
    let mut r = Reader::new(bytes);
    let v = T::decode(&mut r)?;
    r.expect_empty(field)?;
    Ok(v)
}
