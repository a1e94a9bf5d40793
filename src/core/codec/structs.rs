//! Generic building blocks for TLS presentation-language structures.
//!
//! A structure is an ordered sequence of fields, each knowing its own byte
//! length and encoding. [`crate::tls_struct!`] declares such a structure and
//! derives its [`Codec`] by sequencing the fields; vectors are modelled by
//! [`List`] (typed elements) and [`Opaque`] (raw bytes), both of which recompute
//! their length prefix from the current contents on every encode.

use std::fmt;
use std::ops::Deref;

use super::codec::{Codec, CodecError, Reader, Writer};

/// `T items<..2^(8*L)-1>`: elements preceded by an `L`-byte total byte length.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct List<T, const L: usize>(pub Vec<T>);

impl<T, const L: usize> List<T, L> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T, const L: usize> Deref for List<T, L> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const L: usize> From<Vec<T>> for List<T, L> {
    fn from(v: Vec<T>) -> Self {
        Self(v)
    }
}

impl<T: fmt::Debug, const L: usize> fmt::Debug for List<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: Codec, const L: usize> Codec for List<T, L> {
    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.write_length_prefixed::<L>(|w| self.0.iter().try_for_each(|item| item.encode(w)))
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let mut sub = r.sub_reader::<L>("list")?;
        if let Some(width) = T::FIXED_WIDTH
            && sub.remaining() % width != 0
        {
            return Err(CodecError::LengthMismatch {
                field: "list",
                expected: sub.remaining() - sub.remaining() % width,
                actual: sub.remaining(),
            });
        }
        let mut items = Vec::new();
        while !sub.is_empty() {
            items.push(T::decode(&mut sub)?);
        }
        Ok(Self(items))
    }

    fn encoded_len(&self) -> usize {
        L + self.0.iter().map(Codec::encoded_len).sum::<usize>()
    }
}

/// `opaque data<..2^(8*L)-1>`: raw bytes preceded by an `L`-byte length.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Opaque<const L: usize>(pub Vec<u8>);

impl<const L: usize> Opaque<L> {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl<const L: usize> From<Vec<u8>> for Opaque<L> {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl<const L: usize> AsRef<[u8]> for Opaque<L> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const L: usize> fmt::Debug for Opaque<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque<{}>[{} bytes: ", L, self.0.len())?;
        for b in self.0.iter().take(8) {
            write!(f, "{b:02x}")?;
        }
        if self.0.len() > 8 {
            write!(f, "…")?;
        }
        write!(f, "]")
    }
}

impl<const L: usize> Codec for Opaque<L> {
    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.write_opaque::<L>(&self.0)
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self(r.read_opaque::<L>("opaque")?.to_vec()))
    }

    fn encoded_len(&self) -> usize {
        L + self.0.len()
    }
}

/// Declare a structure whose wire form is its fields in declaration order.
///
/// Every field type must implement [`Codec`]; the generated `encoded_len` is the
/// sum of the field lengths.
#[macro_export]
macro_rules! tls_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty ),*
        }

        impl $crate::core::codec::Codec for $name {
            fn encode(
                &self,
                w: &mut $crate::core::codec::Writer,
            ) -> ::std::result::Result<(), $crate::core::codec::CodecError> {
                $( $crate::core::codec::Codec::encode(&self.$field, w)?; )*
                Ok(())
            }

            fn decode(
                r: &mut $crate::core::codec::Reader<'_>,
            ) -> ::std::result::Result<Self, $crate::core::codec::CodecError> {
                $( let $field = <$ty as $crate::core::codec::Codec>::decode(r)?; )*
                Ok(Self { $( $field ),* })
            }

            fn encoded_len(&self) -> usize {
                0 $( + $crate::core::codec::Codec::encoded_len(&self.$field) )*
            }
        }
    };
}
