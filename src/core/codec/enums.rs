//! Enumerations over fixed-width integers with an immutable name registry.
//!
//! [`crate::tls_enum!`] declares a newtype over `Uint<W>` together with its
//! constants, a static `(value, name)` table and the reserved ranges, all in one
//! place. Nothing is registered at runtime, so independent users (and tests)
//! never share mutable state.
//!
//! The newtype can hold any value of its width: decoding never fails just
//! because a code point is unknown. Callers decide whether an unrecognized
//! value is fatal by asking [`Enumeration::is_member`] or [`Enumeration::name`].

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Visitor};

use super::codec::CodecError;

/// Behaviour shared by every registry-backed enumeration.
pub trait Enumeration: Copy + Eq + Sized + 'static {
    /// Type name used in diagnostics.
    const NAME: &'static str;
    /// Byte width on the wire.
    const WIDTH: usize;
    /// Declared non-reserved constants.
    const TABLE: &'static [(u32, &'static str)];
    /// Inclusive reserved ranges excluded from membership.
    const RESERVED: &'static [(u32, u32)];

    /// Raw numeric value.
    fn raw(self) -> u32;

    /// Construct from a raw value (any value of the declared width).
    ///
    /// # Errors
    /// Returns `CodecError::OutOfRange` if `value` exceeds the width.
    fn from_raw(value: u32) -> Result<Self, CodecError>;

    /// Whether `value` falls inside a reserved range.
    fn is_reserved(value: u32) -> bool {
        Self::RESERVED.iter().any(|(lo, hi)| (*lo..=*hi).contains(&value))
    }

    /// Membership test against the declared, non-reserved constants.
    fn is_member(self) -> bool {
        let v = self.raw();
        !Self::is_reserved(v) && Self::TABLE.iter().any(|(x, _)| *x == v)
    }

    /// Reverse lookup: registered name for this value.
    ///
    /// # Errors
    /// Returns `CodecError::UnknownConstant` if the value is reserved or undeclared.
    fn name(self) -> Result<&'static str, CodecError> {
        let v = self.raw();
        if Self::is_reserved(v) {
            return Err(CodecError::UnknownConstant { enumeration: Self::NAME, value: v });
        }
        Self::TABLE
            .iter()
            .find(|(x, _)| *x == v)
            .map(|(_, n)| *n)
            .ok_or(CodecError::UnknownConstant { enumeration: Self::NAME, value: v })
    }

    /// Forward lookup by registered name.
    fn from_name(name: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, n)| *n == name)
            .and_then(|(v, _)| Self::from_raw(*v).ok())
    }

    /// Like [`Enumeration::is_member`] but as a `Result`, for mandatory fields.
    ///
    /// # Errors
    /// Returns `CodecError::UnknownConstant` if the value is not a member.
    fn require_member(self) -> Result<Self, CodecError> {
        self.name().map(|_| self)
    }
}

/// `Debug`/`Display` body shared by generated enumerations: the registered
/// name when known, otherwise `Type(0x..)`.
pub fn fmt_enum<E: Enumeration>(e: E, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match e.name() {
        Ok(n) => f.write_str(n),
        Err(_) => write!(f, "{}(0x{:0width$x})", E::NAME, e.raw(), width = E::WIDTH * 2),
    }
}

/// Serde helper: serialize by registered name, falling back to the number.
///
/// # Errors
/// Propagates the serializer's error.
pub fn serialize_enum<E: Enumeration, S: serde::Serializer>(e: E, s: S) -> Result<S::Ok, S::Error> {
    match e.name() {
        Ok(n) => s.serialize_str(n),
        Err(_) => s.serialize_u32(e.raw()),
    }
}

/// Serde helper: accept a registered name or a numeric code.
///
/// # Errors
/// Returns a deserializer error for unknown names or out-of-range numbers.
pub fn deserialize_enum<'de, E: Enumeration, D: serde::Deserializer<'de>>(d: D) -> Result<E, D::Error> {
    struct EnumVisitor<E>(PhantomData<E>);

    impl<E: Enumeration> Visitor<'_> for EnumVisitor<E> {
        type Value = E;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a {} name or numeric code", E::NAME)
        }

        fn visit_str<Er: de::Error>(self, v: &str) -> Result<E, Er> {
            E::from_name(v).ok_or_else(|| Er::custom(format!("unknown {} `{v}`", E::NAME)))
        }

        fn visit_u64<Er: de::Error>(self, v: u64) -> Result<E, Er> {
            let raw = u32::try_from(v).map_err(|_| Er::custom("code out of range"))?;
            E::from_raw(raw).map_err(Er::custom)
        }

        fn visit_i64<Er: de::Error>(self, v: i64) -> Result<E, Er> {
            let raw = u64::try_from(v).map_err(|_| Er::custom("negative code"))?;
            self.visit_u64(raw)
        }
    }

    d.deserialize_any(EnumVisitor::<E>(PhantomData))
}

/// Declare a TLS enumeration backed by `Uint<$width>`.
///
/// ```ignore
/// tls_enum! {
///     /// doc
///     pub struct ContentType: 1 {
///         HANDSHAKE = 22 => "handshake",
///     }
///     reserved { }
/// }
/// ```
#[macro_export]
macro_rules! tls_enum {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $width:literal {
            $( $(#[$cmeta:meta])* $konst:ident = $value:literal => $label:literal ),* $(,)?
        }
        reserved { $( $lo:literal ..= $hi:literal ),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name($crate::core::codec::Uint<$width>);

        #[allow(dead_code)]
        impl $name {
            $(
                $(#[$cmeta])*
                pub const $konst: Self = Self($crate::core::codec::Uint::<$width>::from_const($value));
            )*

            #[must_use]
            pub const fn from_uint(v: $crate::core::codec::Uint<$width>) -> Self {
                Self(v)
            }

            #[must_use]
            pub const fn to_uint(self) -> $crate::core::codec::Uint<$width> {
                self.0
            }
        }

        impl $crate::core::codec::Enumeration for $name {
            const NAME: &'static str = stringify!($name);
            const WIDTH: usize = $width;
            const TABLE: &'static [(u32, &'static str)] = &[ $( ($value, $label) ),* ];
            const RESERVED: &'static [(u32, u32)] = &[ $( ($lo, $hi) ),* ];

            fn raw(self) -> u32 {
                self.0.value()
            }

            fn from_raw(value: u32) -> ::std::result::Result<Self, $crate::core::codec::CodecError> {
                Ok(Self($crate::core::codec::Uint::<$width>::new(value)?))
            }
        }

        impl $crate::core::codec::Codec for $name {
            const FIXED_WIDTH: Option<usize> = Some($width);

            fn encode(
                &self,
                w: &mut $crate::core::codec::Writer,
            ) -> ::std::result::Result<(), $crate::core::codec::CodecError> {
                w.write_fixed(self.0);
                Ok(())
            }

            fn decode(
                r: &mut $crate::core::codec::Reader<'_>,
            ) -> ::std::result::Result<Self, $crate::core::codec::CodecError> {
                Ok(Self(r.read_fixed::<$width>()?))
            }

            fn encoded_len(&self) -> usize {
                $width
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::core::codec::fmt_enum(*self, f)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::core::codec::fmt_enum(*self, f)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, s: S) -> ::std::result::Result<S::Ok, S::Error> {
                $crate::core::codec::serialize_enum(*self, s)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> ::std::result::Result<Self, D::Error> {
                $crate::core::codec::deserialize_enum(d)
            }
        }
    };
}
