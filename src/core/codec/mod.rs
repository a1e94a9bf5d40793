//! Binary codec for the TLS presentation language.
//!
//! Layers, leaves first:
//! * [`uint`]: big-endian fixed-width unsigned integers.
//! * [`enums`]: registry-backed enumerations over those integers.
//! * [`codec`]: reader/writer cursors and the [`Codec`] trait.
//! * [`structs`]: length-prefixed vectors and the structure declaration macro.

#[allow(clippy::module_inception)]
pub mod codec;
pub mod enums;
pub mod structs;
pub mod uint;

pub use codec::{Codec, CodecError, Reader, Writer, decode_exact, encode_to_vec};
pub use enums::{Enumeration, deserialize_enum, fmt_enum, serialize_enum};
pub use structs::{List, Opaque};
pub use uint::{Uint, Uint8, Uint16, Uint24, Uint32};
