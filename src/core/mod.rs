//! Protocol-agnostic building blocks: the binary codec and the cryptographic
//! primitives the key schedule is built from.

pub mod codec;
pub mod crypto;
