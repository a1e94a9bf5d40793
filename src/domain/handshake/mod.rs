/*
TLS 1.3 handshake message bodies and extensions.

This module is the single source of truth for the wire schema of the bodies
carried inside a `Handshake` frame:
`ClientHello -> ServerHello -> EncryptedExtensions -> Certificate -> Finished`.

Goals:
* Enforce wire-format length invariants through the codec (length prefixes are always recomputed on encode).
* Provide explicit, typed validation errors via [`HandshakeError`] for semantic checks the grammar does not encode.
* Keep extension decoding polymorphic on (extension type, containing message) with an explicit unknown case.

Notes:
* Only public material appears here (random values, public key shares, certificate blobs); no zeroization is required.
* Certificate contents are framed, never parsed.
*/

pub mod certificate;
pub mod errors;
pub mod extension;
pub mod hello;
pub mod key_share;
mod params;

pub use certificate::*;
pub use errors::HandshakeError;
pub use extension::{Extension, ExtensionPayload};
pub use hello::*;
pub use key_share::KeyShareEntry;
