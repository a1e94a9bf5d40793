//! Crate root for `tls13`.
//!
//! A partial TLS 1.3 (draft-26 / RFC 8446) client: wire codec, FFDHE key
//! exchange, key schedule and a handshake state machine that runs up to the
//! server Certificate and exposes the derived traffic secrets.
//!
//! High-level tree:
//! * `core::codec` – fixed-width integers, registry enumerations, reader/writer
//!   and the structured message framework.
//! * `core::crypto` – hashes, HKDF / Derive-Secret, FFDHE groups.
//! * `domain` – TLS registries and handshake message bodies.
//! * `protocol` – record and handshake framing, transcript, key schedule.
//! * `ports` / `adapters` – transport and key-exchange boundaries.
//! * `application::handshake` – the client state machine.
//! * `config` – `ClientConfig`.
pub mod adapters;
pub mod application;
pub mod config;
pub mod core;
pub mod domain;
pub mod ports;
pub mod protocol;

#[cfg(test)]
pub(crate) mod test_support;

pub use application::{ClientHandshake, ClientHandshakeError, ClientState, HandshakeSecrets};
pub use config::{ClientConfig, ConfigError};
