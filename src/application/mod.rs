pub mod handshake;

pub use handshake::{ClientHandshake, ClientHandshakeError, ClientState, HandshakeSecrets, Negotiated};
