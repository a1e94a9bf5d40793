//! Client handshake orchestration.
//!
//! Drives ClientHello → ServerHello → [EncryptedExtensions] → Certificate over a
//! record `Transport`, keeps the transcript, runs the FFDHE exchange and the key
//! schedule, and hands the derived traffic secrets to the caller.
//!
//! Steps, in order:
//! - `send_client_hello(rng)`
//! - `receive_server_hello()`
//! - `receive_certificate()`
//!
//! or `run(rng)` for all three. Any failure is terminal.
pub mod errors;
pub mod fsm_machine;
pub mod fsm_types;

pub use errors::*;
pub use fsm_machine::*;
pub use fsm_types::*;

// Single import path for everything the state machine exposes.
pub mod fsm {
    pub use super::errors::*;
    pub use super::fsm_machine::*;
    pub use super::fsm_types::*;
}
