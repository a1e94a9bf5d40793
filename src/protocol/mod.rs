//! Wire protocol: record and handshake framing, transcript, key schedule.

pub mod handshake;
pub mod record;

pub use record::{RecordHeader, TlsPlaintext};
