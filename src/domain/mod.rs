pub mod enums;
pub mod handshake;

pub use enums::*;
