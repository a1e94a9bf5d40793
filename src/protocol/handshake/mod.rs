pub mod frame;
pub mod keyschedule;
pub mod transcript;

pub use frame::{Handshake, HandshakeBody};
pub use keyschedule::{KeySchedule, TrafficKeys, TrafficSecrets, derive_traffic_keys};
pub use transcript::Transcript;
