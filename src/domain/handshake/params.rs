/// ---- Wire-bound size constants ----
/// Fixed sizes and bounds from the TLS 1.3 presentation grammar. Types with a
/// fixed length enforce it through their codec; bounds are checked in
/// `validate()`.
use crate::domain::ProtocolVersion;

pub(crate) const RANDOM_LEN: usize = 32;
pub(crate) const SESSION_ID_MAX: usize = 32; // legacy_session_id<0..32>
pub(crate) const LEGACY_VERSION: ProtocolVersion = ProtocolVersion::TLS12; // frozen at 0x0303
