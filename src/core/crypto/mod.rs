pub mod ffdhe;
pub mod hash;
pub mod hkdf;
pub mod secret;

pub use ffdhe::{FfdheGroup, FfdheKeyPair};
pub use hash::HashAlgorithm;
pub use hkdf::{
    HkdfError, derive_secret, derive_secret_from_hash, finished_verify_data, hkdf_expand, hkdf_expand_label,
    hkdf_extract,
};
pub use secret::Secret;
