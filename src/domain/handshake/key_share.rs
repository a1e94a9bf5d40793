use crate::core::codec::Opaque;
use crate::domain::NamedGroup;

crate::tls_struct! {
    /// `KeyShareEntry { NamedGroup group; opaque key_exchange<1..2^16-1>; }`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct KeyShareEntry {
        pub group: NamedGroup,
        pub key_exchange: Opaque<2>,
    }
}

impl KeyShareEntry {
    #[must_use]
    pub fn new(group: NamedGroup, key_exchange: Vec<u8>) -> Self {
        Self { group, key_exchange: Opaque::new(key_exchange) }
    }

    #[must_use]
    pub fn key_exchange(&self) -> &[u8] {
        self.key_exchange.as_bytes()
    }
}
