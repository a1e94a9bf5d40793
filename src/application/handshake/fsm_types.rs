use crate::core::crypto::HashAlgorithm;
use crate::domain::{CipherSuite, NamedGroup, ProtocolVersion};
use crate::protocol::handshake::{KeySchedule, TrafficSecrets};

/// Coarse states of the client handshake (`ClientHandshake`).
///
/// Transitions are monotonic; regression is prevented with a debug assertion.
/// `Failed` is terminal and reachable from every other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Nothing sent yet.
    Start,
    /// ClientHello written to the transport and absorbed into the transcript.
    SentClientHello,
    /// ServerHello accepted; shared secret and traffic secrets derived.
    ReceivedServerHello,
    /// Optional EncryptedExtensions absorbed ahead of the Certificate.
    ReceivedEncryptedExtensions,
    /// Certificate absorbed. Nothing past this point is implemented.
    ReceivedCertificate,
    /// A step failed; the handshake cannot continue.
    Failed,
}

/// Internal events that drive transitions inside `ClientHandshake`.
///
/// These are not on-wire values; they are raised by the public step methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEvent {
    SendClientHello,
    RecvServerHello,
    RecvEncryptedExtensions,
    RecvCertificate,
    Fail,
}

/// Parameters the server selected from the client's offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Negotiated {
    pub version: ProtocolVersion,
    pub cipher_suite: CipherSuite,
    pub group: NamedGroup,
    pub hash: HashAlgorithm,
}

/// Secrets derived once the ServerHello has been processed.
///
/// Both traffic-secret pairs are taken over `Hash(ClientHello || ServerHello)`.
/// The key schedule is handed over so a caller can re-derive application
/// secrets over a longer transcript once it completes the handshake.
#[derive(Debug)]
pub struct HandshakeSecrets {
    pub negotiated: Negotiated,
    pub transcript_hash: Vec<u8>,
    pub handshake: TrafficSecrets,
    pub application: TrafficSecrets,
    pub key_schedule: KeySchedule,
}
