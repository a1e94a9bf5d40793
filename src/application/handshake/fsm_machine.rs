use rand_core::{CryptoRng, RngCore};

use crate::application::handshake::ClientHandshakeError;
use crate::config::ClientConfig;
use crate::core::crypto::FfdheKeyPair;
use crate::domain::handshake::{Certificate, ClientHello, Extension, KeyShareEntry, Random, ServerHello};
use crate::domain::{ExtensionType, HandshakeType};
use crate::ports::crypto::KeyExchange;
use crate::ports::transport::{Transport, TransportError};
use crate::protocol::handshake::{Handshake, HandshakeBody, KeySchedule, Transcript};
use crate::protocol::record::{HEADER_LEN, TlsPlaintext};

use super::fsm_types::{ClientEvent, ClientState, HandshakeSecrets, Negotiated};

/// Drives the client side of the handshake over a record `Transport`:
/// ClientHello → ServerHello → [EncryptedExtensions] → Certificate.
///
/// See `fsm_types::ClientState` for the milestones. `send_` methods produce and
/// write outbound messages, `receive_` methods read, check and absorb inbound
/// ones. Each message is appended to the transcript exactly as it crossed the
/// wire, without the record header.
///
/// Error strategy: the first error moves the machine to `ClientState::Failed`
/// and is returned unchanged. Every later call returns
/// `ClientHandshakeError::Aborted`; nothing is retried.
#[derive(Debug)]
pub struct ClientHandshake<T: Transport> {
    pub(crate) config: ClientConfig,
    pub(crate) transport: T,
    pub(crate) state: ClientState,
    pub(crate) transcript: Transcript,
    pub(crate) key_share: Option<FfdheKeyPair>,
    pub(crate) secrets: Option<HandshakeSecrets>,
    pub(crate) certificate: Option<Certificate>,
}

impl<T: Transport> ClientHandshake<T> {
    /// Construct a handshake in `ClientState::Start`.
    ///
    /// # Errors
    /// Returns `ClientHandshakeError::Config` if `config` does not validate.
    pub fn new(config: ClientConfig, transport: T) -> Result<Self, ClientHandshakeError> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            state: ClientState::Start,
            transcript: Transcript::new(),
            key_share: None,
            secrets: None,
            certificate: None,
        })
    }

    /// Run every implemented step and return the derived secrets.
    ///
    /// # Errors
    /// Returns the first error raised by any step.
    pub fn run<R: RngCore + CryptoRng>(mut self, rng: &mut R) -> Result<HandshakeSecrets, ClientHandshakeError> {
        self.send_client_hello(rng)?;
        self.receive_server_hello()?;
        self.receive_certificate()?;
        self.into_secrets()
    }

    fn state_ordinal(state: ClientState) -> u8 {
        match state {
            ClientState::Start => 0,
            ClientState::SentClientHello => 1,
            ClientState::ReceivedServerHello => 2,
            ClientState::ReceivedEncryptedExtensions => 3,
            ClientState::ReceivedCertificate => 4,
            ClientState::Failed => u8::MAX,
        }
    }

    fn transition(state: ClientState, ev: ClientEvent) -> Result<ClientState, ClientHandshakeError> {
        let next = match (state, ev) {
            (ClientState::Failed, _) => return Err(ClientHandshakeError::Aborted),
            (_, ClientEvent::Fail) => ClientState::Failed,
            (ClientState::Start, ClientEvent::SendClientHello) => ClientState::SentClientHello,
            (ClientState::SentClientHello, ClientEvent::RecvServerHello) => ClientState::ReceivedServerHello,
            (ClientState::ReceivedServerHello, ClientEvent::RecvEncryptedExtensions) => {
                ClientState::ReceivedEncryptedExtensions
            }
            (
                ClientState::ReceivedServerHello | ClientState::ReceivedEncryptedExtensions,
                ClientEvent::RecvCertificate,
            ) => ClientState::ReceivedCertificate,
            (state, event) => return Err(ClientHandshakeError::InvalidTransition { state, event }),
        };
        Ok(next)
    }

    fn apply(&mut self, ev: ClientEvent) -> Result<(), ClientHandshakeError> {
        let old = self.state;
        let new = Self::transition(old, ev)?;
        debug_assert!(
            Self::state_ordinal(new) >= Self::state_ordinal(old),
            "state regression: {old:?} -> {new:?}"
        );
        tracing::debug!(from = ?old, to = ?new, event = ?ev, "client handshake transition");
        self.state = new;
        Ok(())
    }

    /// Run one step; on error record the failure and move to `Failed`.
    fn step<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, ClientHandshakeError>,
    ) -> Result<R, ClientHandshakeError> {
        if self.state == ClientState::Failed {
            return Err(ClientHandshakeError::Aborted);
        }
        f(self).map_err(|e| {
            tracing::warn!(state = ?self.state, error = %e, "client handshake failed");
            let _ = self.apply(ClientEvent::Fail);
            self.key_share = None;
            e
        })
    }

    /// Read one record and decode its handshake message. Returns the message
    /// with its serialized form (record header stripped) for the transcript.
    fn receive_handshake(&mut self) -> Result<(Handshake, Vec<u8>), ClientHandshakeError> {
        let record = self.transport.receive()?;
        if record.len() > self.config.max_record_len {
            return Err(TransportError::RecordTooLarge { len: record.len(), max: self.config.max_record_len }.into());
        }
        let plaintext = TlsPlaintext::from_bytes(&record)?;
        tracing::debug!(msg_type = %plaintext.msg_type(), len = plaintext.length(), "received handshake record");
        let raw = record.get(HEADER_LEN..).unwrap_or_default().to_vec();
        Ok((plaintext.fragment, raw))
    }

    fn build_client_hello<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
    ) -> Result<ClientHello, ClientHandshakeError> {
        let group = self
            .config
            .key_share_group()
            .ok_or(crate::config::ConfigError::Empty("named_groups"))?;
        let key_share = FfdheKeyPair::generate(group, rng)?;
        let mut random = Random([0u8; 32]);
        rng.fill_bytes(&mut random.0);
        let extensions = vec![
            Extension::supported_versions_client(self.config.versions.clone()),
            Extension::supported_groups(self.config.named_groups.clone()),
            Extension::signature_algorithms(self.config.signature_schemes.clone()),
            Extension::key_share_client(vec![KeyShareEntry::new(group, key_share.public_key().to_vec())]),
        ];
        let ch = ClientHello::new(random, Vec::new(), self.config.cipher_suites.clone(), extensions)?;
        self.key_share = Some(key_share);
        Ok(ch)
    }

    /// Build the ClientHello with a fresh key share, send it and absorb it;
    /// transition `Start` → `SentClientHello`.
    ///
    /// # Errors
    /// - `ClientHandshakeError::InvalidTransition` outside `Start`.
    /// - Key generation, encoding or transport errors.
    pub fn send_client_hello<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<(), ClientHandshakeError> {
        self.step(|s| {
            Self::transition(s.state, ClientEvent::SendClientHello)?;
            let ch = s.build_client_hello(rng)?;
            let msg = Handshake::new(HandshakeBody::ClientHello(ch));
            let record = TlsPlaintext::handshake(msg).to_bytes()?;
            s.transport.send(&record)?;
            s.transcript.push_raw(record.get(HEADER_LEN..).unwrap_or_default());
            tracing::debug!(len = record.len(), "sent ClientHello");
            s.apply(ClientEvent::SendClientHello)
        })
    }

    /// Check the server's selections against what was offered.
    fn negotiate(&self, sh: &ServerHello) -> Result<Negotiated, ClientHandshakeError> {
        if sh.is_hello_retry_request() {
            return Err(crate::core::codec::CodecError::Unsupported("HelloRetryRequest".into()).into());
        }
        let version = sh
            .selected_version()
            .ok_or(ClientHandshakeError::MissingExtension(ExtensionType::SUPPORTED_VERSIONS))?;
        if !self.config.versions.contains(&version) {
            return Err(ClientHandshakeError::UnsupportedVersion(version));
        }
        let cipher_suite = sh.cipher_suite();
        let hash = cipher_suite
            .hash_algorithm()
            .filter(|_| self.config.cipher_suites.contains(&cipher_suite))
            .ok_or(ClientHandshakeError::UnsupportedCipherSuite(cipher_suite))?;
        let share = sh.key_share().ok_or(ClientHandshakeError::MissingExtension(ExtensionType::KEY_SHARE))?;
        let offered = self.key_share.as_ref().map(|k| k.group());
        if offered != Some(share.group) {
            return Err(ClientHandshakeError::UnsupportedGroup(share.group));
        }
        Ok(Negotiated { version, cipher_suite, group: share.group, hash })
    }

    /// Read and check the ServerHello, absorb it, complete the key exchange and
    /// derive handshake and application traffic secrets over
    /// `Hash(ClientHello || ServerHello)`; transition `SentClientHello` →
    /// `ReceivedServerHello`.
    ///
    /// # Errors
    /// - `UnexpectedMessage` if the record holds anything but a ServerHello.
    /// - `UnsupportedVersion`, `UnsupportedCipherSuite`, `UnsupportedGroup` or
    ///   `MissingExtension` if the server's selection cannot be completed.
    /// - `KeyExchange` if the server's public value is invalid.
    /// - Transport, codec or key schedule errors.
    pub fn receive_server_hello(&mut self) -> Result<(), ClientHandshakeError> {
        self.step(|s| {
            Self::transition(s.state, ClientEvent::RecvServerHello)?;
            let (msg, raw) = s.receive_handshake()?;
            let sh = match msg.into_body() {
                HandshakeBody::ServerHello(sh) => sh,
                other => {
                    return Err(ClientHandshakeError::UnexpectedMessage {
                        expected: HandshakeType::SERVER_HELLO,
                        got: other.msg_type(),
                    });
                }
            };
            let negotiated = s.negotiate(&sh)?;
            let key_share = s.key_share.take().ok_or(ClientHandshakeError::Aborted)?;
            let peer = sh.key_share().map(KeyShareEntry::key_exchange).unwrap_or_default();
            let shared = key_share.complete(peer)?;
            drop(key_share);

            s.transcript.push_raw(&raw);
            let transcript_hash = s.transcript.hash(negotiated.hash);
            let key_schedule = KeySchedule::new(negotiated.hash, &shared)?;
            let handshake = key_schedule.handshake_traffic_secrets(&transcript_hash)?;
            let application = key_schedule.application_traffic_secrets(&transcript_hash)?;
            tracing::info!(
                version = %negotiated.version,
                cipher_suite = %negotiated.cipher_suite,
                group = %negotiated.group,
                "negotiated handshake parameters"
            );
            s.secrets = Some(HandshakeSecrets { negotiated, transcript_hash, handshake, application, key_schedule });
            s.apply(ClientEvent::RecvServerHello)
        })
    }

    /// Read the server's Certificate and absorb it; an EncryptedExtensions
    /// message ahead of it is absorbed as well. Transition
    /// `ReceivedServerHello` → `ReceivedCertificate`.
    ///
    /// The certificate chain is framed but not validated.
    ///
    /// # Errors
    /// - `UnexpectedMessage` for any other message type.
    /// - Transport or codec errors.
    pub fn receive_certificate(&mut self) -> Result<(), ClientHandshakeError> {
        self.step(|s| {
            Self::transition(s.state, ClientEvent::RecvCertificate)?;
            loop {
                let (msg, raw) = s.receive_handshake()?;
                match msg.into_body() {
                    HandshakeBody::EncryptedExtensions(_) if s.state == ClientState::ReceivedServerHello => {
                        s.transcript.push_raw(&raw);
                        s.apply(ClientEvent::RecvEncryptedExtensions)?;
                    }
                    HandshakeBody::Certificate(cert) => {
                        s.transcript.push_raw(&raw);
                        tracing::debug!(chain_len = cert.certificate_list.len(), "received Certificate");
                        s.certificate = Some(cert);
                        return s.apply(ClientEvent::RecvCertificate);
                    }
                    other => {
                        return Err(ClientHandshakeError::UnexpectedMessage {
                            expected: HandshakeType::CERTIFICATE,
                            got: other.msg_type(),
                        });
                    }
                }
            }
        })
    }

    /// Current handshake state.
    pub fn state(&self) -> ClientState {
        self.state
    }
    /// Messages absorbed so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
    /// Secrets derived from the ServerHello, once available.
    pub fn secrets(&self) -> Option<&HandshakeSecrets> {
        self.secrets.as_ref()
    }
    /// Server certificate chain, once received.
    pub fn certificate(&self) -> Option<&Certificate> {
        self.certificate.as_ref()
    }
    /// Mutable reference to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the machine and hand over the derived secrets.
    ///
    /// # Errors
    /// - `Aborted` if the handshake failed.
    /// - `InvalidTransition` if the ServerHello has not been processed yet.
    pub fn into_secrets(self) -> Result<HandshakeSecrets, ClientHandshakeError> {
        if self.state == ClientState::Failed {
            return Err(ClientHandshakeError::Aborted);
        }
        let state = self.state;
        self.secrets.ok_or(ClientHandshakeError::InvalidTransition { state, event: ClientEvent::RecvServerHello })
    }

    /// Consume the machine returning the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
