//! Handshake framing: `msg_type(1) || length(3) || body`.

use crate::core::codec::{Codec, CodecError, Enumeration, Reader, Writer, decode_exact, encode_to_vec};
use crate::domain::HandshakeType;
use crate::domain::handshake::{Certificate, ClientHello, EncryptedExtensions, Finished, ServerHello};

/// Decoded handshake body, one case per implemented message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeBody {
    ClientHello(ClientHello),
    ServerHello(ServerHello),
    EncryptedExtensions(EncryptedExtensions),
    Certificate(Certificate),
    Finished(Finished),
}

impl HandshakeBody {
    #[must_use]
    pub fn msg_type(&self) -> HandshakeType {
        match self {
            Self::ClientHello(_) => HandshakeType::CLIENT_HELLO,
            Self::ServerHello(_) => HandshakeType::SERVER_HELLO,
            Self::EncryptedExtensions(_) => HandshakeType::ENCRYPTED_EXTENSIONS,
            Self::Certificate(_) => HandshakeType::CERTIFICATE,
            Self::Finished(_) => HandshakeType::FINISHED,
        }
    }

    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        match self {
            Self::ClientHello(m) => m.encode(w),
            Self::ServerHello(m) => m.encode(w),
            Self::EncryptedExtensions(m) => m.encode(w),
            Self::Certificate(m) => m.encode(w),
            Self::Finished(m) => m.encode(w),
        }
    }

    fn encoded_len(&self) -> usize {
        match self {
            Self::ClientHello(m) => m.encoded_len(),
            Self::ServerHello(m) => m.encoded_len(),
            Self::EncryptedExtensions(m) => m.encoded_len(),
            Self::Certificate(m) => m.encoded_len(),
            Self::Finished(m) => m.encoded_len(),
        }
    }

    fn decode(msg_type: HandshakeType, body: &[u8]) -> Result<Self, CodecError> {
        // Unknown or reserved message types are fatal.
        msg_type.require_member()?;
        let decoded = match msg_type {
            HandshakeType::CLIENT_HELLO => Self::ClientHello(decode_exact(body, "client_hello")?),
            HandshakeType::SERVER_HELLO => Self::ServerHello(decode_exact(body, "server_hello")?),
            HandshakeType::ENCRYPTED_EXTENSIONS => {
                Self::EncryptedExtensions(decode_exact(body, "encrypted_extensions")?)
            }
            HandshakeType::CERTIFICATE => Self::Certificate(decode_exact(body, "certificate")?),
            HandshakeType::FINISHED => Self::Finished(decode_exact(body, "finished")?),
            other => return Err(CodecError::Unsupported(format!("handshake message {other}"))),
        };
        Ok(decoded)
    }
}

/// `Handshake { HandshakeType msg_type; uint24 length; select(msg_type) {..} }`
///
/// The length field is not stored; it is recomputed from the body on encode
/// and checked against the body on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    body: HandshakeBody,
}

impl Handshake {
    #[must_use]
    pub fn new(body: HandshakeBody) -> Self {
        Self { body }
    }

    #[must_use]
    pub fn msg_type(&self) -> HandshakeType {
        self.body.msg_type()
    }

    #[must_use]
    pub fn body(&self) -> &HandshakeBody {
        &self.body
    }

    #[must_use]
    pub fn into_body(self) -> HandshakeBody {
        self.body
    }

    /// Byte length the `length` field carries.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.encoded_len()
    }

    #[must_use]
    pub fn client_hello(&self) -> Option<&ClientHello> {
        match &self.body {
            HandshakeBody::ClientHello(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn server_hello(&self) -> Option<&ServerHello> {
        match &self.body {
            HandshakeBody::ServerHello(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn certificate(&self) -> Option<&Certificate> {
        match &self.body {
            HandshakeBody::Certificate(m) => Some(m),
            _ => None,
        }
    }

    /// Serialize `msg_type || length || body`.
    ///
    /// # Errors
    /// Returns `CodecError::OutOfRange` if the body exceeds 2^24-1 bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        encode_to_vec(self)
    }

    /// Parse exactly one handshake message.
    ///
    /// # Errors
    /// - `CodecError::UnknownConstant` for a reserved/undeclared `msg_type`.
    /// - `CodecError::Unsupported` for a declared but unimplemented `msg_type`.
    /// - `CodecError::LengthMismatch` if `length` disagrees with the bytes present.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(data);
        let msg_type = HandshakeType::decode(&mut r)?;
        let length = r.read_fixed::<3>()?.value() as usize;
        if length != r.remaining() {
            return Err(CodecError::LengthMismatch {
                field: "Handshake.length",
                expected: length,
                actual: r.remaining(),
            });
        }
        Ok(Self { body: HandshakeBody::decode(msg_type, r.read_rest())? })
    }
}

impl From<HandshakeBody> for Handshake {
    fn from(body: HandshakeBody) -> Self {
        Self::new(body)
    }
}

impl Codec for Handshake {
    fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        self.msg_type().encode(w)?;
        w.write_length_prefixed::<3>(|w| self.body.encode(w))
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let msg_type = HandshakeType::decode(r)?;
        let length = r.read_fixed::<3>()?.value() as usize;
        if length > r.remaining() {
            return Err(CodecError::LengthMismatch {
                field: "Handshake.length",
                expected: length,
                actual: r.remaining(),
            });
        }
        let body = r.take(length, "handshake body")?;
        Ok(Self { body: HandshakeBody::decode(msg_type, body)? })
    }

    fn encoded_len(&self) -> usize {
        1 + 3 + self.body.encoded_len()
    }
}
