//! # Transport Envelopes
//!
//! The outer documents exchanged with the platform. Inbound message
//! callbacks carry only the ciphertext (the signature, timestamp and nonce
//! arrive as query parameters); replies carry all four fields in the body.

use crate::document::TagDocument;
use crate::payload::{decrypt_message, encrypt_message, PlainPayload};
use crate::EnvelopeError;
use shared_crypto::{signature, verify_signature, AesKey, CryptoError};

/// Tag names used by the platform.
pub mod tags {
    /// Base64 ciphertext.
    pub const ENCRYPT: &str = "Encrypt";
    /// Hex SHA-1 signature.
    pub const MSG_SIGNATURE: &str = "MsgSignature";
    /// Unix timestamp in seconds.
    pub const TIMESTAMP: &str = "TimeStamp";
    /// Signing nonce.
    pub const NONCE: &str = "Nonce";
    /// Receiving account.
    pub const TO_USER_NAME: &str = "ToUserName";
    /// Receiving application.
    pub const AGENT_ID: &str = "AgentID";
}

/// Body of an inbound message callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEnvelope {
    /// Receiving account, when present.
    pub to_user_name: Option<String>,
    /// Receiving application, when present.
    pub agent_id: Option<String>,
    /// Base64 ciphertext.
    pub encrypt: String,
}

impl InboundEnvelope {
    /// Parse an inbound envelope.
    ///
    /// # Errors
    ///
    /// Returns `EnvelopeError::MissingField("Encrypt")` if the ciphertext is
    /// absent or blank, or any error from [`TagDocument::parse`].
    pub fn parse(xml: &str) -> Result<Self, EnvelopeError> {
        let doc = TagDocument::parse(xml)?;
        let encrypt = doc
            .get_non_empty(tags::ENCRYPT)
            .ok_or(EnvelopeError::MissingField(tags::ENCRYPT))?
            .trim()
            .to_owned();

        Ok(Self {
            to_user_name: doc.get_non_empty(tags::TO_USER_NAME).map(str::to_owned),
            agent_id: doc.get_non_empty(tags::AGENT_ID).map(str::to_owned),
            encrypt,
        })
    }

    /// Serialize as the platform would send it.
    pub fn to_xml(&self) -> Result<String, EnvelopeError> {
        let mut doc = TagDocument::new();
        if let Some(to_user) = &self.to_user_name {
            doc.push(tags::TO_USER_NAME, to_user.as_str(), true);
        }
        if let Some(agent_id) = &self.agent_id {
            doc.push(tags::AGENT_ID, agent_id.as_str(), true);
        }
        doc.push(tags::ENCRYPT, self.encrypt.as_str(), true);
        doc.to_xml()
    }
}

/// Encrypted, signed reply body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyEnvelope {
    /// Base64 ciphertext.
    pub encrypt: String,
    /// Signature over token, timestamp, nonce and `encrypt`.
    pub msg_signature: String,
    /// Signing timestamp.
    pub timestamp: String,
    /// Signing nonce.
    pub nonce: String,
}

impl ReplyEnvelope {
    /// Encrypt `plaintext` for `identity` and sign the result.
    ///
    /// # Errors
    ///
    /// Propagates `CryptoError` from encryption.
    pub fn seal(
        key: &AesKey,
        token: &str,
        identity: &str,
        plaintext: &str,
        timestamp: &str,
        nonce: &str,
    ) -> Result<Self, CryptoError> {
        let encrypt = encrypt_message(key, plaintext, identity)?;
        let msg_signature = signature(token, timestamp, nonce, &encrypt);

        Ok(Self {
            encrypt,
            msg_signature,
            timestamp: timestamp.to_owned(),
            nonce: nonce.to_owned(),
        })
    }

    /// Check the embedded signature.
    pub fn verify(&self, token: &str) -> bool {
        verify_signature(
            &self.msg_signature,
            token,
            &self.timestamp,
            &self.nonce,
            &self.encrypt,
        )
    }

    /// Decrypt the embedded ciphertext.
    pub fn open(&self, key: &AesKey) -> Result<PlainPayload, CryptoError> {
        decrypt_message(key, &self.encrypt)
    }

    /// Parse a reply envelope.
    ///
    /// # Errors
    ///
    /// Returns `EnvelopeError::MissingField` naming the first absent field.
    pub fn parse(xml: &str) -> Result<Self, EnvelopeError> {
        let doc = TagDocument::parse(xml)?;
        let field = |name: &'static str| {
            doc.get_non_empty(name)
                .map(|v| v.trim().to_owned())
                .ok_or(EnvelopeError::MissingField(name))
        };

        Ok(Self {
            encrypt: field(tags::ENCRYPT)?,
            msg_signature: field(tags::MSG_SIGNATURE)?,
            timestamp: field(tags::TIMESTAMP)?,
            nonce: field(tags::NONCE)?,
        })
    }

    /// Serialize as a response body.
    pub fn to_xml(&self) -> Result<String, EnvelopeError> {
        TagDocument::new()
            .with_cdata(tags::ENCRYPT, self.encrypt.as_str())
            .with_cdata(tags::MSG_SIGNATURE, self.msg_signature.as_str())
            .with_text(tags::TIMESTAMP, self.timestamp.as_str())
            .with_cdata(tags::NONCE, self.nonce.as_str())
            .to_xml()
    }
}
