//! Callback error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jv_01_envelope_codec::EnvelopeError;
use shared_crypto::CryptoError;
use thiserror::Error;

/// Why a callback request was not answered with 200.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallbackError {
    /// A required query parameter is absent or empty
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// POST without a body
    #[error("empty request body")]
    EmptyBody,

    /// Recomputed signature differs from `msg_signature`
    #[error("signature mismatch")]
    SignatureMismatch,

    /// Decrypted payload names a different corp
    #[error("identity mismatch: expected {expected}, got {received}")]
    IdentityMismatch { expected: String, received: String },

    /// Outer envelope or inner message is not a usable document
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The configured key does not decode
    #[error("key format error: {0}")]
    KeyFormat(String),

    /// The block cipher rejected its input
    #[error("cipher error: {0}")]
    Cipher(String),

    /// Ciphertext or payload layout is invalid
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Reply assembly failed
    #[error("internal error: {0}")]
    Internal(String),
}

impl CallbackError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::EmptyBody | Self::MalformedEnvelope(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::SignatureMismatch | Self::IdentityMismatch { .. } => StatusCode::FORBIDDEN,
            Self::KeyFormat(_) | Self::Cipher(_) | Self::Decryption(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// True for 4xx outcomes.
    pub fn is_rejection(&self) -> bool {
        self.status().is_client_error()
    }

    /// Body text sent to the caller. Never carries internal detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "missing params",
            Self::EmptyBody => "empty body",
            Self::MalformedEnvelope(_) => "malformed xml",
            Self::SignatureMismatch => "signature mismatch",
            Self::IdentityMismatch { .. } => "corp id mismatch",
            Self::KeyFormat(_) | Self::Cipher(_) | Self::Decryption(_) => "decrypt error",
            Self::Internal(_) => "internal error",
        }
    }
}

impl From<CryptoError> for CallbackError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::KeyFormat(msg) => Self::KeyFormat(msg),
            CryptoError::Cipher(msg) => Self::Cipher(msg),
            CryptoError::Decryption(msg) => Self::Decryption(msg),
        }
    }
}

impl From<EnvelopeError> for CallbackError {
    fn from(err: EnvelopeError) -> Self {
        Self::MalformedEnvelope(err.to_string())
    }
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        (self.status(), self.public_message()).into_response()
    }
}

/// Gateway-level (server lifecycle) errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Key material could not be derived
    #[error("key error: {0}")]
    Key(#[from] CryptoError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl From<super::config::ConfigError> for GatewayError {
    fn from(err: super::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
