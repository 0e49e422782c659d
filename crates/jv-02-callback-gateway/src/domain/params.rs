//! Query parameters sent with every callback.

use super::error::CallbackError;
use serde::Deserialize;

/// Raw query string. Every field is optional so that a missing value is
/// reported as `MissingParameter` instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    pub msg_signature: Option<String>,
    pub timestamp: Option<String>,
    pub nonce: Option<String>,
    pub echostr: Option<String>,
}

/// Signing parameters, all present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParams {
    pub msg_signature: String,
    pub timestamp: String,
    pub nonce: String,
}

impl CallbackQuery {
    /// Signing parameters for a message delivery.
    pub fn signed(&self) -> Result<SignedParams, CallbackError> {
        Ok(SignedParams {
            msg_signature: required(&self.msg_signature, "msg_signature")?,
            timestamp: required(&self.timestamp, "timestamp")?,
            nonce: required(&self.nonce, "nonce")?,
        })
    }

    /// Signing parameters plus `echostr` for the ownership handshake.
    pub fn verification(&self) -> Result<(SignedParams, String), CallbackError> {
        let signed = self.signed()?;
        let echostr = required(&self.echostr, "echostr")?;
        Ok((signed, echostr))
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, CallbackError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CallbackError::MissingParameter(name)),
    }
}
