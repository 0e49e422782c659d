//! Per-request flow stages.
//!
//! ```text
//! Start → ParamsChecked → SignatureVerified → Decrypted → IdentityChecked
//!       → Handled → EncryptedReply → Done
//! any stage → Rejected (4xx) | Failed (5xx)
//! ```
//!
//! The stage reached is recorded on the request span and nowhere else.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Start,
    ParamsChecked,
    SignatureVerified,
    Decrypted,
    IdentityChecked,
    Handled,
    EncryptedReply,
    Done,
    Rejected,
    Failed,
}

impl FlowStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ParamsChecked => "params_checked",
            Self::SignatureVerified => "signature_verified",
            Self::Decrypted => "decrypted",
            Self::IdentityChecked => "identity_checked",
            Self::Handled => "handled",
            Self::EncryptedReply => "encrypted_reply",
            Self::Done => "done",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Rejected | Self::Failed)
    }

    /// Record this stage on the current span's `flow.stage` field.
    pub fn record(self) {
        tracing::Span::current().record("flow.stage", self.as_str());
    }
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
