//! Callback service - the two request flows.
//!
//! Key material is derived once in [`CallbackService::new`] and shared
//! read-only by every request. Nothing survives a request except the
//! counters in [`CallbackMetrics`].

use crate::domain::{
    reply_document, CallbackError, CallbackQuery, CallbackSecrets, FlowStage, GatewayError,
    InboundMessage, SignedParams,
};
use crate::middleware::CallbackMetrics;
use crate::ports::{CallbackApi, MessageHandler, SystemTimeSource, TimeSource};
use async_trait::async_trait;
use jv_01_envelope_codec::{decrypt_message, InboundEnvelope, ReplyEnvelope};
use rand::rngs::OsRng;
use rand::Rng;
use shared_crypto::{decode_key, signature, verify_signature, AesKey};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Reply nonces are decimal numbers below this bound.
const REPLY_NONCE_BOUND: u64 = 10_000_000_000;

/// Characters of message content included in logs.
const LOG_PREVIEW_CHARS: usize = 60;

/// Which flow a request ran.
#[derive(Debug, Clone, Copy)]
enum Flow {
    Verify,
    Message,
}

impl Flow {
    fn as_str(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Message => "message",
        }
    }
}

/// Signature check, decryption, identity check and reply sealing.
pub struct CallbackService {
    secrets: CallbackSecrets,
    key: Arc<AesKey>,
    handler: Arc<dyn MessageHandler>,
    time_source: Arc<dyn TimeSource>,
    metrics: Arc<CallbackMetrics>,
}

impl CallbackService {
    /// Create the service, deriving the AES key.
    ///
    /// # Errors
    /// - `GatewayError::Config` if a secret is blank
    /// - `GatewayError::Key` if `encoding_aes_key` does not decode
    pub fn new(
        secrets: CallbackSecrets,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<Self, GatewayError> {
        secrets.validate()?;
        let key = decode_key(&secrets.encoding_aes_key)?;

        Ok(Self {
            secrets,
            key: Arc::new(key),
            handler,
            time_source: Arc::new(SystemTimeSource),
            metrics: Arc::new(CallbackMetrics::new()),
        })
    }

    /// Replace the clock used for reply timestamps.
    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<CallbackMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Identity every decrypted message must carry.
    pub fn corp_id(&self) -> &str {
        &self.secrets.corp_id
    }

    fn check_signature(&self, params: &SignedParams, payload: &str) -> Result<(), CallbackError> {
        let token = &self.secrets.token;
        if verify_signature(
            &params.msg_signature,
            token,
            &params.timestamp,
            &params.nonce,
            payload,
        ) {
            FlowStage::SignatureVerified.record();
            return Ok(());
        }

        let computed = signature(token, &params.timestamp, &params.nonce, payload);
        warn!(
            computed = %computed,
            received = %params.msg_signature,
            "signature mismatch"
        );
        Err(CallbackError::SignatureMismatch)
    }

    fn verify_flow(&self, query: &CallbackQuery) -> Result<String, CallbackError> {
        let (params, echostr) = query.verification()?;
        FlowStage::ParamsChecked.record();

        self.check_signature(&params, &echostr)?;

        // The handshake payload carries no identity worth checking.
        let payload = decrypt_message(&self.key, &echostr)?;
        FlowStage::Decrypted.record();

        Ok(payload.message)
    }

    async fn message_flow(
        &self,
        query: &CallbackQuery,
        body: &str,
    ) -> Result<String, CallbackError> {
        if body.trim().is_empty() {
            return Err(CallbackError::EmptyBody);
        }
        let params = query.signed()?;
        FlowStage::ParamsChecked.record();

        let envelope = InboundEnvelope::parse(body)?;
        self.check_signature(&params, &envelope.encrypt)?;

        let payload = decrypt_message(&self.key, &envelope.encrypt)?;
        FlowStage::Decrypted.record();

        if payload.sender_identity != self.secrets.corp_id {
            return Err(CallbackError::IdentityMismatch {
                expected: self.secrets.corp_id.clone(),
                received: payload.sender_identity,
            });
        }
        FlowStage::IdentityChecked.record();

        let message = InboundMessage::parse(&payload.message)?;
        info!(
            from = %message.from_user,
            msg_type = %message.msg_type,
            content = %preview(&message.content),
            "message received"
        );

        let reply_text = self.handler.handle(&message).await;
        FlowStage::Handled.record();

        let now = self.time_source.now();
        let reply_xml = reply_document(&message, &reply_text, now)
            .to_xml()
            .map_err(|e| CallbackError::Internal(e.to_string()))?;

        let reply = ReplyEnvelope::seal(
            &self.key,
            &self.secrets.token,
            &self.secrets.corp_id,
            &reply_xml,
            &now.to_string(),
            &reply_nonce(),
        )?;
        FlowStage::EncryptedReply.record();

        reply
            .to_xml()
            .map_err(|e| CallbackError::Internal(e.to_string()))
    }

    /// Record the outcome on the span, the counters and the log.
    fn finish<T>(&self, flow: Flow, result: Result<T, CallbackError>) -> Result<T, CallbackError> {
        match &result {
            Ok(_) => {
                FlowStage::Done.record();
                match flow {
                    Flow::Verify => {
                        self.metrics.record_verification();
                        info!(flow = flow.as_str(), "URL verification OK");
                    }
                    Flow::Message => {
                        self.metrics.record_message();
                        info!(flow = flow.as_str(), "encrypted reply sent");
                    }
                }
            }
            Err(e) => {
                let rejection = e.is_rejection();
                self.metrics.record_error(rejection);
                if rejection {
                    FlowStage::Rejected.record();
                    // signature mismatches were already logged with both values
                    if *e != CallbackError::SignatureMismatch {
                        warn!(flow = flow.as_str(), error = %e, "callback rejected");
                    }
                } else {
                    FlowStage::Failed.record();
                    error!(flow = flow.as_str(), error = %e, "callback failed");
                }
            }
        }
        result
    }
}

#[async_trait]
impl CallbackApi for CallbackService {
    async fn verify_url(&self, query: &CallbackQuery) -> Result<String, CallbackError> {
        FlowStage::Start.record();
        let result = self.verify_flow(query);
        self.finish(Flow::Verify, result)
    }

    async fn handle_message(
        &self,
        query: &CallbackQuery,
        body: &str,
    ) -> Result<String, CallbackError> {
        FlowStage::Start.record();
        let result = self.message_flow(query, body).await;
        self.finish(Flow::Message, result)
    }
}

/// Fresh decimal nonce for a reply signature.
fn reply_nonce() -> String {
    OsRng.gen_range(0..REPLY_NONCE_BOUND).to_string()
}

fn preview(content: &str) -> String {
    content.chars().take(LOG_PREVIEW_CHARS).collect()
}
