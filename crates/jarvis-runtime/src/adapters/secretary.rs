//! Secretary adapter for the gateway's `MessageHandler` port.

use async_trait::async_trait;
use jv_02_callback_gateway::{InboundMessage, MessageHandler};
use jv_03_secretary::Secretary;
use std::sync::Arc;
use tracing::debug;

/// Hands decrypted messages to the secretary and returns its reply text.
pub struct SecretaryHandler {
    secretary: Arc<Secretary>,
}

impl SecretaryHandler {
    pub fn new(secretary: Arc<Secretary>) -> Self {
        Self { secretary }
    }
}

#[async_trait]
impl MessageHandler for SecretaryHandler {
    async fn handle(&self, message: &InboundMessage) -> String {
        debug!(
            from = %message.from_user,
            msg_type = %message.msg_type,
            "Forwarding message to secretary"
        );
        self.secretary
            .respond(&message.msg_type, &message.content)
            .await
    }
}
