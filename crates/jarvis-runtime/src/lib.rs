//! # Jarvis Runtime Library
//!
//! Wiring for the `jarvis` binary, exposed for tests.
//!
//! ```text
//! JarvisConfig::from_env ──▶ init_logging
//!          │
//!          ▼
//!   Secretary (in-memory repository, rule-based summarizer)
//!          │ SecretaryHandler
//!          ▼
//!   CallbackService ──▶ CallbackServer (+ /debug/items)
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::{debug_routes, SecretaryHandler};
pub use config::{mask_corp_id, EnvError, JarvisConfig, LoggingConfig};
pub use telemetry::{init_logging, TelemetryError};

use jv_02_callback_gateway::{CallbackServer, CallbackService, GatewayError};
use jv_03_secretary::{FallbackSummarizer, InMemoryItemRepository, Secretary};
use std::sync::Arc;
use tracing::info;

/// Assembled application: the secretary and the server fronting it.
pub struct JarvisRuntime {
    secretary: Arc<Secretary>,
    server: CallbackServer,
}

impl JarvisRuntime {
    /// Build every component. Fails when the key does not decode or the
    /// gateway configuration is invalid.
    pub fn new(config: JarvisConfig) -> Result<Self, GatewayError> {
        // no remote providers configured; the chain ends at the template
        let summarizer = FallbackSummarizer::default();
        info!(providers = ?summarizer.provider_names(), "Summarizer chain ready");

        let secretary = Arc::new(Secretary::new(
            Arc::new(InMemoryItemRepository::new()),
            Arc::new(summarizer),
        ));

        let handler = Arc::new(SecretaryHandler::new(Arc::clone(&secretary)));
        let service = CallbackService::new(config.secrets, handler)?;
        let server = CallbackServer::new(config.gateway, Arc::new(service))?
            .merge(debug_routes(Arc::clone(&secretary)));

        Ok(Self { secretary, server })
    }

    pub fn secretary(&self) -> &Arc<Secretary> {
        &self.secretary
    }

    pub fn server(&self) -> &CallbackServer {
        &self.server
    }

    /// Hand over the server, e.g. to take a shutdown handle and run it.
    pub fn into_server(self) -> CallbackServer {
        self.server
    }
}
