// Allow missing docs for internal items in development
#![allow(missing_docs)]

//! JV-02 Callback Gateway - authenticated, encrypted webhook endpoint.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                    CALLBACK GATEWAY (jv-02)                       │
//! ├───────────────────────────────────────────────────────────────────┤
//! │   GET  {path}  (ownership handshake)   POST {path}  (messages)    │
//! │         │                                     │                   │
//! │  ┌──────┴─────────────────────────────────────┴──────┐            │
//! │  │      Middleware: Tracing → Timeout → BodyLimit     │            │
//! │  └──────────────────────┬─────────────────────────────┘            │
//! │                         │                                         │
//! │  ┌──────────────────────┴─────────────────────────────┐            │
//! │  │ CallbackService                                     │            │
//! │  │  params → signature → decrypt → identity → handler  │            │
//! │  │          → reply XML → encrypt → sign → envelope    │            │
//! │  └──────────────────────┬─────────────────────────────┘            │
//! └─────────────────────────┼─────────────────────────────────────────┘
//!                           │ InboundMessage / String
//!                           ▼
//!                  MessageHandler (collaborator)
//! ```
//!
//! # Status Mapping
//!
//! | Outcome | Status |
//! |---------|--------|
//! | missing parameter, empty body, malformed XML | 400 |
//! | signature or identity mismatch | 403 |
//! | key, cipher or payload failure | 500 |
//!
//! # Usage
//!
//! ```ignore
//! use jv_02_callback_gateway::{CallbackServer, CallbackService, GatewayConfig};
//!
//! let service = CallbackService::new(secrets, handler)?;
//! let mut server = CallbackServer::new(GatewayConfig::default(), Arc::new(service))?;
//! let handle = server.shutdown_handle();
//! server.run().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod ports;
pub mod server;
pub mod service;

pub use domain::{
    CallbackError, CallbackQuery, CallbackSecrets, ConfigError, FlowStage, GatewayConfig,
    GatewayError, InboundMessage,
};
pub use middleware::{CallbackMetrics, TracingLayer};
pub use ports::{CallbackApi, FixedTimeSource, MessageHandler, SystemTimeSource, TimeSource};
pub use server::{CallbackServer, ShutdownHandle};
pub use service::CallbackService;
