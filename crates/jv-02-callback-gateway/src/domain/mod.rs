//! Domain types for the callback gateway.

pub mod config;
pub mod error;
pub mod message;
pub mod params;
pub mod stage;

pub use config::{
    CallbackConfig, CallbackSecrets, ConfigError, GatewayConfig, HttpConfig, LimitsConfig,
    TimeoutConfig, DEFAULT_CALLBACK_PATH,
};
pub use error::{CallbackError, GatewayError};
pub use message::{reply_document, InboundMessage};
pub use params::{CallbackQuery, SignedParams};
pub use stage::FlowStage;
