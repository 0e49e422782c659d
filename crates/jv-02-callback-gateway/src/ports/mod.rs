//! Hexagonal ports for the callback gateway.

pub mod inbound;
pub mod outbound;

pub use inbound::CallbackApi;
pub use outbound::{FixedTimeSource, MessageHandler, SystemTimeSource, TimeSource};
