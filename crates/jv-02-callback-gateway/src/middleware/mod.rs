//! Middleware stack for the callback gateway.
//!
//! Layer order: Request → Tracing → Timeout → BodyLimit → Handler

pub mod metrics;
pub mod tracing;

pub use self::metrics::CallbackMetrics;
pub use self::tracing::TracingLayer;
