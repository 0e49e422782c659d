//! Adapters connecting the secretary to the callback gateway.

pub mod debug;
pub mod secretary;

pub use debug::debug_routes;
pub use secretary::SecretaryHandler;
