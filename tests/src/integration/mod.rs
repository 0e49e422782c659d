//! Cross-crate integration tests.

pub mod flows;
