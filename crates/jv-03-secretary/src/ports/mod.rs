//! Ports for the secretary.

pub mod outbound;

pub use outbound::{ItemRepository, Summarizer, SummaryContext};
