//! Secretary domain: items, commands, kind detection and reply text.

pub mod command;
pub mod errors;
pub mod format;
pub mod item;
pub mod kind;

pub use command::Command;
pub use errors::SummarizeError;
pub use item::{Item, ItemId, ItemKind, NewItem};
pub use kind::detect_kind;
