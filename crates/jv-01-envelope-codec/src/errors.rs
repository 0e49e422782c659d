//! Envelope codec errors.

use thiserror::Error;

/// Errors raised while reading or writing XML documents.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(String),

    /// The document root is absent or not `<xml>`.
    #[error("missing <xml> root element (found {0:?})")]
    MissingRoot(String),

    /// A required field is absent or empty.
    #[error("missing field <{0}>")]
    MissingField(&'static str),
}
