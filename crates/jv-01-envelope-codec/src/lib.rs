//! # Envelope Codec (JV-01)
//!
//! Converts between plaintext messages and what travels on the wire.
//!
//! ## Layers
//!
//! ```text
//!  message + identity
//!        │  payload::encrypt_message
//!        ▼
//!  [16 random][u32 BE len][message][identity] ── pad(32) ── AES-256-CBC ── base64
//!        │
//!        ▼  envelope::ReplyEnvelope::seal
//!  <xml><Encrypt/><MsgSignature/><TimeStamp/><Nonce/></xml>
//! ```
//!
//! Decoding runs the same steps in reverse. `document` is the generic
//! flat tag/value XML reader/writer shared by the transport envelope and the
//! inner message documents.

pub mod document;
pub mod envelope;
pub mod errors;
pub mod payload;

pub use document::{Field, TagDocument, ROOT_TAG};
pub use envelope::{InboundEnvelope, ReplyEnvelope};
pub use errors::EnvelopeError;
pub use payload::{decrypt_message, encrypt_message, PlainPayload};
