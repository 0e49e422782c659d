//! # Inbound Ports (Driving Ports / API)
//!
//! The two callback flows as seen by the HTTP adapter.

use crate::domain::{CallbackError, CallbackQuery};
use async_trait::async_trait;

/// Callback flows.
///
/// Implementations must be thread-safe (`Send + Sync`); one instance serves
/// every request.
#[async_trait]
pub trait CallbackApi: Send + Sync {
    // =========================================================================
    // Ownership Verification (GET)
    // =========================================================================

    /// Verify the handshake signature and return the decrypted `echostr`.
    ///
    /// # Errors
    /// - `MissingParameter` if any of the four parameters is absent or empty
    /// - `SignatureMismatch` before any decryption is attempted
    /// - `KeyFormat` / `Cipher` / `Decryption` if `echostr` does not decrypt
    async fn verify_url(&self, query: &CallbackQuery) -> Result<String, CallbackError>;

    // =========================================================================
    // Message Delivery (POST)
    // =========================================================================

    /// Authenticate, decrypt, hand the message to the collaborator and return
    /// the encrypted reply envelope as XML.
    ///
    /// # Errors
    /// - `EmptyBody`, `MissingParameter`, `MalformedEnvelope` (400)
    /// - `SignatureMismatch`, `IdentityMismatch` (403); the collaborator is
    ///   not called
    /// - `KeyFormat` / `Cipher` / `Decryption` / `Internal` (500)
    async fn handle_message(
        &self,
        query: &CallbackQuery,
        body: &str,
    ) -> Result<String, CallbackError>;
}
