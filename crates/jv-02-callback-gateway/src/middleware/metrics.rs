//! Callback counters.
//!
//! Exposed as JSON at `/debug/metrics`.

use std::sync::atomic::{AtomicU64, Ordering};

/// Callback gateway metrics
#[derive(Debug, Default)]
pub struct CallbackMetrics {
    /// Successful ownership handshakes
    pub verifications_ok: AtomicU64,
    /// Messages answered with an encrypted reply
    pub messages_ok: AtomicU64,
    /// 4xx outcomes
    pub rejected: AtomicU64,
    /// 5xx outcomes
    pub failed: AtomicU64,
}

impl CallbackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful handshake
    pub fn record_verification(&self) {
        self.verifications_ok.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an answered message
    pub fn record_message(&self) {
        self.messages_ok.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed request; `rejection` is true for 4xx
    pub fn record_error(&self, rejection: bool) {
        if rejection {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Total requests seen by the callback route
    pub fn total(&self) -> u64 {
        self.verifications_ok.load(Ordering::Relaxed)
            + self.messages_ok.load(Ordering::Relaxed)
            + self.rejected.load(Ordering::Relaxed)
            + self.failed.load(Ordering::Relaxed)
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.total(),
                "verifications_ok": self.verifications_ok.load(Ordering::Relaxed),
                "messages_ok": self.messages_ok.load(Ordering::Relaxed),
                "rejected": self.rejected.load(Ordering::Relaxed),
                "failed": self.failed.load(Ordering::Relaxed),
            }
        })
    }
}
