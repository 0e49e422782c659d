//! # Jarvis Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # End-to-end callback flows over the real router
//! └── benches/           # Criterion benchmarks for the crypto path
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p jv-tests
//!
//! # Benchmarks
//! cargo bench -p jv-tests
//! ```

pub mod integration;
