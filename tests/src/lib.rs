//! # NFC Bridge Test Suite
//!
//! End-to-end tests driving a real listener with a real HTTP client, on
//! top of the unit tests living inside each crate.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     └── scan_flows.rs   # full scan lifecycles over HTTP
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # Everything
//! cargo test --workspace
//!
//! # Only the end-to-end flows
//! cargo test -p bridge-tests
//! ```

pub mod integration;
