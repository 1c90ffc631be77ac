//! NFC Bridge Server - local HTTP access to NFC reader hardware.
//!
//! Browser clients of the ticketing admin cannot talk to USB readers
//! directly, so this crate runs a small localhost server that owns the
//! reader and exposes a polling API for card scans.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     NFC BRIDGE (port 8765)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │   GET /status    GET /scan    POST /scan    GET /poll       │
//! │        │             │            │             │           │
//! │  ┌─────┴─────────────┴────────────┴─────────────┴───────┐   │
//! │  │                 Scan Coordinator                     │   │
//! │  │   single-flight guard + last-result mailbox          │   │
//! │  └──────────────────────────┬───────────────────────────┘   │
//! │                             │ one blocking worker           │
//! │  ┌──────────────────────────┴───────────────────────────┐   │
//! │  │            NfcReader port (nfc-reader crate)         │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Scan hand-off
//!
//! At most one scan is in flight at any time; concurrent start requests
//! are rejected, not queued. The completed result lands in a single-item
//! mailbox and is consumed destructively by the first poller. A poller
//! that times out does not cancel the hardware scan; the late result
//! simply waits in the mailbox for the next poll.
//!
//! # Usage
//!
//! ```ignore
//! use nfc_bridge::{BridgeConfig, BridgeService};
//!
//! let config = BridgeConfig::from_env()?;
//! let service = BridgeService::new(config, nfc_reader::detect())?;
//! service.run().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod coordinator;
pub mod domain;
pub mod middleware;
pub mod router;
pub mod service;

// Re-exports for public API
pub use coordinator::{ReaderStatus, ScanCoordinator};
pub use domain::config::BridgeConfig;
pub use domain::error::{BridgeError, ServiceError};
pub use domain::types::ScanOutcome;
pub use router::build_router;
pub use service::BridgeService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
