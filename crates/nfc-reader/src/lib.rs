//! NFC reader hardware adapters for the bridge server.
//!
//! This crate isolates the rest of the bridge from whichever NFC driver is
//! actually in use. Everything upstream talks to the [`NfcReader`] port;
//! the concrete backend is selected once at process start via [`detect`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              bridge server                   │
//! │        (scan coordinator, HTTP API)          │
//! └─────────────────────┬────────────────────────┘
//!                       │ NfcReader port
//!         ┌─────────────┼─────────────────┐
//!         ▼             ▼                 ▼
//!   PcscReader    UnavailableReader   MockReader
//!   (feature       (no driver or      (test_utils,
//!    `pcsc`)        device found)      scripted)
//! ```
//!
//! # Blocking contract
//!
//! [`NfcReader::scan`] blocks its calling thread for up to the scan timeout
//! while waiting for a card. It must only run on a dedicated blocking
//! worker, never on a request-handling task.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod error;
pub mod port;
pub mod test_utils;

pub use adapters::UnavailableReader;
pub use error::{ReaderError, ScanError};
pub use port::{NfcReader, ReaderInfo};

#[cfg(feature = "pcsc")]
pub use adapters::PcscReader;

use std::sync::Arc;
use tracing::warn;

/// Select the reader backend for this process.
///
/// Tries the real hardware adapter when one is compiled in; otherwise (or
/// when the device cannot be opened) falls back to an [`UnavailableReader`]
/// carrying the reason. Never fails: a bridge without a reader still serves
/// HTTP and reports the driver as unavailable.
pub fn detect() -> Arc<dyn NfcReader> {
    #[cfg(feature = "pcsc")]
    {
        match adapters::PcscReader::open() {
            Ok(reader) => {
                match reader.probe() {
                    Ok(info) => {
                        tracing::info!(driver = %info.driver, device = %info.device, "NFC reader detected")
                    }
                    Err(e) => warn!(error = %e, "PC/SC available but no reader attached"),
                }
                Arc::new(reader)
            }
            Err(e) => {
                warn!(error = %e, "PC/SC driver unavailable");
                Arc::new(UnavailableReader::new(e.to_string()))
            }
        }
    }

    #[cfg(not(feature = "pcsc"))]
    {
        warn!("no NFC driver compiled in, scans will be rejected");
        Arc::new(UnavailableReader::new(
            "no NFC driver compiled in (rebuild with the `pcsc` feature)",
        ))
    }
}
