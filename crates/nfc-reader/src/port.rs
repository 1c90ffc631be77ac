//! The reader port: the one seam between the bridge and NFC hardware.

use crate::error::{ReaderError, ScanError};
use std::time::Duration;

/// Reader identity reported by a successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderInfo {
    /// Driver/library in use ("pcsc", "mock", ...).
    pub driver: String,
    /// Human-readable device name as reported by the driver.
    pub device: String,
}

impl ReaderInfo {
    pub fn new(driver: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            device: device.into(),
        }
    }
}

/// Port for a USB-connected contactless frontend.
///
/// Implementations must uphold two contracts:
///
/// - `probe` is idempotent and cheap; callers may re-probe on every status
///   request.
/// - `scan` BLOCKS the calling thread until a card is detected, `timeout`
///   elapses, or the hardware faults. Callers must run it on a dedicated
///   blocking worker and must never issue two concurrent scans against the
///   same reader.
pub trait NfcReader: Send + Sync {
    /// Attempt to open/enumerate the reader. Safe to call repeatedly.
    fn probe(&self) -> Result<ReaderInfo, ReaderError>;

    /// Block until a card is detected or `timeout` elapses.
    ///
    /// On success returns the card UID as an uppercase hexadecimal string
    /// (e.g. `"04A1B2C3"`).
    fn scan(&self, timeout: Duration) -> Result<String, ScanError>;
}
