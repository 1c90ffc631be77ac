//! Stand-in reader used when no driver could be opened.
//!
//! The bridge keeps serving HTTP without hardware; this adapter makes the
//! failure reason visible through the same port the real backends use.

use crate::error::{ReaderError, ScanError};
use crate::port::{NfcReader, ReaderInfo};
use std::time::Duration;

/// Always-failing reader carrying the reason the real one is missing.
#[derive(Debug, Clone)]
pub struct UnavailableReader {
    reason: String,
}

impl UnavailableReader {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl NfcReader for UnavailableReader {
    fn probe(&self) -> Result<ReaderInfo, ReaderError> {
        Err(ReaderError::NoDriver(self.reason.clone()))
    }

    fn scan(&self, _timeout: Duration) -> Result<String, ScanError> {
        // Unreachable through the coordinator (it probes first), but the
        // port contract still wants a sensible answer.
        Err(ScanError::Driver(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_surfaces_the_reason() {
        let reader = UnavailableReader::new("pcscd not running");
        let err = reader.probe().unwrap_err();
        assert!(err.to_string().contains("pcscd not running"));
    }

    #[test]
    fn scan_fails_without_blocking() {
        let reader = UnavailableReader::new("no driver");
        assert!(reader.scan(Duration::from_secs(30)).is_err());
    }
}
