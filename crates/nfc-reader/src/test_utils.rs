//! Scripted reader for tests.
//!
//! The mock honors the port's blocking contract (it really sleeps on the
//! calling thread), so coordinator and HTTP tests exercise the same
//! threading behavior as real hardware.

use crate::error::{ReaderError, ScanError};
use crate::port::{NfcReader, ReaderInfo};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted NFC reader.
///
/// Each `scan` sleeps for the configured delay, then pops the next scripted
/// outcome, falling back to the default outcome when the script is empty.
pub struct MockReader {
    delay: Duration,
    probe_error: Option<ReaderError>,
    default_outcome: Result<String, ScanError>,
    script: Mutex<VecDeque<Result<String, ScanError>>>,
    scans: AtomicUsize,
}

impl MockReader {
    /// Reader that detects `serial` on every scan after `delay`.
    pub fn with_card(serial: &str, delay: Duration) -> Self {
        Self {
            delay,
            probe_error: None,
            default_outcome: Ok(serial.to_string()),
            script: Mutex::new(VecDeque::new()),
            scans: AtomicUsize::new(0),
        }
    }

    /// Reader that never sees a card: every scan ends in `NoCard` after `delay`.
    pub fn empty(delay: Duration) -> Self {
        Self {
            delay,
            probe_error: None,
            default_outcome: Err(ScanError::NoCard),
            script: Mutex::new(VecDeque::new()),
            scans: AtomicUsize::new(0),
        }
    }

    /// Reader whose probe fails, as if no driver were installed.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            probe_error: Some(ReaderError::NoDriver(reason.to_string())),
            default_outcome: Err(ScanError::Driver(reason.to_string())),
            script: Mutex::new(VecDeque::new()),
            scans: AtomicUsize::new(0),
        }
    }

    /// Queue a one-shot outcome ahead of the default.
    pub fn push_scan(&self, outcome: Result<String, ScanError>) {
        self.script.lock().push_back(outcome);
    }

    /// Number of hardware scans attempted so far.
    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl NfcReader for MockReader {
    fn probe(&self) -> Result<ReaderInfo, ReaderError> {
        match &self.probe_error {
            Some(e) => Err(e.clone()),
            None => Ok(ReaderInfo::new("mock", "Mock NFC Reader")),
        }
    }

    fn scan(&self, _timeout: Duration) -> Result<String, ScanError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        let scripted = self.script.lock().pop_front();
        scripted.unwrap_or_else(|| self.default_outcome.clone())
    }
}
