//! Scan coordination: single-flight guard and last-result mailbox.
//!
//! The coordinator owns the only two resources shared between HTTP
//! handlers and the hardware worker: the reader handle and the
//! single-item result slot. It is constructed once at process start and
//! injected into the HTTP layer; there are no globals.
//!
//! Flow:
//!
//! 1. A handler calls [`ScanCoordinator::start_scan`]; the single-flight
//!    guard rejects it if a scan is already running.
//! 2. On acceptance, exactly one blocking worker invokes the reader's
//!    `scan` off the async path.
//! 3. The worker writes the outcome (success or failure) into the mailbox
//!    and clears the guard.
//! 4. The first [`ScanCoordinator::take_result`] caller consumes the
//!    mailbox destructively; everyone else times out.
//!
//! A poller that gives up does NOT cancel the hardware call. The worker
//! keeps running until the driver returns, and its late result waits in
//! the mailbox for the next poll. That matches the frontend's retry loop
//! and is deliberate, if not pretty. While an outcome sits unconsumed,
//! new scans are rejected: a result is never silently overwritten.

use crate::domain::config::BridgeConfig;
use crate::domain::error::BridgeError;
use crate::domain::types::ScanOutcome;
use nfc_reader::NfcReader;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Snapshot returned by [`ScanCoordinator::status`].
#[derive(Debug, Clone)]
pub struct ReaderStatus {
    /// A hardware scan is currently in flight.
    pub is_scanning: bool,
    /// The reader probe succeeded just now.
    pub reader_ready: bool,
    /// Device name when ready, otherwise the probe failure.
    pub reader_message: String,
}

/// Owns the reader handle and the pending-result mailbox.
///
/// The guard and the mailbox sit behind `Arc` so the blocking worker can
/// outlive the request that spawned it.
pub struct ScanCoordinator {
    reader: Arc<dyn NfcReader>,
    /// Single-flight guard: true while a worker is running.
    scanning: Arc<AtomicBool>,
    /// Mailbox holding at most one unconsumed outcome.
    slot: Arc<Mutex<Option<ScanOutcome>>>,
    scan_timeout: Duration,
    poll_interval: Duration,
}

/// Clears the single-flight flag when the worker exits, panic included.
/// A reader that unwinds mid-scan must not wedge the coordinator.
struct FlightGuard(Arc<AtomicBool>);

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ScanCoordinator {
    pub fn new(reader: Arc<dyn NfcReader>, config: &BridgeConfig) -> Self {
        Self {
            reader,
            scanning: Arc::new(AtomicBool::new(false)),
            slot: Arc::new(Mutex::new(None)),
            scan_timeout: config.scan_timeout(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Non-blocking state snapshot. Re-probes the adapter; the probe is
    /// idempotent and cheap relative to a scan.
    pub fn status(&self) -> ReaderStatus {
        let (reader_ready, reader_message) = match self.reader.probe() {
            Ok(info) => (true, format!("{} ({})", info.device, info.driver)),
            Err(e) => (false, e.to_string()),
        };
        ReaderStatus {
            is_scanning: self.scanning.load(Ordering::SeqCst),
            reader_ready,
            reader_message,
        }
    }

    /// Start a scan worker, unless the driver is unusable, a scan is
    /// already in flight, or an earlier outcome is still unconsumed.
    /// Returns immediately either way; callers pick the result up through
    /// [`take_result`](Self::take_result).
    pub fn start_scan(&self) -> Result<(), BridgeError> {
        // No hardware call is attempted when the driver is unavailable.
        if let Err(e) = self.reader.probe() {
            return Err(BridgeError::ReaderUnavailable(e.to_string()));
        }

        if self
            .scanning
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(BridgeError::AlreadyScanning);
        }

        // With the flag held no worker is running, so the slot is stable:
        // an unconsumed outcome must not be overwritten by a new scan.
        if self.slot.lock().is_some() {
            self.scanning.store(false, Ordering::SeqCst);
            return Err(BridgeError::ResultPending);
        }

        let reader = Arc::clone(&self.reader);
        let slot = Arc::clone(&self.slot);
        let flight = FlightGuard(Arc::clone(&self.scanning));
        let timeout = self.scan_timeout;

        // Exactly one worker runs at a time; the guard was just taken.
        tokio::task::spawn_blocking(move || {
            let _flight = flight;
            debug!(timeout_secs = timeout.as_secs(), "scan worker started");
            let outcome = match reader.scan(timeout) {
                Ok(serial) => {
                    info!(serial = %serial, "card detected");
                    ScanOutcome::success(serial)
                }
                Err(e) => {
                    warn!(error = %e, "scan attempt failed");
                    ScanOutcome::failure(BridgeError::from(e).to_string())
                }
            };

            // The mailbox fills before `_flight` drops and clears the
            // flag, so a rejected start_scan can never observe an empty
            // slot with no scan running.
            *slot.lock() = Some(outcome);
        });
        Ok(())
    }

    /// Wait up to `timeout` for the mailbox to fill, checking every poll
    /// interval. Consumes the outcome destructively: a result is delivered
    /// to at most one caller.
    pub async fn take_result(&self, timeout: Duration) -> Option<ScanOutcome> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(outcome) = self.slot.lock().take() {
                return Some(outcome);
            }
            if Instant::now() >= deadline {
                return None;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
