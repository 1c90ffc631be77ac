//! Reader error taxonomy.
//!
//! Two layers of failure: [`ReaderError`] for opening/probing the frontend,
//! [`ScanError`] for a single scan attempt. Neither is fatal to the bridge;
//! both are rendered to the client as human-readable messages.

use thiserror::Error;

/// Failure to open or probe the contactless frontend.
#[derive(Debug, Clone, Error)]
pub enum ReaderError {
    /// No compatible driver/library is present on this host.
    #[error("NFC driver not available: {0}")]
    NoDriver(String),

    /// The driver is present but no reader device is attached.
    #[error("no NFC reader attached: {0}")]
    NoDevice(String),

    /// Unexpected driver or device fault.
    #[error("NFC driver fault: {0}")]
    Driver(String),
}

/// Failure of a single scan attempt.
///
/// A scan that sees no card within its timeout window is indistinguishable
/// from "no card presented", so the timeout path is reported as
/// [`ScanError::NoCard`].
#[derive(Debug, Clone, Error)]
pub enum ScanError {
    /// No card was detected before the timeout elapsed.
    #[error("No card detected")]
    NoCard,

    /// The driver or device failed mid-scan.
    #[error("NFC driver fault: {0}")]
    Driver(String),
}
