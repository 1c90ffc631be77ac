//! Bridge error taxonomy.
//!
//! Every [`BridgeError`] variant renders as a well-formed `success:false`
//! JSON body; none of them crash the process or leak a raw fault to the
//! HTTP transport. The `Display` strings are the wire-visible messages.

use crate::domain::config::ConfigError;
use nfc_reader::ScanError;
use std::net::SocketAddr;
use thiserror::Error;

/// Scan-path failures reported to HTTP clients.
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    /// No usable driver or device behind the reader port. Carries the
    /// driver's own message verbatim.
    #[error("{0}")]
    ReaderUnavailable(String),

    /// A scan is already in flight; the caller retries later.
    #[error("Scan already in progress")]
    AlreadyScanning,

    /// An earlier outcome is still waiting in the mailbox. Starting
    /// another scan would overwrite it, so the caller polls first.
    #[error("Previous scan result not yet collected")]
    ResultPending,

    /// The scan window closed without a card.
    #[error("No card detected")]
    NoCard,

    /// The wait for a pending result lapsed.
    #[error("Poll timeout")]
    PollTimeout,

    /// Unexpected hardware/library fault mid-scan.
    #[error("NFC driver fault: {0}")]
    Driver(String),
}

impl From<ScanError> for BridgeError {
    fn from(e: ScanError) -> Self {
        match e {
            ScanError::NoCard => BridgeError::NoCard,
            ScanError::Driver(msg) => BridgeError::Driver(msg),
        }
    }
}

/// Process-level failures (startup, bind, serve).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The fixed port is taken, almost always by another bridge instance.
    #[error("port {0} is already in use: is another NFC bridge running?")]
    PortInUse(u16),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
