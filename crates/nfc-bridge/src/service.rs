//! Bridge service lifecycle: bind, serve, shut down.

use crate::coordinator::ScanCoordinator;
use crate::domain::config::BridgeConfig;
use crate::domain::error::ServiceError;
use crate::router::build_router;
use nfc_reader::NfcReader;
use std::sync::Arc;
use tracing::{error, info};

/// Owns the coordinator and the listener for one bridge process.
pub struct BridgeService {
    config: BridgeConfig,
    coordinator: Arc<ScanCoordinator>,
}

impl BridgeService {
    /// Validate the configuration and wire the coordinator to the reader.
    pub fn new(config: BridgeConfig, reader: Arc<dyn NfcReader>) -> Result<Self, ServiceError> {
        config.validate()?;
        let coordinator = Arc::new(ScanCoordinator::new(reader, &config));
        Ok(Self {
            config,
            coordinator,
        })
    }

    pub fn coordinator(&self) -> Arc<ScanCoordinator> {
        Arc::clone(&self.coordinator)
    }

    /// Bind the listener and serve until interrupted.
    ///
    /// A bind failure on a busy port yields [`ServiceError::PortInUse`]
    /// with a targeted diagnostic instead of a generic I/O error.
    pub async fn run(self) -> Result<(), ServiceError> {
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                ServiceError::PortInUse(self.config.port)
            } else {
                ServiceError::Bind { addr, source: e }
            }
        })?;

        self.banner();

        let router = build_router(Arc::clone(&self.coordinator), &self.config);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("bridge stopped");
        Ok(())
    }

    /// Startup banner: port, detected driver (or "None"), endpoints.
    fn banner(&self) {
        let status = self.coordinator.status();
        let driver = if status.reader_ready {
            status.reader_message
        } else {
            format!("None ({})", status.reader_message)
        };

        info!("===========================================");
        info!("  NFC Bridge Server v{}", crate::VERSION);
        info!("  Listening on http://{}", self.config.bind_addr());
        info!("  NFC driver: {}", driver);
        info!("  Endpoints:");
        info!("    GET  /status - reader and scan state");
        info!("    GET  /scan   - scan and wait for a card");
        info!("    POST /scan   - start a scan, poll later");
        info!("    GET  /poll   - wait for the pending result");
        info!("===========================================");
    }
}

/// Resolves when the process receives an interrupt.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("interrupt received, shutting down"),
        Err(e) => error!(error = %e, "failed to listen for interrupt"),
    }
}
