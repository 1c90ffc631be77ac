//! Full scan lifecycles over a live listener.
//!
//! These tests bind a real TCP socket, serve the bridge router on it, and
//! drive it with `reqwest` exactly as the admin frontend would: status
//! probe, non-blocking scan plus poll, the synchronous scan-and-wait
//! convenience, and the single-flight rejection under concurrency.

// =============================================================================
// TEST FIXTURES (only compiled during tests)
// =============================================================================

#[cfg(test)]
use std::net::SocketAddr;

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use std::time::{Duration, Instant};

#[cfg(test)]
use nfc_bridge::{build_router, BridgeConfig, ScanCoordinator};

#[cfg(test)]
use nfc_reader::test_utils::MockReader;

#[cfg(test)]
use nfc_reader::{NfcReader, UnavailableReader};

/// Serve a bridge with the given reader on an ephemeral port.
#[cfg(test)]
async fn spawn_bridge(reader: Arc<dyn NfcReader>, wait_timeout_secs: u64) -> SocketAddr {
    let config = BridgeConfig {
        wait_timeout_secs,
        poll_interval_ms: 20,
        ..Default::default()
    };
    let coordinator = Arc::new(ScanCoordinator::new(reader, &config));
    let router = build_router(coordinator, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[cfg(test)]
async fn get_json(addr: SocketAddr, path: &str) -> serde_json::Value {
    reqwest::get(format!("http://{addr}{path}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// POST /scan then GET /poll: the result is handed over exactly once,
    /// and an immediate second poll times out empty-handed.
    #[tokio::test]
    async fn post_scan_poll_consumes_result_exactly_once() {
        let reader = Arc::new(MockReader::with_card(
            "04A1B2C3",
            Duration::from_millis(200),
        ));
        let addr = spawn_bridge(reader, 1).await;

        let status = get_json(addr, "/status").await;
        assert_eq!(status["status"], "running");
        assert_eq!(status["nfc_available"], true);
        assert_eq!(status["is_scanning"], false);

        let client = reqwest::Client::new();
        let ack: serde_json::Value = client
            .post(format!("http://{addr}/scan"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(ack["success"], true);

        let result = get_json(addr, "/poll").await;
        assert_eq!(result["success"], true);
        assert_eq!(result["serialNumber"], "04A1B2C3");
        assert!(result["timestamp"].is_f64());

        // Nothing new was scanned, so the mailbox is empty again.
        let second = get_json(addr, "/poll").await;
        assert_eq!(second["success"], false);
        assert_eq!(second["error"], "Poll timeout");
    }

    /// GET /scan blocks until the card shows up, well inside the wait
    /// timeout, and not instantly.
    #[tokio::test]
    async fn get_scan_waits_for_the_card() {
        let reader = Arc::new(MockReader::with_card(
            "CAFEF00D",
            Duration::from_millis(300),
        ));
        let addr = spawn_bridge(reader, 10).await;

        let started = Instant::now();
        let result = get_json(addr, "/scan").await;
        let elapsed = started.elapsed();

        assert_eq!(result["success"], true);
        assert_eq!(result["serialNumber"], "CAFEF00D");
        assert!(elapsed >= Duration::from_millis(200), "returned too early");
        assert!(elapsed < Duration::from_secs(5), "took far too long");
    }

    /// While a scan is in flight, exactly one of many concurrent POSTs is
    /// accepted; the rest are told a scan is already running.
    #[tokio::test]
    async fn concurrent_posts_admit_exactly_one_scan() {
        let reader = Arc::new(MockReader::with_card(
            "04A1B2C3",
            Duration::from_millis(500),
        ));
        let addr = spawn_bridge(reader, 2).await;

        let client = reqwest::Client::new();
        let handles: Vec<_> = (0..5)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move {
                    client
                        .post(format!("http://{addr}/scan"))
                        .send()
                        .await
                        .unwrap()
                        .json::<serde_json::Value>()
                        .await
                        .unwrap()
                })
            })
            .collect();
        let mut bodies = Vec::new();
        for handle in handles {
            bodies.push(handle.await.unwrap());
        }

        let accepted = bodies.iter().filter(|b| b["success"] == true).count();
        let rejected = bodies
            .iter()
            .filter(|b| b["error"] == "Scan already in progress")
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(rejected, bodies.len() - 1);

        // Drain the mailbox so the worker's result is observed.
        let result = get_json(addr, "/poll").await;
        assert_eq!(result["serialNumber"], "04A1B2C3");
    }

    /// GET /status answers fast even while the worker is mid-scan.
    #[tokio::test]
    async fn status_stays_responsive_during_a_scan() {
        let reader = Arc::new(MockReader::with_card("04A1B2C3", Duration::from_secs(2)));
        let addr = spawn_bridge(reader, 5).await;

        let client = reqwest::Client::new();
        let ack: serde_json::Value = client
            .post(format!("http://{addr}/scan"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(ack["success"], true);

        let started = Instant::now();
        let status = get_json(addr, "/status").await;
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(status["is_scanning"], true);

        let result = get_json(addr, "/poll").await;
        assert_eq!(result["success"], true);
    }

    /// No driver: status says so, and scans fail with the driver's own
    /// message without touching hardware.
    #[tokio::test]
    async fn missing_driver_is_reported_over_http() {
        let reader = Arc::new(UnavailableReader::new("pcscd is not running"));
        let addr = spawn_bridge(reader, 1).await;

        let status = get_json(addr, "/status").await;
        assert_eq!(status["nfc_available"], false);
        assert!(status["nfc_message"]
            .as_str()
            .unwrap()
            .contains("pcscd is not running"));

        let result = get_json(addr, "/scan").await;
        assert_eq!(result["success"], false);
        assert!(result["error"]
            .as_str()
            .unwrap()
            .contains("pcscd is not running"));
    }

    /// The unknown-endpoint contract holds over a real connection too.
    #[tokio::test]
    async fn unknown_endpoint_still_answers_200() {
        let reader = Arc::new(MockReader::with_card("04A1B2C3", Duration::ZERO));
        let addr = spawn_bridge(reader, 1).await;

        let response = reqwest::get(format!("http://{addr}/frobnicate"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Unknown endpoint");
        assert_eq!(
            body["available_endpoints"],
            serde_json::json!(["/status", "/scan", "/poll"])
        );
    }
}
