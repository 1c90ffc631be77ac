//! Wire types for the bridge API.
//!
//! Field names follow the original bridge contract consumed by the admin
//! frontend: camelCase `serialNumber`, epoch-seconds `timestamp` as a JSON
//! number, and a bare `success` flag on every scan-related body.

use crate::domain::error::BridgeError;
use chrono::Utc;
use serde::Serialize;

/// Terminal outcome of one hardware scan attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// A card was read.
    Success {
        /// Uppercase hexadecimal card UID.
        serial_number: String,
        /// Epoch seconds at capture time.
        captured_at: f64,
    },
    /// The attempt ended without a card (timeout, fault, nothing presented).
    Failure {
        /// Wire-visible message.
        error: String,
    },
}

impl ScanOutcome {
    /// Successful read captured now.
    pub fn success(serial_number: impl Into<String>) -> Self {
        Self::Success {
            serial_number: serial_number.into(),
            captured_at: epoch_seconds(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }
}

/// Epoch seconds with sub-second precision.
pub fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// `GET /status` body.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub nfc_available: bool,
    pub nfc_message: String,
    pub is_scanning: bool,
}

/// `GET /scan` and `GET /poll` body.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    #[serde(rename = "serialNumber", skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResponse {
    pub fn from_outcome(outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Success {
                serial_number,
                captured_at,
            } => Self {
                success: true,
                serial_number: Some(serial_number),
                timestamp: Some(captured_at),
                error: None,
            },
            ScanOutcome::Failure { error } => Self::from_message(error),
        }
    }

    pub fn from_error(error: &BridgeError) -> Self {
        Self::from_message(error.to_string())
    }

    fn from_message(error: String) -> Self {
        Self {
            success: false,
            serial_number: None,
            timestamp: None,
            error: Some(error),
        }
    }
}

/// `POST /scan` body.
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn rejected(error: &BridgeError) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

/// Body for any path the bridge does not serve.
#[derive(Debug, Clone, Serialize)]
pub struct UnknownEndpointResponse {
    pub error: &'static str,
    pub available_endpoints: [&'static str; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_uses_camel_case_serial() {
        let response = ScanResponse::from_outcome(ScanOutcome::Success {
            serial_number: "04A1B2C3".into(),
            captured_at: 1_700_000_000.5,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["serialNumber"], "04A1B2C3");
        assert!(json["timestamp"].is_f64());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_body_omits_serial_and_timestamp() {
        let response = ScanResponse::from_error(&BridgeError::PollTimeout);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Poll timeout");
        assert!(json.get("serialNumber").is_none());
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn epoch_seconds_is_recent() {
        let now = epoch_seconds();
        assert!(now > 1_600_000_000.0);
    }
}
