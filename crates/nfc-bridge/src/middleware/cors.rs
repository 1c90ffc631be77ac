//! Permissive CORS for browser clients.
//!
//! The bridge is called cross-origin from the admin frontend, so every
//! response carries `Access-Control-Allow-Origin: *` and the layer answers
//! `OPTIONS` preflights itself with an empty body.

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// CORS layer for the bridge: any origin, `GET`/`POST`/`OPTIONS`,
/// `Content-Type` header.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Smoke test: the layer builds without panicking. Behavior is covered
    /// by the router-level preflight tests.
    #[test]
    fn layer_builds() {
        let layer = create_cors_layer();
        drop(layer);
    }
}
