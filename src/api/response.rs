// API response utility functions module

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Routes advertised by the unknown-route 404 body
const AVAILABLE_ENDPOINTS: [&str; 11] = [
    "/emojis",
    "/emojis/random",
    "/emojis/categories",
    "/emojis/categories/{category}",
    "/emojis/categories/{category}/random",
    "/emojis/groups",
    "/emojis/groups/{group}",
    "/emojis/groups/{group}/random",
    "/emojis/search?q={query}",
    "/emojis/similar/{name}",
    "/healthz",
];

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return build(
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error":"internal server error"}"#.to_string(),
            );
        }
    };

    build(status, json)
}

/// Build JSON error response with an `{"error": message}` body
pub fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message });
    build(status, body.to_string())
}

/// 405 Method Not Allowed response
pub fn method_not_allowed() -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": "method not allowed" }).to_string();
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .header("Content-Length", body.len())
        .header("Allow", "GET")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// 404 Not Found response for unknown routes, listing known endpoints
pub fn not_found_route() -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "not found",
        "available_endpoints": AVAILABLE_ENDPOINTS,
    });
    build(StatusCode::NOT_FOUND, body.to_string())
}

fn build(status: StatusCode, json: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}
