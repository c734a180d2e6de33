//! HTTP response building module
//!
//! Builders for the JSON responses the service sends. CORS headers are added
//! afterwards by the router, so nothing here knows about origins.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_TYPE, SERVER};
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Methods served on the definitions resource
pub const DEFINITIONS_ALLOW: &str = "GET, POST, OPTIONS";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Serialize `body` as a JSON response
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return fallback(
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error":"Internal server error"}"#,
            );
        }
    };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .header(SERVER, server_name)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            fallback(status, "")
        })
}

/// Build `{"error": message}` with the given status
pub fn build_error_response(
    status: StatusCode,
    message: &str,
    server_name: &str,
) -> Response<Full<Bytes>> {
    build_json_response(status, &ErrorBody { error: message }, server_name)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(message: &str, server_name: &str) -> Response<Full<Bytes>> {
    let mut resp = build_error_response(StatusCode::METHOD_NOT_ALLOWED, message, server_name);
    resp.headers_mut()
        .insert(ALLOW, hyper::header::HeaderValue::from_static(DEFINITIONS_ALLOW));
    resp
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ALLOW, DEFINITIONS_ALLOW)
        .header(SERVER, server_name)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::NO_CONTENT, &e);
            fallback(StatusCode::NO_CONTENT, "")
        })
}

fn fallback(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *resp.status_mut() = status;
    resp
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
