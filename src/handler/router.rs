//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: classifies the request by method
//! and path, dispatches it, then applies CORS and writes the access log.

use crate::config::{AppState, HealthConfig};
use crate::handler::definitions;
use crate::handler::types::HealthStatus;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::USER_AGENT;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// The one resource this service exposes
pub const DEFINITIONS_PATH: &str = "/api/definitions";

/// Where a request is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflight,
    GetDefinition,
    PostDefinition,
    Health,
    MethodNotAllowed,
    NotFound,
}

/// Classify by method and path. Order matters: OPTIONS wins on every path.
pub fn classify(method: &Method, path: &str, health: &HealthConfig) -> Route {
    match (method, path) {
        (&Method::OPTIONS, _) => Route::Preflight,
        (&Method::GET, DEFINITIONS_PATH) => Route::GetDefinition,
        (&Method::POST, DEFINITIONS_PATH) => Route::PostDefinition,
        (&Method::GET, p) if health.enabled && p == health.path => Route::Health,
        (_, DEFINITIONS_PATH) => Route::MethodNotAllowed,
        _ => Route::NotFound,
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_entry = state
        .config
        .logging
        .access_log
        .then(|| access_log_entry(&req, peer_addr));

    let mut response = route_request(req, &state).await;
    state.cors.apply(&mut response);

    if let Some(mut entry) = access_entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let server_name = &state.config.http.server_name;

    match classify(req.method(), req.uri().path(), &state.config.health) {
        Route::Preflight => {
            let mut resp = http::build_options_response(server_name);
            state.cors.apply_preflight(&mut resp);
            resp
        }
        Route::GetDefinition => definitions::get_definition(req.uri().query(), state).await,
        Route::PostDefinition => definitions::post_definition(req, state).await,
        Route::Health => {
            let (entries, requests) = {
                let store = state.store.lock().await;
                (store.size(), store.request_count())
            };
            http::build_json_response(
                StatusCode::OK,
                &HealthStatus {
                    status: "ok",
                    entries,
                    requests,
                },
                server_name,
            )
        }
        Route::MethodNotAllowed => {
            logger::log_warning(&format!("Method not allowed: {}", req.method()));
            http::build_405_response(&state.messages.method_not_allowed, server_name)
        }
        Route::NotFound => http::build_error_response(
            StatusCode::NOT_FOUND,
            &state.messages.endpoint_not_found,
            server_name,
        ),
    }
}

fn access_log_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    entry.user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry
}
