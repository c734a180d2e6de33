//! Logger module
//!
//! Provides logging utilities for the dictionary server including:
//! - Subscriber setup driven by the `logging` config section
//! - Server lifecycle logging
//! - Access logging with multiple formats

mod format;

pub use format::AccessLogEntry;

use crate::config::{Config, LoggingConfig};
use std::net::SocketAddr;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`. Should be called once at
/// application startup.
pub fn init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // A second init (tests, embedding) keeps the existing subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!(
        %addr,
        allowed_origin = %config.cors.allowed_origin,
        max_body_size = config.http.max_body_size,
        access_log = config.logging.access_log,
        "Dictionary server listening on http://{addr}"
    );
    if let Some(ref file) = config.messages.file {
        tracing::info!(file = %file, "Using message catalog file");
    }
    if let Some(max) = config.performance.max_connections {
        tracing::info!(max_connections = max, "Connection limit enabled");
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!(peer = %peer_addr, "Connection accepted");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

pub fn log_shutdown() {
    tracing::info!("Shutdown signal received, no longer accepting connections");
}

pub fn log_drain_complete() {
    tracing::info!("All connections closed");
}

pub fn log_drain_timeout(remaining: usize) {
    tracing::warn!(remaining, "Shutdown timeout reached with connections still open");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: "access", "{}", entry.format(format));
}
