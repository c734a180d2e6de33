//! Request handler module
//!
//! Routes requests to the dictionary, validates input and builds JSON responses.

mod body;
mod definitions;
mod query;
pub mod router;
mod types;

// Re-export main entry point
pub use router::handle_request;
