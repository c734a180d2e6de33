//! HTTP protocol layer module
//!
//! Response builders and the CORS policy, kept apart from the dictionary logic.

pub mod cors;
pub mod response;

// Re-export commonly used types
pub use cors::CorsPolicy;
pub use response::{
    build_405_response, build_error_response, build_json_response, build_options_response,
};
