//! CORS header policy
//!
//! Header values are validated once at startup so that applying them to a
//! response cannot fail.

use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use hyper::Response;

use crate::config::CorsConfig;
use crate::error::ServerError;

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
    max_age: Option<HeaderValue>,
}

impl CorsPolicy {
    pub fn from_config(config: &CorsConfig) -> Result<Self, ServerError> {
        Ok(Self {
            allow_origin: header_value("cors.allowed_origin", &config.allowed_origin)?,
            allow_methods: header_value("cors.allow_methods", &config.allow_methods)?,
            allow_headers: header_value("cors.allow_headers", &config.allow_headers)?,
            max_age: config.max_age.map(HeaderValue::from),
        })
    }

    /// Add `Access-Control-Allow-Origin`; every response gets this
    pub fn apply<B>(&self, response: &mut Response<B>) {
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
    }

    /// Add the extra headers answering a preflight request
    pub fn apply_preflight<B>(&self, response: &mut Response<B>) {
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        if let Some(max_age) = &self.max_age {
            headers.insert(ACCESS_CONTROL_MAX_AGE, max_age.clone());
        }
    }
}

fn header_value(field: &'static str, value: &str) -> Result<HeaderValue, ServerError> {
    HeaderValue::from_str(value).map_err(|_| ServerError::InvalidHeader {
        field,
        value: value.to_string(),
    })
}
