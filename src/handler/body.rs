// Request body reading
// Buffers a whole body under a size limit and a deadline

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_LENGTH;
use hyper::HeaderMap;
use std::time::Duration;

use crate::error::RequestError;
use crate::logger;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Reject early when a declared `Content-Length` exceeds `max_body_size`
pub fn check_content_length(headers: &HeaderMap, max_body_size: u64) -> Result<(), RequestError> {
    let Some(content_length) = headers.get(CONTENT_LENGTH) else {
        return Ok(());
    };
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return Ok(());
    };

    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Err(RequestError::PayloadTooLarge { limit: max_body_size })
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Await every chunk of `body` and return the concatenated bytes
pub async fn read_full_body<B>(
    body: B,
    max_body_size: u64,
    timeout: Duration,
) -> Result<Bytes, RequestError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let collected = tokio::time::timeout(timeout, Limited::new(body, limit).collect())
        .await
        .map_err(|_| RequestError::Timeout(timeout))?;

    match collected {
        Ok(c) => Ok(c.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(RequestError::PayloadTooLarge { limit: max_body_size })
        }
        Err(e) => Err(RequestError::BodyRead(e.to_string())),
    }
}
