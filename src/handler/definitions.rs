//! `/api/definitions` handlers
//!
//! Input is validated here; only well-formed requests reach the store, so
//! only they advance its request counter.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use serde_json::Value;

use super::body::{check_content_length, read_full_body};
use super::query::query_param;
use super::types::{AddResult, DefinitionFound, DefinitionMissing};
use crate::config::AppState;
use crate::dictionary::{AddOutcome, LookupOutcome};
use crate::error::RequestError;
use crate::http;
use crate::logger;
use crate::messages::render;

/// A validated POST body
#[derive(Debug, PartialEq, Eq)]
struct Submission {
    word: String,
    definition: String,
}

/// Words are one or more ASCII letters
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_alphabetic())
}

/// GET /api/definitions?word=<w>
pub async fn get_definition(query: Option<&str>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(word) = query_param(query, "word").filter(|w| is_valid_word(w)) else {
        return request_error_response(&RequestError::InvalidData, state);
    };

    let outcome = state.store.lock().await.lookup(&word);
    let server_name = &state.config.http.server_name;

    match outcome {
        LookupOutcome::Found {
            word,
            definition,
            request_count,
            total_entries,
        } => http::build_json_response(
            StatusCode::OK,
            &DefinitionFound {
                word,
                definition,
                request_count,
                total_entries,
            },
            server_name,
        ),
        LookupOutcome::NotFound {
            word,
            request_count,
        } => http::build_json_response(
            StatusCode::NOT_FOUND,
            &DefinitionMissing {
                message: render(&state.messages.not_found, &[("term", word.as_str())]),
                request_count,
            },
            server_name,
        ),
    }
}

/// POST /api/definitions with `{"word": ..., "definition": ...}`
pub async fn post_definition<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let submission = match read_submission(req, state).await {
        Ok(s) => s,
        Err(e) => {
            logger::log_warning(&format!("Rejected definition submission: {e}"));
            return request_error_response(&e, state);
        }
    };

    let outcome = state
        .store
        .lock()
        .await
        .add(&submission.word, &submission.definition);
    let vars = [
        ("term", submission.word.as_str()),
        ("definition", submission.definition.as_str()),
    ];

    let (status, template, request_count, total_entries) = match outcome {
        AddOutcome::Created {
            request_count,
            total_entries,
        } => (
            StatusCode::CREATED,
            &state.messages.word_added,
            request_count,
            total_entries,
        ),
        AddOutcome::Exists {
            request_count,
            total_entries,
        } => (
            StatusCode::BAD_REQUEST,
            &state.messages.word_exists,
            request_count,
            total_entries,
        ),
    };

    http::build_json_response(
        status,
        &AddResult {
            message: render(template, &vars),
            request_count,
            total_entries,
        },
        &state.config.http.server_name,
    )
}

async fn read_submission<B>(req: Request<B>, state: &AppState) -> Result<Submission, RequestError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let max_body_size = state.config.http.max_body_size;
    check_content_length(req.headers(), max_body_size)?;

    let bytes = read_full_body(req.into_body(), max_body_size, state.body_read_timeout).await?;
    let value: Value = serde_json::from_slice(&bytes)?;

    parse_submission(&value).ok_or(RequestError::InvalidData)
}

/// Both fields must be strings; the word must match the letters-only rule
fn parse_submission(value: &Value) -> Option<Submission> {
    let word = value.get("word")?.as_str()?;
    let definition = value.get("definition")?.as_str()?;

    if !is_valid_word(word) || definition.is_empty() {
        return None;
    }

    Some(Submission {
        word: word.to_string(),
        definition: definition.to_string(),
    })
}

/// Error body for a rejected request
pub fn request_error_response(err: &RequestError, state: &AppState) -> Response<Full<Bytes>> {
    http::build_error_response(
        err.status(),
        err.client_message(&state.messages),
        &state.config.http.server_name,
    )
}
