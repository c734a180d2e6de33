//! User-facing message catalog
//!
//! Templates use `{name}` placeholders that are filled in by [`render`].
//! A TOML file may override any subset of the built-in English strings.

use serde::Deserialize;
use std::path::Path;

use crate::error::ServerError;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Messages {
    /// `{term}` is the requested word
    pub not_found: String,
    /// `{term}` is the submitted word
    pub word_exists: String,
    /// `{term}` and `{definition}`
    pub word_added: String,
    pub invalid_data: String,
    pub invalid_json: String,
    pub endpoint_not_found: String,
    pub method_not_allowed: String,
    pub payload_too_large: String,
    pub request_timeout: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            not_found: "Word '{term}' not found!".to_string(),
            word_exists: "Warning! '{term}' already exists.".to_string(),
            word_added: "New entry added for '{term}' with definition '{definition}'".to_string(),
            invalid_data: "Invalid input. Provide a word made of letters only and a non-empty definition."
                .to_string(),
            invalid_json: "Invalid JSON format.".to_string(),
            endpoint_not_found: "Endpoint not found.".to_string(),
            method_not_allowed: "Method not allowed.".to_string(),
            payload_too_large: "Request body is too large.".to_string(),
            request_timeout: "Request body was not received in time.".to_string(),
        }
    }
}

impl Messages {
    /// Load the catalog, falling back to the built-in strings when no file is configured
    pub fn load(path: Option<&str>) -> Result<Self, ServerError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(Path::new(path)).map_err(|source| {
            ServerError::MessagesIo {
                path: path.to_string(),
                source,
            }
        })?;

        toml::from_str(&content).map_err(|source| ServerError::MessagesParse {
            path: path.to_string(),
            source,
        })
    }
}

/// Replace every `{name}` in `template` with its value from `vars`
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_render_substitutes_all_occurrences() {
        let out = render("{term} and {term} mean {definition}", &[
            ("term", "cat"),
            ("definition", "a feline"),
        ]);
        assert_eq!(out, "cat and cat mean a feline");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{term} {other}", &[("term", "x")]), "x {other}");
    }

    #[test]
    fn test_not_found_template_contains_word() {
        let messages = Messages::default();
        let out = render(&messages.not_found, &[("term", "zzz")]);
        assert!(out.contains("zzz"));
        assert!(!out.contains("{term}"));
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(Messages::load(None).unwrap(), Messages::default());
    }

    #[test]
    fn test_load_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not_found = \"No entry for {{term}}\"").unwrap();

        let messages = Messages::load(file.path().to_str()).unwrap();
        assert_eq!(messages.not_found, "No entry for {term}");
        assert_eq!(messages.invalid_json, Messages::default().invalid_json);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = Messages::load(Some("/nonexistent/messages.toml")).unwrap_err();
        assert!(matches!(err, ServerError::MessagesIo { .. }));
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not_found = ").unwrap();

        let err = Messages::load(file.path().to_str()).unwrap_err();
        assert!(matches!(err, ServerError::MessagesParse { .. }));
    }
}
