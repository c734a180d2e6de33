// Response body types for the definitions endpoint

use serde::Serialize;

/// 200 body for a word that exists
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionFound {
    pub word: String,
    pub definition: String,
    pub request_count: u64,
    pub total_entries: usize,
}

/// 404 body for a word that does not exist
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionMissing {
    pub message: String,
    pub request_count: u64,
}

/// Body for both a created entry (201) and a rejected duplicate (400)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResult {
    pub message: String,
    pub request_count: u64,
    pub total_entries: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub entries: usize,
    pub requests: u64,
}
