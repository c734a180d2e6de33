// Dictionary store module
// In-process word -> definition map plus the served-request counter

use std::collections::HashMap;

/// Result of an insertion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The word was new and has been stored
    Created { request_count: u64, total_entries: usize },
    /// The word was already present; nothing changed
    Exists { request_count: u64, total_entries: usize },
}

/// Result of a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found {
        word: String,
        definition: String,
        request_count: u64,
        total_entries: usize,
    },
    NotFound { word: String, request_count: u64 },
}

/// Word store with a monotonically increasing request counter.
///
/// Inputs are assumed to be validated by the caller. Every `add` and
/// `lookup` counts as one served request, whatever its outcome.
#[derive(Debug, Default)]
pub struct DictionaryStore {
    entries: HashMap<String, String>,
    request_count: u64,
}

impl DictionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `word` unless it is already present. Existing definitions are never overwritten.
    pub fn add(&mut self, word: &str, definition: &str) -> AddOutcome {
        self.request_count += 1;

        if self.entries.contains_key(word) {
            return AddOutcome::Exists {
                request_count: self.request_count,
                total_entries: self.entries.len(),
            };
        }

        self.entries.insert(word.to_string(), definition.to_string());
        AddOutcome::Created {
            request_count: self.request_count,
            total_entries: self.entries.len(),
        }
    }

    pub fn lookup(&mut self, word: &str) -> LookupOutcome {
        self.request_count += 1;

        match self.entries.get(word) {
            Some(definition) => LookupOutcome::Found {
                word: word.to_string(),
                definition: definition.clone(),
                request_count: self.request_count,
                total_entries: self.entries.len(),
            },
            None => LookupOutcome::NotFound {
                word: word.to_string(),
                request_count: self.request_count,
            },
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub const fn request_count(&self) -> u64 {
        self.request_count
    }
}
