//! Dictionary module
//!
//! Holds the word store. Validation of words and definitions happens in the
//! request handler before anything reaches the store.

mod store;

pub use store::{AddOutcome, DictionaryStore, LookupOutcome};
