//! Thai Vocabulary Common Library
//!
//! Pure logic shared by the CLI and any other front end: record types,
//! the model-response sanitizer, the deduplicator and prompt building.

pub mod types;
pub mod error;
pub mod parser;
pub mod dedup;
pub mod prompts;

pub use types::{VocabularyRecord, WordSet, KNOWN_FIELDS};
pub use error::{Error, Result};
pub use parser::{extract_json, parse_record_array, sanitize_records};
pub use dedup::{collect_known_terms, filter_unseen, DedupOutcome, MatchPolicy};
pub use prompts::{build_generation_prompt, GenerationPrompt, DEFAULT_TOPICS, SYSTEM_PROMPT};
