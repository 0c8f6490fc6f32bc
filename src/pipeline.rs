//! Set ingestion pipeline
//!
//! known terms → prompt → generator (one attempt) → sanitize → dedupe →
//! save. Nothing is written unless the last stage is reached, so a failed
//! or abandoned generation leaves every set as it was.

use crate::config::MAX_WORDS;
use crate::error::{Result, VocabError};
use crate::generator::Generator;
use crate::store::{validate_set_name, WordSetStore};
use thai_vocab_common::{
    build_generation_prompt, collect_known_terms, filter_unseen, sanitize_records, MatchPolicy,
    WordSet,
};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct IngestionRequest {
    /// Target set; overwritten if it exists.
    pub name: String,
    pub count: usize,
    pub theme: Option<String>,
}

impl IngestionRequest {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
            theme: None,
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct IngestionReport {
    pub name: String,
    pub requested: usize,
    /// Terms across all sets before the run.
    pub known_terms: usize,
    /// Records salvaged from the response.
    pub parsed: usize,
    pub dropped_known: usize,
    pub dropped_repeats: usize,
    pub truncated: usize,
    /// The saved set, possibly empty.
    pub saved: WordSet,
    pub raw_response: String,
}

pub struct IngestionPipeline<'a, G> {
    store: &'a WordSetStore,
    generator: &'a G,
    max_words: usize,
    policy: MatchPolicy,
}

impl<'a, G: Generator> IngestionPipeline<'a, G> {
    pub fn new(store: &'a WordSetStore, generator: &'a G) -> Self {
        Self {
            store,
            generator,
            max_words: MAX_WORDS,
            policy: MatchPolicy::Exact,
        }
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rejects bad names and counts before anything external happens.
    pub fn validate(&self, request: &IngestionRequest) -> Result<()> {
        validate_set_name(&request.name)?;
        if request.count == 0 || request.count > self.max_words {
            return Err(VocabError::Validation(format!(
                "단어 수는 1~{} 사이여야 합니다 (요청: {})",
                self.max_words, request.count
            )));
        }
        Ok(())
    }

    /// Every `thai` term in every stored set.
    pub fn known_terms(&self) -> Result<Vec<String>> {
        let sets: Vec<WordSet> = self
            .store
            .load_all()?
            .into_iter()
            .map(|(_, records)| records)
            .collect();
        Ok(collect_known_terms(&sets))
    }

    pub async fn run(&self, request: &IngestionRequest) -> Result<IngestionReport> {
        self.validate(request)?;

        let known = self.known_terms()?;
        debug!(known = known.len(), "collected known terms");

        let prompt = build_generation_prompt(&known, request.count, request.theme.as_deref());
        let raw_response = self.generator.generate(&prompt).await?;

        let candidates = sanitize_records(&raw_response);
        let parsed = candidates.len();
        if parsed == 0 {
            return Err(VocabError::Parse {
                message: "모델 응답에서 단어를 하나도 찾지 못했습니다".into(),
                raw: Some(raw_response),
            });
        }
        debug!(parsed, "sanitized response");

        let outcome = filter_unseen(candidates, &known, request.count, self.policy);
        self.store.save(&request.name, &outcome.kept)?;

        info!(
            set = %request.name,
            saved = outcome.kept.len(),
            dropped_known = outcome.dropped_known,
            dropped_repeats = outcome.dropped_repeats,
            "generated set saved"
        );

        Ok(IngestionReport {
            name: request.name.clone(),
            requested: request.count,
            known_terms: known.len(),
            parsed,
            dropped_known: outcome.dropped_known,
            dropped_repeats: outcome.dropped_repeats,
            truncated: outcome.truncated,
            saved: outcome.kept,
            raw_response,
        })
    }
}
