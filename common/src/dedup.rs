//! Deduplicator
//!
//! Filters generated candidates against the terms already stored in any
//! set. The model is told which terms exist, but nothing guarantees it
//! listens.

use crate::types::{VocabularyRecord, WordSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How two `thai` terms are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Byte-exact comparison, no trimming or case folding.
    #[default]
    Exact,
    /// Leading/trailing whitespace ignored.
    Trimmed,
}

impl MatchPolicy {
    fn key<'a>(&self, term: &'a str) -> &'a str {
        match self {
            MatchPolicy::Exact => term,
            MatchPolicy::Trimmed => term.trim(),
        }
    }
}

impl std::str::FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(MatchPolicy::Exact),
            "trimmed" | "trim" => Ok(MatchPolicy::Trimmed),
            _ => Err(format!("Unknown match policy: {}. Use exact or trimmed", s)),
        }
    }
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPolicy::Exact => write!(f, "exact"),
            MatchPolicy::Trimmed => write!(f, "trimmed"),
        }
    }
}

/// Result of [`filter_unseen`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupOutcome {
    /// Surviving candidates, original order, at most `limit` long.
    pub kept: Vec<VocabularyRecord>,
    /// Candidates whose term was already known.
    pub dropped_known: usize,
    /// Candidates repeating a term accepted earlier in the same batch.
    pub dropped_repeats: usize,
    /// Unique candidates cut off by the limit.
    pub truncated: usize,
}

/// Every `thai` term across the given sets. Order is irrelevant and
/// duplicates across sets are kept.
pub fn collect_known_terms(sets: &[WordSet]) -> Vec<String> {
    sets.iter()
        .flatten()
        .map(|record| record.thai.clone())
        .collect()
}

/// Keeps the candidates whose term is not in `seen`, preserving order, and
/// truncates to `limit`.
pub fn filter_unseen(
    candidates: Vec<VocabularyRecord>,
    seen: &[String],
    limit: usize,
    policy: MatchPolicy,
) -> DedupOutcome {
    let known: HashSet<&str> = seen.iter().map(|term| policy.key(term)).collect();
    let mut accepted: HashSet<String> = HashSet::new();
    let mut outcome = DedupOutcome::default();

    for candidate in candidates {
        let key = policy.key(&candidate.thai);
        if known.contains(key) {
            outcome.dropped_known += 1;
            continue;
        }
        if !accepted.insert(key.to_string()) {
            outcome.dropped_repeats += 1;
            continue;
        }
        outcome.kept.push(candidate);
    }

    if outcome.kept.len() > limit {
        outcome.truncated = outcome.kept.len() - limit;
        outcome.kept.truncate(limit);
    }

    outcome
}
