//! Manual editor
//!
//! Every edit ends in a whole-set replace through the store. Row-level
//! edits are applied to a loaded copy first; if any of them is invalid
//! nothing is written.

use crate::error::{Result, VocabError};
use crate::store::WordSetStore;
use std::path::Path;
use thai_vocab_common::{parse_record_array, VocabularyRecord, WordSet};
use tracing::debug;

/// One table-style change. Row indices are zero-based.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEdit {
    Append(VocabularyRecord),
    Insert { row: usize, record: VocabularyRecord },
    Remove { row: usize },
    Move { from: usize, to: usize },
    SetField { row: usize, field: String, value: String },
    ClearField { row: usize, field: String },
}

/// Applies `edits` in order and returns the resulting set.
pub fn apply_edits(mut records: WordSet, edits: &[TableEdit]) -> Result<WordSet> {
    for edit in edits {
        match edit {
            TableEdit::Append(record) => {
                require_term(record)?;
                records.push(record.clone());
            }
            TableEdit::Insert { row, record } => {
                require_term(record)?;
                if *row > records.len() {
                    return Err(row_out_of_range(*row, records.len() + 1));
                }
                records.insert(*row, record.clone());
            }
            TableEdit::Remove { row } => {
                check_row(*row, records.len())?;
                records.remove(*row);
            }
            TableEdit::Move { from, to } => {
                check_row(*from, records.len())?;
                check_row(*to, records.len())?;
                let record = records.remove(*from);
                records.insert(*to, record);
            }
            TableEdit::SetField { row, field, value } => {
                check_row(*row, records.len())?;
                if field == "thai" && value.trim().is_empty() {
                    return Err(VocabError::Validation("thai 값은 비울 수 없습니다".into()));
                }
                records[*row].set_field(field, value.clone());
            }
            TableEdit::ClearField { row, field } => {
                check_row(*row, records.len())?;
                if field == "thai" {
                    return Err(VocabError::Validation("thai 값은 비울 수 없습니다".into()));
                }
                records[*row].clear_field(field);
            }
        }
    }
    Ok(records)
}

fn check_row(row: usize, len: usize) -> Result<()> {
    if row >= len {
        return Err(row_out_of_range(row, len));
    }
    Ok(())
}

fn row_out_of_range(row: usize, len: usize) -> VocabError {
    VocabError::Validation(format!(
        "행 번호 {} 이(가) 범위를 벗어났습니다 (1~{})",
        row + 1,
        len
    ))
}

fn require_term(record: &VocabularyRecord) -> Result<()> {
    if !record.has_term() {
        return Err(VocabError::Validation("thai 값이 없는 행은 저장할 수 없습니다".into()));
    }
    Ok(())
}

/// Replaces `name` with `records` as edited in a table. Rows without a
/// term are rejected by the store.
pub fn save_table(store: &WordSetStore, name: &str, records: &[VocabularyRecord]) -> Result<()> {
    store.save(name, records)
}

/// Loads `name`, applies `edits` and saves the result wholesale.
pub fn edit_set(store: &WordSetStore, name: &str, edits: &[TableEdit]) -> Result<WordSet> {
    if !store.exists(name) {
        return Err(VocabError::NotFound(name.to_string()));
    }
    let records = apply_edits(store.load(name)?, edits)?;
    save_table(store, name, &records)?;
    debug!(set = name, edits = edits.len(), records = records.len(), "edited set");
    Ok(records)
}

/// Replaces `name` with uploaded content, which must be a JSON array of
/// records. On a parse failure the stored set is untouched.
pub fn replace_from_upload(store: &WordSetStore, name: &str, content: &str) -> Result<WordSet> {
    store.path_for(name)?;
    let records = parse_record_array(content).map_err(|e| VocabError::parse(e.to_string()))?;
    store.save(name, &records)?;
    debug!(set = name, records = records.len(), "replaced set from upload");
    Ok(records)
}

pub fn replace_from_file(store: &WordSetStore, name: &str, path: &Path) -> Result<WordSet> {
    let content = std::fs::read_to_string(path)?;
    replace_from_upload(store, name, &content)
}
