//! Word set store
//!
//! One pretty-printed JSON file per set, `<name>.json`, directly inside the
//! data directory. Every call reads the filesystem; nothing is cached, so
//! the store always reflects the current files. Concurrent writers are not
//! coordinated: the last save wins.

mod name;

pub use name::{validate_set_name, MAX_NAME_CHARS};

use crate::error::{Result, VocabError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thai_vocab_common::{VocabularyRecord, WordSet};
use tracing::{debug, warn};
use walkdir::WalkDir;

const SET_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct WordSetStore {
    dir: PathBuf,
}

impl WordSetStore {
    /// The directory is created on the first save, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `name`. Fails for names unsafe as a file stem.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let name = validate_set_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, SET_EXTENSION)))
    }

    /// Set names, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(SET_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match validate_set_name(stem) {
                Ok(_) => names.push(stem.to_string()),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping file with an invalid set name"),
            }
        }

        names.sort();
        Ok(names)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Records of `name`; a missing set reads as empty.
    ///
    /// Entries without a usable `thai` term are skipped. A file that is not
    /// a JSON array is reported rather than treated as empty, so a later
    /// save cannot silently discard it.
    pub fn load(&self, name: &str) -> Result<WordSet> {
        let path = self.path_for(name)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            VocabError::Store(format!("{} 파일이 올바른 JSON이 아닙니다: {}", path.display(), e))
        })?;
        let serde_json::Value::Array(items) = value else {
            return Err(VocabError::Store(format!(
                "{} 파일이 JSON 배열이 아닙니다",
                path.display()
            )));
        };

        let total = items.len();
        let records: WordSet = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let record = VocabularyRecord::from_value(item);
                if record.is_none() {
                    warn!(set = name, index, "skipping entry without a thai term");
                }
                record
            })
            .collect();

        debug!(set = name, loaded = records.len(), total, "loaded set");
        Ok(records)
    }

    /// Every set with its records, in list order.
    pub fn load_all(&self) -> Result<Vec<(String, WordSet)>> {
        self.list()?
            .into_iter()
            .map(|name| {
                let records = self.load(&name)?;
                Ok((name, records))
            })
            .collect()
    }

    /// Replaces the content of `name`.
    ///
    /// Every record must carry a term; `load` would not return one without
    /// it. Nothing is written if any record fails that check.
    ///
    /// The new content is written to a temporary file next to the target
    /// and renamed over it, so readers see either the old or the new set.
    pub fn save(&self, name: &str, records: &[VocabularyRecord]) -> Result<()> {
        let path = self.path_for(name)?;
        if let Some(index) = records.iter().position(|r| !r.has_term()) {
            return Err(VocabError::Validation(format!(
                "{}번째 단어에 thai 값이 없습니다",
                index + 1
            )));
        }
        std::fs::create_dir_all(&self.dir)?;

        let mut json = serde_json::to_string_pretty(records)?;
        json.push('\n');

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!(set = name, records = records.len(), path = %path.display(), "saved set");
        Ok(())
    }

    /// Creates `name` empty, or holding one placeholder record. An existing
    /// set of that name is overwritten.
    pub fn create(&self, name: &str, placeholder: bool) -> Result<WordSet> {
        let records = if placeholder {
            vec![placeholder_record()]
        } else {
            Vec::new()
        };
        self.save(name, &records)?;
        Ok(records)
    }

    /// Removes `name`. Returns `false` when there was nothing to delete;
    /// a missing set is not an error.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(set = name, "deleted set");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(set = name, "delete requested for a set that does not exist");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Sample row for a freshly created set, to be edited by hand.
pub fn placeholder_record() -> VocabularyRecord {
    VocabularyRecord::new("ตัวอย่าง")
        .with("transliteration", "tua-yang")
        .with("pron_kor", "뚜어양")
        .with("pos", "명사")
        .with("meaning_ko", "예시")
}
