//! Vocabulary record types
//!
//! - VocabularyRecord: one Thai term with optional annotations
//! - WordSet: the ordered records of one named set

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Recognised record fields, in the order they are written to disk.
pub const KNOWN_FIELDS: &[&str] = &[
    "thai",
    "transliteration",
    "pron_kor",
    "pos",
    "meaning_ko",
    "example_th",
    "example_ko",
];

/// Ordered records of one set. Position is the card index.
pub type WordSet = Vec<VocabularyRecord>;

/// One vocabulary entry.
///
/// Only `thai` is required. Optional fields default to the empty string and
/// are omitted when written if empty. Unknown keys are kept in `extra` and
/// written back after the known fields, so hand-edited files survive a
/// load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub thai: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub transliteration: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub pron_kor: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub pos: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub meaning_ko: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub example_th: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub example_ko: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VocabularyRecord {
    pub fn new(thai: impl Into<String>) -> Self {
        Self {
            thai: thai.into(),
            ..Default::default()
        }
    }

    /// Builder-style field setter, see [`VocabularyRecord::set_field`].
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Converts one JSON value into a record.
    ///
    /// Returns `None` unless the value is an object carrying a non-empty
    /// `thai` entry.
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.as_object().is_some_and(|obj| obj.contains_key("thai")) {
            return None;
        }
        serde_json::from_value::<Self>(value)
            .ok()
            .filter(Self::has_term)
    }

    /// Whether the record carries a usable Thai term.
    pub fn has_term(&self) -> bool {
        !self.thai.trim().is_empty()
    }

    /// Field value as text. Missing fields read as empty.
    pub fn field(&self, name: &str) -> String {
        if let Some(slot) = self.known_slot(name) {
            return slot.clone();
        }
        match self.extra.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Sets a known field, or stores the value under `extra`.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.known_slot_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.extra.insert(name.to_string(), Value::String(value));
            }
        }
    }

    /// Empties a known field or removes an extra one.
    pub fn clear_field(&mut self, name: &str) {
        match self.known_slot_mut(name) {
            Some(slot) => slot.clear(),
            None => {
                self.extra.shift_remove(name);
            }
        }
    }

    fn known_slot(&self, name: &str) -> Option<&String> {
        match name {
            "thai" => Some(&self.thai),
            "transliteration" => Some(&self.transliteration),
            "pron_kor" => Some(&self.pron_kor),
            "pos" => Some(&self.pos),
            "meaning_ko" => Some(&self.meaning_ko),
            "example_th" => Some(&self.example_th),
            "example_ko" => Some(&self.example_ko),
            _ => None,
        }
    }

    fn known_slot_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "thai" => Some(&mut self.thai),
            "transliteration" => Some(&mut self.transliteration),
            "pron_kor" => Some(&mut self.pron_kor),
            "pos" => Some(&mut self.pos),
            "meaning_ko" => Some(&mut self.meaning_ko),
            "example_th" => Some(&mut self.example_th),
            "example_ko" => Some(&mut self.example_ko),
            _ => None,
        }
    }
}

/// Accepts any JSON scalar for a text field; `null` reads as empty.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
