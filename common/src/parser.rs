//! Model response sanitizer
//!
//! Extracts vocabulary records from text returned by a generative model.
//! The model is asked for a bare JSON array but may wrap it in prose or
//! code fences, truncate it, or emit trailing commas, so parsing runs in
//! two stages:
//!
//! 1. strict: the whole text (or its fenced / bracketed JSON part) parses as
//!    an array whose every element is an object with a `thai` key; elements
//!    whose term is empty are dropped
//! 2. tolerant: every balanced `{...}` object is parsed on its own and the
//!    usable ones are kept; an object that is not a record is searched for
//!    records inside it

use crate::error::{Error, Result};
use crate::types::VocabularyRecord;
use regex::Regex;
use serde_json::Value;

lazy_static::lazy_static! {
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",\s*([}\]])").unwrap();
}

/// Extracts the JSON part of a model response.
///
/// Lookup order:
/// 1. a ```` ```json ... ``` ```` block
/// 2. any other fenced block
/// 3. the outermost `[...]` span
///
/// # Examples
/// ```
/// use thai_vocab_common::extract_json;
///
/// let response = "Here you go: [{\"thai\": \"น้ำ\"}]";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "[{\"thai\": \"น้ำ\"}]");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(block) = fenced_block(response, "```json") {
        return Ok(block);
    }
    if let Some(block) = fenced_block(response, "```") {
        return Ok(block);
    }

    if let (Some(start), Some(end)) = (response.find('['), response.rfind(']')) {
        if end > start {
            return Ok(&response[start..=end]);
        }
    }

    Err(Error::Parse("no JSON found in response".into()))
}

fn fenced_block<'a>(response: &'a str, marker: &str) -> Option<&'a str> {
    let start = response.find(marker)? + marker.len();
    let end = start + response[start..].find("```")?;
    Some(response[start..end].trim())
}

/// Extracts every usable record from raw model output. Never fails; the
/// worst case is an empty vector.
pub fn sanitize_records(raw: &str) -> Vec<VocabularyRecord> {
    if let Some(records) = parse_strict(raw.trim()) {
        return records;
    }
    if let Some(records) = extract_json(raw).ok().and_then(parse_strict) {
        return records;
    }
    scan_objects(raw)
}

fn parse_strict(text: &str) -> Option<Vec<VocabularyRecord>> {
    let values: Vec<Value> = serde_json::from_str(text).ok()?;
    if !values
        .iter()
        .all(|v| v.as_object().is_some_and(|obj| obj.contains_key("thai")))
    {
        return None;
    }
    Some(
        values
            .into_iter()
            .filter_map(VocabularyRecord::from_value)
            .collect(),
    )
}

fn scan_objects(raw: &str) -> Vec<VocabularyRecord> {
    let mut records = Vec::new();
    collect_objects(raw, &mut records);
    records
}

fn collect_objects(text: &str, records: &mut Vec<VocabularyRecord>) {
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        let candidate = &rest[start..];
        match object_end(candidate) {
            Some(end) => {
                let object = &candidate[..end];
                match parse_object(object).and_then(VocabularyRecord::from_value) {
                    Some(record) => records.push(record),
                    // wrapper or broken object: look inside
                    None => collect_objects(&object[1..end - 1], records),
                }
                rest = &candidate[end..];
            }
            // unclosed: skip the brace and keep scanning
            None => rest = &candidate[1..],
        }
    }
}

/// Byte length of the balanced object at the start of `text`, which must
/// begin with `{`. Braces inside string literals do not count.
fn object_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok().or_else(|| {
        let repaired = TRAILING_COMMA_RE.replace_all(text, "$1");
        serde_json::from_str(&repaired).ok()
    })
}

/// Parses text that must be a JSON array of records, as required for an
/// uploaded set file. Any other shape is an error naming the first bad
/// element.
pub fn parse_record_array(text: &str) -> Result<Vec<VocabularyRecord>> {
    let value: Value = serde_json::from_str(text.trim_start_matches('\u{feff}'))?;
    let Value::Array(items) = value else {
        return Err(Error::Parse("top-level value is not a JSON array".into()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(Error::Parse(format!("element {} is not an object", index)));
            }
            VocabularyRecord::from_value(item).ok_or_else(|| {
                Error::Parse(format!("element {} has no usable \"thai\" value", index))
            })
        })
        .collect()
}
