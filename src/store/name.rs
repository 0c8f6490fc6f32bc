//! Set name validation
//!
//! A set name doubles as the file stem of its JSON file, so it must be safe
//! to use as a single path component on every platform.

use crate::error::{Result, VocabError};

pub const MAX_NAME_CHARS: usize = 100;

const FORBIDDEN_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// Device names Windows reserves regardless of extension.
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Checks that `name` can be used as a storage key.
pub fn validate_set_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(VocabError::Validation("세트 이름을 입력하세요".into()));
    }
    if name.trim() != name {
        return Err(VocabError::Validation(format!(
            "세트 이름 앞뒤에 공백을 넣을 수 없습니다: {:?}",
            name
        )));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(VocabError::Validation(format!(
            "세트 이름은 {}자 이하여야 합니다",
            MAX_NAME_CHARS
        )));
    }
    if name.starts_with('.') {
        return Err(VocabError::Validation(format!(
            "세트 이름은 '.' 으로 시작할 수 없습니다: {}",
            name
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| FORBIDDEN_CHARS.contains(c) || c.is_control())
    {
        return Err(VocabError::Validation(format!(
            "세트 이름에 사용할 수 없는 문자가 있습니다: {:?}",
            c
        )));
    }
    let base = name.split('.').next().unwrap_or(name).trim_end();
    if RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(base)) {
        return Err(VocabError::Validation(format!(
            "세트 이름으로 예약된 이름은 쓸 수 없습니다: {}",
            name
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_unicode_names() {
        assert!(validate_set_name("demo").is_ok());
        assert!(validate_set_name("여행 단어 1").is_ok());
        assert!(validate_set_name("คำศัพท์").is_ok());
        assert!(validate_set_name("day-01_basic").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_padded() {
        assert!(validate_set_name("").is_err());
        assert!(validate_set_name("   ").is_err());
        assert!(validate_set_name(" demo").is_err());
        assert!(validate_set_name("demo\t").is_err());
    }

    #[test]
    fn test_rejects_path_like_names() {
        for name in ["../secret", "a/b", "a\\b", ".", "..", ".hidden", "C:", "x*y", "what?"] {
            let result = validate_set_name(name);
            assert!(
                matches!(result, Err(VocabError::Validation(_))),
                "accepted {:?}",
                name
            );
        }
    }

    #[test]
    fn test_rejects_windows_device_names() {
        for name in ["CON", "nul", "Com1", "lpt9", "aux.backup", "PRN .old"] {
            let result = validate_set_name(name);
            assert!(
                matches!(result, Err(VocabError::Validation(_))),
                "accepted {:?}",
                name
            );
        }
        assert!(validate_set_name("CONSOLE").is_ok());
        assert!(validate_set_name("com10").is_ok());
        assert!(validate_set_name("my con").is_ok());
    }

    #[test]
    fn test_rejects_control_chars_and_long_names() {
        assert!(validate_set_name("a\nb").is_err());
        assert!(validate_set_name(&"ก".repeat(MAX_NAME_CHARS)).is_ok());
        assert!(validate_set_name(&"ก".repeat(MAX_NAME_CHARS + 1)).is_err());
    }
}
