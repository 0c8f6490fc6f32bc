//! Prompt building for set generation
//!
//! - SYSTEM_PROMPT: role message for chat-style models
//! - DEFAULT_TOPICS: themes mixed when no theme is requested
//! - build_generation_prompt: full request embedding every known term

/// Role message sent ahead of the generation request.
pub const SYSTEM_PROMPT: &str = "당신은 한국인 학습자를 위한 태국어 단어 생성기입니다. 항상 JSON 배열만 출력합니다.";

/// Themes mixed into a generated set when the caller gives none.
pub const DEFAULT_TOPICS: &[&str] = &[
    "학교에서 자주 쓰는 단어",
    "10대 학생들의 일상 대화에 쓰는 단어",
    "태국 여행 시 유용한 단어",
];

/// A request for the generation collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPrompt {
    pub system: String,
    pub user: String,
    /// Number of records asked for.
    pub count: usize,
}

/// Builds the generation request.
///
/// # Arguments
/// * `known` - every term already stored; the model is told to avoid them
/// * `count` - number of new records to ask for
/// * `theme` - optional theme replacing [`DEFAULT_TOPICS`]
pub fn build_generation_prompt(known: &[String], count: usize, theme: Option<&str>) -> GenerationPrompt {
    let known_json = serde_json::to_string(known).unwrap_or_else(|_| "[]".to_string());

    let topics = match theme.map(str::trim).filter(|t| !t.is_empty()) {
        Some(theme) => format!("- {}", theme),
        None => DEFAULT_TOPICS
            .iter()
            .map(|t| format!("- {}", t))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    let user = format!(
        r#"너는 태국어 단어를 JSON 형식으로 생성하는 도우미야.

이미 존재하는 태국어 단어 목록:
{known_json}

## 규칙
- 위 목록에 있는 단어는 절대 생성하지 마라.
- 철자가 같은 단어도 생성 금지.
- 같은 응답 안에서도 단어를 반복하지 마라.

## 출력 형식
새로운 태국어 단어 {count}개를 아래 형식의 JSON 배열로 출력해:
[
  {{
    "thai": "태국어 단어",
    "transliteration": "로마자 표기",
    "pron_kor": "한국어 발음 표기",
    "pos": "품사",
    "meaning_ko": "한국어 뜻",
    "example_th": "태국어 예문",
    "example_ko": "예문 해석"
  }}
]

## 주제 (섞어서 생성)
{topics}

설명 없이 JSON 배열만 정확히 반환해."#
    );

    GenerationPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_known_terms_as_json() {
        let known = vec!["สวัสดี".to_string(), "ขอบคุณ".to_string()];
        let prompt = build_generation_prompt(&known, 20, None);
        assert!(prompt.user.contains(r#"["สวัสดี","ขอบคุณ"]"#));
        assert_eq!(prompt.count, 20);
    }

    #[test]
    fn test_prompt_states_count_and_shape() {
        let prompt = build_generation_prompt(&[], 15, None);
        assert!(prompt.user.contains("15개"));
        assert!(prompt.user.contains("[]"));
        for field in crate::types::KNOWN_FIELDS {
            assert!(prompt.user.contains(&format!("\"{}\"", field)), "missing {}", field);
        }
        assert!(prompt.user.contains("JSON 배열만"));
    }

    #[test]
    fn test_prompt_default_topics() {
        let prompt = build_generation_prompt(&[], 10, None);
        for topic in DEFAULT_TOPICS {
            assert!(prompt.user.contains(topic));
        }
    }

    #[test]
    fn test_prompt_custom_theme() {
        let prompt = build_generation_prompt(&[], 10, Some("음식과 식당"));
        assert!(prompt.user.contains("- 음식과 식당"));
        assert!(!prompt.user.contains(DEFAULT_TOPICS[0]));

        let blank = build_generation_prompt(&[], 10, Some("  "));
        assert!(blank.user.contains(DEFAULT_TOPICS[0]));
    }

    #[test]
    fn test_system_prompt() {
        let prompt = build_generation_prompt(&[], 10, None);
        assert_eq!(prompt.system, SYSTEM_PROMPT);
    }
}
