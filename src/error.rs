use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("OpenAI API 키가 없습니다. `thai-vocab config --set-api-key YOUR_KEY` 또는 OPENAI_API_KEY 로 설정하세요")]
    MissingApiKey,

    #[error("입력 오류: {0}")]
    Validation(String),

    #[error("세트를 찾을 수 없습니다: {0}")]
    NotFound(String),

    #[error("단어 생성 실패: {0}")]
    Generation(String),

    #[error("JSON 파싱 실패: {message}")]
    Parse { message: String, raw: Option<String> },

    #[error("저장소 오류: {0}")]
    Store(String),

    #[error("관리자 인증 실패")]
    Unauthorized,

    #[error("JSON 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] thai_vocab_common::Error),
}

impl VocabError {
    pub fn parse(message: impl Into<String>) -> Self {
        VocabError::Parse {
            message: message.into(),
            raw: None,
        }
    }

    /// Raw model output attached to a parse failure, if any.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            VocabError::Parse { raw, .. } => raw.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, VocabError>;
