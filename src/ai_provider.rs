use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Where generation requests are sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// OpenAI chat completions API
    #[default]
    #[value(name = "openai")]
    OpenAi,
    /// Local Claude CLI
    Claude,
    /// Local Codex CLI
    Codex,
}

impl AiProvider {
    /// Executable for CLI-backed providers.
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            AiProvider::OpenAi => None,
            AiProvider::Claude => Some("claude"),
            AiProvider::Codex => Some("codex"),
        }
    }

    /// Arguments passing `prompt` to the CLI non-interactively.
    pub fn command_args(&self, prompt: &str) -> Vec<String> {
        match self {
            AiProvider::OpenAi => Vec::new(),
            AiProvider::Claude => vec![
                "-p".into(),
                prompt.into(),
                "--output-format".into(),
                "text".into(),
            ],
            AiProvider::Codex => vec!["exec".into(), prompt.into()],
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiProvider::OpenAi => write!(f, "openai"),
            AiProvider::Claude => write!(f, "claude"),
            AiProvider::Codex => write!(f, "codex"),
        }
    }
}
