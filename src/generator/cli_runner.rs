//! Local AI CLI backend
//!
//! Runs `claude -p <prompt> --output-format text` (or `codex exec <prompt>`)
//! and returns its stdout.

use super::Generator;
use crate::ai_provider::AiProvider;
use crate::error::{Result, VocabError};
use thai_vocab_common::GenerationPrompt;
use tokio::process::Command;
use tracing::debug;

pub struct CliGenerator {
    provider: AiProvider,
    program: &'static str,
}

impl CliGenerator {
    pub fn new(provider: AiProvider) -> Result<Self> {
        let program = provider.command_name().ok_or_else(|| {
            VocabError::Config(format!("{} 는 CLI 프로바이더가 아닙니다", provider))
        })?;
        Ok(Self { provider, program })
    }

    pub fn provider(&self) -> AiProvider {
        self.provider
    }

    fn command(&self, prompt: &str) -> Command {
        // cmd /c on Windows
        let mut command = if cfg!(windows) {
            let mut command = Command::new("cmd");
            command.arg("/c").arg(self.program);
            command
        } else {
            Command::new(self.program)
        };
        command.args(self.provider.command_args(prompt));
        command
    }
}

impl Generator for CliGenerator {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String> {
        let full_prompt = combine_prompt(prompt);
        debug!(program = self.program, prompt_chars = full_prompt.chars().count(), "running AI CLI");

        let output = self
            .command(&full_prompt)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| VocabError::Generation(format!("{} 실행 실패: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VocabError::Generation(format!(
                "{} 실패 (code {:?}): {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        debug!(response_chars = response.chars().count(), "AI CLI returned");
        Ok(response)
    }
}

/// CLI backends take one prompt; the role text goes first.
fn combine_prompt(prompt: &GenerationPrompt) -> String {
    let combined = format!("{}\n\n{}", prompt.system, prompt.user);

    // cmd /c does not survive raw newlines or quotes
    if cfg!(windows) {
        combined.replace('\n', " ").replace('"', "\\\"")
    } else {
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_http_provider() {
        assert!(matches!(
            CliGenerator::new(AiProvider::OpenAi),
            Err(VocabError::Config(_))
        ));
        assert!(CliGenerator::new(AiProvider::Claude).is_ok());
    }

    #[test]
    fn test_combine_prompt_puts_system_first() {
        let prompt = GenerationPrompt {
            system: "role".into(),
            user: "request".into(),
            count: 5,
        };
        let combined = combine_prompt(&prompt);
        assert!(combined.starts_with("role"));
        assert!(combined.ends_with("request"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_program_is_generation_error() {
        let generator = CliGenerator {
            provider: AiProvider::Claude,
            program: "thai-vocab-no-such-program",
        };
        let prompt = GenerationPrompt {
            system: String::new(),
            user: "x".into(),
            count: 1,
        };
        let result = generator.generate(&prompt).await;
        assert!(matches!(result, Err(VocabError::Generation(_))));
    }
}
