//! Generation collaborator
//!
//! The pipeline only needs "prompt in, text out". Backends:
//! - `openai`: chat completions over HTTP
//! - `cli`: a local AI CLI (Claude / Codex) run as a subprocess
//!
//! Output is untrusted free text; callers sanitize it.

mod cli_runner;
mod openai;

pub use cli_runner::CliGenerator;
pub use openai::OpenAiGenerator;

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::Result;
use std::future::Future;
use thai_vocab_common::GenerationPrompt;

/// Something that turns a generation prompt into raw model output.
///
/// A single attempt: implementations do not retry.
pub trait Generator {
    fn generate(&self, prompt: &GenerationPrompt) -> impl Future<Output = Result<String>>;
}

/// Generator chosen from the configured provider.
pub enum Backend {
    OpenAi(OpenAiGenerator),
    Cli(CliGenerator),
}

impl Backend {
    pub fn from_config(provider: AiProvider, config: &Config) -> Result<Self> {
        match provider {
            AiProvider::OpenAi => Ok(Backend::OpenAi(OpenAiGenerator::from_config(config)?)),
            AiProvider::Claude | AiProvider::Codex => Ok(Backend::Cli(CliGenerator::new(provider)?)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Backend::OpenAi(generator) => format!("openai ({})", generator.model()),
            Backend::Cli(generator) => generator.provider().to_string(),
        }
    }
}

impl Generator for Backend {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String> {
        match self {
            Backend::OpenAi(generator) => generator.generate(prompt).await,
            Backend::Cli(generator) => generator.generate(prompt).await,
        }
    }
}
