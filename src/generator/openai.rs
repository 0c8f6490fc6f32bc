//! OpenAI chat completions backend

use super::Generator;
use crate::config::Config;
use crate::error::{Result, VocabError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thai_vocab_common::GenerationPrompt;
use tracing::debug;

/// Chat completions request
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat completions response
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl OpenAiGenerator {
    pub fn new(
        api_key: String,
        api_base: &str,
        model: String,
        temperature: f32,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| VocabError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            endpoint: chat_endpoint(api_base),
            model,
            temperature,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.get_api_key()?,
            &config.api_base,
            config.model.clone(),
            config.temperature,
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Generator for OpenAiGenerator {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String> {
        let body = build_request(&self.model, self.temperature, prompt);
        debug!(model = %self.model, prompt_chars = prompt.user.chars().count(), "calling chat completions");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VocabError::Generation(format!("요청 실패: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| VocabError::Generation(format!("응답 수신 실패: {}", e)))?;

        if !status.is_success() {
            return Err(VocabError::Generation(format!(
                "API 오류 ({}): {}",
                status,
                api_error_message(&text)
            )));
        }

        let content = extract_content(&text)?;
        debug!(response_chars = content.chars().count(), "chat completions returned");
        Ok(content)
    }
}

fn chat_endpoint(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}

fn build_request<'a>(model: &'a str, temperature: f32, prompt: &'a GenerationPrompt) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &prompt.system,
            },
            ChatMessage {
                role: "user",
                content: &prompt.user,
            },
        ],
        temperature,
    }
}

/// First choice's message text.
fn extract_content(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| VocabError::Generation(format!("응답 형식 오류: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| VocabError::Generation("응답에 내용이 없습니다".into()))
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.chars().take(300).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use thai_vocab_common::build_generation_prompt;

    #[test]
    fn test_chat_endpoint() {
        assert_eq!(
            chat_endpoint("https://api.openai.com/v1"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            chat_endpoint("http://localhost:8080/v1/"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_shape() {
        let prompt = build_generation_prompt(&[], 10, None);
        let request = build_request("gpt-4o-mini", 0.7, &prompt);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], prompt.user.as_str());
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_extract_content() {
        let body = r#"{
  "id": "chatcmpl-1",
  "choices": [
    {"index": 0, "message": {"role": "assistant", "content": "[{\"thai\": \"น้ำ\"}]"}, "finish_reason": "stop"}
  ]
}"#;
        assert_eq!(extract_content(body).unwrap(), r#"[{"thai": "น้ำ"}]"#);
    }

    #[test]
    fn test_extract_content_missing() {
        assert!(matches!(
            extract_content(r#"{"choices": []}"#),
            Err(VocabError::Generation(_))
        ));
        assert!(matches!(
            extract_content(r#"{"choices": [{"message": {"content": null}}]}"#),
            Err(VocabError::Generation(_))
        ));
        assert!(matches!(extract_content("<html>"), Err(VocabError::Generation(_))));
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}}"#;
        assert_eq!(api_error_message(body), "You exceeded your current quota");
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_from_config_requires_api_key() {
        if std::env::var(crate::config::API_KEY_ENV).is_ok() {
            return;
        }
        let config = Config::default();
        assert!(matches!(
            OpenAiGenerator::from_config(&config),
            Err(VocabError::MissingApiKey)
        ));
    }
}
