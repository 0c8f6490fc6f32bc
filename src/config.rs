use crate::ai_provider::AiProvider;
use crate::auth::AdminCredential;
use crate::error::{Result, VocabError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thai_vocab_common::MatchPolicy;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DATA_DIR_ENV: &str = "THAI_VOCAB_DATA_DIR";
pub const ADMIN_PASSWORD_ENV: &str = "THAI_VOCAB_ADMIN_PASSWORD";
pub const CONFIG_PATH_ENV: &str = "THAI_VOCAB_CONFIG";

/// Upper bound on records per generated set.
pub const MAX_WORDS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub provider: AiProvider,
    pub data_dir: PathBuf,
    pub max_words: usize,
    pub default_count: usize,
    /// No client-side timeout when unset.
    pub timeout_seconds: Option<u64>,
    /// Hex SHA-256 of the admin password.
    pub admin_password_sha256: Option<String>,
    pub dedup_policy: MatchPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            temperature: 0.7,
            provider: AiProvider::OpenAi,
            data_dir: PathBuf::from("data"),
            max_words: MAX_WORDS,
            default_count: 50,
            timeout_seconds: None,
            admin_password_sha256: None,
            dedup_policy: MatchPolicy::Exact,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir()
            .ok_or_else(|| VocabError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("thai-vocab").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // environment wins
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(VocabError::MissingApiKey)
    }

    pub fn data_dir(&self) -> PathBuf {
        std::env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.data_dir.clone())
    }

    /// Admin credential from the environment, else from the config file.
    pub fn admin_credential(&self) -> Result<Option<AdminCredential>> {
        if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV) {
            if !password.is_empty() {
                return Ok(Some(AdminCredential::from_password(&password)));
            }
        }
        self.admin_password_sha256
            .as_deref()
            .map(AdminCredential::from_hex)
            .transpose()
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn set_admin_password(&mut self, password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(VocabError::Validation("비밀번호가 비어 있습니다".into()));
        }
        self.admin_password_sha256 = Some(AdminCredential::from_password(password).to_hex());
        self.save()
    }

    /// Configured `max_words`, clamped to `1..=MAX_WORDS`.
    pub fn effective_max_words(&self) -> usize {
        self.max_words.clamp(1, MAX_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.max_words, MAX_WORDS);
        assert!(config.timeout_seconds.is_none());
        assert_eq!(config.dedup_policy, MatchPolicy::Exact);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"model": "gpt-4o", "dedup_policy": "trimmed"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.dedup_policy, MatchPolicy::Trimmed);
        assert_eq!(config.api_base, "https://api.openai.com/v1");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            provider: AiProvider::Claude,
            default_count: 20,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider, AiProvider::Claude);
        assert_eq!(loaded.default_count, 20);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load_from(&path), Err(VocabError::JsonParse(_))));
    }

    #[test]
    fn test_stored_admin_credential() {
        let config = Config {
            admin_password_sha256: Some(AdminCredential::from_password("thai").to_hex()),
            ..Default::default()
        };
        // skipped when the environment override is set
        if std::env::var(ADMIN_PASSWORD_ENV).is_err() {
            let credential = config.admin_credential().unwrap().unwrap();
            assert!(credential.verify("thai"));
        }
    }

    #[test]
    fn test_effective_max_words() {
        let mut config = Config::default();
        config.max_words = 500;
        assert_eq!(config.effective_max_words(), MAX_WORDS);
        config.max_words = 0;
        assert_eq!(config.effective_max_words(), 1);
    }
}
