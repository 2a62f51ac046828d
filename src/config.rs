use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::adapters::llm::ModelConfig;
use crate::core::PromptConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub language: Option<String>,
    pub system_prompt: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
            language: None,
            system_prompt: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        for name in [".coderev.yml", ".coderev.yaml"] {
            let config_path = PathBuf::from(name);
            if config_path.exists() {
                return Self::from_file(&config_path);
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".coderev.yml");
            if home_config.exists() {
                return Self::from_file(&home_config);
            }
        }

        Ok(Config::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn merge_with_cli(
        &mut self,
        model: Option<String>,
        api_key: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<usize>,
    ) {
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(key) = api_key {
            self.api_key = Some(key);
        }
        if let Some(temperature) = temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = max_tokens {
            self.max_tokens = max_tokens;
        }
    }

    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model_name: self.model.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn prompt_config(&self) -> PromptConfig {
        let mut prompt_config = PromptConfig::default();
        if let Some(system_prompt) = &self.system_prompt {
            prompt_config.system_prompt = system_prompt.clone();
        }
        prompt_config
    }
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_temperature() -> f32 {
    0.25
}

fn default_max_tokens() -> usize {
    900
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model, "llama3-8b-8192");
        assert_eq!(config.max_tokens, 900);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_from_file_with_partial_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model: llama3-70b-8192\nlanguage: rust").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.model, "llama3-70b-8192");
        assert_eq!(config.language.as_deref(), Some("rust"));
        // Unspecified fields keep their serde defaults.
        assert_eq!(config.temperature, 0.25);
        assert_eq!(config.max_tokens, 900);
    }

    #[test]
    fn test_from_file_rejects_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model: [unclosed").unwrap();

        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_merge_with_cli_overrides() {
        let mut config = Config::default();
        config.merge_with_cli(
            Some("llama3-70b-8192".to_string()),
            Some("key-123".to_string()),
            Some(0.5),
            None,
        );

        assert_eq!(config.model, "llama3-70b-8192");
        assert_eq!(config.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_tokens, 900);
    }

    #[test]
    fn test_prompt_config_uses_custom_system_prompt() {
        let mut config = Config::default();
        config.system_prompt = Some("Custom reviewer persona.".to_string());

        assert_eq!(
            config.prompt_config().system_prompt,
            "Custom reviewer persona."
        );
    }
}
