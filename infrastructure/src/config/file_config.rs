//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use crate::providers::ProviderKind;
use crate::providers::kind::LOCAL_API_KEY;
use armykit_domain::{DecompositionRule, PipelinePolicy, ValidationRule};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,
}

/// Raw `[provider]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Which backend to think through
    pub kind: ProviderKind,
    /// Model name; the provider's preset when unset
    pub model: Option<String>,
    /// Direct API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Endpoint override; required for Azure
    pub base_url: Option<String>,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            model: None,
            api_key: None,
            api_key_env: None,
            base_url: None,
            timeout_seconds: 60,
        }
    }
}

impl FileProviderConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.kind.default_model())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .or_else(|| self.kind.default_base_url())
    }

    /// API key from the config, then from the environment.
    ///
    /// Local servers get a placeholder; remote providers without a key
    /// yield `None`.
    pub fn api_key(&self) -> Option<String> {
        if self.kind.is_local() {
            return Some(
                self.api_key
                    .clone()
                    .unwrap_or_else(|| LOCAL_API_KEY.to_string()),
            );
        }
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }
        let var = self
            .api_key_env
            .as_deref()
            .or_else(|| self.kind.default_key_env())?;
        std::env::var(var).ok().filter(|k| !k.is_empty())
    }
}

/// Raw `[pipeline]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilePipelineConfig {
    pub validation: ValidationRule,
    pub decomposition: DecompositionRule,
}

impl FilePipelineConfig {
    pub fn to_policy(&self) -> PipelinePolicy {
        PipelinePolicy::default()
            .with_validation(self.validation)
            .with_decomposition(self.decomposition)
    }
}

/// Raw `[audit]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    /// Mirror every audit entry to this JSONL file
    pub jsonl_path: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub provider: FileProviderConfig,
    pub pipeline: FilePipelineConfig,
    pub audit: FileAuditConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if let Some(model) = &self.provider.model
            && model.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyModelName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
kind = "deepseek"
model = "deepseek-chat"
api_key = "sk-test"
timeout_seconds = 30

[pipeline]
validation = "verdict"
decomposition = "list"

[audit]
jsonl_path = "/tmp/armykit.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Deepseek);
        assert_eq!(config.provider.model(), "deepseek-chat");
        assert_eq!(config.provider.api_key(), Some("sk-test".to_string()));
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.pipeline.validation, ValidationRule::Verdict);
        assert_eq!(config.pipeline.decomposition, DecompositionRule::List);
        assert!(!config.pipeline.to_policy().is_default());
        assert_eq!(
            config.audit.jsonl_path,
            Some(PathBuf::from("/tmp/armykit.jsonl"))
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[provider]
kind = "ollama"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.model(), "gpt-4o-mini");
        assert_eq!(config.provider.base_url(), Some("http://localhost:11434/v1"));
        assert_eq!(config.provider.api_key(), Some("not-needed".to_string()));
        assert!(config.pipeline.to_policy().is_default());
        assert!(config.audit.jsonl_path.is_none());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        assert_eq!(config.provider.base_url(), Some("https://api.openai.com/v1"));
        assert_eq!(config.provider.timeout_seconds, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_provider_reads_named_env_var() {
        let var = "SHERPA_TEST_KEY_FILE_CONFIG";
        let provider = FileProviderConfig {
            kind: ProviderKind::Sherpa,
            api_key_env: Some(var.to_string()),
            ..Default::default()
        };
        assert_eq!(provider.api_key(), None);

        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var(var, "sherpa-key") };
        assert_eq!(provider.api_key(), Some("sherpa-key".to_string()));
        unsafe { std::env::remove_var(var) };
    }

    #[test]
    fn test_azure_has_no_default_endpoint() {
        let provider = FileProviderConfig {
            kind: ProviderKind::Azure,
            ..Default::default()
        };
        assert_eq!(provider.base_url(), None);
        assert_eq!(provider.model(), "gpt-4");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.provider.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.provider.model = Some("  ".to_string());
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }
}
