//! Supported think backends and their presets

use serde::{Deserialize, Serialize};

/// Models offered for the hosted OpenAI-style providers.
const HOSTED_MODELS: &[&str] = &[
    "gpt-3.5-turbo",
    "gpt-3.5-turbo-16k",
    "gpt-4",
    "gpt-4-32k",
    "gpt-4o-mini",
];

/// Header sent by the Azure-hosted providers.
pub const AZURE_API_VERSION: &str = "2024-02-01";

/// API key sent to local servers that do not check it.
pub const LOCAL_API_KEY: &str = "not-needed";

/// Which backend a session thinks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Azure,
    Github,
    Google,
    Deepseek,
    Sherpa,
    Local,
    Gpt4All,
    Ollama,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 9] = [
        ProviderKind::OpenAi,
        ProviderKind::Azure,
        ProviderKind::Github,
        ProviderKind::Google,
        ProviderKind::Deepseek,
        ProviderKind::Sherpa,
        ProviderKind::Local,
        ProviderKind::Gpt4All,
        ProviderKind::Ollama,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Azure => "azure",
            ProviderKind::Github => "github",
            ProviderKind::Google => "google",
            ProviderKind::Deepseek => "deepseek",
            ProviderKind::Sherpa => "sherpa",
            ProviderKind::Local => "local",
            ProviderKind::Gpt4All => "gpt4all",
            ProviderKind::Ollama => "ollama",
        }
    }

    /// Local servers never need an API key.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ProviderKind::Local | ProviderKind::Gpt4All | ProviderKind::Ollama
        )
    }

    /// Whether the backend speaks the OpenAI chat-completions protocol.
    pub fn is_openai_compatible(&self) -> bool {
        !matches!(self, ProviderKind::Google)
    }

    /// Base URL used when none is configured. Azure has none.
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("https://api.openai.com/v1"),
            ProviderKind::Azure => None,
            ProviderKind::Github => Some("https://models.inference.ai.azure.com"),
            ProviderKind::Google => Some("https://generativelanguage.googleapis.com/v1beta"),
            ProviderKind::Deepseek => Some("https://api.deepseek.com/v1"),
            ProviderKind::Sherpa => Some("https://api.sherpacoder.com/v1"),
            ProviderKind::Local | ProviderKind::Ollama => Some("http://localhost:11434/v1"),
            ProviderKind::Gpt4All => Some("http://localhost:4891/v1"),
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Azure => "gpt-4",
            ProviderKind::Deepseek => "deepseek-coder",
            ProviderKind::Sherpa => "sherpa-coder",
            _ => "gpt-4o-mini",
        }
    }

    /// Environment variable holding the API key when `api_key_env` is unset.
    pub fn default_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Azure => Some("AZURE_OPENAI_API_KEY"),
            ProviderKind::Github => Some("GITHUB_TOKEN"),
            ProviderKind::Google => Some("GOOGLE_API_KEY"),
            ProviderKind::Deepseek => Some("DEEPSEEK_API_KEY"),
            ProviderKind::Sherpa => Some("SHERPA_API_KEY"),
            ProviderKind::Local | ProviderKind::Gpt4All | ProviderKind::Ollama => None,
        }
    }

    /// Extra headers every request carries.
    pub fn extra_headers(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            ProviderKind::Azure | ProviderKind::Github => vec![("api-version", AZURE_API_VERSION)],
            _ => Vec::new(),
        }
    }

    /// Fixed model menu, or `None` when the backend decides.
    pub fn predefined_models(&self) -> Option<&'static [&'static str]> {
        match self {
            ProviderKind::OpenAi | ProviderKind::Azure | ProviderKind::Github => {
                Some(HOSTED_MODELS)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| {
                let valid: Vec<&str> = ProviderKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("Unknown provider: {}. Valid: {}", s, valid.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips_every_kind() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert!("anthropic".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_presets() {
        assert_eq!(ProviderKind::default(), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::Deepseek.default_model(), "deepseek-coder");
        assert_eq!(ProviderKind::Azure.default_model(), "gpt-4");
        assert!(ProviderKind::Azure.default_base_url().is_none());
        assert_eq!(
            ProviderKind::Gpt4All.default_base_url(),
            Some("http://localhost:4891/v1")
        );
        assert_eq!(
            ProviderKind::Github.extra_headers(),
            vec![("api-version", "2024-02-01")]
        );
        assert!(ProviderKind::OpenAi.extra_headers().is_empty());
    }

    #[test]
    fn test_local_kinds_need_no_key() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.is_local(), kind.default_key_env().is_none());
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ProviderKind::Gpt4All).unwrap();
        assert_eq!(json, "\"gpt4all\"");
    }
}
