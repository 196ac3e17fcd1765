//! Provider configuration from TOML (`[provider]` section)

use scholar_domain::Model;
use serde::{Deserialize, Deserializer, Serialize};

/// Default OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Completion provider settings
///
/// # Example
///
/// ```toml
/// [provider]
/// model = "gpt-4o-mini"
/// base_url = "https://api.openai.com/v1"
/// api_key_env = "OPENAI_API_KEY"
/// temperature = 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Model identifier sent with every request
    #[serde(deserialize_with = "lenient_string")]
    pub model: String,
    /// Base URL of the OpenAI-compatible API
    #[serde(deserialize_with = "lenient_string")]
    pub base_url: String,
    /// Environment variable holding the API key
    #[serde(deserialize_with = "lenient_string")]
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead)
    #[serde(deserialize_with = "lenient_optional_string")]
    pub api_key: Option<String>,
    /// Sampling temperature; provider default when unset
    pub temperature: Option<f32>,
}

/// Scalar that environment variables may have been parsed into
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

// `SCHOLAR_PROVIDER__API_KEY=12345` arrives as a number, not a string
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(Scalar::into_text)
}

fn lenient_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<Scalar>::deserialize(deserializer).map(|value| value.map(Scalar::into_text))
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            temperature: None,
        }
    }
}

impl FileProviderConfig {
    pub fn model(&self) -> Model {
        Model::from_id(self.model.trim())
    }

    /// Resolve the API key: explicit `api_key` first, then `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| lookup(&self.api_key_env))
            .filter(|key| !key.trim().is_empty())
    }
}
