use crate::error::{DiscoError, Result};
use crate::prompt::{DEFAULT_PROMPT_TEMPLATE, PromptTemplate};
use crate::question::{DEFAULT_QUESTIONS, QuestionSet};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_WORKBOOK: &str = "BA_Discovery_Data";
pub const DEFAULT_WORKSHEET: &str = "sessions";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_SCOPES: [&str; 2] = [
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

/// Root of `config.toml`. Every field falls back to its default when absent.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RootConfig {
    pub questions: Vec<String>,
    pub prompt_template: String,
    pub generation: GenerationConfig,
    pub store: StoreConfig,
}

impl RootConfig {
    pub fn question_set(&self) -> Result<QuestionSet> {
        QuestionSet::new(self.questions.clone())
    }

    pub fn prompt(&self) -> Result<PromptTemplate> {
        PromptTemplate::new(self.prompt_template.clone())
    }
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            questions: DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            generation: GenerationConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_URL.to_string(),
            max_tokens: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Spreadsheet name, resolved through Drive unless `spreadsheet_id` is set.
    pub workbook: String,
    /// Tab the rows are appended to.
    pub worksheet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    pub scopes: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            workbook: DEFAULT_WORKBOOK.to_string(),
            worksheet: DEFAULT_WORKSHEET.to_string(),
            spreadsheet_id: None,
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Contents of `secret.json`. Both entries are optional on disk; use
/// [`SecretConfig::require`] to get a complete [`Credentials`].
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAIConfig>,
    #[serde(default)]
    pub gcp_service_account: Option<ServiceAccountKey>,
}

impl SecretConfig {
    /// Fails with a security error naming the first missing credential.
    pub fn require(self) -> Result<Credentials> {
        let openai = self.openai.ok_or_else(|| {
            DiscoError::security(
                "OpenAI API key not found in secret.json or OPENAI_API_KEY",
            )
        })?;
        if openai.api_key.trim().is_empty() {
            return Err(DiscoError::security("OpenAI API key is empty"));
        }

        let service_account = self.gcp_service_account.ok_or_else(|| {
            DiscoError::security(
                "GCP service account not found in secret.json or GOOGLE_APPLICATION_CREDENTIALS",
            )
        })?;
        if service_account.private_key.trim().is_empty()
            || service_account.client_email.trim().is_empty()
        {
            return Err(DiscoError::security(
                "GCP service account is missing client_email or private_key",
            ));
        }

        Ok(Credentials {
            openai,
            service_account,
        })
    }
}

/// Both credentials required at startup.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub openai: OpenAIConfig,
    pub service_account: ServiceAccountKey,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .finish()
    }
}

/// The subset of a Google service-account JSON key that the token exchange needs.
#[derive(Deserialize, Serialize, Clone)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_type", &self.key_type)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}
