use config::{Config, Environment};
use log::{info, warn};
use serde::Deserialize;

/// Runtime settings for the engine. Defaults work offline (no API key means
/// the AI layer serves canned material), and every field can be overridden
/// through `PREPMATE_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the chat-completion endpoint.
    pub api_base_url: String,
    /// Bearer token for the hosted model. Absent in offline/practice mode.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Questions per interview session. Unset means each topic's own
    /// `question_count` applies.
    pub question_count: Option<u32>,
    /// Directory holding the bundled JSON content files.
    pub asset_dir: String,
    /// Path of the local SQLite database.
    pub db_path: String,
    /// Per-request timeout, seconds.
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let builder = Config::builder()
            .set_default("api_base_url", "https://api.openai.com/v1")?
            .set_default("model", "gpt-4")?
            .set_default("asset_dir", "assets")?
            .set_default("db_path", "prepmate.db")?
            .set_default("request_timeout_secs", 30i64)?
            .add_source(Environment::with_prefix("PREPMATE"));

        let mut settings: Settings = builder.build()?.try_deserialize()?;

        // OPENAI_API_KEY is the conventional variable; honor it when the
        // prefixed one is not set.
        if settings.api_key.is_none() {
            settings.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        match &settings.api_key {
            Some(_) => info!("API key configured, live model calls enabled"),
            None => warn!("No API key found - interview will use built-in questions and feedback"),
        }

        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4".to_string(),
            question_count: None,
            asset_dir: "assets".to_string(),
            db_path: "prepmate.db".to_string(),
            request_timeout_secs: 30,
        }
    }
}
