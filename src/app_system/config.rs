//! Application configuration, read from CLI flags and environment variables.

use clap::{Args, Parser};
use tracing::warn;

/// Placeholder prefix used when a backend setting is not provided.
const PLACEHOLDER_PREFIX: &str = "mock-";

/// Food delivery core configuration
#[derive(Debug, Parser)]
#[command(name = "food-delivery", about = "Food delivery ordering core", long_about = None)]
pub struct AppConfig {
    /// Realtime store connection settings.
    #[command(flatten)]
    pub backend: BackendConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Store actor settings.
    #[command(flatten)]
    pub actors: ActorConfig,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Connection parameters of the hosted realtime backend.
#[derive(Debug, Args)]
pub struct BackendConfig {
    #[arg(long, env = "BACKEND_API_KEY", default_value = "mock-api-key", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "BACKEND_AUTH_DOMAIN", default_value = "mock-auth-domain")]
    pub auth_domain: String,

    #[arg(long, env = "BACKEND_DATABASE_URL", default_value = "mock-database-url")]
    pub database_url: String,

    #[arg(long, env = "BACKEND_PROJECT_ID", default_value = "mock-project-id")]
    pub project_id: String,

    #[arg(long, env = "BACKEND_STORAGE_BUCKET", default_value = "mock-storage-bucket")]
    pub storage_bucket: String,

    #[arg(long, env = "BACKEND_MESSAGING_SENDER_ID", default_value = "mock-messaging-sender-id")]
    pub messaging_sender_id: String,

    #[arg(long, env = "BACKEND_APP_ID", default_value = "mock-app-id")]
    pub app_id: String,
}

impl BackendConfig {
    /// Names of the settings still holding their placeholder value.
    pub fn placeholders(&self) -> Vec<&'static str> {
        [
            ("BACKEND_API_KEY", &self.api_key),
            ("BACKEND_AUTH_DOMAIN", &self.auth_domain),
            ("BACKEND_DATABASE_URL", &self.database_url),
            ("BACKEND_PROJECT_ID", &self.project_id),
            ("BACKEND_STORAGE_BUCKET", &self.storage_bucket),
            ("BACKEND_MESSAGING_SENDER_ID", &self.messaging_sender_id),
            ("BACKEND_APP_ID", &self.app_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.starts_with(PLACEHOLDER_PREFIX))
        .map(|(name, _)| name)
        .collect()
    }

    /// Log a warning when the system runs against placeholder settings.
    pub fn warn_on_placeholders(&self) {
        let missing = self.placeholders();
        if !missing.is_empty() {
            warn!(?missing, "Backend settings not provided, using placeholders");
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Store actor settings.
#[derive(Debug, Args)]
pub struct ActorConfig {
    /// Request buffer of every store actor
    #[arg(long, env = "ACTOR_BUFFER_SIZE", default_value_t = 32)]
    pub buffer_size: usize,
}
