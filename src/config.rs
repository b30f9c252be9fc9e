//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup; a `.env` file is honored for local development.

use std::env;

/// Which document store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatastoreKind {
    /// Google Cloud Firestore (or the emulator when FIRESTORE_EMULATOR_HOST is set)
    Firestore,
    /// In-process store; data is lost on restart
    Memory,
}

/// Outbound mail settings.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    /// 465 means implicit TLS
    pub smtp_port: u16,
    /// Sender address, also the SMTP username
    pub sender_email: String,
    /// SMTP password (an app password for Gmail)
    pub app_password: String,
    /// When false, sends are logged and skipped
    pub enabled: bool,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    pub datastore: DatastoreKind,
    /// GCP project ID (Firestore only)
    pub gcp_project_id: String,
    pub mail: MailConfig,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 4000,
            datastore: DatastoreKind::Memory,
            gcp_project_id: "test-project".to_string(),
            mail: MailConfig {
                smtp_host: "localhost".to_string(),
                smtp_port: 465,
                sender_email: "reminders@medminder.test".to_string(),
                app_password: "test_password".to_string(),
                enabled: false,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let datastore = match env::var("DATASTORE")
            .unwrap_or_else(|_| "firestore".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "firestore" => DatastoreKind::Firestore,
            "memory" => DatastoreKind::Memory,
            other => return Err(ConfigError::Invalid("DATASTORE", other.to_string())),
        };

        let gcp_project_id = match datastore {
            DatastoreKind::Firestore => {
                env::var("GCP_PROJECT_ID").map_err(|_| ConfigError::Missing("GCP_PROJECT_ID"))?
            }
            DatastoreKind::Memory => {
                env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string())
            }
        };

        let enabled = env::var("MAIL_ENABLED")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        // Credentials are only mandatory when we will actually talk to SMTP.
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match env::var(name) {
                Ok(v) => Ok(v.trim().to_string()),
                Err(_) if !enabled => Ok(String::new()),
                Err(_) => Err(ConfigError::Missing(name)),
            }
        };

        let mail = MailConfig {
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "465".to_string())
                .parse()
                .unwrap_or(465),
            sender_email: required("SENDER_EMAIL")?,
            app_password: required("APP_PASSWORD")?,
            enabled,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .unwrap_or(4000),
            datastore,
            gcp_project_id,
            mail,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
