use anyhow::{bail, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => bail!("Invalid environment type '{}'. Must be development or production", other),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for the generative-text integration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub api_title: String,
    pub version: String,
    pub app_name: String,
    pub api_debug: bool,
    pub log_level: String,
    pub logging_enabled: bool,
    pub log_file: PathBuf,
    pub gemini: GeminiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: Environment::Development,
            api_title: "NewLife API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            app_name: "NewLife 2.0".to_string(),
            api_debug: false,
            log_level: "info".to_string(),
            logging_enabled: false,
            log_file: PathBuf::from("app.log"),
            gemini: GeminiConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = AppConfig::default();

        let host = env::var("API_HOST").unwrap_or(defaults.host);
        let port = match env::var("API_PORT") {
            Ok(port) => port.parse()?,
            Err(_) => defaults.port,
        };
        let environment = match env::var("ENVIRONMENT_TYPE") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.environment,
        };
        let api_title = env::var("API_TITLE").unwrap_or(defaults.api_title);
        let version = env::var("VERSION").unwrap_or(defaults.version);
        let app_name = env::var("APP_NAME").unwrap_or(defaults.app_name);
        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);
        let log_file = env::var("LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        let gemini = GeminiConfig {
            api_key: env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
        };

        Ok(AppConfig {
            host,
            port,
            environment,
            api_title,
            version,
            app_name,
            api_debug: env_flag("API_DEBUG"),
            log_level,
            logging_enabled: env_flag("LOGGING_ENABLED"),
            log_file,
            gemini,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Title shown in the API docs, e.g. `NewLife API | development`.
    pub fn docs_title(&self) -> String {
        format!("{} | {}", self.api_title, self.environment)
    }

    /// Filter used when `RUST_LOG` is not set. `API_DEBUG` forces debug output.
    pub fn default_log_filter(&self) -> String {
        if self.api_debug {
            "debug".to_string()
        } else {
            self.log_level.clone()
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
