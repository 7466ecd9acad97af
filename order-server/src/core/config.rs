/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden from the environment (a `.env` file is
/// loaded first):
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 8080 | HTTP listen port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | PING_MESSAGE | ping | Body of `GET /api/ping` |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
/// | LOG_DIR | (unset) | Daily rolling log files when set |
/// | BUILDERBOT_BOT_ID | (unset) | Messaging API bot id |
/// | BUILDERBOT_API_KEY | (unset) | Messaging API key |
/// | BUILDERBOT_API_URL | https://app.builderbot.cloud/api/v2 | Messaging API base URL |
/// | NOTIFY_TIMEOUT_MS | 10000 | Messaging API request timeout |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=3000 BUILDERBOT_BOT_ID=... BUILDERBOT_API_KEY=... cargo run -p order-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Message returned by the ping endpoint
    pub ping_message: String,
    /// Request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Directory for rolling log files
    pub log_dir: Option<String>,
    /// Customer notification settings
    pub notifier: NotifierConfig,
}

/// Messaging API credentials and endpoint
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub bot_id: Option<String>,
    pub api_key: Option<String>,
    pub api_url: String,
    /// Request timeout (milliseconds)
    pub timeout_ms: u64,
}

pub const DEFAULT_BUILDERBOT_API_URL: &str = "https://app.builderbot.cloud/api/v2";

impl NotifierConfig {
    /// Load notifier settings from environment variables
    pub fn from_env() -> Self {
        Self {
            bot_id: non_empty_var("BUILDERBOT_BOT_ID"),
            api_key: non_empty_var("BUILDERBOT_API_KEY"),
            api_url: std::env::var("BUILDERBOT_API_URL")
                .unwrap_or_else(|_| DEFAULT_BUILDERBOT_API_URL.into()),
            timeout_ms: std::env::var("NOTIFY_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10_000),
        }
    }

    /// Both credentials present
    pub fn has_credentials(&self) -> bool {
        self.bot_id.is_some() && self.api_key.is_some()
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            bot_id: None,
            api_key: None,
            api_url: DEFAULT_BUILDERBOT_API_URL.into(),
            timeout_ms: 10_000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            ping_message: std::env::var("PING_MESSAGE").unwrap_or_else(|_| "ping".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30_000),
            log_dir: non_empty_var("LOG_DIR"),
            notifier: NotifierConfig::from_env(),
        }
    }

    /// Override the port, keeping everything else
    ///
    /// Used by tests
    pub fn with_port(mut self, http_port: u16) -> Self {
        self.http_port = http_port;
        self
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8080,
            environment: "development".into(),
            ping_message: "ping".into(),
            request_timeout_ms: 30_000,
            log_dir: None,
            notifier: NotifierConfig::default(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http_port, 8080);
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.ping_message, "ping");
        assert!(!config.notifier.has_credentials());
        assert_eq!(config.notifier.api_url, DEFAULT_BUILDERBOT_API_URL);
    }

    #[test]
    fn test_with_port() {
        let config = Config::default().with_port(0);
        assert_eq!(config.http_port, 0);
    }

    #[test]
    fn test_credentials_require_both_values() {
        let config = NotifierConfig {
            bot_id: Some("bot".into()),
            ..NotifierConfig::default()
        };
        assert!(!config.has_credentials());

        let config = NotifierConfig {
            bot_id: Some("bot".into()),
            api_key: Some("key".into()),
            ..NotifierConfig::default()
        };
        assert!(config.has_credentials());
    }
}
