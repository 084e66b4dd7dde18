//! Relay configuration
//!
//! Loaded once at startup from (lowest to highest precedence) built-in
//! defaults, an optional `config/relay.*` file, `RELAY__*` environment
//! variables and the conventional `PORT`, `DERIV_APP_ID`,
//! `DEEPSEEK_API_KEY` and `ALLOWED_ORIGINS` variables.

use axum::http::{HeaderValue, Uri};
use relay_llm::DEFAULT_DEEPSEEK_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default Deriv REST root
pub const DEFAULT_DERIV_BASE_URL: &str = "https://api.deriv.com";

/// Default completion model
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A required setting is empty
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// A setting is present but unusable
    #[error("Invalid {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Market/trading provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct DerivConfig {
    /// REST root, e.g. "https://api.deriv.com"
    #[serde(default = "default_deriv_base_url")]
    pub base_url: String,

    /// Application identifier sent as the `App-ID` header
    #[serde(default)]
    pub app_id: String,
}

impl Default for DerivConfig {
    fn default() -> Self {
        Self {
            base_url: default_deriv_base_url(),
            app_id: String::new(),
        }
    }
}

impl fmt::Debug for DerivConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivConfig")
            .field("base_url", &self.base_url)
            .field("app_id", &redact(&self.app_id))
            .finish()
    }
}

/// Completion provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct DeepSeekConfig {
    /// API root, e.g. "https://api.deepseek.com/v1"
    #[serde(default = "default_deepseek_base_url")]
    pub base_url: String,

    /// Bearer token
    #[serde(default)]
    pub api_key: String,

    /// Chat model name
    #[serde(default = "default_deepseek_model")]
    pub model: String,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            base_url: default_deepseek_base_url(),
            api_key: String::new(),
            model: default_deepseek_model(),
        }
    }
}

impl fmt::Debug for DeepSeekConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

/// Relay server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (HTTP)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call the relay from a browser.
    /// Each entry is `scheme://host[:port]`; empty means no cross-origin access.
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Timeout applied to every outbound provider request
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Market/trading provider
    #[serde(default)]
    pub deriv: DerivConfig,

    /// Completion provider
    #[serde(default)]
    pub deepseek: DeepSeekConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_deriv_base_url() -> String {
    DEFAULT_DERIV_BASE_URL.to_string()
}

fn default_deepseek_base_url() -> String {
    DEFAULT_DEEPSEEK_BASE_URL.to_string()
}

fn default_deepseek_model() -> String {
    DEFAULT_DEEPSEEK_MODEL.to_string()
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            deriv: DerivConfig::default(),
            deepseek: DeepSeekConfig::default(),
        }
    }
}

impl RelayConfig {
    /// Load configuration from `.env`, the optional config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let origins = std::env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|raw| split_origins(&raw));

        let cfg = config::Config::builder()
            .add_source(config::File::with_name("config/relay").required(false))
            .add_source(relay_environment())
            .set_override_option("port", std::env::var("PORT").ok())?
            .set_override_option("deriv.app_id", std::env::var("DERIV_APP_ID").ok())?
            .set_override_option("deepseek.api_key", std::env::var("DEEPSEEK_API_KEY").ok())?
            .set_override_option("allowed_origins", origins)?
            .build()?;

        Self::from_config(cfg)
    }

    /// Deserialize and validate an already-built layered configuration
    pub fn from_config(cfg: config::Config) -> Result<Self, ConfigError> {
        let mut config: Self = cfg.try_deserialize()?;
        // Comma separated environment lists arrive untrimmed
        config.allowed_origins = config
            .allowed_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        config.validate()?;
        Ok(config)
    }

    /// Check required secrets, URLs, origins and limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deriv.app_id.trim().is_empty() {
            return Err(ConfigError::Missing("deriv.app_id"));
        }
        if self.deepseek.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("deepseek.api_key"));
        }
        if self.deepseek.model.trim().is_empty() {
            return Err(ConfigError::Missing("deepseek.model"));
        }
        if self.upstream_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "upstream_timeout_secs",
                "must be greater than zero",
            ));
        }

        validate_base_url("deriv.base_url", &self.deriv.base_url)?;
        validate_base_url("deepseek.base_url", &self.deepseek.base_url)?;

        for origin in &self.allowed_origins {
            parse_origin(origin)?;
        }

        Ok(())
    }

    /// Allowed origins as header values for the CORS layer
    pub fn cors_origins(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.allowed_origins.iter().map(|o| parse_origin(o)).collect()
    }

    /// Timeout for outbound provider calls
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `RELAY__*` environment source; `RELAY__ALLOWED_ORIGINS` is a comma separated list
fn relay_environment() -> config::Environment {
    config::Environment::with_prefix("RELAY")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("allowed_origins")
}

/// Split a comma separated origin list, dropping blanks
pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_base_url(field: &str, url: &str) -> Result<(), ConfigError> {
    let uri: Uri = url
        .parse()
        .map_err(|e| ConfigError::invalid(field, format!("'{}' is not a URL: {}", url, e)))?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        _ => {
            return Err(ConfigError::invalid(
                field,
                format!("'{}' must use http or https", url),
            ))
        }
    }

    if uri.authority().is_none() {
        return Err(ConfigError::invalid(field, format!("'{}' has no host", url)));
    }

    Ok(())
}

/// Validate a browser origin (`scheme://host[:port]`) and convert it to a header value.
///
/// The entry is matched byte-for-byte against the `Origin` header, so it must
/// already be in the form browsers serialize: lowercase, no fragment, no empty port.
fn parse_origin(origin: &str) -> Result<HeaderValue, ConfigError> {
    let field = format!("allowed origin '{}'", origin);

    // `Uri` drops fragments silently
    if origin.contains('#') {
        return Err(ConfigError::invalid(&field, "must not contain a fragment"));
    }
    if origin.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(ConfigError::invalid(&field, "scheme and host must be lowercase"));
    }

    let uri: Uri = origin
        .parse()
        .map_err(|_| ConfigError::invalid(&field, "not a valid URI"))?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        _ => return Err(ConfigError::invalid(&field, "scheme must be http or https")),
    }

    let authority = uri
        .authority()
        .ok_or_else(|| ConfigError::invalid(&field, "missing host"))?;
    if authority.host().is_empty() {
        return Err(ConfigError::invalid(&field, "missing host"));
    }
    if authority.as_str().contains('@') {
        return Err(ConfigError::invalid(&field, "must not contain credentials"));
    }
    if authority.as_str().ends_with(':') {
        return Err(ConfigError::invalid(&field, "port must not be empty"));
    }

    // Browsers send origins without a trailing slash
    let has_path = !(uri.path().is_empty() || uri.path() == "/") || origin.ends_with('/');
    if has_path || uri.query().is_some() {
        return Err(ConfigError::invalid(
            &field,
            "must not contain a path or query",
        ));
    }

    HeaderValue::from_str(origin).map_err(|_| ConfigError::invalid(&field, "not a valid header value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn valid_config() -> RelayConfig {
        RelayConfig {
            deriv: DerivConfig {
                app_id: "1089".to_string(),
                ..DerivConfig::default()
            },
            deepseek: DeepSeekConfig {
                api_key: "sk-test".to_string(),
                ..DeepSeekConfig::default()
            },
            ..RelayConfig::default()
        }
    }

    #[test]
    fn test_relay_config_default() {
        let config = RelayConfig::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.upstream_timeout_secs, 30);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.deriv.base_url, "https://api.deriv.com");
        assert_eq!(config.deepseek.base_url, "https://api.deepseek.com/v1");
        assert_eq!(config.deepseek.model, "deepseek-chat");
    }

    #[test]
    fn test_default_config_requires_secrets() {
        let err = RelayConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("deriv.app_id")));

        let mut config = valid_config();
        config.deepseek.api_key = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("deepseek.api_key")));
    }

    #[test]
    fn test_valid_config_passes() {
        let mut config = valid_config();
        config.allowed_origins = vec![
            "https://trader.example.com".to_string(),
            "http://localhost:3000".to_string(),
        ];
        assert!(config.validate().is_ok());
        assert_eq!(config.cors_origins().unwrap().len(), 2);
    }

    #[test]
    fn test_origin_rejections() {
        for bad in [
            "*",
            "index.html",
            "ftp://example.com",
            "https://example.com/",
            "https://example.com/index.html",
            "https://example.com?x=1",
            "https://user@example.com",
            "https://example.com#frag",
            "https://example.com:",
            "HTTPS://Example.COM",
            "https://Trader.example.com",
        ] {
            let mut config = valid_config();
            config.allowed_origins = vec![bad.to_string()];
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { .. }),
                "expected {} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_base_url_must_be_http() {
        let mut config = valid_config();
        config.deriv.base_url = "wss://ws.derivws.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("deriv.base_url"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.upstream_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_config_file_layer() {
        let toml = r#"
            port = 8081
            allowed_origins = ["https://trader.example.com"]
            log_format = "json"

            [deriv]
            app_id = "1089"

            [deepseek]
            api_key = "sk-file"
            model = "deepseek-reasoner"
        "#;

        let cfg = config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap();
        let config = RelayConfig::from_config(cfg).unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.allowed_origins, vec!["https://trader.example.com"]);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.deriv.app_id, "1089");
        assert_eq!(config.deriv.base_url, DEFAULT_DERIV_BASE_URL);
        assert_eq!(config.deepseek.model, "deepseek-reasoner");
    }

    #[test]
    fn test_override_beats_file() {
        let toml = r#"
            port = 8081
            [deriv]
            app_id = "file"
            [deepseek]
            api_key = "sk-file"
        "#;

        let cfg = config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .set_override_option("port", Some("9000"))
            .unwrap()
            .set_override_option("allowed_origins", Some(split_origins("http://a.test, http://b.test")))
            .unwrap()
            .build()
            .unwrap();
        let config = RelayConfig::from_config(cfg).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_environment_layer() {
        let vars = [
            ("RELAY__PORT", "7000"),
            ("RELAY__ALLOWED_ORIGINS", "https://a.test, http://localhost:3000"),
            ("RELAY__DERIV__APP_ID", "1089"),
            ("RELAY__DEEPSEEK__API_KEY", "sk-env"),
        ];

        let cfg = config::Config::builder()
            .add_source(
                relay_environment().source(Some(
                    vars.iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                )),
            )
            .build()
            .unwrap();
        let config = RelayConfig::from_config(cfg).unwrap();

        assert_eq!(config.port, 7000);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.test", "http://localhost:3000"]
        );
        assert_eq!(config.deriv.app_id, "1089");
        assert_eq!(config.deepseek.api_key, "sk-env");
    }

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins(" https://a.test ,,https://b.test, "),
            vec!["https://a.test", "https://b.test"]
        );
        assert!(split_origins("").is_empty());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug_str = format!("{:?}", valid_config());

        assert!(debug_str.contains("RelayConfig"));
        assert!(debug_str.contains("<redacted>"));
        assert!(!debug_str.contains("1089"));
        assert!(!debug_str.contains("sk-test"));
    }

    #[test]
    fn test_helpers() {
        let config = valid_config();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(30));
    }
}
