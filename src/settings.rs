use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};
use url::Url;

use crate::constants::{DEFAULT_SIGNED_URL_TTL_SECS, MAX_IMAGE_BYTES};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Key-value backend. Without it records live in process memory.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Image directory. Without it uploaded images live in process memory.
    #[serde(default)]
    pub blob_dir: Option<String>,

    #[serde(default = "default_public_url")]
    pub public_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Shared bearer credential every client sends.
    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub signing_secret: String,

    #[serde(default = "default_signed_url_ttl")]
    pub signed_url_ttl_secs: u64,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "MotifLAB-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_public_url() -> String {
    "http://127.0.0.1:8080".to_string()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_signed_url_ttl() -> u64 {
    DEFAULT_SIGNED_URL_TTL_SECS
}
fn default_max_upload_bytes() -> usize {
    MAX_IMAGE_BYTES
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true)
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        config.api_key = fill_or_env(config.api_key, "APP_API_KEY")?;
        config.signing_secret = fill_or_env(config.signing_secret, "APP_SIGNING_SECRET")?;

        if config.redis_url.is_none() {
            config.redis_url = env::var("APP_REDIS_URL").ok();
        }
        if config.blob_dir.is_none() {
            config.blob_dir = env::var("APP_BLOB_DIR").ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.api_key.trim().is_empty() {
            errors.push("API_KEY cannot be empty".to_string());
        }
        if self.signing_secret.len() < 32 {
            errors.push("SIGNING_SECRET must be at least 32 characters".to_string());
        }
        if self.signed_url_ttl_secs == 0 {
            errors.push("SIGNED_URL_TTL_SECS must be positive".to_string());
        }
        if self.max_upload_bytes == 0 {
            errors.push("MAX_UPLOAD_BYTES must be positive".to_string());
        }
        if let Err(e) = Url::parse(&self.public_url) {
            errors.push(format!("PUBLIC_URL is not a valid URL: {e}"));
        }
        for origin in self.cors_origins().iter().filter(|o| o.as_str() != "*") {
            if Url::parse(origin).is_err() {
                errors.push(format!("Invalid CORS origin: {origin}"));
            }
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("redis_url", &self.redis_url.as_deref().map(|url| url.redact()))
            .field("blob_dir", &self.blob_dir)
            .field("public_url", &self.public_url)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("api_key", &self.api_key.redact())
            .field("signing_secret", &self.signing_secret.redact())
            .field("signed_url_ttl_secs", &self.signed_url_ttl_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

/// Settings for the client side: where the service lives, the bearer credential
/// and the admin panel password.
#[derive(Deserialize, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub admin_password: String,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            api_key: api_key.into(),
            admin_password: admin_password.into(),
        }
    }

    /// Reads `CLIENT_BASE_URL`, `CLIENT_API_KEY` and `CLIENT_ADMIN_PASSWORD`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Config::builder()
            .add_source(Environment::with_prefix("CLIENT").ignore_empty(true))
            .build()?
            .try_deserialize()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.redact())
            .field("admin_password", &self.admin_password.redact())
            .finish()
    }
}
