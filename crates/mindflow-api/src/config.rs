use config::{builder::DefaultState, Config as ConfigLoader, ConfigBuilder, ConfigError, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// URI scheme selecting the in-process store instead of MongoDB
pub const MEMORY_STORE_URI: &str = "memory://";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub mongodb: MongoDbConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tools: ToolsConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub mongodb_uri: String,
    #[serde(default)]
    pub brave_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    pub database: String,
    pub pool_size: u32,
    pub timeout_ms: u64,
}

impl MongoDbConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
    /// Use live web search when a Brave API key is present
    #[serde(default = "default_true")]
    pub search_enabled: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            search_enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Environment variables that override single config keys
const ENV_OVERRIDES: [(&str, &str); 9] = [
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("CORS_ENABLED", "cors.enabled"),
    ("MONGODB_DATABASE", "mongodb.database"),
    ("MONGODB_POOL_SIZE", "mongodb.pool_size"),
    ("MONGODB_TIMEOUT_MS", "mongodb.timeout_ms"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
    ("TOOLS_SEARCH_ENABLED", "tools.search_enabled"),
];

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (SERVER_, MONGODB_, LOG_, CORS_, TOOLS_ prefixes)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());
        let lookup = |name: &str| std::env::var(name).ok();

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));
        let builder = apply_env_overrides(builder, lookup)?;

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        // Secrets come from ENV only
        cfg.mongodb_uri = lookup("MONGODB_URI").ok_or_else(|| {
            ConfigError::Message("MONGODB_URI environment variable is required".to_string())
        })?;
        cfg.brave_api_key = lookup("BRAVE_API_KEY").filter(|key| !key.trim().is_empty());

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Whether threads live in the in-process store
    pub fn uses_memory_store(&self) -> bool {
        self.mongodb_uri.starts_with(MEMORY_STORE_URI)
    }

    /// Brave key to use for resource search, if live search is on
    pub fn search_api_key(&self) -> Option<String> {
        if self.tools.search_enabled {
            self.brave_api_key.clone()
        } else {
            None
        }
    }
}

fn apply_env_overrides(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (var, key) in ENV_OVERRIDES {
        builder = builder.set_override_option(key, lookup(var))?;
    }

    if let Some(origins) = lookup("CORS_ORIGINS") {
        let origins: Vec<String> = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        builder = builder.set_override("cors.origins", origins)?;
    }

    Ok(builder)
}
