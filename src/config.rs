use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub places: PlacesSettings,
    pub enhancement: EnhancementSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesSettings {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize { 20 }

#[derive(Debug, Clone, Deserialize)]
pub struct EnhancementSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_enhancement_timeout")]
    pub timeout_secs: u64,
}

// LLM latency is high; the search client keeps its own tighter timeout
fn default_enhancement_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_model_weight")]
    pub model: f64,
    #[serde(default = "default_keyword_weight")]
    pub keyword: f64,
    #[serde(default = "default_rating_weight")]
    pub rating: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            model: default_model_weight(),
            keyword: default_keyword_weight(),
            rating: default_rating_weight(),
        }
    }
}

fn default_model_weight() -> f64 { 0.5 }
fn default_keyword_weight() -> f64 { 0.3 }
fn default_rating_weight() -> f64 { 0.2 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with FESTA_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FESTA_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FESTA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FESTA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply provider credentials from bare environment variables
///
/// Deployment platforms commonly expose keys as PLACES_API_KEY and
/// ENHANCEMENT_API_KEY rather than the prefixed form.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let places_key = env::var("PLACES_API_KEY")
        .or_else(|_| env::var("FESTA_PLACES__API_KEY"))
        .ok();
    let enhancement_key = env::var("ENHANCEMENT_API_KEY")
        .or_else(|_| env::var("FESTA_ENHANCEMENT__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(key) = places_key {
        builder = builder.set_override("places.api_key", key)?;
    }
    if let Some(key) = enhancement_key {
        builder = builder.set_override("enhancement.api_key", key)?;
    }

    builder.build()
}
