use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub genai: GenAiSettings,
    #[serde(default)]
    pub data: DataSettings,
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
pub struct GenAiSettings {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    pub timeout_secs: Option<u64>,
}

fn default_model_id() -> String {
    "granite-13b-instruct-v2".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_requirements_path")]
    pub requirements_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            requirements_path: default_requirements_path(),
        }
    }
}

fn default_requirements_path() -> String {
    "data/university_requirements.csv".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Match-formula weights. The defaults are the documented scoring
/// constants; overriding them changes every scored outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_base_weight")]
    pub base: f64,
    #[serde(default = "default_gpa_weight")]
    pub gpa: f64,
    #[serde(default = "default_language_weight")]
    pub language: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            base: default_base_weight(),
            gpa: default_gpa_weight(),
            language: default_language_weight(),
        }
    }
}

fn default_base_weight() -> f64 { 0.3 }
fn default_gpa_weight() -> f64 { 4.0 }
fn default_language_weight() -> f64 { 2.5 }

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
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with EXCHANGE_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with EXCHANGE_)
            // e.g., EXCHANGE_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("EXCHANGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Apply direct environment overrides for the generation service
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("EXCHANGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply environment overrides for the generation-service credentials.
/// `GENAI_API_KEY` and `GENAI_ENDPOINT` are checked first, then the
/// `EXCHANGE_GENAI__*` forms.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("GENAI_API_KEY")
        .or_else(|_| env::var("EXCHANGE_GENAI__API_KEY"))
        .ok();
    let endpoint = env::var("GENAI_ENDPOINT")
        .or_else(|_| env::var("EXCHANGE_GENAI__ENDPOINT"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("genai.api_key", api_key)?;
    }
    if let Some(endpoint) = endpoint {
        builder = builder.set_override("genai.endpoint", endpoint)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.base, 0.3);
        assert_eq!(weights.gpa, 4.0);
        assert_eq!(weights.language, 2.5);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_default_data_path() {
        let data = DataSettings::default();
        assert_eq!(data.requirements_path, "data/university_requirements.csv");
    }
}
