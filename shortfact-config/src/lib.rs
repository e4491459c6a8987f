//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Precedence: `SHORTFACT_`-prefixed environment variables win over the YAML
//! file; `${VAR}` placeholders inside string values are expanded recursively
//! after the sources are merged.
use config::{Config, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Deserialize)]
pub struct ShortfactConfig {
    pub version: Option<String>,
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub log: LogSettings,
}

/// Credentials and generation knobs for the Gemini backend.
#[derive(Debug, Deserialize)]
pub struct GeminiSettings {
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogSettings {
    /// Overrides the default log sink directory (`SHORTFACT_LOG_DIR` and
    /// `~/.local/share/shortfact` otherwise).
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.into()
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    /// Raised by [`ShortfactConfig::validate`] before any UI is constructed;
    /// a missing credential is fatal at startup, never a runtime error path.
    #[error("gemini.api_key is not set; export GEMINI_API_KEY or edit the config file")]
    MissingApiKey,
}

impl ShortfactConfig {
    /// Startup credential check.
    ///
    /// A key that is blank, or that still carries an unexpanded `${VAR}`
    /// placeholder because the variable was absent, is rejected.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let key = self.gemini.api_key.trim();
        if key.is_empty() || key.contains("${") {
            return Err(SettingsError::MissingApiKey);
        }
        Ok(())
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct ShortfactConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ShortfactConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortfactConfigLoader {
    /// Start with sensible defaults: YAML file + `SHORTFACT_` env overrides.
    ///
    /// ```
    /// use shortfact_config::ShortfactConfigLoader;
    ///
    /// let config = ShortfactConfigLoader::new()
    ///     .with_yaml_str("version: '1'\ngemini:\n  api_key: 'k'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.gemini.model, "gemini-2.5-flash");
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("SHORTFACT").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config, expanding `${VAR}` placeholders along the way.
    ///
    /// ```
    /// use shortfact_config::ShortfactConfigLoader;
    ///
    /// unsafe { std::env::set_var("SHORTFACT_DOCTEST_KEY", "injected-from-env"); }
    ///
    /// let config = ShortfactConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "1"
    /// gemini:
    ///   api_key: "${SHORTFACT_DOCTEST_KEY}"
    ///   model: "gemini-2.5-flash"
    /// "#,
    ///     )
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.gemini.api_key, "injected-from-env");
    /// assert!(config.validate().is_ok());
    ///
    /// unsafe { std::env::remove_var("SHORTFACT_DOCTEST_KEY"); }
    /// ```
    pub fn load(self) -> Result<ShortfactConfig, SettingsError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first so placeholder expansion can
        // walk nested structures before typed deserialization.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: ShortfactConfig = serde_json::from_value(v)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
