use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use gpui::{App, Global};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

pub const CONFIG_DIRECTORY_NAME: &str = "prosa";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const ENV_PREFIX: &str = "PROSA_";

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1_000;
pub const DEFAULT_TRANSCRIPTION_DELAY_MS: u64 = 500;

/// Read-only application configuration.
///
/// Layers, lowest first: built-in defaults, `config.json`, `PROSA_*` env vars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    #[serde(default = "default_transcription_delay_ms")]
    pub transcription_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            transcription_delay_ms: DEFAULT_TRANSCRIPTION_DELAY_MS,
        }
    }
}

impl Global for AppConfig {}

impl AppConfig {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(CONFIG_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".prosa"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(CONFIG_FILE_NAME)
    }

    /// Loads from the default location, falling back to defaults on error.
    pub fn load() -> Self {
        let path = Self::default_config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!("{error}. using default configuration");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_from_with(path, Env::prefixed(ENV_PREFIX))
    }

    /// Same as [`Self::load_from`] with an explicit environment layer.
    pub fn load_from_with(path: &Path, env: Env) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if path.exists() {
            figment = figment.merge(Json::file(path));
        } else {
            tracing::info!("config file not found at {:?}, using defaults", path);
        }

        figment
            .merge(env)
            .extract::<Self>()
            .context(ExtractSnafu {
                stage: "extract-app-config",
                path: path.to_path_buf(),
            })
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn transcription_delay(&self) -> Duration {
        Duration::from_millis(self.transcription_delay_ms)
    }

    /// Returns the installed global, or defaults when none was installed.
    pub fn current(cx: &App) -> Self {
        cx.try_global::<Self>().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read configuration from {path:?} on `{stage}`: {source}"))]
    Extract {
        stage: &'static str,
        path: PathBuf,
        #[snafu(source(from(figment::Error, Box::new)))]
        source: Box<figment::Error>,
    },
}

fn default_reply_delay_ms() -> u64 {
    DEFAULT_REPLY_DELAY_MS
}

fn default_transcription_delay_ms() -> u64 {
    DEFAULT_TRANSCRIPTION_DELAY_MS
}

#[cfg(test)]
mod tests {
    use std::fs;

    use figment::Jail;

    use super::*;

    /// Environment layer no test process sets.
    fn isolated_env() -> Env {
        Env::prefixed("PROSA_CONFIG_TEST_UNSET_")
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppConfig::load_from_with(&dir.path().join("absent.json"), isolated_env())
            .expect("defaults extract");

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.reply_delay(), Duration::from_secs(1));
        assert_eq!(config.transcription_delay(), Duration::from_millis(500));
    }

    #[test]
    fn file_values_override_defaults_field_by_field() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "reply_delay_ms": 250 }"#).expect("write config");

        let config = AppConfig::load_from_with(&path, isolated_env()).expect("valid config");

        assert_eq!(config.reply_delay_ms, 250);
        assert_eq!(config.transcription_delay_ms, DEFAULT_TRANSCRIPTION_DELAY_MS);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "reply_delay_ms": "soon" }"#).expect("write config");

        let error = AppConfig::load_from_with(&path, isolated_env())
            .expect_err("string delay must fail");

        assert!(matches!(
            error,
            ConfigError::Extract {
                stage: "extract-app-config",
                ..
            }
        ));
    }

    #[test]
    fn prefixed_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"{ "reply_delay_ms": 250, "transcription_delay_ms": 300 }"#,
            )?;
            jail.set_env("PROSA_REPLY_DELAY_MS", "42");

            let path = jail.directory().join(CONFIG_FILE_NAME);
            let config = AppConfig::load_from(&path).expect("env and file merge");

            assert_eq!(config.reply_delay_ms, 42);
            assert_eq!(config.transcription_delay_ms, 300);
            Ok(())
        });
    }
}
