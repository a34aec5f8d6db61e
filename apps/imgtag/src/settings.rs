use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use shared::domain::MalformedPolicy;
use thiserror::Error;

pub const LOCAL_SETTINGS_FILE: &str = "imgtag.toml";
pub const ENV_ON_MALFORMED: &str = "IMGTAG__ON_MALFORMED";
pub const ENV_OUTPUT_FORMAT: &str = "IMGTAG__OUTPUT_FORMAT";
pub const ENV_LOG_FILTER: &str = "IMGTAG__LOG_FILTER";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Converted lines joined the same way they are copied.
    #[default]
    Text,
    /// Lines plus malformed-directive diagnostics as a JSON object.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'; expected 'text' or 'json'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub on_malformed: MalformedPolicy,
    pub output_format: OutputFormat,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            on_malformed: MalformedPolicy::Passthrough,
            output_format: OutputFormat::Text,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid settings file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidOverride {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Resolved settings plus the file they were read from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: Option<PathBuf>,
}

/// Defaults, then the first settings file found, then `IMGTAG__*` environment overrides.
///
/// An explicit `config_path` must exist; the implicit locations are skipped when absent.
pub fn load_settings(config_path: Option<&Path>) -> Result<LoadedSettings, SettingsError> {
    load_settings_with(config_path, &default_settings_paths(), |key| {
        std::env::var(key).ok()
    })
}

pub(crate) fn load_settings_with(
    config_path: Option<&Path>,
    fallback_paths: &[PathBuf],
    env: impl Fn(&str) -> Option<String>,
) -> Result<LoadedSettings, SettingsError> {
    let source = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => fallback_paths.iter().find(|path| path.is_file()).cloned(),
    };
    let mut settings = match &source {
        Some(path) => read_settings_file(path)?,
        None => Settings::default(),
    };

    apply_env_overrides(&mut settings, env)?;
    Ok(LoadedSettings { settings, source })
}

fn default_settings_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_SETTINGS_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("imgtag").join("config.toml"));
    }
    paths
}

fn read_settings_file(path: &Path) -> Result<Settings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<Settings>(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env_overrides(
    settings: &mut Settings,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), SettingsError> {
    if let Some(v) = env(ENV_ON_MALFORMED) {
        settings.on_malformed =
            v.parse::<MalformedPolicy>()
                .map_err(|err| SettingsError::InvalidOverride {
                    key: ENV_ON_MALFORMED,
                    value: v.clone(),
                    reason: err.to_string(),
                })?;
    }

    if let Some(v) = env(ENV_OUTPUT_FORMAT) {
        settings.output_format = v
            .parse()
            .map_err(|reason| SettingsError::InvalidOverride {
                key: ENV_OUTPUT_FORMAT,
                value: v.clone(),
                reason,
            })?;
    }

    if let Some(v) = env(ENV_LOG_FILTER) {
        if !v.trim().is_empty() {
            settings.log_filter = v;
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
