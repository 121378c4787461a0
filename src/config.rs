// src/config.rs
//! Application configuration: defaults, then an optional TOML file, then
//! environment variables. Command-line flags are applied last by the caller
//! through the `with_*` builders.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::session::{AnalysisConfig, DEFAULT_MODEL};

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";
pub const CONFIG_FILE_NAME: &str = "resume-tailor.toml";

pub const ENV_CONFIG: &str = "RESUME_TAILOR_CONFIG";
pub const ENV_SERVICE_URL: &str = "RESUME_SERVICE_URL";
pub const ENV_MODEL: &str = "RESUME_TAILOR_MODEL";
pub const ENV_STRICT: &str = "RESUME_TAILOR_STRICT";
pub const ENV_LOG_FILE: &str = "RESUME_TAILOR_LOG_FILE";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub service_url: Option<String>,
    pub model: Option<String>,
    pub strict_mode: Option<bool>,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub service_url: String,
    pub model: String,
    pub strict_mode: bool,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            strict_mode: true,
            log_file: std::env::temp_dir().join("resume-tailor.log"),
        }
    }
}

impl AppConfig {
    /// Resolve defaults, config file and environment.
    ///
    /// `explicit` (from `--config`) must exist. Otherwise `RESUME_TAILOR_CONFIG`
    /// is tried, then `resume-tailor.toml` in the working directory if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::config_path(explicit)? {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let file = Self::parse_file(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config = config.apply_file(file);
        }

        config.apply_env(|key| std::env::var(key).ok())
    }

    fn config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            return Ok(Some(path.to_path_buf()));
        }

        if let Ok(path) = std::env::var(ENV_CONFIG) {
            let path = PathBuf::from(path);
            if !path.exists() {
                anyhow::bail!("{} points to a missing file: {}", ENV_CONFIG, path.display());
            }
            return Ok(Some(path));
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        Ok(local.exists().then_some(local))
    }

    pub fn parse_file(content: &str) -> Result<ConfigFile> {
        toml::from_str(content).context("Invalid TOML")
    }

    pub fn apply_file(mut self, file: ConfigFile) -> Self {
        if let Some(url) = file.service_url {
            self = self.with_service_url(url);
        }
        if let Some(model) = file.model {
            self.model = model;
        }
        if let Some(strict) = file.strict_mode {
            self.strict_mode = strict;
        }
        if let Some(log_file) = file.log_file {
            self.log_file = log_file;
        }
        self
    }

    /// Overlay environment values; `lookup` stands in for `std::env::var`.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(ENV_SERVICE_URL) {
            self = self.with_service_url(url);
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.model = model;
        }
        if let Some(strict) = lookup(ENV_STRICT) {
            self.strict_mode = parse_bool(&strict)
                .with_context(|| format!("{} must be a boolean, got {:?}", ENV_STRICT, strict))?;
        }
        if let Some(log_file) = lookup(ENV_LOG_FILE) {
            self.log_file = PathBuf::from(log_file);
        }
        Ok(self)
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            model: self.model.clone(),
            strict_mode: self.strict_mode,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Not a boolean: {}", value),
    }
}
