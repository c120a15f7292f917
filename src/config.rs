// Configuration management for codemap

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::indexer::discovery::DEFAULT_EXCLUDES;
use crate::query::FilterOptions;
use crate::render::{DetailLevel, OutputFormat};
use crate::ScanOptions;

/// File name looked up in the scanned directory
pub const CONFIG_FILE_NAME: &str = ".codemap.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
    pub filter: FilterOptions,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Glob patterns; empty means every supported extension
    pub patterns: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detail: DetailLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { threads: 4 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the scanned directory.
    /// Falls back to defaults when `.codemap.toml` is absent.
    pub fn from_project_dir<P: AsRef<Path>>(project_dir: P) -> anyhow::Result<Self> {
        let config_path = project_dir.as_ref().join(CONFIG_FILE_NAME);
        if !config_path.is_file() {
            tracing::debug!(
                "No {} in {}, using defaults",
                CONFIG_FILE_NAME,
                project_dir.as_ref().display()
            );
            return Ok(Self::default());
        }
        let config = Self::from_file(&config_path)?;
        tracing::info!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> anyhow::Result<()> {
        for pattern in self.scan.patterns.iter().chain(&self.scan.exclude) {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern: {}", pattern))?;
        }

        if self.performance.threads == 0 {
            return Err(anyhow::anyhow!("Thread count must be greater than 0"));
        }

        self.filter.validate().context("Invalid [filter] section")?;

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level));
        }
        let valid_formats = ["compact", "pretty"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!("Invalid log format: {}", self.logging.format));
        }

        Ok(())
    }

    /// Scan options described by this configuration
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            file_patterns: self.scan.patterns.clone(),
            exclude: self.scan.exclude.clone(),
            format: self.output.format,
            detail: self.output.detail,
            filter: self.filter.clone(),
            threads: self.performance.threads,
        }
    }
}
