//! Quiz configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quiztimer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Question file used when none is given on the command line.
    #[serde(default = "default_csv")]
    pub csv: PathBuf,
    /// Time limit for the whole quiz in seconds.
    #[serde(default = "default_limit")]
    pub limit_secs: u64,
    /// Shuffle questions before starting.
    #[serde(default)]
    pub shuffle: bool,
    /// Field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Wait for Enter before starting the clock.
    #[serde(default = "default_true")]
    pub wait_for_start: bool,
}

fn default_csv() -> PathBuf {
    PathBuf::from("problems.csv")
}
fn default_limit() -> u64 {
    30
}
fn default_delimiter() -> char {
    ','
}
fn default_true() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            csv: default_csv(),
            limit_secs: default_limit(),
            shuffle: false,
            delimiter: default_delimiter(),
            wait_for_start: true,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `quiztimer.toml` in the current directory
/// 2. `~/.config/quiztimer/config.toml`
///
/// Environment variable overrides: `QUIZTIMER_CSV`, `QUIZTIMER_LIMIT`, `QUIZTIMER_SHUFFLE`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    load_config_with(path, |key| std::env::var(key).ok())
}

fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<QuizConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quiztimer.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;

    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<QuizConfig> {
    Ok(toml::from_str::<QuizConfig>(content)?)
}

/// Apply `QUIZTIMER_*` overrides using `lookup` to read variables.
fn apply_env_overrides<F>(config: &mut QuizConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(csv) = lookup("QUIZTIMER_CSV") {
        config.csv = PathBuf::from(csv);
    }

    if let Some(limit) = lookup("QUIZTIMER_LIMIT") {
        config.limit_secs = limit
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZTIMER_LIMIT: '{limit}'"))?;
    }

    if let Some(shuffle) = lookup("QUIZTIMER_SHUFFLE") {
        config.shuffle = parse_bool(&shuffle)
            .with_context(|| format!("invalid QUIZTIMER_SHUFFLE: '{shuffle}'"))?;
    }

    Ok(())
}

fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{other}'"),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quiztimer"))
}
