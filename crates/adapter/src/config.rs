//! Environment configuration
//!
//! Every setting is optional. Lenient parsing (used at startup) falls back to
//! the default and logs a warning; the strict parsers return [`ConfigError`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Level;

pub const DEFAULT_SIM_GAMES: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid level {0:?} (expected 1 or 2)")]
    InvalidLevel(String),
    #[error("invalid value {value:?} for {var}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub level: Level,
    pub seed: Option<u32>,
    pub analytics_path: Option<PathBuf>,
    pub analytics_disabled: bool,
    pub music: bool,
    pub log_path: Option<PathBuf>,
    pub sim_games: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level: Level::One,
            seed: None,
            analytics_path: None,
            analytics_disabled: false,
            music: true,
            log_path: None,
            sim_games: DEFAULT_SIM_GAMES,
        }
    }
}

pub fn parse_level(s: &str) -> Result<Level, ConfigError> {
    s.trim()
        .parse::<u8>()
        .ok()
        .and_then(Level::from_number)
        .ok_or_else(|| ConfigError::InvalidLevel(s.to_string()))
}

pub fn parse_number<T: std::str::FromStr>(var: &'static str, s: &str) -> Result<T, ConfigError> {
    s.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: s.to_string(),
    })
}

fn parse_flag(s: &str) -> bool {
    let s = s.trim();
    s == "1" || s.eq_ignore_ascii_case("true")
}

fn non_empty_path(s: String) -> Option<PathBuf> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(PathBuf::from(s))
    }
}

impl AppConfig {
    /// Read `COLLECTOR_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, so tests need not touch the environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();

        let level = match lookup("COLLECTOR_LEVEL") {
            Some(v) => parse_level(&v).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "using default level");
                d.level
            }),
            None => d.level,
        };

        let seed = lookup("COLLECTOR_SEED").and_then(|v| {
            parse_number::<u32>("COLLECTOR_SEED", &v)
                .map_err(|e| tracing::warn!(error = %e, "ignoring seed"))
                .ok()
        });

        let sim_games = lookup("COLLECTOR_SIM_GAMES")
            .and_then(|v| {
                parse_number::<usize>("COLLECTOR_SIM_GAMES", &v)
                    .map_err(|e| tracing::warn!(error = %e, "using default game count"))
                    .ok()
            })
            .unwrap_or(d.sim_games);

        Self {
            level,
            seed,
            analytics_path: lookup("COLLECTOR_ANALYTICS_PATH").and_then(non_empty_path),
            analytics_disabled: lookup("COLLECTOR_ANALYTICS_DISABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            music: lookup("COLLECTOR_MUSIC")
                .map(|v| parse_flag(&v))
                .unwrap_or(d.music),
            log_path: lookup("COLLECTOR_LOG_PATH").and_then(non_empty_path),
            sim_games,
        }
    }

    /// Analytics file to write, if analytics is on.
    pub fn analytics_target(&self) -> Option<&Path> {
        if self.analytics_disabled {
            return None;
        }
        self.analytics_path.as_deref()
    }

    /// Configured seed, or one derived from the clock.
    pub fn seed_or_time(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u32)
                .unwrap_or(1)
        })
    }
}
