//! Runner configuration read from the environment.
//!
//! | Variable              | Meaning                                    |
//! |-----------------------|--------------------------------------------|
//! | `TILECITY_TICKS`      | ticks to simulate (default 500)            |
//! | `TILECITY_REFRESH_MS` | refresh interval in ms, clamped 100..=2000 |
//! | `TILECITY_PARAMS`     | JSON file with `GameParams` overrides      |
//! | `TILECITY_LOAD`       | save file to start from                    |
//! | `TILECITY_SAVE`       | where to write the final save              |

use std::path::PathBuf;
use std::str::FromStr;

use bevy::prelude::*;
use simulation::game_params::GameParams;

const DEFAULT_TICKS: u32 = 500;

#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub ticks: u32,
    pub refresh_ms: Option<u64>,
    pub params: GameParams,
    pub load_path: Option<PathBuf>,
    pub save_path: Option<PathBuf>,
    /// Problems found while reading the environment, logged once logging is up.
    pub warnings: Vec<String>,
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Malformed values fall back to defaults and
    /// are recorded in `warnings`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();
        let params = match lookup("TILECITY_PARAMS") {
            Some(path) => match std::fs::read_to_string(&path) {
                Ok(json) => GameParams::from_json(&json).unwrap_or_else(|e| {
                    warnings.push(format!("Ignoring TILECITY_PARAMS {path}: {e}"));
                    GameParams::default()
                }),
                Err(e) => {
                    warnings.push(format!("Cannot read TILECITY_PARAMS {path}: {e}"));
                    GameParams::default()
                }
            },
            None => GameParams::default(),
        };

        Self {
            ticks: parse_var(&lookup, "TILECITY_TICKS", &mut warnings).unwrap_or(DEFAULT_TICKS),
            refresh_ms: parse_var(&lookup, "TILECITY_REFRESH_MS", &mut warnings),
            params,
            load_path: lookup("TILECITY_LOAD").map(PathBuf::from),
            save_path: lookup("TILECITY_SAVE").map(PathBuf::from),
            warnings,
        }
    }

    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{warning}");
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("Ignoring {key}={raw:?}: not a valid number"));
            None
        }
    }
}
