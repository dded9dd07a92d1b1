//! Data-driven game parameters.
//!
//! Every tunable used by stat derivation and tick scheduling lives in the
//! [`GameParams`] resource so that balance can be changed without
//! recompilation. `Default` is the canonical constant set; [`GameParams::from_json`]
//! accepts partial overrides where any omitted field keeps its default, and
//! rejects documents that [`GameParams::validate`] refuses.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Derivation parameters
// ---------------------------------------------------------------------------

/// Coefficients for happiness, health, education and demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(default)]
pub struct DerivationParams {
    /// Share of the population that looks for work.
    pub labor_participation: f64,
    /// Happiness with zero employment and no modifiers.
    pub base_happiness: f64,
    /// Happiness added at full employment.
    pub job_weight: f64,
    /// Flat happiness penalty while power usage exceeds capacity.
    pub overload_penalty: f64,
    /// Pollution level is divided by this before being subtracted from happiness.
    pub pollution_drag_divisor: f64,
    /// Exponential smoothing factor for health (weight of the previous value).
    pub health_decay: f64,
    /// Health bonus sum is divided by this before being added to the health target.
    pub health_bonus_divisor: f64,
    /// Exponential smoothing factor for education.
    pub education_decay: f64,
    /// Happiness level at which residential demand is neutral.
    pub demand_happiness_pivot: f64,
    pub demand_r_job_weight: f64,
    pub demand_c_pop_share: f64,
    pub demand_c_job_share: f64,
    pub demand_c_scale: f64,
    pub demand_i_weight: f64,
}

impl Default for DerivationParams {
    fn default() -> Self {
        Self {
            labor_participation: 0.85,
            base_happiness: 70.0,
            job_weight: 30.0,
            overload_penalty: 40.0,
            pollution_drag_divisor: 10.0,
            health_decay: 0.95,
            health_bonus_divisor: 10.0,
            education_decay: 0.98,
            demand_happiness_pivot: 60.0,
            demand_r_job_weight: 3.0,
            demand_c_pop_share: 0.4,
            demand_c_job_share: 0.2,
            demand_c_scale: 2.0,
            demand_i_weight: 1.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Economy and progression parameters
// ---------------------------------------------------------------------------

/// Tunables for money and level progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(default)]
pub struct EconomyParams {
    /// Treasury of a freshly founded city.
    pub starting_money: i64,
    /// Population thresholds; level = 1 + number of thresholds met.
    pub level_thresholds: Vec<u32>,
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            starting_money: 100_000,
            level_thresholds: vec![
                100, 200, 300, 500, 750, 1_000, 1_500, 2_000, 3_000, 4_000, 5_000, 7_500, 10_000,
                15_000, 20_000, 30_000, 50_000, 75_000, 100_000, 150_000, 250_000, 500_000,
                1_000_000,
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Scheduling parameters
// ---------------------------------------------------------------------------

/// Tick cadence and hyperspeed timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(default)]
pub struct SchedulerParams {
    /// Refresh interval a new city starts with.
    pub default_refresh_ms: u64,
    pub min_refresh_ms: u64,
    pub max_refresh_ms: u64,
    /// Interval that represents one full day of income at scale 1.
    pub reference_interval_ms: u64,
    /// Fixed interval forced while hyperspeed is active.
    pub hyper_interval_ms: u64,
    pub hyper_duration_secs: f64,
    pub hyper_cooldown_secs: f64,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            default_refresh_ms: 2_000,
            min_refresh_ms: 100,
            max_refresh_ms: 2_000,
            reference_interval_ms: 2_500,
            hyper_interval_ms: 250,
            hyper_duration_secs: 15.0,
            hyper_cooldown_secs: 120.0,
        }
    }
}

impl SchedulerParams {
    /// Clamp into the refresh bounds. With inverted bounds (rejected by
    /// [`GameParams::validate`]) the upper bound wins instead of panicking.
    pub fn clamp_refresh(&self, millis: u64) -> u64 {
        millis.max(self.min_refresh_ms).min(self.max_refresh_ms).max(1)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ParamsError {
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Json(e) => write!(f, "malformed parameters: {e}"),
            ParamsError::Invalid(msg) => write!(f, "invalid parameters: {msg}"),
        }
    }
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::Json(e) => Some(e),
            ParamsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(e: serde_json::Error) -> Self {
        ParamsError::Json(e)
    }
}

// ---------------------------------------------------------------------------
// Top-level GameParams resource
// ---------------------------------------------------------------------------

/// Central resource holding all data-driven game parameters.
#[derive(
    Resource,
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
    Default,
)]
#[serde(default)]
pub struct GameParams {
    pub derivation: DerivationParams,
    pub economy: EconomyParams,
    pub scheduler: SchedulerParams,
}

impl GameParams {
    /// Parse a JSON override document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate().map_err(ParamsError::Invalid)?;
        Ok(params)
    }

    /// Check the invariants derivation and scheduling rely on.
    pub fn validate(&self) -> Result<(), String> {
        let d = &self.derivation;
        let floats = [
            ("labor_participation", d.labor_participation),
            ("base_happiness", d.base_happiness),
            ("job_weight", d.job_weight),
            ("overload_penalty", d.overload_penalty),
            ("pollution_drag_divisor", d.pollution_drag_divisor),
            ("health_decay", d.health_decay),
            ("health_bonus_divisor", d.health_bonus_divisor),
            ("education_decay", d.education_decay),
            ("demand_happiness_pivot", d.demand_happiness_pivot),
            ("demand_r_job_weight", d.demand_r_job_weight),
            ("demand_c_pop_share", d.demand_c_pop_share),
            ("demand_c_job_share", d.demand_c_job_share),
            ("demand_c_scale", d.demand_c_scale),
            ("demand_i_weight", d.demand_i_weight),
            ("hyper_duration_secs", self.scheduler.hyper_duration_secs),
            ("hyper_cooldown_secs", self.scheduler.hyper_cooldown_secs),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} must be finite"));
        }
        for (name, v) in [
            ("labor_participation", d.labor_participation),
            ("health_decay", d.health_decay),
            ("education_decay", d.education_decay),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("{name} must be within 0..=1, got {v}"));
            }
        }
        for (name, v) in [
            ("pollution_drag_divisor", d.pollution_drag_divisor),
            ("health_bonus_divisor", d.health_bonus_divisor),
        ] {
            if v <= 0.0 {
                return Err(format!("{name} must be positive, got {v}"));
            }
        }

        if let Some(pair) = self
            .economy
            .level_thresholds
            .windows(2)
            .find(|pair| pair[0] >= pair[1])
        {
            return Err(format!(
                "level_thresholds must be strictly increasing, {} is followed by {}",
                pair[0], pair[1]
            ));
        }

        let s = &self.scheduler;
        if s.min_refresh_ms == 0 || s.min_refresh_ms > s.max_refresh_ms {
            return Err(format!(
                "refresh bounds {}..={} ms are empty or start at 0",
                s.min_refresh_ms, s.max_refresh_ms
            ));
        }
        if s.reference_interval_ms == 0 || s.hyper_interval_ms == 0 {
            return Err("reference_interval_ms and hyper_interval_ms must be positive".into());
        }
        if s.hyper_duration_secs < 0.0 || s.hyper_cooldown_secs < 0.0 {
            return Err("hyperspeed duration and cooldown must not be negative".into());
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct GameParamsPlugin;

impl Plugin for GameParamsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameParams>();
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
