//! Stat derivation: turns aggregate sums plus the previous snapshot into the
//! next [`CityStats`].
//!
//! Stats evolve by recurrence. Money, day, health and education depend on the
//! previous snapshot, and so does the overload penalty; everything else is
//! recomputed from this tick's totals.

use crate::aggregation::AggregateTotals;
use crate::config::{MAX_LEVEL, POLLUTION_NORMALIZATION};
use crate::game_params::GameParams;
use crate::stats::CityStats;

#[inline]
fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

#[inline]
fn saturate_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Level reached at `population`: one plus the number of thresholds met,
/// capped at [`MAX_LEVEL`]. Monotonic non-decreasing in `population`.
pub fn level_for_population(population: u32, thresholds: &[u32]) -> u32 {
    let met = thresholds.iter().filter(|&&t| population >= t).count() as u32;
    (1 + met).min(MAX_LEVEL)
}

/// Employment figures for a given population and job count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Employment {
    pub workforce: u32,
    pub employed: u32,
    /// `employed / workforce`, or 1 when there is no workforce.
    pub job_balance: f64,
}

pub fn employment(population: u32, jobs: u32, labor_participation: f64) -> Employment {
    let workforce = (f64::from(population) * labor_participation).floor().max(0.0) as u32;
    let employed = workforce.min(jobs);
    let job_balance = if workforce > 0 {
        f64::from(employed) / f64::from(workforce)
    } else {
        1.0
    };
    Employment {
        workforce,
        employed,
        job_balance,
    }
}

/// City-wide pollution level from the summed pollution coefficient.
#[inline]
pub fn pollution_level(total_pollution: f64) -> f64 {
    total_pollution / POLLUTION_NORMALIZATION
}

/// Compute the next snapshot.
///
/// Overload is measured on `previous`, the same flag that gates buildings in
/// [`crate::aggregation::aggregate`].
pub fn derive_stats(
    totals: &AggregateTotals,
    previous: &CityStats,
    params: &GameParams,
    economy_scale: f64,
) -> CityStats {
    let p = &params.derivation;

    let population = saturate_u32(totals.population);
    let jobs = saturate_u32(totals.jobs);
    let emp = employment(population, jobs, p.labor_participation);

    let poll_level = pollution_level(totals.pollution);
    let overloaded = previous.is_overloaded();

    let mut happiness = p.base_happiness + emp.job_balance * p.job_weight + totals.happy_bonus;
    if overloaded {
        happiness -= p.overload_penalty;
    }
    happiness -= poll_level / p.pollution_drag_divisor;
    let happiness = clamp_percent(happiness);

    let health_target = (100.0 - poll_level).max(0.0) + totals.health_bonus / p.health_bonus_divisor;
    let health = clamp_percent(
        previous.health * p.health_decay + health_target * (1.0 - p.health_decay),
    );

    let education = (previous.education * p.education_decay
        + totals.edu_bonus * (1.0 - p.education_decay))
        .max(0.0);

    let pop_f = f64::from(population);
    let jobs_f = f64::from(jobs);
    let demand_r =
        clamp_percent((jobs_f - pop_f) * p.demand_r_job_weight + (happiness - p.demand_happiness_pivot));
    let demand_c = clamp_percent(
        (pop_f * p.demand_c_pop_share - jobs_f * p.demand_c_job_share) * p.demand_c_scale,
    );
    let demand_i = clamp_percent((pop_f - jobs_f) * p.demand_i_weight);

    let earned = (totals.income * (happiness / 100.0)).floor() as i64;
    let level = previous
        .level
        .max(level_for_population(population, &params.economy.level_thresholds))
        .min(MAX_LEVEL);

    CityStats {
        money: previous.money.saturating_add(earned),
        population,
        jobs,
        employed: emp.employed,
        workforce: emp.workforce,
        happiness,
        health,
        education,
        pollution: poll_level,
        power_capacity: totals.power_capacity,
        power_usage: totals.power_usage,
        water_capacity: totals.water_capacity,
        water_usage: totals.water_usage,
        demand_r,
        demand_c,
        demand_i,
        day: previous.day + economy_scale,
        level,
    }
}
