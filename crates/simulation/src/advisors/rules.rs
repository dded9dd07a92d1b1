//! Offline advisor used when no external text-generation service is configured.

use super::service::AdvisorService;
use super::types::{AdvisorError, AdvisorSnapshot};
use crate::tiles::TileType;

/// Deterministic, priority-ordered advice from the snapshot alone.
#[derive(Debug, Clone)]
pub struct RuleBasedAdvisor {
    /// Unemployment share of the workforce above which jobs are suggested.
    pub unemployment_threshold: f64,
    pub happiness_threshold: f64,
    /// Pollution level above which cleanup is suggested.
    pub pollution_threshold: f64,
}

impl Default for RuleBasedAdvisor {
    fn default() -> Self {
        Self {
            unemployment_threshold: 0.10,
            happiness_threshold: 50.0,
            pollution_threshold: 2.0,
        }
    }
}

impl RuleBasedAdvisor {
    fn advice_for(&self, snapshot: &AdvisorSnapshot) -> String {
        let stats = &snapshot.stats;

        if snapshot.overloaded {
            return format!(
                "Blackout warning: demand of {} exceeds the {} units the grid can supply. \
                 Build power plants before anything else.",
                stats.power_usage, stats.power_capacity
            );
        }

        if snapshot.tile_counts.is_empty() {
            return "The land is empty, Mayor. Lay a road and zone some housing next to it."
                .to_string();
        }

        if snapshot.unemployment_rate() > self.unemployment_threshold {
            return format!(
                "{} residents are out of work. Zone commercial or industrial buildings \
                 along your roads.",
                snapshot.unemployed
            );
        }

        if stats.happiness < self.happiness_threshold {
            return format!(
                "Citizens are unhappy ({:.0}%). Parks and public services will lift the mood.",
                stats.happiness
            );
        }

        if stats.pollution > self.pollution_threshold {
            let has_recycling = snapshot.count(TileType::Recycling) > 0;
            return if has_recycling {
                "Pollution keeps climbing. Replace coal with solar or wind power.".to_string()
            } else {
                "Pollution keeps climbing. A recycling center and cleaner power plants will help."
                    .to_string()
            };
        }

        format!(
            "The city is thriving at level {} with {} residents. Keep expanding.",
            stats.level, stats.population
        )
    }
}

impl AdvisorService for RuleBasedAdvisor {
    fn advise(&self, snapshot: &AdvisorSnapshot) -> Result<String, AdvisorError> {
        Ok(self.advice_for(snapshot))
    }
}
