//! Boundary to the external text-generation collaborator.
//!
//! The engine treats the prompt and the response as opaque strings. Every
//! failure degrades to a neutral fallback line and never touches city state.

use bevy::prelude::*;

use super::types::{AdvisorError, AdvisorSnapshot};

/// Shown when the service answered but had nothing to say.
pub const FALLBACK_NO_COMMENT: &str = "No comments at this time, Mayor.";
/// Shown when the service could not be reached.
pub const FALLBACK_UNAVAILABLE: &str =
    "The connection to the planning ministry has been temporarily lost.";

/// Something that turns a city snapshot into a line of advice.
pub trait AdvisorService: Send + Sync {
    fn advise(&self, snapshot: &AdvisorSnapshot) -> Result<String, AdvisorError>;
}

/// Render the request text sent to an external language model.
pub fn advisor_prompt(snapshot: &AdvisorSnapshot) -> String {
    let s = &snapshot.stats;
    let buildings = if snapshot.tile_counts.is_empty() {
        String::new()
    } else {
        let listed: Vec<String> = snapshot
            .tile_counts
            .iter()
            .map(|(tile, n)| format!("{} x{}", tile.name(), n))
            .collect();
        format!("- Buildings: {}\n", listed.join(", "))
    };
    format!(
        "You are the chief advisor of a city in a city-building simulator.\n\
         Current state of the city:\n\
         - Population: {population}\n\
         - Money: ${money}\n\
         - Level: {level}\n\
         - Happiness: {happiness:.0}%\n\
         - Jobs: {jobs}\n\
         - Unemployed: {unemployed}\n\
         - Power capacity: {capacity}\n\
         - Power usage: {usage}\n\
         - Pollution: {pollution:.1}\n\
         - Education: {education:.0}%\n\
         - Health: {health:.0}%\n\
         {buildings}\n\
         Briefly analyse the situation and give the Mayor one short, direct piece of \
         advice (two sentences at most).\n\
         If there is a power overload ({overloaded}), prioritise warning about the blackout.\n\
         If unemployment is high, suggest industrial or commercial zones.\n\
         If happiness is low, suggest parks or services.\n",
        population = s.population,
        money = s.money,
        level = s.level,
        happiness = s.happiness,
        jobs = s.jobs,
        unemployed = snapshot.unemployed,
        capacity = s.power_capacity,
        usage = s.power_usage,
        pollution = s.pollution,
        education = s.education,
        health = s.health,
        overloaded = snapshot.overloaded,
    )
}

/// Ask `service` for advice, absorbing every failure into a fallback line.
pub fn consult(service: &dyn AdvisorService, snapshot: &AdvisorSnapshot) -> String {
    match service.advise(snapshot) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) | Err(AdvisorError::EmptyResponse) => FALLBACK_NO_COMMENT.to_string(),
        Err(err) => {
            warn!("Advisor consultation failed: {}", err);
            FALLBACK_UNAVAILABLE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileGrid;
    use crate::stats::CityStats;
    use crate::tiles::TileType;

    struct Canned(Result<String, AdvisorError>);

    impl AdvisorService for Canned {
        fn advise(&self, _: &AdvisorSnapshot) -> Result<String, AdvisorError> {
            self.0.clone()
        }
    }

    fn snapshot() -> AdvisorSnapshot {
        let mut grid = TileGrid::new(4);
        grid.set(0, TileType::PowerCoal);
        AdvisorSnapshot::capture(&CityStats::default(), &grid)
    }

    #[test]
    fn test_consult_passes_text_through() {
        let svc = Canned(Ok("  Build more roads.  ".into()));
        assert_eq!(consult(&svc, &snapshot()), "Build more roads.");
    }

    #[test]
    fn test_consult_blank_response_falls_back() {
        assert_eq!(consult(&Canned(Ok("   ".into())), &snapshot()), FALLBACK_NO_COMMENT);
        assert_eq!(
            consult(&Canned(Err(AdvisorError::EmptyResponse)), &snapshot()),
            FALLBACK_NO_COMMENT
        );
    }

    #[test]
    fn test_consult_failure_falls_back() {
        let svc = Canned(Err(AdvisorError::Unavailable("timeout".into())));
        assert_eq!(consult(&svc, &snapshot()), FALLBACK_UNAVAILABLE);
    }

    #[test]
    fn test_prompt_mentions_stats_and_buildings() {
        let prompt = advisor_prompt(&snapshot());
        assert!(prompt.contains("- Money: $100000"));
        assert!(prompt.contains("- Level: 1"));
        assert!(prompt.contains("Coal Plant x1"));
        assert!(prompt.contains("power overload (false)"));
    }

    #[test]
    fn test_prompt_for_empty_city_skips_building_list() {
        let snapshot = AdvisorSnapshot::capture(&CityStats::default(), &TileGrid::new(4));
        let prompt = advisor_prompt(&snapshot);
        assert!(!prompt.contains("Buildings"));
        assert!(prompt.contains("- Health: 80%\n\nBriefly analyse"));
        assert!(prompt.ends_with("suggest parks or services.\n"));
    }
}
