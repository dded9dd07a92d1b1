//! Per-tick aggregation pass over active cells.
//!
//! Produces raw sums only. Turning those sums into happiness, demand and the
//! rest of [`CityStats`] is the job of [`crate::derivation`].

use crate::active_cells::ActiveCells;
use crate::grid::TileGrid;
use crate::road_access::RoadAccessMap;
use crate::stats::CityStats;
use crate::tiles::TileCatalog;

/// Raw sums collected from one pass over the active cells.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateTotals {
    pub population: u64,
    pub jobs: u64,
    pub pollution: f64,
    /// Income already multiplied by the economy scale.
    pub income: f64,
    pub power_capacity: i64,
    pub power_usage: i64,
    pub water_capacity: i64,
    pub water_usage: i64,
    pub happy_bonus: f64,
    pub edu_bonus: f64,
    pub health_bonus: f64,
    /// Buildings that operated this tick.
    pub active_buildings: u32,
    /// Buildings skipped for lack of road access or power.
    pub inactive_buildings: u32,
}

/// Sum the contributions of every tracked cell.
///
/// Overload is judged from `previous`, never from the capacity being summed
/// here, so a consumer that tips the city over capacity keeps running until
/// the next tick. Power and water are accounted for every building whether or
/// not it is operating. Inactive buildings contribute only their upkeep.
pub fn aggregate(
    grid: &TileGrid,
    active: &ActiveCells,
    catalog: &TileCatalog,
    road_access: &RoadAccessMap,
    previous: &CityStats,
    economy_scale: f64,
) -> AggregateTotals {
    let overloaded = previous.is_overloaded();
    let mut totals = AggregateTotals::default();

    for index in active.iter() {
        let tile = grid.at(index);
        if tile.is_empty() {
            continue;
        }
        let data = catalog.get(tile);

        let has_road = !data.is_road_sensitive() || road_access.has_access(index);
        let has_power = data.power <= 0 || !overloaded;

        if data.is_power_producer() && data.power < 0 {
            totals.power_capacity += i64::from(data.power.unsigned_abs());
        } else {
            totals.power_usage += i64::from(data.power);
        }

        if data.category.is_water_producer() && data.water < 0 {
            totals.water_capacity += i64::from(data.water.unsigned_abs());
        } else {
            totals.water_usage += i64::from(data.water);
        }

        if !(has_road && has_power) {
            totals.inactive_buildings += 1;
            if data.income < 0 {
                totals.income += f64::from(data.income) * economy_scale;
            }
            continue;
        }

        totals.active_buildings += 1;
        totals.population += u64::from(data.pop);
        totals.jobs += u64::from(data.jobs);
        totals.pollution += f64::from(data.pol);
        totals.happy_bonus += f64::from(data.happy);
        totals.edu_bonus += f64::from(data.edu);
        totals.health_bonus += f64::from(data.health);
        totals.income += f64::from(data.income) * economy_scale;
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileType;

    struct Fixture {
        grid: TileGrid,
        active: ActiveCells,
        catalog: TileCatalog,
    }

    impl Fixture {
        fn new() -> Self {
            let grid = TileGrid::new(16);
            let active = ActiveCells::with_capacity(grid.len());
            Self {
                grid,
                active,
                catalog: TileCatalog::standard(),
            }
        }

        fn place(&mut self, x: usize, y: usize, tile: TileType) -> &mut Self {
            let idx = self.grid.index(x, y);
            self.grid.set(idx, tile);
            self.active.add(idx);
            self
        }

        fn run(&self, previous: &CityStats) -> AggregateTotals {
            let access = RoadAccessMap::recompute(&self.grid);
            aggregate(
                &self.grid,
                &self.active,
                &self.catalog,
                &access,
                previous,
                1.0,
            )
        }
    }

    #[test]
    fn test_empty_city_sums_to_zero() {
        let f = Fixture::new();
        assert_eq!(f.run(&CityStats::default()), AggregateTotals::default());
    }

    #[test]
    fn test_house_without_road_only_pays_upkeep() {
        let mut f = Fixture::new();
        f.place(5, 5, TileType::Residential);
        let totals = f.run(&CityStats::default());
        assert_eq!(totals.population, 0);
        // Positive income is withheld from disconnected buildings.
        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.inactive_buildings, 1);
        // Usage is still counted.
        assert_eq!(totals.power_usage, 2);
    }

    #[test]
    fn test_disconnected_park_still_costs_upkeep() {
        let mut f = Fixture::new();
        f.place(2, 2, TileType::ParkSmall);
        let totals = f.run(&CityStats::default());
        assert_eq!(totals.income, -30.0);
        assert_eq!(totals.happy_bonus, 0.0);
    }

    #[test]
    fn test_house_next_to_road_is_active() {
        let mut f = Fixture::new();
        f.place(5, 5, TileType::Road)
            .place(6, 5, TileType::Residential);
        let totals = f.run(&CityStats::default());
        assert_eq!(totals.population, 10);
        assert_eq!(totals.active_buildings, 2);
        // Road upkeep -2 plus house income 10.
        assert_eq!(totals.income, 8.0);
    }

    #[test]
    fn test_power_plant_needs_no_road() {
        let mut f = Fixture::new();
        f.place(0, 0, TileType::PowerCoal);
        let totals = f.run(&CityStats::default());
        assert_eq!(totals.power_capacity, 250);
        assert_eq!(totals.power_usage, 0);
        assert_eq!(totals.pollution, 50.0);
        assert_eq!(totals.active_buildings, 1);
    }

    #[test]
    fn test_overload_uses_previous_tick() {
        let mut f = Fixture::new();
        f.place(5, 5, TileType::Road)
            .place(6, 5, TileType::Commercial)
            .place(0, 0, TileType::PowerWind);

        // Plenty of capacity this tick, but the previous tick was overloaded.
        let previous = CityStats {
            power_capacity: 10,
            power_usage: 20,
            ..CityStats::default()
        };
        let totals = f.run(&previous);
        assert_eq!(totals.jobs, 0, "consumer must be off while previously overloaded");
        assert_eq!(totals.power_capacity, 40);
        assert_eq!(totals.power_usage, 5);

        let healthy = CityStats {
            power_capacity: 40,
            power_usage: 5,
            ..CityStats::default()
        };
        assert_eq!(f.run(&healthy).jobs, 8);
    }

    #[test]
    fn test_zero_power_tiles_unaffected_by_overload() {
        let mut f = Fixture::new();
        f.place(5, 5, TileType::Road);
        let previous = CityStats {
            power_capacity: 0,
            power_usage: 100,
            ..CityStats::default()
        };
        let totals = f.run(&previous);
        assert_eq!(totals.active_buildings, 1);
        assert_eq!(totals.income, -2.0);
    }

    #[test]
    fn test_zero_capacity_zero_usage_is_not_overloaded() {
        let mut f = Fixture::new();
        f.place(5, 5, TileType::Road)
            .place(5, 6, TileType::Residential);
        let totals = f.run(&CityStats {
            power_capacity: 0,
            power_usage: 0,
            ..CityStats::default()
        });
        assert_eq!(totals.population, 10);
    }

    #[test]
    fn test_water_is_accounted_separately() {
        let mut f = Fixture::new();
        f.place(0, 0, TileType::WaterTower)
            .place(3, 3, TileType::Road)
            .place(3, 4, TileType::Residential);
        let totals = f.run(&CityStats::default());
        assert_eq!(totals.water_capacity, 100);
        // Road 0 + house 1.
        assert_eq!(totals.water_usage, 1);
        // The tower is a power consumer.
        assert_eq!(totals.power_usage, 5 + 2);
    }

    #[test]
    fn test_economy_scale_applies_to_income() {
        let mut f = Fixture::new();
        f.place(5, 5, TileType::Road)
            .place(6, 5, TileType::Residential);
        let access = RoadAccessMap::recompute(&f.grid);
        let totals = aggregate(
            &f.grid,
            &f.active,
            &f.catalog,
            &access,
            &CityStats::default(),
            0.5,
        );
        assert_eq!(totals.income, 4.0);
    }

    #[test]
    fn test_order_independent() {
        let mut a = Fixture::new();
        a.place(1, 1, TileType::Road)
            .place(2, 1, TileType::Residential)
            .place(1, 2, TileType::Commercial)
            .place(9, 9, TileType::PowerSolar);

        let mut b = Fixture::new();
        b.place(9, 9, TileType::PowerSolar)
            .place(1, 2, TileType::Commercial)
            .place(2, 1, TileType::Residential)
            .place(1, 1, TileType::Road);

        let prev = CityStats::default();
        assert_eq!(a.run(&prev), b.run(&prev));
    }
}
