//! Criterion benchmarks for the per-tick hot paths.
//!
//! The city is a full 128x128 grid: roads every fourth row and column, the
//! blocks between them filled with houses and shops, a row of power plants.
//! Every cell is active, which is the worst case for aggregation.
//!
//! Run with: cargo bench -p simulation --bench tick_bench --features bench

use bevy::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use simulation::active_cells::ActiveCells;
use simulation::aggregation::aggregate;
use simulation::config::GRID_SIZE;
use simulation::grid::TileGrid;
use simulation::road_access::RoadAccessMap;
use simulation::stats::CityStats;
use simulation::test_harness::TestCity;
use simulation::tiles::{TileCatalog, TileType};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn dense_tile(x: usize, y: usize) -> TileType {
    if x % 4 == 0 || y % 4 == 0 {
        TileType::Road
    } else if y == 1 {
        TileType::PowerNuclear
    } else if (x / 4 + y / 4) % 2 == 0 {
        TileType::ResidentialHigh
    } else {
        TileType::CommercialHigh
    }
}

fn build_dense_grid() -> TileGrid {
    let mut grid = TileGrid::new(GRID_SIZE);
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let i = grid.index(x, y);
            grid.set(i, dense_tile(x, y));
        }
    }
    grid
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_road_access(c: &mut Criterion) {
    let grid = build_dense_grid();
    c.bench_function("road_access_recompute_dense", |b| {
        b.iter(|| black_box(RoadAccessMap::recompute(black_box(&grid))));
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let grid = build_dense_grid();
    let active = ActiveCells::from_grid(&grid);
    let access = RoadAccessMap::recompute(&grid);
    let catalog = TileCatalog::standard();
    let previous = CityStats::default();
    c.bench_function("aggregate_dense", |b| {
        b.iter(|| {
            black_box(aggregate(
                black_box(&grid),
                &active,
                &catalog,
                &access,
                &previous,
                0.8,
            ))
        });
    });
}

fn bench_full_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_city_tick");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let mut city = TestCity::new();
    city.replace_grid(build_dense_grid());
    city.tick(1);

    group.bench_function("fixed_update_dense", |b| {
        b.iter(|| {
            city.world_mut().run_schedule(FixedUpdate);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_road_access, bench_aggregation, bench_full_tick);
criterion_main!(benches);
