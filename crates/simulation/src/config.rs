/// Side length of the square city grid, in cells.
pub const GRID_SIZE: usize = 128;
/// Total number of cells in the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Divisor that normalizes the summed pollution coefficient into a city-wide level.
pub const POLLUTION_NORMALIZATION: f64 = (GRID_SIZE * 2) as f64;

/// Highest level a city can reach.
pub const MAX_LEVEL: u32 = 99;
