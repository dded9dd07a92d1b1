//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! Every system in `FixedUpdate` belongs to one of these sets:
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Tick counter, queued actions (placement, hyperspeed trigger,
//!   refresh rate, pause), post-load rebuild, road access recompute. Every
//!   grid mutation of a tick happens here, and road access is recomputed after
//!   the last one.
//! * **Simulation** – The city tick: aggregation over active cells followed by
//!   stat derivation.
//! * **PostSim** – Hyperspeed countdown, stat-change notifications, advisor
//!   consultations. These read the fresh snapshot and never touch the grid.
//!
//! `Update` only keeps the fixed timestep in step with the scheduler.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain by `SimulationPlugin`. Plugins use
/// `.in_set(SimulationSet::X)` and add `.after()` / `.before()` constraints
/// within a phase where order matters.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}
