//! # TestCity — headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::game_params::GameParams;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up city state, then call `tick()` to advance the
/// simulation and query/assert on the resulting resources.
pub struct TestCity {
    app: App,
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCity {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new **empty** city: a blank grid, starting treasury, level 1.
    pub fn new() -> Self {
        Self::with_params(GameParams::default())
    }

    /// Create an empty city with custom parameters. Stats and scheduler are
    /// seeded from `params`, so this must be the constructor rather than a
    /// builder step.
    pub fn with_params(params: GameParams) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(params);
        app.add_plugins(SimulationPlugin);

        // One update so the first-frame bookkeeping runs. Virtual time has not
        // advanced yet, so FixedUpdate does not tick here.
        app.update();

        Self { app }
    }
}
