//! Queued player/agent actions applied at the start of each tick.

pub mod actions;
pub mod executor;
pub mod plugin;
pub mod queue;
pub mod result_log;
pub mod results;

pub use actions::*;
pub use executor::execute_queued_actions;
pub use plugin::GameActionsPlugin;
pub use queue::*;
pub use result_log::{ActionRecord, ActionResultLog, ACTION_LOG_CAPACITY};
pub use results::*;

#[cfg(test)]
mod tests;
