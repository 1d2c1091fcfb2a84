//! Simulation settings
//!
//! Loaded by the server alongside its own settings; every field has a
//! default so an empty source yields the reference behaviour.

use std::time::Duration;

use serde::Deserialize;

/// Wall-clock time between simulated years.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed seed for the random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub tick_interval_ms: u64,
    /// Random founders spawned at startup. Zero keeps the store empty.
    pub initial_population: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            initial_population: 0,
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
