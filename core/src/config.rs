//! Simulation settings.

use serde::{Deserialize, Serialize};

use crate::io::PatternSource;
use crate::sim::rule::Rule;

/// Settings for a [`Simulation`](crate::sim::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Width of the grid, in cells.
    pub width: usize,
    /// Height of the grid, in cells.
    pub height: usize,
    /// Number of previous generations to compare against when looking for
    /// cycles. Zero disables cycle detection.
    pub max_cycles: usize,
    /// Length of the countdown between finding a cycle and reseeding, in
    /// generations. The generation where the cycle is found counts as the
    /// first.
    pub countdown: usize,
    /// Rule used for patterns that don't declare one.
    pub rule: Rule,
    /// Pattern to start with.
    pub initial: PatternSource,
    /// Pattern to reseed with after a cycle.
    pub reseed: PatternSource,
    /// Seed for random patterns. If `None`, a seed is taken from the OS.
    pub seed: Option<u64>,
    /// Whether to include the number of live cells in generation telemetry.
    pub log_population: bool,
}
impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 80,
            max_cycles: 6,
            countdown: 10,
            rule: Rule::default(),
            initial: PatternSource::Soup {
                chance: 0.15,
                border: 20,
            },
            reseed: PatternSource::default(),
            seed: None,
            log_population: true,
        }
    }
}
