//! Life simulation engine for small fixed-size displays.
//!
//! A [`Simulation`](sim::Simulation) owns a bounded grid, advances it using
//! incrementally-maintained neighbor counts, and reseeds it with a fresh
//! pattern once it settles into a cycle. Patterns come from RLE text or random
//! "soup". Rendering and telemetry transport are left to the host, which
//! receives the changed cells and [`TelemetryEvent`](telemetry::TelemetryEvent)s
//! after each generation.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

pub mod config;
pub mod grid;
pub mod io;
pub mod sim;
pub mod telemetry;

pub mod prelude {
    //! Commonly used types.

    pub use crate::config::SimConfig;
    pub use crate::grid::{Board, Grid, NeighborCounts};
    pub use crate::io::{LoadError, LoadResult, Pattern, PatternSource, Rle};
    pub use crate::sim::rule::{Rule, LIFE};
    pub use crate::sim::{CellChange, CycleState, Simulation, SteadyState, StepReport};
    pub use crate::telemetry::{JsonLinesSink, TelemetryEvent, TelemetrySink};
}
