//! Rules and simulation algorithms.

pub mod cycle;
pub mod rule;
mod simulation;
pub mod stepper;

pub use cycle::{CycleDetector, CycleOutcome, CycleState};
pub use simulation::{Simulation, SteadyState, StepReport};
pub use stepper::{step, step_by_recount, CellChange};
