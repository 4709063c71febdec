//! The driver that owns a grid and advances it one generation at a time.

use log::{error, info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

use super::cycle::{CycleDetector, CycleOutcome, CycleState};
use super::rule::Rule;
use super::stepper::CellChange;
use crate::config::SimConfig;
use crate::grid::{Board, Grid, NeighborCounts};
use crate::io::{LoadResult, PatternSource};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Notification that the simulation has entered a cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SteadyState {
    /// Generation at which the notification was raised.
    pub generation: u64,
    /// History slot of that generation.
    pub cycle_index: usize,
    /// History slot that matched.
    pub matched: usize,
    /// `false` when the cycle is first found; `true` when the countdown has
    /// finished and the simulation has been reseeded.
    pub complete: bool,
}
impl From<SteadyState> for TelemetryEvent {
    fn from(s: SteadyState) -> Self {
        TelemetryEvent::SteadyState {
            generation: s.generation,
            cycle_index: s.cycle_index,
            matched: s.matched,
            complete: s.complete,
        }
    }
}

/// Everything a renderer needs to know about one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Generation number after the step.
    pub generation: u64,
    /// Cells that changed, in row-major order. When `reseeded` is set these
    /// describe the grid that was replaced.
    pub changes: Vec<CellChange>,
    /// Steady-state notification raised during this generation.
    pub steady_state: Option<SteadyState>,
    /// Whether the grid was replaced by a new pattern, in which case the
    /// renderer should redraw everything.
    pub reseeded: bool,
}

/// A Life simulation on a fixed-size grid that reseeds itself when it settles
/// into a cycle.
///
/// The host calls [`Simulation::step()`] from whatever loop it likes, then
/// draws the returned changes and dispatches the queued telemetry events. The
/// grid, neighbor counts, and history are consistent between calls.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    rule: Rule,
    board: Board,
    detector: CycleDetector,
    generation: u64,
    rng: ChaCha8Rng,
    last_step_duration: Option<Duration>,
    events: Vec<TelemetryEvent>,
}
impl Simulation {
    /// Constructs a simulation and loads its initial pattern.
    pub fn new(config: SimConfig) -> LoadResult<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let initial = config.initial.clone();
        let mut ret = Self {
            rule: config.rule,
            board: Board::new(config.width, config.height),
            detector: CycleDetector::new(config.max_cycles, config.countdown),
            generation: 0,
            rng,
            last_step_duration: None,
            events: vec![],
            config,
        };
        ret.initialize(&initial)?;
        Ok(ret)
    }

    /// Replaces the grid with a new pattern and resets the generation count
    /// and cycle history. On error, the simulation is left unchanged.
    pub fn initialize(&mut self, source: &PatternSource) -> LoadResult<()> {
        let loaded = source.load(self.config.width, self.config.height, &mut self.rng)?;
        if let Some(rule) = loaded.rule {
            self.rule = rule;
        }
        info!(
            "Loaded {}x{} grid with {} live cells using rule {}",
            loaded.grid.width(),
            loaded.grid.height(),
            loaded.grid.population(),
            self.rule,
        );
        self.events.push(TelemetryEvent::Start {
            width: loaded.grid.width(),
            height: loaded.grid.height(),
            rule: self.rule,
            rle: loaded.grid.to_rle_string(&self.rule),
        });
        self.board = Board::from(loaded.grid);
        self.generation = 0;
        self.detector.reset();
        Ok(())
    }

    /// Advances the simulation by one generation. See
    /// [`Simulation::advance_one_generation()`].
    pub fn step(&mut self) -> StepReport {
        self.advance_one_generation()
    }

    /// Advances the simulation by one generation, checks for cycles, and
    /// reseeds if a cycle's countdown has finished.
    pub fn advance_one_generation(&mut self) -> StepReport {
        let start = Instant::now();

        let (board, changes) = self.board.step(&self.rule);
        self.board = board;
        self.generation += 1;

        let mut steady_state = None;
        let mut reseeded = false;
        match self.detector.observe(self.board.grid()) {
            CycleOutcome::Continue => (),
            CycleOutcome::SteadyState {
                cycle_index,
                matched,
            } => {
                info!(
                    "Generation {} repeats history slot {}; reseeding in {} generations",
                    self.generation,
                    matched,
                    self.config.countdown.saturating_sub(1),
                );
                steady_state = Some(SteadyState {
                    generation: self.generation,
                    cycle_index,
                    matched,
                    complete: false,
                });
            }
            CycleOutcome::Reseed {
                cycle_index,
                matched,
            } => {
                info!("Reseeding after generation {}", self.generation);
                steady_state = Some(SteadyState {
                    generation: self.generation,
                    cycle_index,
                    matched,
                    complete: true,
                });
            }
        }
        if let Some(s) = steady_state {
            self.events.push(s.into());
            if s.complete {
                reseeded = self.reseed();
            }
        }

        let duration = start.elapsed();
        trace!("Generation {} took {:?}", self.generation, duration);
        self.last_step_duration = Some(duration);
        let alive = if self.config.log_population {
            Some(self.board.grid().population())
        } else {
            None
        };
        let fps = self.fps().unwrap_or_default();
        self.events
            .push(TelemetryEvent::generation(self.generation, fps, alive));

        StepReport {
            generation: self.generation,
            changes,
            steady_state,
            reseeded,
        }
    }

    fn reseed(&mut self) -> bool {
        let source = self.config.reseed.clone();
        match self.initialize(&source) {
            Ok(()) => true,
            Err(e) => {
                // Keep simulating the old grid; the detector will find the
                // cycle again and retry.
                error!("Unable to reseed: {}", e);
                self.detector.reset();
                false
            }
        }
    }

    /// Returns the current cells.
    pub fn grid(&self) -> &Grid {
        self.board.grid()
    }
    /// Returns the current neighbor counts.
    pub fn counts(&self) -> &NeighborCounts {
        self.board.counts()
    }
    /// Returns the rule being simulated.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }
    /// Returns the settings the simulation was created with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
    /// Returns the number of generations since the last pattern was loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }
    /// Returns the history slot that the next generation will be written to.
    pub fn cycle_index(&self) -> usize {
        self.detector.cycle_index()
    }
    /// Returns whether a cycle has been found.
    pub fn cycle_state(&self) -> CycleState {
        self.detector.state()
    }
    /// Returns the remembered grids.
    pub fn history(&self) -> &[Option<Grid>] {
        self.detector.history()
    }
    /// Returns how long the last generation took.
    pub fn last_step_duration(&self) -> Option<Duration> {
        self.last_step_duration
    }
    /// Returns the observed rate of the last generation, in generations per
    /// second. This is never used by the simulation itself.
    pub fn fps(&self) -> Option<f64> {
        // Clamp to avoid dividing by zero on coarse clocks.
        self.last_step_duration
            .map(|d| 1.0 / d.as_secs_f64().max(1e-6))
    }

    /// Removes and returns the telemetry events queued since the last call.
    pub fn take_events(&mut self) -> Vec<TelemetryEvent> {
        std::mem::take(&mut self.events)
    }
    /// Sends all queued telemetry events to `sink`.
    pub fn flush_events(&mut self, sink: &mut impl TelemetrySink) {
        for event in self.events.drain(..) {
            sink.send(&event);
        }
    }
}
