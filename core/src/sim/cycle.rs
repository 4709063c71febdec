//! Detection of simulations that have settled into a repeating cycle.

use crate::grid::Grid;

/// Whether the detector is still looking for cycles.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CycleState {
    /// No cycle found yet.
    Running,
    /// A cycle was found; the simulation should be reseeded once `remaining`
    /// more generations have passed.
    CountingDown {
        /// Generations left before reseeding.
        remaining: usize,
        /// History slot that matched.
        matched: usize,
    },
}

/// What the detector concluded about one generation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing to report.
    Continue,
    /// The grid matches the one stored in history slot `matched`; a countdown
    /// has started.
    SteadyState {
        /// History slot the grid was written to.
        cycle_index: usize,
        /// History slot that matched.
        matched: usize,
    },
    /// The countdown finished; the caller must reseed and then call
    /// [`CycleDetector::reset()`].
    Reseed {
        /// History slot the grid was written to.
        cycle_index: usize,
        /// History slot that matched when the countdown started.
        matched: usize,
    },
}

/// Ring buffer of recent grids that recognizes when the current grid repeats
/// one of them.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    history: Vec<Option<Grid>>,
    cycle_index: usize,
    countdown: usize,
    state: CycleState,
}
impl CycleDetector {
    /// Constructs a detector that remembers `max_cycles` grids and requests a
    /// reseed `countdown` generations after a cycle is found, counting the
    /// generation where it was found. Countdowns of 0 and 1 both reseed on the
    /// detection generation. A detector with `max_cycles == 0` never detects
    /// anything.
    pub fn new(max_cycles: usize, countdown: usize) -> Self {
        Self {
            history: vec![None; max_cycles],
            cycle_index: 0,
            countdown,
            state: CycleState::Running,
        }
    }

    /// Returns whether the detector does anything at all.
    pub fn is_enabled(&self) -> bool {
        !self.history.is_empty()
    }
    /// Returns the current state.
    pub fn state(&self) -> CycleState {
        self.state
    }
    /// Returns the history slot that the next grid will be written to.
    pub fn cycle_index(&self) -> usize {
        self.cycle_index
    }
    /// Returns the grids remembered in each history slot.
    pub fn history(&self) -> &[Option<Grid>] {
        &self.history
    }

    /// Forgets all history and returns to [`CycleState::Running`].
    pub fn reset(&mut self) {
        for slot in &mut self.history {
            *slot = None;
        }
        self.cycle_index = 0;
        self.state = CycleState::Running;
    }

    /// Records `grid` as the latest generation and checks it against history.
    ///
    /// The grid is compared against every remembered grid before it replaces
    /// the oldest one, so cycles with a period of up to `max_cycles`
    /// generations are found and a grid is never compared with itself.
    pub fn observe(&mut self, grid: &Grid) -> CycleOutcome {
        if !self.is_enabled() {
            return CycleOutcome::Continue;
        }

        let cycle_index = self.cycle_index;
        let outcome = match self.state {
            CycleState::Running => match self.find_match(grid) {
                // The detection generation is the first tick of the countdown.
                Some(matched) => match self.countdown.saturating_sub(1) {
                    0 => CycleOutcome::Reseed { cycle_index, matched },
                    remaining => {
                        self.state = CycleState::CountingDown { remaining, matched };
                        CycleOutcome::SteadyState { cycle_index, matched }
                    }
                },
                None => CycleOutcome::Continue,
            },
            CycleState::CountingDown { remaining, matched } => {
                let remaining = remaining.saturating_sub(1);
                self.state = CycleState::CountingDown { remaining, matched };
                if remaining == 0 {
                    CycleOutcome::Reseed { cycle_index, matched }
                } else {
                    CycleOutcome::Continue
                }
            }
        };

        self.history[cycle_index] = Some(grid.clone());
        self.cycle_index = (cycle_index + 1) % self.history.len();
        outcome
    }

    /// Returns the first populated history slot that holds a grid equal to
    /// `grid`.
    fn find_match(&self, grid: &Grid) -> Option<usize> {
        self.history
            .iter()
            .position(|slot| slot.as_ref() == Some(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(usize, usize)]) -> Grid {
        Grid::with_live_cells(4, 4, cells.iter().copied())
    }

    #[test]
    fn test_disabled_detector() {
        let mut detector = CycleDetector::new(0, 10);
        let grid = grid_with(&[(1, 1)]);
        for _ in 0..5 {
            assert_eq!(CycleOutcome::Continue, detector.observe(&grid));
        }
        assert_eq!(CycleState::Running, detector.state());
    }

    #[test]
    fn test_grid_is_not_compared_to_itself() {
        let mut detector = CycleDetector::new(1, 10);
        let grid = grid_with(&[(1, 1)]);
        assert_eq!(CycleOutcome::Continue, detector.observe(&grid));
        assert_eq!(0, detector.cycle_index());
        // The second time around, the slot holds the previous generation.
        assert_eq!(
            CycleOutcome::SteadyState {
                cycle_index: 0,
                matched: 0
            },
            detector.observe(&grid),
        );
    }

    #[test]
    fn test_period_equal_to_history_length() {
        let a = grid_with(&[(0, 0)]);
        let b = grid_with(&[(1, 1)]);
        let mut detector = CycleDetector::new(2, 10);
        assert_eq!(CycleOutcome::Continue, detector.observe(&a));
        assert_eq!(CycleOutcome::Continue, detector.observe(&b));
        assert_eq!(
            CycleOutcome::SteadyState {
                cycle_index: 0,
                matched: 0
            },
            detector.observe(&a),
        );
    }

    #[test]
    fn test_unpopulated_slots_never_match() {
        // An empty grid must not match the empty history slots.
        let mut detector = CycleDetector::new(4, 10);
        assert_eq!(CycleOutcome::Continue, detector.observe(&grid_with(&[])));
    }

    #[test]
    fn test_countdown() {
        let a = grid_with(&[(0, 0)]);
        let b = grid_with(&[(1, 1)]);
        let mut detector = CycleDetector::new(3, 3);

        assert_eq!(CycleOutcome::Continue, detector.observe(&a));
        assert_eq!(CycleOutcome::Continue, detector.observe(&b));
        assert_eq!(
            CycleOutcome::SteadyState {
                cycle_index: 2,
                matched: 0
            },
            detector.observe(&a),
        );
        assert_eq!(
            CycleState::CountingDown {
                remaining: 2,
                matched: 0
            },
            detector.state(),
        );
        // No comparisons happen while counting down, and the write cursor keeps
        // moving.
        assert_eq!(CycleOutcome::Continue, detector.observe(&b));
        assert_eq!(1, detector.cycle_index());
        assert_eq!(
            CycleOutcome::Reseed {
                cycle_index: 1,
                matched: 0
            },
            detector.observe(&a),
        );

        detector.reset();
        assert_eq!(0, detector.cycle_index());
        assert_eq!(CycleState::Running, detector.state());
        assert!(detector.history().iter().all(Option::is_none));
    }

    #[test]
    fn test_zero_countdown_reseeds_immediately() {
        let a = grid_with(&[(0, 0)]);
        let mut detector = CycleDetector::new(2, 0);
        assert_eq!(CycleOutcome::Continue, detector.observe(&a));
        assert_eq!(
            CycleOutcome::Reseed {
                cycle_index: 1,
                matched: 0
            },
            detector.observe(&a),
        );
    }

    #[test]
    fn test_countdown_counts_detection_generation() {
        let a = grid_with(&[(0, 0)]);
        let b = grid_with(&[(1, 1)]);
        let mut detector = CycleDetector::new(2, 10);
        detector.observe(&a);
        detector.observe(&b);
        let mut detected_at = None;
        let mut reseeded_at = None;
        for generation in 3..40 {
            let grid = if generation % 2 == 1 { &a } else { &b };
            match detector.observe(grid) {
                CycleOutcome::SteadyState { .. } => detected_at = Some(generation),
                CycleOutcome::Reseed { .. } => {
                    reseeded_at = Some(generation);
                    break;
                }
                CycleOutcome::Continue => (),
            }
        }
        assert_eq!(Some(3), detected_at);
        assert_eq!(Some(12), reseeded_at);

        // A countdown of 1 finishes on the detection generation itself.
        let mut detector = CycleDetector::new(2, 1);
        detector.observe(&a);
        assert_eq!(
            CycleOutcome::Reseed {
                cycle_index: 1,
                matched: 0
            },
            detector.observe(&a),
        );
    }

    #[test]
    fn test_history_is_a_snapshot() {
        let mut grid = grid_with(&[(0, 0)]);
        let mut detector = CycleDetector::new(2, 10);
        detector.observe(&grid);
        grid.set(3, 3, true);
        assert_eq!(Some(grid_with(&[(0, 0)])), detector.history()[0]);
    }
}
