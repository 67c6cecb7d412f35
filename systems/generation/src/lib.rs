#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Path carving system that opens a route between the start and a goal.
//!
//! Two interchangeable strategies are provided. Both operate exclusively
//! through the [`GridState`] interface and leave connectivity as a byproduct
//! of the carve: neither one re-verifies reachability afterwards. A carve that
//! runs out of empty neighbours stops silently and reports `reached == false`.

use goalgrid_core::{CellCoord, CellState, GridError, GridState, Strategy, StrategyPolicy};
use log::{debug, info};
use rand::{seq::SliceRandom, Rng};

/// Probability of picking the greedy strategy under [`StrategyPolicy::Random`].
const GREEDY_PROBABILITY: f64 = 0.5;

/// Summary of a single carve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Strategy that produced the carve.
    pub strategy: Strategy,
    /// Whether the carve arrived at the goal.
    pub reached: bool,
    /// Number of cells turned from empty into path.
    pub carved: usize,
}

/// Carves paths according to a configured [`StrategyPolicy`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MazeGenerator {
    policy: StrategyPolicy,
}

impl MazeGenerator {
    /// Creates a generator that selects strategies using `policy`.
    #[must_use]
    pub const fn new(policy: StrategyPolicy) -> Self {
        Self { policy }
    }

    /// Policy the generator was configured with.
    #[must_use]
    pub const fn policy(&self) -> StrategyPolicy {
        self.policy
    }

    /// Picks the strategy for the next carve.
    pub fn select_strategy<R>(&self, rng: &mut R) -> Strategy
    where
        R: Rng + ?Sized,
    {
        match self.policy {
            StrategyPolicy::Greedy => Strategy::Greedy,
            StrategyPolicy::Dfs => Strategy::RandomizedDfs,
            StrategyPolicy::Random => {
                if rng.gen_bool(GREEDY_PROBABILITY) {
                    Strategy::Greedy
                } else {
                    Strategy::RandomizedDfs
                }
            }
        }
    }

    /// Selects a strategy and carves from `start` toward `goal`.
    pub fn generate<R>(
        &self,
        grid: &mut GridState,
        start: CellCoord,
        goal: CellCoord,
        rng: &mut R,
    ) -> Result<GenerationOutcome, GridError>
    where
        R: Rng + ?Sized,
    {
        let strategy = self.select_strategy(rng);
        let outcome = match strategy {
            Strategy::Greedy => carve_greedy(grid, start, goal)?,
            Strategy::RandomizedDfs => carve_randomized_dfs(grid, start, goal, rng)?,
        };

        info!(
            "{:?} carve from {start} to {goal}: reached={}, carved={}",
            outcome.strategy, outcome.reached, outcome.carved
        );
        Ok(outcome)
    }
}

/// Greedy best-first carve descending Manhattan distance toward `goal`.
///
/// Ties resolve to the first candidate in up, left, down, right order.
pub fn carve_greedy(
    grid: &mut GridState,
    start: CellCoord,
    goal: CellCoord,
) -> Result<GenerationOutcome, GridError> {
    let _ = grid.state_of(goal)?;
    let _ = grid.state_of(start)?;

    let mut outcome = GenerationOutcome {
        strategy: Strategy::Greedy,
        reached: false,
        carved: 0,
    };
    let mut current = start;

    while current != goal {
        let Some(next) = eligible_neighbors(grid, current, goal)?
            .into_iter()
            .min_by_key(|cell| cell.manhattan_distance(goal))
        else {
            debug!("greedy carve dead-ended at {current}");
            return Ok(outcome);
        };

        outcome.carved += open(grid, next, goal)?;
        current = next;
    }

    outcome.reached = true;
    Ok(outcome)
}

/// Randomized depth-first carve using an explicit stack.
///
/// A cell with open candidates is pushed back beneath its chosen neighbour so
/// later pops can branch from it again; a cell without candidates is dropped.
pub fn carve_randomized_dfs<R>(
    grid: &mut GridState,
    start: CellCoord,
    goal: CellCoord,
    rng: &mut R,
) -> Result<GenerationOutcome, GridError>
where
    R: Rng + ?Sized,
{
    let _ = grid.state_of(goal)?;
    let _ = grid.state_of(start)?;

    let mut outcome = GenerationOutcome {
        strategy: Strategy::RandomizedDfs,
        reached: false,
        carved: 0,
    };
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if current == goal {
            outcome.reached = true;
            break;
        }

        let candidates = eligible_neighbors(grid, current, goal)?;
        let Some(&next) = candidates.choose(rng) else {
            continue;
        };

        outcome.carved += open(grid, next, goal)?;
        stack.push(current);
        stack.push(next);
    }

    if !outcome.reached {
        debug!("dfs carve exhausted its stack before reaching {goal}");
    }
    Ok(outcome)
}

/// Neighbours the carve may step into: empty cells and the goal itself.
fn eligible_neighbors(
    grid: &GridState,
    cell: CellCoord,
    goal: CellCoord,
) -> Result<Vec<CellCoord>, GridError> {
    let mut eligible = Vec::with_capacity(4);
    for neighbor in grid.neighbors(cell) {
        if neighbor == goal || grid.state_of(neighbor)? == CellState::Empty {
            eligible.push(neighbor);
        }
    }
    Ok(eligible)
}

/// Marks `cell` as path unless it is the goal. Returns the number of cells opened.
fn open(grid: &mut GridState, cell: CellCoord, goal: CellCoord) -> Result<usize, GridError> {
    if cell == goal {
        return Ok(0);
    }
    grid.set_state(cell, CellState::Path)?;
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn forced_policies_ignore_the_rng() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..16 {
            assert_eq!(
                MazeGenerator::new(StrategyPolicy::Greedy).select_strategy(&mut rng),
                Strategy::Greedy
            );
            assert_eq!(
                MazeGenerator::new(StrategyPolicy::Dfs).select_strategy(&mut rng),
                Strategy::RandomizedDfs
            );
        }
    }

    #[test]
    fn random_policy_selects_both_strategies() {
        let generator = MazeGenerator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let picks: Vec<_> = (0..64)
            .map(|_| generator.select_strategy(&mut rng))
            .collect();
        assert!(picks.contains(&Strategy::Greedy));
        assert!(picks.contains(&Strategy::RandomizedDfs));
    }

    #[test]
    fn eligible_neighbors_include_goal_but_not_path() {
        let mut grid = GridState::new(3).expect("grid");
        let goal = CellCoord::new(0, 1);
        grid.set_state(goal, CellState::Goal).expect("goal");
        grid.set_state(CellCoord::new(1, 0), CellState::Path)
            .expect("path");

        let eligible = eligible_neighbors(&grid, CellCoord::new(0, 0), goal).expect("scan");
        assert_eq!(eligible, vec![goal]);
    }

    #[test]
    fn greedy_stops_when_boxed_in() {
        let mut grid = GridState::new(3).expect("grid");
        let start = CellCoord::new(0, 0);
        grid.place_start(start).expect("start");
        grid.set_state(CellCoord::new(0, 1), CellState::Path)
            .expect("wall");
        grid.set_state(CellCoord::new(1, 0), CellState::Path)
            .expect("wall");

        let outcome = carve_greedy(&mut grid, start, CellCoord::new(2, 2)).expect("carve");
        assert!(!outcome.reached);
        assert_eq!(outcome.carved, 0);
    }
}
