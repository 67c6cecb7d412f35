#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Goal rotation system for multi-goal play.
//!
//! The [`GoalManager`] partitions every goal it has drawn into three disjoint
//! collections: `achieved` goals were reached and cleared back to empty,
//! `visited` goals are kept on the grid as markers, and at most one `current`
//! goal is pending. Drawing a goal never loops unboundedly: every search is a
//! single pass over the eligible cells and ends in [`GoalError::Exhausted`]
//! when nothing qualifies.

use goalgrid_core::{reachability, CellCoord, CellState, GoalSet, GridError, GridState};
use log::{debug, info, warn};
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

/// Failures raised while drawing goals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GoalError {
    /// No eligible cell remains that could host a new goal.
    #[error("no reachable cell remains for a new goal")]
    Exhausted,
    /// The grid rejected a coordinate.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Cells touched by a completed goal rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalAdvance {
    /// Goal that was reached and cleared.
    pub achieved: CellCoord,
    /// Reachable cell filed as a visited marker.
    pub visited: CellCoord,
    /// Newly established current goal.
    pub current: CellCoord,
}

/// Owns the goal record of a multi-goal round.
#[derive(Clone, Debug, Default)]
pub struct GoalManager {
    start: Option<CellCoord>,
    current: Option<CellCoord>,
    achieved: Vec<CellCoord>,
    visited: Vec<CellCoord>,
}

impl GoalManager {
    /// Creates an empty goal record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every goal and starts a new record anchored at `start`.
    pub fn begin(&mut self, start: CellCoord) {
        self.reset();
        self.start = Some(start);
    }

    /// Forgets every goal and the start cell.
    pub fn reset(&mut self) {
        self.start = None;
        self.current = None;
        self.achieved.clear();
        self.visited.clear();
    }

    /// Goal the player must reach next.
    #[must_use]
    pub const fn current(&self) -> Option<CellCoord> {
        self.current
    }

    /// Goals reached so far, oldest first.
    #[must_use]
    pub fn achieved(&self) -> &[CellCoord] {
        &self.achieved
    }

    /// Goals kept as markers, oldest first.
    #[must_use]
    pub fn visited(&self) -> &[CellCoord] {
        &self.visited
    }

    /// Captures the record for presentation.
    #[must_use]
    pub fn goal_set(&self) -> GoalSet {
        GoalSet {
            current: self.current,
            achieved: self.achieved.clone(),
            visited: self.visited.clone(),
        }
    }

    /// Draws a goal uniformly among cells that are neither the start nor part
    /// of the record, marks it as a goal on the grid and returns it.
    ///
    /// The drawn cell is not checked for reachability and is not assigned to
    /// any collection; callers decide what it becomes.
    pub fn generate_goal<R>(&self, grid: &mut GridState, rng: &mut R) -> Result<CellCoord, GoalError>
    where
        R: Rng + ?Sized,
    {
        let candidates = self.eligible_cells(grid);
        let Some(&goal) = candidates.choose(rng) else {
            return Err(GoalError::Exhausted);
        };
        grid.set_state(goal, CellState::Goal)?;
        Ok(goal)
    }

    /// Draws a goal reachable from `from`, marks it and returns it.
    ///
    /// Candidates are tried in a uniformly shuffled order and each is checked
    /// against the grid as it stands before marking, so a candidate that is
    /// still empty never qualifies. Rejected candidates are left untouched.
    pub fn draw_reachable_goal<R>(
        &self,
        grid: &mut GridState,
        from: CellCoord,
        rng: &mut R,
    ) -> Result<CellCoord, GoalError>
    where
        R: Rng + ?Sized,
    {
        let mut candidates = self.eligible_cells(grid);
        candidates.shuffle(rng);

        let mut rejected = 0_usize;
        for candidate in candidates {
            if reachability::is_reachable(grid, from, candidate)? {
                debug!("accepted goal {candidate} after {rejected} rejected candidates");
                grid.set_state(candidate, CellState::Goal)?;
                return Ok(candidate);
            }
            rejected += 1;
        }

        warn!("no goal reachable from {from} among {rejected} candidates");
        Err(GoalError::Exhausted)
    }

    /// Draws an unconstrained goal and makes it current.
    ///
    /// Used when a round starts, before a path to the goal has been carved.
    pub fn place_initial_goal<R>(
        &mut self,
        grid: &mut GridState,
        rng: &mut R,
    ) -> Result<CellCoord, GoalError>
    where
        R: Rng + ?Sized,
    {
        let goal = self.generate_goal(grid, rng)?;
        self.current = Some(goal);
        Ok(goal)
    }

    /// First half of a rotation: files a reachable goal as a visited marker.
    pub fn record_visited_marker<R>(
        &mut self,
        grid: &mut GridState,
        from: CellCoord,
        rng: &mut R,
    ) -> Result<CellCoord, GoalError>
    where
        R: Rng + ?Sized,
    {
        let marker = self.draw_reachable_goal(grid, from, rng)?;
        self.visited.push(marker);
        Ok(marker)
    }

    /// Second half of a rotation: makes a freshly drawn reachable goal current.
    pub fn establish_current<R>(
        &mut self,
        grid: &mut GridState,
        from: CellCoord,
        rng: &mut R,
    ) -> Result<CellCoord, GoalError>
    where
        R: Rng + ?Sized,
    {
        let goal = self.draw_reachable_goal(grid, from, rng)?;
        self.current = Some(goal);
        Ok(goal)
    }

    /// Retires the current goal and rotates in a new one reachable from `player`.
    ///
    /// The reached cell moves into `achieved` and is cleared to empty. A
    /// reachable marker is then recorded under `visited` before a new current
    /// goal is established. When either draw finds no candidate the record is
    /// left without a current goal and [`GoalError::Exhausted`] is returned.
    pub fn advance_goal<R>(
        &mut self,
        grid: &mut GridState,
        player: CellCoord,
        rng: &mut R,
    ) -> Result<GoalAdvance, GoalError>
    where
        R: Rng + ?Sized,
    {
        let Some(achieved) = self.current.take() else {
            return Err(GoalError::Exhausted);
        };
        self.achieved.push(achieved);
        grid.set_state(achieved, CellState::Empty)?;

        let visited = self.record_visited_marker(grid, player, rng)?;
        let current = self.establish_current(grid, player, rng)?;

        info!("goal {achieved} achieved; marker {visited}, next goal {current}");
        Ok(GoalAdvance {
            achieved,
            visited,
            current,
        })
    }

    fn eligible_cells(&self, grid: &GridState) -> Vec<CellCoord> {
        grid.cells()
            .map(|(cell, _)| cell)
            .filter(|cell| !self.is_excluded(*cell))
            .collect()
    }

    fn is_excluded(&self, cell: CellCoord) -> bool {
        self.start == Some(cell)
            || self.current == Some(cell)
            || self.achieved.contains(&cell)
            || self.visited.contains(&cell)
    }
}
