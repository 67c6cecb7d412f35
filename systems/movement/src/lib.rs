#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player movement system that validates steps and detects goal arrival.

use goalgrid_core::{CellCoord, CellState, Direction, GameMode, GridError, GridState, MoveResult};
use goalgrid_system_goals::{GoalError, GoalManager};
use log::{debug, info};
use rand::Rng;

/// Tracks the player position and applies single-cell moves.
#[derive(Clone, Debug)]
pub struct MovementController {
    mode: GameMode,
    position: CellCoord,
    finished: bool,
}

impl MovementController {
    /// Creates a controller with the player standing on `start`.
    #[must_use]
    pub const fn new(mode: GameMode, start: CellCoord) -> Self {
        Self {
            mode,
            position: start,
            finished: false,
        }
    }

    /// Returns the player to `start` and re-enables movement.
    pub fn reset(&mut self, start: CellCoord) {
        self.position = start;
        self.finished = false;
    }

    /// Current player position.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.position
    }

    /// Rules governing goal arrival.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Whether moves stay disabled until the next reset.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Attempts to move the player one cell in `direction`.
    ///
    /// A step off the grid or onto an empty cell is rejected without touching
    /// any state. Stepping onto the current goal finishes a single-goal round
    /// or rotates goals in multi-goal mode.
    pub fn try_move<R>(
        &mut self,
        grid: &mut GridState,
        goals: &mut GoalManager,
        direction: Direction,
        rng: &mut R,
    ) -> Result<MoveResult, GridError>
    where
        R: Rng + ?Sized,
    {
        if self.finished {
            debug!("ignoring {direction:?}: moves are disabled until restart");
            return Ok(MoveResult::Rejected);
        }

        let Some(target) = self.position.neighbor(direction, grid.size()) else {
            debug!("rejected {direction:?} from {}: edge of grid", self.position);
            return Ok(MoveResult::Rejected);
        };

        if grid.state_of(target)? == CellState::Empty {
            debug!("rejected {direction:?} from {}: {target} is empty", self.position);
            return Ok(MoveResult::Rejected);
        }

        self.position = target;
        if goals.current() != Some(target) {
            return Ok(MoveResult::Moved);
        }

        match self.mode {
            GameMode::Single => {
                info!("goal {target} reached");
                self.finished = true;
                Ok(MoveResult::Finished)
            }
            GameMode::Multi => match goals.advance_goal(grid, target, rng) {
                Ok(_) => Ok(MoveResult::GoalAdvanced),
                Err(GoalError::Exhausted) => {
                    self.finished = true;
                    Ok(MoveResult::GoalExhausted)
                }
                Err(GoalError::Grid(error)) => Err(error),
            },
        }
    }
}
