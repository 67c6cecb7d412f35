#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Goalgrid engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! happened. The single mutable resource, the [`GridState`], lives here so the
//! generation, goal and movement systems can operate on it through one narrow
//! interface without depending on each other.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod grid;
pub mod reachability;

pub use grid::GridState;

/// Grid edge length used when no explicit size is configured.
pub const DEFAULT_GRID_SIZE: u32 = 10;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Discards any previous state and generates a fresh grid of the given size.
    Initialize {
        /// Number of rows and columns of the square grid.
        grid_size: u32,
    },
    /// Requests that the player advance a single cell in the given direction.
    Move {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Regenerates the grid using the current size.
    Restart,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A new grid was generated and the player placed on the start cell.
    Generated {
        /// Cell the player starts on.
        start: CellCoord,
        /// Goals known after generation.
        goals: GoalSet,
        /// Carving strategy chosen for this grid.
        strategy: Strategy,
        /// Whether the carve reached the goal before dead-ending.
        reached: bool,
    },
    /// Reports the outcome of a single move request.
    MoveResolved {
        /// Direction the player attempted to move in.
        direction: Direction,
        /// Cell the player occupied before the request.
        from: CellCoord,
        /// Cell the player occupies after the request.
        to: CellCoord,
        /// Classification of the move.
        result: MoveResult,
    },
    /// The current goal was reached and a new one drawn.
    GoalAdvanced {
        /// Goal that was just reached and cleared.
        achieved: CellCoord,
        /// Reachable cell recorded as a visited marker.
        visited: CellCoord,
        /// Goal the player must reach next.
        current: CellCoord,
    },
    /// The current goal was reached but no reachable cell remains for a new one.
    GoalExhausted {
        /// Goal that was just reached and cleared.
        achieved: CellCoord,
    },
}

/// Classification of a single cell of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Blocked cell the player cannot enter.
    #[default]
    Empty,
    /// Carved cell the player can walk on.
    Path,
    /// Goal cell the player can walk on.
    Goal,
}

impl CellState {
    /// Reports whether the player and reachability searches may enter the cell.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Neighbour enumeration order used by carving and searches (N, W, S, E).
    pub const SCAN_ORDER: [Direction; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];

    /// Unit offset expressed as `(row, column)` deltas.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.row().abs_diff(other.row()) + self.column().abs_diff(other.column())
    }

    /// Cell one step away in `direction`, if it lies inside a `size`×`size` grid.
    #[must_use]
    pub fn neighbor(self, direction: Direction, size: u32) -> Option<CellCoord> {
        let (row_delta, column_delta) = direction.delta();
        let row = i64::from(self.row) + row_delta;
        let column = i64::from(self.column) + column_delta;
        let bound = i64::from(size);
        if row < 0 || column < 0 || row >= bound || column >= bound {
            return None;
        }

        Some(CellCoord::new(
            u32::try_from(row).ok()?,
            u32::try_from(column).ok()?,
        ))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Which rules govern goal arrival.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// One goal; reaching it finishes the round.
    #[default]
    Single,
    /// Goals rotate: reaching the current goal draws a new reachable one.
    Multi,
}

/// Carving algorithm used to open a path between start and goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Greedy best-first descent on Manhattan distance.
    Greedy,
    /// Randomized depth-first carving with an explicit stack.
    RandomizedDfs,
}

/// Policy deciding which [`Strategy`] a generation run uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyPolicy {
    /// Uniform choice between both strategies on every generation.
    #[default]
    Random,
    /// Always carve greedily.
    Greedy,
    /// Always carve with the randomized DFS.
    Dfs,
}

/// Outcome of a single move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveResult {
    /// The target was blocked or out of bounds; nothing changed.
    Rejected,
    /// The player advanced one cell.
    Moved,
    /// The player reached the goal of a single-goal round.
    Finished,
    /// The player reached the current goal and a new goal was drawn.
    GoalAdvanced,
    /// The player reached the current goal but no reachable cell remains.
    GoalExhausted,
}

/// Snapshot of the goal record.
///
/// In single-goal mode only `current` is populated. In multi-goal mode the
/// three collections are pairwise disjoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSet {
    /// Goal the player must reach next, if any remains.
    pub current: Option<CellCoord>,
    /// Goals reached and cleared, in the order they were reached.
    pub achieved: Vec<CellCoord>,
    /// Goals kept as markers, in the order they were recorded.
    pub visited: Vec<CellCoord>,
}

/// Dense, read-only copy of the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    size: u32,
    cells: Vec<CellState>,
}

impl GridSnapshot {
    /// Captures a snapshot from row-major cell states.
    #[must_use]
    pub fn new(size: u32, cells: Vec<CellState>) -> Self {
        Self { size, cells }
    }

    /// Edge length of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// State of the provided cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> Option<CellState> {
        if cell.row() >= self.size || cell.column() >= self.size {
            return None;
        }
        let width = usize::try_from(self.size).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        self.cells.get(row * width + column).copied()
    }

    /// Row-major slice of all cell states.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Iterator over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        let width = usize::try_from(self.size).unwrap_or(0).max(1);
        self.cells.chunks(width)
    }
}

/// Everything a presentation layer needs to draw a frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Cell classification.
    pub grid: GridSnapshot,
    /// Start cell of the current round.
    pub start: CellCoord,
    /// Current player position.
    pub player: CellCoord,
    /// Goal record.
    pub goals: GoalSet,
    /// Active game mode.
    pub mode: GameMode,
    /// Whether further moves are disabled until a restart.
    pub finished: bool,
}

/// Failures raised when a caller addresses the grid incorrectly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GridError {
    /// A coordinate outside `[0, size)` was passed to the grid.
    #[error("cell {cell} lies outside the {size}x{size} grid")]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
        /// Edge length of the grid.
        size: u32,
    },
    /// The grid was constructed with a size that cannot hold any cell.
    #[error("grid size {0} is not supported")]
    InvalidSize(u32),
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, CellState, Command, Direction, Event, GoalSet, GridError, GridSnapshot,
        MoveResult, Strategy,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn neighbor_respects_grid_bounds() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.neighbor(Direction::Up, 3), None);
        assert_eq!(corner.neighbor(Direction::Left, 3), None);
        assert_eq!(
            corner.neighbor(Direction::Down, 3),
            Some(CellCoord::new(1, 0))
        );
        assert_eq!(
            corner.neighbor(Direction::Right, 3),
            Some(CellCoord::new(0, 1))
        );

        let far = CellCoord::new(2, 2);
        assert_eq!(far.neighbor(Direction::Down, 3), None);
        assert_eq!(far.neighbor(Direction::Right, 3), None);
    }

    #[test]
    fn snapshot_lookup_uses_row_major_layout() {
        let mut cells = vec![CellState::Empty; 6 * 6];
        cells[6 + 4] = CellState::Goal;
        let snapshot = GridSnapshot::new(6, cells);

        assert_eq!(snapshot.state(CellCoord::new(1, 4)), Some(CellState::Goal));
        assert_eq!(snapshot.state(CellCoord::new(4, 1)), Some(CellState::Empty));
        assert_eq!(snapshot.state(CellCoord::new(6, 0)), None);
        assert_eq!(snapshot.rows().count(), 6);
    }

    #[test]
    fn out_of_bounds_error_names_the_cell() {
        let error = GridError::OutOfBounds {
            cell: CellCoord::new(7, 2),
            size: 5,
        };
        assert_eq!(error.to_string(), "cell (7, 2) lies outside the 5x5 grid");
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn command_round_trips_through_bincode() {
        assert_round_trip(&Command::Move {
            direction: Direction::Left,
        });
    }

    #[test]
    fn generated_event_round_trips_through_bincode() {
        assert_round_trip(&Event::Generated {
            start: CellCoord::new(0, 3),
            goals: GoalSet {
                current: Some(CellCoord::new(4, 4)),
                achieved: vec![CellCoord::new(1, 1)],
                visited: vec![CellCoord::new(2, 0)],
            },
            strategy: Strategy::RandomizedDfs,
            reached: true,
        });
    }

    #[test]
    fn move_result_round_trips_through_bincode() {
        assert_round_trip(&MoveResult::GoalExhausted);
    }
}
