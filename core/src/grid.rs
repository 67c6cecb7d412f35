//! Authoritative cell classification shared by every engine component.

use crate::{CellCoord, CellState, Direction, GridError, GridSnapshot};

/// Dense N×N grid of [`CellState`] values plus the start position.
///
/// Every read and write of cell state goes through this type. Mutations are
/// visible to all holders of the grid immediately; there is no transactional
/// isolation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridState {
    size: u32,
    cells: Vec<CellState>,
    start: Option<CellCoord>,
}

impl GridState {
    /// Creates a grid of `size`×`size` empty cells.
    pub fn new(size: u32) -> Result<Self, GridError> {
        let capacity_u64 = u64::from(size) * u64::from(size);
        let capacity = usize::try_from(capacity_u64).map_err(|_| GridError::InvalidSize(size))?;
        if capacity == 0 {
            return Err(GridError::InvalidSize(size));
        }

        Ok(Self {
            size,
            cells: vec![CellState::Empty; capacity],
            start: None,
        })
    }

    /// Edge length of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.size && cell.column() < self.size
    }

    /// Returns the state of a cell.
    pub fn state_of(&self, cell: CellCoord) -> Result<CellState, GridError> {
        let index = self.index(cell)?;
        Ok(self.cells[index])
    }

    /// Overwrites the state of a cell.
    pub fn set_state(&mut self, cell: CellCoord, state: CellState) -> Result<(), GridError> {
        let index = self.index(cell)?;
        self.cells[index] = state;
        Ok(())
    }

    /// Start cell of the current round, once one has been placed.
    #[must_use]
    pub const fn start(&self) -> Option<CellCoord> {
        self.start
    }

    /// Records the start cell and opens it as a path cell.
    pub fn place_start(&mut self, cell: CellCoord) -> Result<(), GridError> {
        self.set_state(cell, CellState::Path)?;
        self.start = Some(cell);
        Ok(())
    }

    /// Clears every cell back to [`CellState::Empty`] and forgets the start.
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Empty);
        self.start = None;
    }

    /// In-bounds neighbours of `cell` in [`Direction::SCAN_ORDER`].
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        let size = self.size;
        Direction::SCAN_ORDER
            .into_iter()
            .filter_map(move |direction| cell.neighbor(direction, size))
    }

    /// Iterator over every cell and its state in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, CellState)> + '_ {
        let size = self.size;
        (0..size)
            .flat_map(move |row| (0..size).map(move |column| CellCoord::new(row, column)))
            .zip(self.cells.iter().copied())
    }

    /// Number of cells currently in `state`.
    #[must_use]
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// Captures a read-only copy of the cell classification.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.size, self.cells.clone())
    }

    fn index(&self, cell: CellCoord) -> Result<usize, GridError> {
        let out_of_bounds = GridError::OutOfBounds {
            cell,
            size: self.size,
        };
        if !self.contains(cell) {
            return Err(out_of_bounds);
        }

        let row = usize::try_from(cell.row()).map_err(|_| out_of_bounds)?;
        let column = usize::try_from(cell.column()).map_err(|_| out_of_bounds)?;
        let width = usize::try_from(self.size).map_err(|_| out_of_bounds)?;
        Ok(row * width + column)
    }
}
