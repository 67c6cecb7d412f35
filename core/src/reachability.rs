//! Breadth-first reachability queries over a [`GridState`].
//!
//! Searches start at an arbitrary cell (the player may stand on a cell that was
//! cleared behind them) and only expand into neighbours that are not
//! [`CellState::Empty`]. Each cell is enqueued at most once, so a query costs
//! O(N²) on an N×N grid and never mutates the grid.

use std::collections::VecDeque;

use crate::{CellCoord, CellState, GridError, GridState};

/// Reports whether `to` can be reached from `from` through open cells.
pub fn is_reachable(grid: &GridState, from: CellCoord, to: CellCoord) -> Result<bool, GridError> {
    let _ = grid.state_of(to)?;
    let mut found = false;
    flood(grid, from, |cell| {
        found = cell == to;
        found
    })?;
    Ok(found)
}

/// Every cell reachable from `from`, in breadth-first order starting with `from`.
pub fn reachable_cells(grid: &GridState, from: CellCoord) -> Result<Vec<CellCoord>, GridError> {
    let mut reached = Vec::new();
    flood(grid, from, |cell| {
        reached.push(cell);
        false
    })?;
    Ok(reached)
}

/// Runs the search, handing each dequeued cell to `visit` until it returns `true`.
fn flood<F>(grid: &GridState, from: CellCoord, mut visit: F) -> Result<(), GridError>
where
    F: FnMut(CellCoord) -> bool,
{
    let _ = grid.state_of(from)?;

    let width = usize::try_from(grid.size()).map_err(|_| GridError::InvalidSize(grid.size()))?;
    let mut seen = vec![false; width * width];
    let mut queue = VecDeque::new();

    seen[offset(width, from)] = true;
    queue.push_back(from);

    while let Some(cell) = queue.pop_front() {
        if visit(cell) {
            return Ok(());
        }

        for neighbor in grid.neighbors(cell) {
            let index = offset(width, neighbor);
            if seen[index] {
                continue;
            }

            if grid.state_of(neighbor)? == CellState::Empty {
                continue;
            }

            seen[index] = true;
            queue.push_back(neighbor);
        }
    }

    Ok(())
}

fn offset(width: usize, cell: CellCoord) -> usize {
    cell.row() as usize * width + cell.column() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_row(grid: &mut GridState, row: u32) {
        for column in 0..grid.size() {
            grid.set_state(CellCoord::new(row, column), CellState::Path)
                .expect("set");
        }
    }

    #[test]
    fn reachable_along_carved_row() {
        let mut grid = GridState::new(4).expect("grid");
        open_row(&mut grid, 2);

        let reachable =
            is_reachable(&grid, CellCoord::new(2, 0), CellCoord::new(2, 3)).expect("query");
        assert!(reachable);
    }

    #[test]
    fn empty_cells_block_the_search() {
        let mut grid = GridState::new(4).expect("grid");
        open_row(&mut grid, 0);
        open_row(&mut grid, 3);

        let reachable =
            is_reachable(&grid, CellCoord::new(0, 0), CellCoord::new(3, 3)).expect("query");
        assert!(!reachable);
    }

    #[test]
    fn empty_target_is_never_reached_from_elsewhere() {
        let mut grid = GridState::new(3).expect("grid");
        open_row(&mut grid, 0);

        let reachable =
            is_reachable(&grid, CellCoord::new(0, 0), CellCoord::new(1, 0)).expect("query");
        assert!(!reachable);
    }

    #[test]
    fn origin_is_reachable_from_itself_even_when_empty() {
        let grid = GridState::new(3).expect("grid");
        let cell = CellCoord::new(1, 1);
        assert!(is_reachable(&grid, cell, cell).expect("query"));
    }

    #[test]
    fn search_leaves_empty_origin_through_open_neighbours() {
        let mut grid = GridState::new(3).expect("grid");
        grid.set_state(CellCoord::new(1, 2), CellState::Path)
            .expect("set");
        grid.set_state(CellCoord::new(2, 2), CellState::Goal)
            .expect("set");

        let reachable =
            is_reachable(&grid, CellCoord::new(1, 1), CellCoord::new(2, 2)).expect("query");
        assert!(reachable);
    }

    #[test]
    fn reachable_cells_visits_each_open_cell_once() {
        let mut grid = GridState::new(5).expect("grid");
        for row in 0..5 {
            for column in 0..5 {
                grid.set_state(CellCoord::new(row, column), CellState::Path)
                    .expect("set");
            }
        }

        let reached = reachable_cells(&grid, CellCoord::new(2, 2)).expect("flood");
        assert_eq!(reached.len(), 25);
        assert_eq!(reached[0], CellCoord::new(2, 2));

        let mut deduplicated = reached.clone();
        deduplicated.sort();
        deduplicated.dedup();
        assert_eq!(deduplicated.len(), reached.len());
    }

    #[test]
    fn out_of_bounds_endpoints_are_reported() {
        let grid = GridState::new(2).expect("grid");
        assert!(is_reachable(&grid, CellCoord::new(0, 0), CellCoord::new(0, 2)).is_err());
        assert!(reachable_cells(&grid, CellCoord::new(5, 5)).is_err());
    }
}
