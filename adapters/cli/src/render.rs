//! Plain-text frame rendering.

use std::fmt::Write as _;

use goalgrid_core::{CellCoord, CellState, Event, MoveResult, StateSnapshot};

const PLAYER: char = '@';
const CURRENT_GOAL: char = 'G';
const VISITED_GOAL: char = 'v';
const PATH: char = '.';
const EMPTY: char = '#';

/// Draws the grid with the player and goal markers, one row per line.
pub(crate) fn frame(snapshot: &StateSnapshot) -> String {
    let size = snapshot.grid.size();
    let mut out = String::with_capacity(((size + 1) * (size + 1)) as usize);

    for row in 0..size {
        for column in 0..size {
            out.push(glyph(snapshot, CellCoord::new(row, column)));
        }
        out.push('\n');
    }

    let goals = &snapshot.goals;
    let _ = write!(
        out,
        "player {}  goal {}  achieved {}",
        snapshot.player,
        goals
            .current
            .map_or_else(|| "none".to_owned(), |goal| goal.to_string()),
        goals.achieved.len()
    );
    out
}

/// One-line summary of the most recent move, if the events contain one.
pub(crate) fn status(events: &[Event]) -> Option<String> {
    events.iter().rev().find_map(|event| match event {
        Event::MoveResolved {
            direction, result, ..
        } => Some(
            match result {
                MoveResult::Rejected => format!("{direction:?}: blocked"),
                MoveResult::Moved => format!("{direction:?}"),
                MoveResult::Finished => "goal reached! press r to play again".to_owned(),
                MoveResult::GoalAdvanced => "goal reached, a new goal appeared".to_owned(),
                MoveResult::GoalExhausted => {
                    "goal reached, no reachable cell is left for another".to_owned()
                }
            },
        ),
        Event::Generated {
            strategy, reached, ..
        } => Some(if *reached {
            format!("new grid carved with {strategy:?}")
        } else {
            format!("new grid carved with {strategy:?} (carve dead-ended)")
        }),
        Event::GoalAdvanced { .. } | Event::GoalExhausted { .. } => None,
    })
}

fn glyph(snapshot: &StateSnapshot, cell: CellCoord) -> char {
    if cell == snapshot.player {
        return PLAYER;
    }

    match snapshot.grid.state(cell) {
        Some(CellState::Goal) if snapshot.goals.visited.contains(&cell) => VISITED_GOAL,
        Some(CellState::Goal) => CURRENT_GOAL,
        Some(CellState::Path) => PATH,
        Some(CellState::Empty) | None => EMPTY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalgrid_core::{Direction, GameMode, GoalSet, GridSnapshot};

    fn snapshot() -> StateSnapshot {
        let cells = vec![
            CellState::Path,
            CellState::Path,
            CellState::Empty,
            CellState::Empty,
            CellState::Path,
            CellState::Goal,
            CellState::Goal,
            CellState::Empty,
            CellState::Empty,
        ];
        StateSnapshot {
            grid: GridSnapshot::new(3, cells),
            start: CellCoord::new(0, 0),
            player: CellCoord::new(0, 1),
            goals: GoalSet {
                current: Some(CellCoord::new(1, 2)),
                achieved: Vec::new(),
                visited: vec![CellCoord::new(2, 0)],
            },
            mode: GameMode::Multi,
            finished: false,
        }
    }

    #[test]
    fn frame_marks_player_goals_and_walls() {
        let text = frame(&snapshot());
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows[0], ".@#");
        assert_eq!(rows[1], "#.G");
        assert_eq!(rows[2], "v##");
        assert_eq!(rows[3], "player (0, 1)  goal (1, 2)  achieved 0");
    }

    #[test]
    fn status_describes_latest_move() {
        let events = vec![
            Event::MoveResolved {
                direction: Direction::Left,
                from: CellCoord::new(0, 1),
                to: CellCoord::new(0, 0),
                result: MoveResult::Moved,
            },
            Event::MoveResolved {
                direction: Direction::Up,
                from: CellCoord::new(0, 0),
                to: CellCoord::new(0, 0),
                result: MoveResult::Rejected,
            },
        ];

        assert_eq!(status(&events).as_deref(), Some("Up: blocked"));
        assert_eq!(status(&[]), None);
    }
}
