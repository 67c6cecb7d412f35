//! Keystroke parsing shared by scripted and interactive play.

use anyhow::{bail, Result};
use goalgrid_core::{Command, Direction};

/// Player intent decoded from a single keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Forward the command to the engine.
    Engine(Command),
    /// Leave the program.
    Quit,
}

/// Decodes every non-whitespace character of `line`.
pub(crate) fn parse(line: &str) -> Result<Vec<Input>> {
    line.chars()
        .filter(|key| !key.is_whitespace())
        .map(parse_key)
        .collect()
}

fn parse_key(key: char) -> Result<Input> {
    let input = match key.to_ascii_lowercase() {
        'w' => Input::Engine(Command::Move {
            direction: Direction::Up,
        }),
        'a' => Input::Engine(Command::Move {
            direction: Direction::Left,
        }),
        's' => Input::Engine(Command::Move {
            direction: Direction::Down,
        }),
        'd' => Input::Engine(Command::Move {
            direction: Direction::Right,
        }),
        'r' => Input::Engine(Command::Restart),
        'q' => Input::Quit,
        other => bail!("unknown key `{other}`; expected one of w, a, s, d, r, q"),
    };
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves_restart_and_quit() {
        let inputs = parse("wA s\td r q").expect("script");
        assert_eq!(
            inputs,
            vec![
                Input::Engine(Command::Move {
                    direction: Direction::Up
                }),
                Input::Engine(Command::Move {
                    direction: Direction::Left
                }),
                Input::Engine(Command::Move {
                    direction: Direction::Down
                }),
                Input::Engine(Command::Move {
                    direction: Direction::Right
                }),
                Input::Engine(Command::Restart),
                Input::Quit,
            ]
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let error = parse("wx").expect_err("x is not a key");
        assert!(error.to_string().contains("`x`"));
    }
}
