//! Command-line flags and configuration file loading.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use goalgrid_core::{GameMode, StrategyPolicy};
use goalgrid_world::Config;

/// Plays Goalgrid rounds in the terminal.
#[derive(Debug, Parser)]
#[command(name = "goalgrid", version)]
pub(crate) struct Options {
    /// Edge length of the square grid.
    #[arg(long)]
    size: Option<u32>,
    /// Single-goal rounds or rotating goals.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Carving strategy policy.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    /// Seed for reproducible grids.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file providing defaults for the flags above.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Moves to play instead of reading stdin: w/a/s/d to move, r to restart.
    #[arg(long, value_name = "SCRIPT")]
    pub(crate) moves: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Single,
    Multi,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Random,
    Greedy,
    Dfs,
}

impl Options {
    /// Merges the configuration file, if any, with explicit flags.
    pub(crate) fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(size) = self.size {
            config.grid_size = size;
        }
        if let Some(mode) = self.mode {
            config.mode = match mode {
                ModeArg::Single => GameMode::Single,
                ModeArg::Multi => GameMode::Multi,
            };
        }
        if let Some(strategy) = self.strategy {
            config.strategy = match strategy {
                StrategyArg::Random => StrategyPolicy::Random,
                StrategyArg::Greedy => StrategyPolicy::Greedy,
                StrategyArg::Dfs => StrategyPolicy::Dfs,
            };
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config at {}", path.display()))
}

fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).context("failed to parse config toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let options = Options::parse_from([
            "goalgrid",
            "--size",
            "6",
            "--mode",
            "multi",
            "--strategy",
            "dfs",
            "--seed",
            "42",
        ]);
        let config = options.resolve_config().expect("config");

        assert_eq!(config.grid_size, 6);
        assert_eq!(config.mode, GameMode::Multi);
        assert_eq!(config.strategy, StrategyPolicy::Dfs);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = parse_config("grid_size = 12\nmode = \"multi\"\n").expect("config");

        assert_eq!(config.grid_size, 12);
        assert_eq!(config.mode, GameMode::Multi);
        assert_eq!(config.strategy, StrategyPolicy::Random);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        assert!(parse_config("grid = 3\n").is_err());
    }

    #[test]
    fn missing_config_file_reports_path() {
        let error = load_config(Path::new("does/not/exist.toml")).expect_err("missing file");
        assert!(format!("{error:#}").contains("does/not/exist.toml"));
    }
}
