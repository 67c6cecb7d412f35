#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Goalgrid in a terminal.

mod options;
mod render;
mod script;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use goalgrid_world::{self as world, query, World};
use log::info;

use crate::{options::Options, script::Input};

/// Entry point for the Goalgrid command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let options = Options::parse();
    let config = options.resolve_config()?;
    let mut world = World::new(config).context("failed to generate the initial grid")?;
    info!("playing with seed {:#x}", query::seed(&world));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    draw(&mut out, &world, None)?;

    match &options.moves {
        Some(moves) => {
            for input in script::parse(moves)? {
                if !play(&mut out, &mut world, input)? {
                    break;
                }
            }
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read from stdin")?;
                let inputs = match script::parse(&line) {
                    Ok(inputs) => inputs,
                    Err(error) => {
                        writeln!(out, "{error}")?;
                        continue;
                    }
                };
                for input in inputs {
                    if !play(&mut out, &mut world, input)? {
                        return Ok(());
                    }
                }
            }
        }
    }

    Ok(())
}

/// Applies one input and redraws. Returns `false` once the player quits.
fn play(out: &mut impl Write, world: &mut World, input: Input) -> Result<bool> {
    let command = match input {
        Input::Engine(command) => command,
        Input::Quit => return Ok(false),
    };

    let mut events = Vec::new();
    world::apply(world, command, &mut events).context("engine rejected command")?;
    draw(out, world, render::status(&events).as_deref())?;
    Ok(true)
}

fn draw(out: &mut impl Write, world: &World, status: Option<&str>) -> Result<()> {
    writeln!(out, "{}", render::frame(&query::snapshot(world)))?;
    if let Some(status) = status {
        writeln!(out, "{status}")?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
