#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative engine state for Goalgrid.
//!
//! The [`World`] owns the grid, the goal record, the player and the random
//! source. Adapters mutate it exclusively through [`apply`] and read it
//! through the [`query`] module.

mod config;

pub use config::Config;

use goalgrid_core::{
    CellCoord, Command, Direction, Event, GameMode, GridError, GridState, MoveResult, Strategy,
};
use goalgrid_system_generation::{GenerationOutcome, MazeGenerator};
use goalgrid_system_goals::{GoalError, GoalManager};
use goalgrid_system_movement::MovementController;
use log::info;
use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Smallest grid that can hold a start and a distinct goal.
pub const MIN_GRID_SIZE: u32 = 2;

/// Represents the authoritative Goalgrid engine state.
#[derive(Debug)]
pub struct World {
    mode: GameMode,
    seed: u64,
    rng: ChaCha8Rng,
    grid: GridState,
    generator: MazeGenerator,
    goals: GoalManager,
    movement: MovementController,
    start: CellCoord,
    generation: GenerationOutcome,
}

impl World {
    /// Creates a world and generates its first round.
    pub fn new(config: Config) -> Result<Self, GridError> {
        let seed = config.seed.unwrap_or_else(|| OsRng.next_u64());
        let grid = sized_grid(config.grid_size)?;
        let start = CellCoord::new(0, 0);
        let mut world = Self {
            mode: config.mode,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            grid,
            generator: MazeGenerator::new(config.strategy),
            goals: GoalManager::new(),
            movement: MovementController::new(config.mode, start),
            start,
            generation: GenerationOutcome {
                strategy: Strategy::Greedy,
                reached: false,
                carved: 0,
            },
        };
        let mut events = Vec::new();
        world.generate(&mut events)?;
        Ok(world)
    }

    /// Creates a world with a fixed seed, keeping every other default.
    pub fn with_seed(seed: u64) -> Result<Self, GridError> {
        Self::new(Config::default().with_seed(seed))
    }

    fn generate(&mut self, out_events: &mut Vec<Event>) -> Result<(), GridError> {
        self.grid.reset();

        let size = self.grid.size();
        let start = CellCoord::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
        self.grid.place_start(start)?;
        self.goals.begin(start);

        let goal = self
            .goals
            .place_initial_goal(&mut self.grid, &mut self.rng)
            .map_err(|error| match error {
                GoalError::Grid(error) => error,
                GoalError::Exhausted => GridError::InvalidSize(size),
            })?;

        self.generation = self
            .generator
            .generate(&mut self.grid, start, goal, &mut self.rng)?;
        self.start = start;
        self.movement = MovementController::new(self.mode, start);

        info!(
            "generated {size}x{size} round (seed {:#x}): start {start}, goal {goal}",
            self.seed
        );
        out_events.push(Event::Generated {
            start,
            goals: self.goals.goal_set(),
            strategy: self.generation.strategy,
            reached: self.generation.reached,
        });
        Ok(())
    }

    fn step(
        &mut self,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GridError> {
        let from = self.movement.position();
        let result =
            self.movement
                .try_move(&mut self.grid, &mut self.goals, direction, &mut self.rng)?;
        let to = self.movement.position();

        out_events.push(Event::MoveResolved {
            direction,
            from,
            to,
            result,
        });

        match result {
            MoveResult::GoalAdvanced => {
                if let (Some(&achieved), Some(&visited), Some(current)) = (
                    self.goals.achieved().last(),
                    self.goals.visited().last(),
                    self.goals.current(),
                ) {
                    out_events.push(Event::GoalAdvanced {
                        achieved,
                        visited,
                        current,
                    });
                }
            }
            MoveResult::GoalExhausted => {
                if let Some(&achieved) = self.goals.achieved().last() {
                    out_events.push(Event::GoalExhausted { achieved });
                }
            }
            MoveResult::Rejected | MoveResult::Moved | MoveResult::Finished => {}
        }
        Ok(())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// A rejected `Initialize` leaves the previous round untouched.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), GridError> {
    match command {
        Command::Initialize { grid_size } => {
            world.grid = sized_grid(grid_size)?;
            world.generate(out_events)
        }
        Command::Restart => world.generate(out_events),
        Command::Move { direction } => world.step(direction, out_events),
    }
}

fn sized_grid(size: u32) -> Result<GridState, GridError> {
    if size < MIN_GRID_SIZE {
        return Err(GridError::InvalidSize(size));
    }
    GridState::new(size)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use goalgrid_core::{
        reachability, CellCoord, GameMode, GoalSet, GridError, GridState, StateSnapshot, Strategy,
        StrategyPolicy,
    };

    use super::World;

    /// Captures everything a presentation layer needs to draw a frame.
    #[must_use]
    pub fn snapshot(world: &World) -> StateSnapshot {
        StateSnapshot {
            grid: world.grid.snapshot(),
            start: world.start,
            player: world.movement.position(),
            goals: world.goals.goal_set(),
            mode: world.mode,
            finished: world.movement.is_finished(),
        }
    }

    /// Provides read-only access to the grid.
    #[must_use]
    pub fn grid(world: &World) -> &GridState {
        &world.grid
    }

    /// Current player position.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.movement.position()
    }

    /// Start cell of the current round.
    #[must_use]
    pub fn start(world: &World) -> CellCoord {
        world.start
    }

    /// Snapshot of the goal record.
    #[must_use]
    pub fn goals(world: &World) -> GoalSet {
        world.goals.goal_set()
    }

    /// Active game mode.
    #[must_use]
    pub fn mode(world: &World) -> GameMode {
        world.mode
    }

    /// Whether moves are disabled until the next restart.
    #[must_use]
    pub fn is_finished(world: &World) -> bool {
        world.movement.is_finished()
    }

    /// Seed the world's random source was created from.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Carving strategy used for the current round.
    #[must_use]
    pub fn strategy(world: &World) -> Strategy {
        world.generation.strategy
    }

    /// Whether the carve of the current round arrived at its goal.
    #[must_use]
    pub fn carve_reached_goal(world: &World) -> bool {
        world.generation.reached
    }

    /// Policy used to choose carving strategies.
    #[must_use]
    pub fn strategy_policy(world: &World) -> StrategyPolicy {
        world.generator.policy()
    }

    /// Reports whether the current goal can be reached from the player.
    ///
    /// Returns `false` when no goal is pending.
    pub fn is_goal_reachable(world: &World) -> Result<bool, GridError> {
        match world.goals.current() {
            Some(goal) => reachability::is_reachable(&world.grid, world.movement.position(), goal),
            None => Ok(false),
        }
    }
}
