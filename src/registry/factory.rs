//! Builds a boxed [`Player`] for a newly started match from the CLI's chosen
//! player type and its tuning parameters, mirroring the source's
//! `PlayerFactory`, which closes over a player class and its constructor
//! keyword arguments and is later called with `(game, role, start_clock,
//! play_clock)`.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game::{Game, Role};
use crate::player::Player;
use crate::players::{
    AlphaBeta, BoundedDepth, CompulsiveDeliberation, Heuristic, Legal, Minimax, MonteCarlo, MonteCarloTreeSearch, Random,
    SequentialPlanner,
};

/// Which heuristic `BoundedDepth` scores frontier states with, named the way
/// the CLI's `--heuristic` flag spells it.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum HeuristicKind {
    Zero,
    Utility,
    Mobility,
}

/// The player type and its parameters, as selected by the CLI subcommand.
/// `build` is the one place a game-id's player comes into existence; the
/// seed passed in is combined with a per-match discriminator so concurrent
/// matches stay independently reproducible.
#[derive(Clone, Debug)]
pub enum PlayerFactory {
    Legal,
    Random,
    CompulsiveDeliberation,
    SequentialPlanner,
    Minimax,
    AlphaBeta,
    BoundedDepth { max_depth: i64, heuristic: HeuristicKindArg },
    MonteCarlo { max_depth: i64, num_probes: u32 },
    MonteCarloTreeSearch { c: f64 },
}

/// A `Clone + Debug` stand-in for [`HeuristicKind`], since `clap::ValueEnum`
/// types are not required to implement either.
#[derive(Clone, Copy, Debug)]
pub enum HeuristicKindArg {
    Zero,
    Utility,
    Mobility,
}

impl From<HeuristicKind> for HeuristicKindArg {
    fn from(k: HeuristicKind) -> Self {
        match k {
            HeuristicKind::Zero => HeuristicKindArg::Zero,
            HeuristicKind::Utility => HeuristicKindArg::Utility,
            HeuristicKind::Mobility => HeuristicKindArg::Mobility,
        }
    }
}

impl PlayerFactory {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerFactory::Legal => "Legal",
            PlayerFactory::Random => "Random",
            PlayerFactory::CompulsiveDeliberation => "CompulsiveDeliberation",
            PlayerFactory::SequentialPlanner => "SequentialPlanner",
            PlayerFactory::Minimax => "Minimax",
            PlayerFactory::AlphaBeta => "AlphaBeta",
            PlayerFactory::BoundedDepth { .. } => "BoundedDepth",
            PlayerFactory::MonteCarlo { .. } => "MonteCarlo",
            PlayerFactory::MonteCarloTreeSearch { .. } => "MonteCarloTreeSearch",
        }
    }

    /// Builds the player, seeding its RNG from `seed` and `discriminator`
    /// (a hash of the game id) so that two matches started from the same
    /// process-wide seed do not share a move sequence.
    pub fn build(
        &self,
        game: Arc<Game>,
        role: Role,
        start_clock: Duration,
        play_clock: Duration,
        seed: u64,
        discriminator: u64,
    ) -> Box<dyn Player> {
        let rng = StdRng::seed_from_u64(seed ^ discriminator);
        match self {
            PlayerFactory::Legal => Box::new(Legal::new(game, role)),
            PlayerFactory::Random => Box::new(Random::new(game, role, rng)),
            PlayerFactory::CompulsiveDeliberation => Box::new(CompulsiveDeliberation::new(game, role, play_clock)),
            PlayerFactory::SequentialPlanner => match SequentialPlanner::new(Arc::clone(&game), role.clone(), start_clock) {
                Ok(player) => Box::new(player),
                Err(e) => {
                    tracing::warn!(error = %e, "SequentialPlanner failed to solve within the start clock, falling back to Legal");
                    Box::new(Legal::new(game, role))
                },
            },
            PlayerFactory::Minimax => Box::new(Minimax::new(game, role, play_clock, rng)),
            PlayerFactory::AlphaBeta => Box::new(AlphaBeta::new(game, role, play_clock, rng)),
            PlayerFactory::BoundedDepth { max_depth, heuristic } => {
                let heuristic = match heuristic {
                    HeuristicKindArg::Zero => Heuristic::Zero,
                    HeuristicKindArg::Utility => Heuristic::Utility,
                    HeuristicKindArg::Mobility => Heuristic::mobility(&game, &role),
                };
                Box::new(BoundedDepth::new(game, role, play_clock, *max_depth, heuristic, rng))
            },
            PlayerFactory::MonteCarlo { max_depth, num_probes } => {
                Box::new(MonteCarlo::new(game, role, play_clock, *max_depth, *num_probes, rng))
            },
            PlayerFactory::MonteCarloTreeSearch { c } => Box::new(MonteCarloTreeSearch::new(game, role, start_clock, play_clock, *c, rng)),
        }
    }
}
