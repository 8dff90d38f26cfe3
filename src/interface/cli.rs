//! # Command Line Module
//!
//! UNIX-like CLI tooling for starting a GGP player server: a handful of
//! global flags that configure the server itself, followed by a required
//! subcommand naming which player type answers `(start ...)` and `(play
//! ...)` requests.

use clap::{Args, Parser, Subcommand};

use crate::registry::factory::{HeuristicKind, PlayerFactory};

/// A General Game Playing agent server: listens for the standard GGP HTTP
/// messages (`info`, `start`, `play`, `stop`, `abort`) and answers them with
/// the player type chosen on the command line.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /* DEFAULTS PROVIDED */
    /// Port to listen on. If already in use, scans upward for a free one.
    #[arg(short, long, default_value_t = 9147)]
    pub port: u16,
    /// Minimum log level to emit.
    #[arg(short, long, default_value = "info")]
    pub log: String,
    /// Seeds the player's RNG, for reproducible matches. Defaults to 1 when
    /// given with no value.
    #[arg(long, num_args = 0..=1, default_missing_value = "1")]
    pub seed: Option<u64>,

    /* REQUIRED COMMANDS */
    /// Player type to serve matches with.
    #[command(subcommand)]
    pub player: Commands,
}

/// Subcommand choices, specified as `<binary> <subcommand>`, one per
/// implemented player type.
#[derive(Subcommand)]
pub enum Commands {
    /// Always plays the first legal move.
    Legal,
    /// Plays a uniformly random legal move.
    Random,
    /// Exhaustively searches every line to the end of the game.
    CompulsiveDeliberation,
    /// Solves the entire game during the start clock, then plays for free.
    SequentialPlanner,
    /// Full-depth minimax search during the play clock.
    Minimax,
    /// Minimax with alpha-beta pruning.
    AlphaBeta,
    /// Iterative-deepening search to a bounded depth, scored by a heuristic.
    BoundedDepth(BoundedDepthArgs),
    /// Depth-limited search with random-playout rollouts at the frontier.
    MonteCarlo(MonteCarloArgs),
    /// Upper-confidence-bound tree search.
    MonteCarloTreeSearch(MonteCarloTreeSearchArgs),
}

/// `BoundedDepth`'s tuning parameters.
#[derive(Args)]
pub struct BoundedDepthArgs {
    /// Maximum search depth per move; a negative value means "as deep as the
    /// play clock allows".
    #[arg(long, default_value_t = -1)]
    pub max_depth: i64,
    /// Heuristic used to score states at the search frontier.
    #[arg(long, value_enum, default_value = "zero")]
    pub heuristic: HeuristicKind,
}

/// `MonteCarlo`'s tuning parameters.
#[derive(Args)]
pub struct MonteCarloArgs {
    /// Maximum rollout depth; a negative value means "play to termination".
    #[arg(long, default_value_t = -1)]
    pub max_depth: i64,
    /// Number of random playouts averaged per frontier state.
    #[arg(long, default_value_t = 8)]
    pub num_probes: u32,
}

/// `MonteCarloTreeSearch`'s tuning parameters.
#[derive(Args)]
pub struct MonteCarloTreeSearchArgs {
    /// Exploration constant in the UCB1 selection rule.
    #[arg(short = 'C', long, default_value_t = std::f64::consts::SQRT_2)]
    pub c: f64,
}

impl Commands {
    /// Translates the chosen subcommand into a [`PlayerFactory`], the one
    /// value [`crate::registry::MatchRegistry`] needs to build a fresh
    /// player for every match it starts.
    pub fn into_factory(self) -> PlayerFactory {
        match self {
            Commands::Legal => PlayerFactory::Legal,
            Commands::Random => PlayerFactory::Random,
            Commands::CompulsiveDeliberation => PlayerFactory::CompulsiveDeliberation,
            Commands::SequentialPlanner => PlayerFactory::SequentialPlanner,
            Commands::Minimax => PlayerFactory::Minimax,
            Commands::AlphaBeta => PlayerFactory::AlphaBeta,
            Commands::BoundedDepth(args) => PlayerFactory::BoundedDepth { max_depth: args.max_depth, heuristic: args.heuristic.into() },
            Commands::MonteCarlo(args) => PlayerFactory::MonteCarlo { max_depth: args.max_depth, num_probes: args.num_probes },
            Commands::MonteCarloTreeSearch(args) => PlayerFactory::MonteCarloTreeSearch { c: args.c },
        }
    }
}
