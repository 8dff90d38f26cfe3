//! # Players Module
//!
//! The family of search strategies a match can be played with, from the
//! trivial `Legal`/`Random` baselines through exact simultaneous-move
//! minimax to depth-limited and Monte Carlo search. Every player implements
//! [`crate::player::Player`] and is constructed directly by the CLI/registry
//! rather than through a shared factory, since each takes its own tuning
//! parameters.

pub mod bounded_depth;
pub mod deliberation;
pub mod legal;
pub mod mcts;
pub mod minimax;
pub mod random;
pub mod util;

pub use bounded_depth::{BoundedDepth, Heuristic, MonteCarlo};
pub use deliberation::{CompulsiveDeliberation, SequentialPlanner};
pub use legal::Legal;
pub use mcts::MonteCarloTreeSearch;
pub use minimax::{AlphaBeta, Minimax};
pub use random::Random;

#[cfg(test)]
mod test;
