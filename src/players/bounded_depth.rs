//! `BoundedDepth` and `MonteCarlo`: alpha-beta search cut off at a fixed
//! depth (or run under iterative deepening) and evaluated at the frontier
//! with a heuristic instead of recursing to a terminal state.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::game::{Action, Game, Role, State};
use crate::player::{Player, PlayerError, Timer};
use crate::players::util::random_playout;

use super::minimax::for_each_joint;

pub enum Heuristic {
    Zero,
    Utility,
    Mobility { num_possible_moves: usize },
    MonteCarlo { num_probes: u32 },
}

impl Heuristic {
    pub fn mobility(game: &Game, role: &Role) -> Self {
        Heuristic::Mobility { num_possible_moves: game.all_actions(role).len().max(1) }
    }

    /// Raw heuristic value, rescaled to 10..90 so proven wins (100) and
    /// losses (0) remain strictly dominant in the surrounding minimax.
    fn score(&self, state: &State, role: &Role, rng: &mut StdRng, timer: &Timer) -> Result<i64, PlayerError> {
        let raw = match self {
            Heuristic::Zero => 0.0,
            Heuristic::Utility => state.utility(role) as f64,
            Heuristic::Mobility { num_possible_moves } => state.legal_actions(role).len() as f64 / *num_possible_moves as f64,
            Heuristic::MonteCarlo { num_probes } => {
                let mut total = 0.0;
                for _ in 0..*num_probes {
                    total += random_playout(state.clone(), role, rng, timer)? as f64;
                }
                total / (*num_probes as f64).max(1.0)
            },
        };
        Ok((raw * 0.8 + 10.0).round() as i64)
    }
}

struct Search {
    other_roles: Vec<Role>,
    max_utility: i64,
    min_utility: i64,
    heuristic: Heuristic,
}

/// The outcome of a bounded search call: the score, the move that achieves
/// it (only meaningful at the root), and whether the root had exactly one
/// legal move (signals the iterative-deepening loop to stop early).
struct Outcome {
    score: i64,
    action: Option<Action>,
    trivial: bool,
}

impl Search {
    fn min_step_break(&self, score: i64, max_step_score: i64) -> bool {
        score == self.min_utility || score <= max_step_score
    }

    fn max_step_break(&self, score: i64, prev_min_step_score: i64) -> bool {
        score == self.max_utility || score >= prev_min_step_score
    }

    fn search(
        &self,
        state: &State,
        role: &Role,
        root: bool,
        depth: u32,
        max_depth: u32,
        prev_min_step_score: i64,
        timer: &Timer,
        rng: &mut StdRng,
    ) -> Result<Outcome, PlayerError> {
        timer.check()?;
        if state.is_terminal() {
            return Ok(Outcome { score: state.utility(role), action: None, trivial: false });
        }
        if depth >= max_depth {
            return Ok(Outcome { score: self.heuristic.score(state, role, rng, timer)?, action: None, trivial: false });
        }

        let mut own_moves = state.legal_actions(role);
        own_moves.shuffle(rng);

        if root && own_moves.len() == 1 {
            return Ok(Outcome { score: self.min_utility, action: Some(own_moves.into_iter().next().unwrap()), trivial: true });
        }

        let mut max_step_score = self.min_utility - 1;
        let mut best_move = None;

        for own_move in own_moves {
            let mut min_step_score = self.max_utility + 1;
            let mut first_error = None;
            for_each_joint(state, &self.other_roles, &mut Vec::new(), &mut |other_moves| {
                let mut joint: Vec<(Role, Action)> = other_moves.to_vec();
                joint.push((role.clone(), own_move.clone()));
                let next = match state.apply(&joint) {
                    Ok(next) => next,
                    Err(e) => {
                        first_error = Some(PlayerError::from(e));
                        return false;
                    },
                };
                let outcome = match self.search(&next, role, false, depth + 1, max_depth, min_step_score, timer, rng) {
                    Ok(o) => o,
                    Err(e) => {
                        first_error = Some(e);
                        return false;
                    },
                };
                if outcome.score < min_step_score {
                    min_step_score = outcome.score;
                }
                !self.min_step_break(outcome.score, max_step_score)
            });
            if let Some(e) = first_error {
                return Err(e);
            }

            if min_step_score > max_step_score {
                max_step_score = min_step_score;
                best_move = Some(own_move);
            }
            if self.max_step_break(max_step_score, prev_min_step_score) {
                break;
            }
        }

        Ok(Outcome { score: max_step_score, action: best_move, trivial: false })
    }
}

fn other_roles(game: &Game, own: &Role) -> Vec<Role> {
    game.roles().iter().filter(|r| *r != own).cloned().collect()
}

pub struct BoundedDepth {
    role: Role,
    state: State,
    search: Search,
    max_depth: i64,
    rng: StdRng,
    play_clock: Duration,
}

impl BoundedDepth {
    pub fn new(game: Arc<Game>, role: Role, play_clock: Duration, max_depth: i64, heuristic: Heuristic, rng: StdRng) -> Self {
        let search = Search { other_roles: other_roles(&game, &role), max_utility: game.max_utility(), min_utility: game.min_utility(), heuristic };
        BoundedDepth { role, state: game.initial_state(), search, max_depth, rng, play_clock }
    }

    fn fixed_depth_move(&mut self, depth: u32) -> Result<(Action, bool), PlayerError> {
        let timer = Timer::new(self.play_clock, Duration::from_secs(1));
        let prev = self.search.max_utility + 1;
        let outcome = self.search.search(&self.state, &self.role, true, 0, depth, prev, &timer, &mut self.rng)?;
        let action = outcome.action.ok_or(PlayerError::NoLegalMoves)?;
        Ok((action, outcome.trivial))
    }
}

impl Player for BoundedDepth {
    fn update_moves(&mut self, joint: &[(Role, Action)]) -> Result<(), PlayerError> {
        self.state = self.state.apply(joint)?;
        Ok(())
    }

    fn get_move(&mut self) -> Result<Action, PlayerError> {
        if self.max_depth >= 0 {
            return self.fixed_depth_move(self.max_depth as u32).map(|(a, _)| a);
        }

        let timer = Timer::new(self.play_clock, Duration::from_secs(2));
        let mut best = None;
        let mut depth = 0u32;
        loop {
            if timer.check().is_err() {
                break;
            }
            depth += 1;
            match self.fixed_depth_move(depth) {
                Ok((action, trivial)) => {
                    best = Some(action);
                    if trivial {
                        break;
                    }
                },
                Err(PlayerError::TimeUp) => break,
                Err(e) => return Err(e),
            }
        }
        best.ok_or(PlayerError::NoLegalMoves)
    }

    fn stop(&mut self) {
        tracing::info!(terminal = self.state.is_terminal(), utility = self.state.utility(&self.role), "stopping match");
    }

    fn abort(&mut self) {
        tracing::info!("aborting match");
    }
}

/// `BoundedDepth` with a Monte Carlo rollout heuristic at the frontier.
pub struct MonteCarlo(BoundedDepth);

impl MonteCarlo {
    pub fn new(game: Arc<Game>, role: Role, play_clock: Duration, max_depth: i64, num_probes: u32, rng: StdRng) -> Self {
        MonteCarlo(BoundedDepth::new(game, role, play_clock, max_depth, Heuristic::MonteCarlo { num_probes }, rng))
    }
}

impl Player for MonteCarlo {
    fn update_moves(&mut self, joint: &[(Role, Action)]) -> Result<(), PlayerError> {
        self.0.update_moves(joint)
    }

    fn get_move(&mut self) -> Result<Action, PlayerError> {
        self.0.get_move()
    }

    fn stop(&mut self) {
        self.0.stop()
    }

    fn abort(&mut self) {
        self.0.abort()
    }
}
