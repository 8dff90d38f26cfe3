//! `Minimax` and `AlphaBeta`: exact search over simultaneous-move GDL games.
//!
//! GDL games have simultaneous moves, so there is no single "opponent's
//! turn": every ply alternates a *max* node over this role's moves and,
//! inside it, a *min* node over the Cartesian product of every other role's
//! moves. `AlphaBeta` is the same search with the two pruning cuts described
//! in `SPEC_FULL.md` §4.5 layered on top.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::game::{Action, Game, Role, State};
use crate::player::{Player, PlayerError, Timer};

/// Explores every combination of `roles`' legal actions in `state`, calling
/// `f` with each combination (in the same role order as `roles`). Stops
/// early if `f` returns `false`.
pub(super) fn for_each_joint(
    state: &State,
    roles: &[Role],
    current: &mut Vec<(Role, Action)>,
    f: &mut dyn FnMut(&[(Role, Action)]) -> bool,
) {
    let Some((role, rest)) = roles.split_first() else {
        return;
    };
    for action in state.legal_actions(role) {
        current.push((role.clone(), action));
        if rest.is_empty() {
            if !f(current) {
                current.pop();
                return;
            }
        } else {
            for_each_joint(state, rest, current, f);
        }
        current.pop();
    }
}

struct Search {
    other_roles: Vec<Role>,
    max_utility: i64,
    min_utility: i64,
    prune: bool,
}

impl Search {
    fn min_step_break(&self, score: i64, max_step_score: i64) -> bool {
        self.prune && (score == self.min_utility || score <= max_step_score)
    }

    fn max_step_break(&self, score: i64, prev_min_step_score: i64) -> bool {
        self.prune && (score == self.max_utility || score >= prev_min_step_score)
    }

    /// Returns the best achievable score for `role` and, for `root` calls
    /// only, the move that achieves it (interior calls only need the score).
    fn search(
        &self,
        state: &State,
        role: &Role,
        root: bool,
        prev_min_step_score: i64,
        timer: &Timer,
        rng: &mut StdRng,
    ) -> Result<(i64, Option<Action>), PlayerError> {
        timer.check()?;
        if state.is_terminal() {
            return Ok((state.utility(role), None));
        }

        let mut own_moves = state.legal_actions(role);
        own_moves.shuffle(rng);

        if root && own_moves.len() == 1 {
            return Ok((self.min_utility, Some(own_moves.into_iter().next().unwrap())));
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
                let score = match self.search(&next, role, false, min_step_score, timer, rng) {
                    Ok((score, _)) => score,
                    Err(e) => {
                        first_error = Some(e);
                        return false;
                    },
                };
                if score < min_step_score {
                    min_step_score = score;
                }
                !self.min_step_break(score, max_step_score)
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

        Ok((max_step_score, best_move))
    }
}

fn other_roles(game: &Game, own: &Role) -> Vec<Role> {
    game.roles().iter().filter(|r| *r != own).cloned().collect()
}

macro_rules! minimax_player {
    ($name:ident, $prune:expr) => {
        pub struct $name {
            role: Role,
            state: State,
            search: Search,
            rng: StdRng,
            play_clock: std::time::Duration,
        }

        impl $name {
            pub fn new(game: Arc<Game>, role: Role, play_clock: std::time::Duration, rng: StdRng) -> Self {
                let search = Search {
                    other_roles: other_roles(&game, &role),
                    max_utility: game.max_utility(),
                    min_utility: game.min_utility(),
                    prune: $prune,
                };
                $name { role, state: game.initial_state(), search, rng, play_clock }
            }
        }

        impl Player for $name {
            fn update_moves(&mut self, joint: &[(Role, Action)]) -> Result<(), PlayerError> {
                self.state = self.state.apply(joint)?;
                Ok(())
            }

            fn get_move(&mut self) -> Result<Action, PlayerError> {
                let timer = Timer::new(self.play_clock, std::time::Duration::from_secs(1));
                let prev_min_step_score = self.search.max_utility + 1;
                let (_, action) = self.search.search(&self.state, &self.role, true, prev_min_step_score, &timer, &mut self.rng)?;
                action.ok_or(PlayerError::NoLegalMoves)
            }

            fn stop(&mut self) {
                tracing::info!(terminal = self.state.is_terminal(), utility = self.state.utility(&self.role), "stopping match");
            }

            fn abort(&mut self) {
                tracing::info!("aborting match");
            }
        }
    };
}

minimax_player!(Minimax, false);
minimax_player!(AlphaBeta, true);
