//! `CompulsiveDeliberation` and `SequentialPlanner`: brute-force DFS players
//! for single-player games, where there is no opponent to model.

use std::sync::Arc;

use crate::game::{Action, Game, Role, State};
use crate::player::{Player, PlayerError, Timer};

/// Exhaustive depth-first search over a single-player game's full move tree.
/// Returns the best utility reachable and the move sequence that reaches it,
/// short-circuiting as soon as a line achieves the maximum utility.
fn dfs(state: &State, role: &Role, timer: &Timer) -> Result<(i64, Vec<Action>), PlayerError> {
    timer.check()?;
    if state.is_terminal() {
        return Ok((state.utility(role), Vec::new()));
    }
    let max_utility = state.game().max_utility();
    let mut best_score = i64::MIN;
    let mut best_sequence = Vec::new();
    for action in state.legal_actions(role) {
        let next = state.apply(&[(role.clone(), action.clone())])?;
        let (score, mut sequence) = dfs(&next, role, timer)?;
        if score > best_score {
            sequence.insert(0, action);
            best_score = score;
            best_sequence = sequence;
        }
        if best_score == max_utility {
            break;
        }
    }
    Ok((best_score, best_sequence))
}

fn assert_single_player(game: &Game) {
    assert_eq!(game.roles().len(), 1, "CompulsiveDeliberation/SequentialPlanner only work for single-player games");
}

/// For each move, re-runs DFS from the current state and plays its first
/// recommended action.
pub struct CompulsiveDeliberation {
    role: Role,
    state: State,
    timer_budget: std::time::Duration,
}

impl CompulsiveDeliberation {
    pub fn new(game: Arc<Game>, role: Role, play_clock: std::time::Duration) -> Self {
        assert_single_player(&game);
        CompulsiveDeliberation { role, state: game.initial_state(), timer_budget: play_clock }
    }
}

impl Player for CompulsiveDeliberation {
    fn update_moves(&mut self, joint: &[(Role, Action)]) -> Result<(), PlayerError> {
        self.state = self.state.apply(joint)?;
        Ok(())
    }

    fn get_move(&mut self) -> Result<Action, PlayerError> {
        let timer = Timer::new(self.timer_budget, std::time::Duration::from_secs(1));
        let (_, sequence) = dfs(&self.state, &self.role, &timer)?;
        sequence.into_iter().next().ok_or(PlayerError::NoLegalMoves)
    }

    fn stop(&mut self) {
        tracing::info!(terminal = self.state.is_terminal(), utility = self.state.utility(&self.role), "stopping match");
    }

    fn abort(&mut self) {
        tracing::info!("aborting match");
    }
}

/// Solves the whole game once at construction (within the start clock) and
/// replays the winning sequence one action per turn.
pub struct SequentialPlanner {
    role: Role,
    state: State,
    sequence: std::collections::VecDeque<Action>,
}

impl SequentialPlanner {
    pub fn new(game: Arc<Game>, role: Role, start_clock: std::time::Duration) -> Result<Self, PlayerError> {
        assert_single_player(&game);
        let state = game.initial_state();
        let timer = Timer::new(start_clock, std::time::Duration::from_secs(1));
        let (_, sequence) = dfs(&state, &role, &timer)?;
        Ok(SequentialPlanner { role, state, sequence: sequence.into() })
    }
}

impl Player for SequentialPlanner {
    fn update_moves(&mut self, joint: &[(Role, Action)]) -> Result<(), PlayerError> {
        self.state = self.state.apply(joint)?;
        Ok(())
    }

    fn get_move(&mut self) -> Result<Action, PlayerError> {
        self.sequence.pop_front().ok_or(PlayerError::NoLegalMoves)
    }

    fn stop(&mut self) {
        tracing::info!(terminal = self.state.is_terminal(), utility = self.state.utility(&self.role), "stopping match");
    }

    fn abort(&mut self) {
        tracing::info!("aborting match");
    }
}
