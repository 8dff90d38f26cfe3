//! The `Random` player: a uniformly chosen legal action each turn.

use std::sync::Arc;

use rand::rngs::StdRng;

use crate::game::{Action, Game, Role, State};
use crate::player::{Player, PlayerError};
use crate::players::util::random_action;

pub struct Random {
    role: Role,
    state: State,
    rng: StdRng,
}

impl Random {
    pub fn new(game: Arc<Game>, role: Role, rng: StdRng) -> Self {
        Random { role, state: game.initial_state(), rng }
    }
}

impl Player for Random {
    fn update_moves(&mut self, joint: &[(Role, Action)]) -> Result<(), PlayerError> {
        self.state = self.state.apply(joint)?;
        Ok(())
    }

    fn get_move(&mut self) -> Result<Action, PlayerError> {
        random_action(&self.state, &self.role, &mut self.rng).ok_or(PlayerError::NoLegalMoves)
    }

    fn stop(&mut self) {
        tracing::info!(terminal = self.state.is_terminal(), utility = self.state.utility(&self.role), "stopping match");
    }

    fn abort(&mut self) {
        tracing::info!("aborting match");
    }
}
