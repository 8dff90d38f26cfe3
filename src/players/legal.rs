//! The `Legal` player: always plays the first legal action.

use std::sync::Arc;

use crate::game::{Action, Game, Role, State};
use crate::player::{Player, PlayerError};
use crate::players::util::first_action;

pub struct Legal {
    role: Role,
    state: State,
}

impl Legal {
    pub fn new(game: Arc<Game>, role: Role) -> Self {
        Legal { role, state: game.initial_state() }
    }
}

impl Player for Legal {
    fn update_moves(&mut self, joint: &[(Role, Action)]) -> Result<(), PlayerError> {
        self.state = self.state.apply(joint)?;
        Ok(())
    }

    fn get_move(&mut self) -> Result<Action, PlayerError> {
        first_action(&self.state, &self.role).ok_or(PlayerError::NoLegalMoves)
    }

    fn stop(&mut self) {
        tracing::info!(terminal = self.state.is_terminal(), utility = self.state.utility(&self.role), "stopping match");
    }

    fn abort(&mut self) {
        tracing::info!("aborting match");
    }
}
