//! Shared move-selection and playout helpers used by several players.

use rand::Rng;

use crate::game::{Action, Role, State};
use crate::player::{PlayerError, Timer};

/// The first legal action for `role`, in the reasoner's solution order.
pub fn first_action(state: &State, role: &Role) -> Option<Action> {
    let db = state.derive();
    state.legal_action_terms(&db, role).next()
}

/// A uniformly chosen legal action, picked with reservoir sampling over
/// `legal_action_terms`'s lazy iterator so no up-front `Vec` of the whole
/// action list is allocated just to sample one element from it.
pub fn random_action(state: &State, role: &Role, rng: &mut impl Rng) -> Option<Action> {
    let db = state.derive();
    let mut chosen = None;
    for (i, action) in state.legal_action_terms(&db, role).enumerate() {
        if rng.gen_range(0..=i) == 0 {
            chosen = Some(action);
        }
    }
    chosen
}

/// Plays joint uniform-random legal moves from `state` until terminal,
/// polling `timer` every ply, and returns `role`'s utility there.
pub fn random_playout(
    mut state: State,
    role: &Role,
    rng: &mut impl Rng,
    timer: &Timer,
) -> Result<i64, PlayerError> {
    while !state.is_terminal() {
        timer.check()?;
        let joint: Vec<(Role, Action)> = state
            .game()
            .roles()
            .iter()
            .map(|r| {
                let action = random_action(&state, r, rng).expect("every role has a legal move in a non-terminal state");
                (r.clone(), action)
            })
            .collect();
        state = state.apply(&joint)?;
    }
    Ok(state.utility(role))
}
