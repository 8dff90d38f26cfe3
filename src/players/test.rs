use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::game::{Game, Role};
use crate::player::Player;
use crate::players::bounded_depth::{BoundedDepth, Heuristic};
use crate::players::mcts::MonteCarloTreeSearch;
use crate::players::minimax::{AlphaBeta, Minimax};

const BUTTONS_AND_LIGHTS: &str = "
(role robot)
(base 1) (base 2) (base 3) (base 4) (base 5) (base 6) (base 7)
(base p) (base q) (base r)
(input robot a) (input robot b) (input robot c)
(init 1)
(<= (legal robot a) (role robot))
(<= (legal robot b) (role robot))
(<= (legal robot c) (role robot))
(<= (next 2) (true 1))
(<= (next 3) (true 2))
(<= (next 4) (true 3))
(<= (next 5) (true 4))
(<= (next 6) (true 5))
(<= (next 7) (true 6))
(<= (next p) (true 1) (does robot a))
(<= (next p) (true 6) (does robot a))
(<= (next q) (true 6) (does robot a))
(<= (next r) (true 6) (does robot a))
(<= (next p) (true 6) (does robot b))
(<= (next r) (true 6) (does robot b))
(<= terminal (true 7))
(<= (goal robot 0) (true 7) (not (true p)))
(<= (goal robot 0) (true 7) (true p) (not (true q)))
(<= (goal robot 0) (true 7) (true p) (true q) (not (true r)))
(<= (goal robot 100) (true 7) (true p) (true q) (true r))
";

/// A shorter three-move relative of [`BUTTONS_AND_LIGHTS`]: winning requires
/// the exact sequence `a, b, c`, every other sequence loses. Small enough
/// for its whole tree (3^3 leaves) to be explored many times over inside a
/// test's wall-clock budget.
const THREE_TURN_SUBGAME: &str = "
(role robot)
(base 1) (base 2) (base 3) (base 4)
(base p) (base q) (base r)
(input robot a) (input robot b) (input robot c)
(init 1)
(<= (legal robot a) (role robot))
(<= (legal robot b) (role robot))
(<= (legal robot c) (role robot))
(<= (next 2) (true 1))
(<= (next 3) (true 2))
(<= (next 4) (true 3))
(<= (next q) (true 1) (does robot a))
(<= (next q) (true q))
(<= (next r) (true 2) (true q) (does robot b))
(<= (next r) (true r))
(<= (next p) (true 3) (true r) (does robot c))
(<= terminal (true 4))
(<= (goal robot 100) (true 4) (true p))
(<= (goal robot 0) (true 4) (not (true p)))
";

fn only_role(game: &Arc<Game>) -> Role {
    game.roles()[0].clone()
}

/// Minimax and alpha-beta search the same exact tree; the cuts `AlphaBeta`
/// adds only skip branches that cannot change the result, so both must
/// settle on a move of equal value.
#[test]
fn minimax_and_alphabeta_agree_on_buttons_and_lights() {
    let game = Game::create(BUTTONS_AND_LIGHTS).unwrap();
    let role = only_role(&game);
    let moves = ["a", "b", "c", "a", "b"];

    let mut minimax = Minimax::new(Arc::clone(&game), role.clone(), Duration::from_secs(5), StdRng::seed_from_u64(1));
    let mut alphabeta = AlphaBeta::new(Arc::clone(&game), role.clone(), Duration::from_secs(5), StdRng::seed_from_u64(1));

    let mut minimax_state = game.initial_state();
    let mut alphabeta_state = game.initial_state();
    for mv in moves {
        let action = crate::game::Action(game.parse_term(mv).unwrap());
        minimax_state = minimax_state.apply(&[(role.clone(), action.clone())]).unwrap();
        alphabeta_state = alphabeta_state.apply(&[(role.clone(), action.clone())]).unwrap();
        minimax.update_moves(&[(role.clone(), action.clone())]).unwrap();
        alphabeta.update_moves(&[(role.clone(), action)]).unwrap();
    }

    let minimax_move = minimax.get_move().unwrap();
    let alphabeta_move = alphabeta.get_move().unwrap();

    let minimax_final = minimax_state.apply(&[(role.clone(), minimax_move)]).unwrap();
    let alphabeta_final = alphabeta_state.apply(&[(role.clone(), alphabeta_move)]).unwrap();

    assert_eq!(minimax_final.utility(&role), 100);
    assert_eq!(alphabeta_final.utility(&role), 100);
}

/// Deeper iterative-deepening search never does worse than a shallower one:
/// once the decisive move is within the search horizon, every subsequent
/// (deeper) iteration keeps recommending it.
#[test]
fn bounded_depth_iterative_deepening_converges_to_the_winning_move() {
    let game = Game::create(BUTTONS_AND_LIGHTS).unwrap();
    let role = only_role(&game);

    let mut player = BoundedDepth::new(
        Arc::clone(&game),
        role.clone(),
        Duration::from_secs(2),
        -1,
        Heuristic::Zero,
        StdRng::seed_from_u64(7),
    );

    for mv in ["a", "b", "c", "a", "b"] {
        let action = crate::game::Action(game.parse_term(mv).unwrap());
        player.update_moves(&[(role.clone(), action)]).unwrap();
    }

    let chosen = player.get_move().unwrap();
    assert_eq!(game.format_term(&chosen.0), "a");
}

/// With a generous play clock, MCTS runs far more than 10 000 simulations
/// of the three-move subgame (3^3 = 27 distinct leaves) and should settle
/// on the only opening move that can lead to a win.
#[test]
fn monte_carlo_tree_search_converges_on_the_three_turn_subgame() {
    let game = Game::create(THREE_TURN_SUBGAME).unwrap();
    let role = only_role(&game);

    let mut player = MonteCarloTreeSearch::new(
        Arc::clone(&game),
        role.clone(),
        Duration::from_millis(0),
        Duration::from_secs(3),
        std::f64::consts::SQRT_2,
        StdRng::seed_from_u64(42),
    );

    let chosen = player.get_move().unwrap();
    assert_eq!(game.format_term(&chosen.0), "a");
}
