//! End-to-end coverage of the single-player buttons-and-lights fixture,
//! driven through the public `Game`/`State` API exactly as the protocol
//! driver would, without spinning up the HTTP server.

use ggp::game::Game;

const RULES: &str = "
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

fn play(moves: &[&str]) -> (ggp::game::State, Vec<String>) {
    let game = Game::create(RULES).unwrap();
    let role = game.roles()[0].clone();
    let mut state = game.initial_state();
    let mut legal_every_turn = Vec::new();
    for mv in moves {
        let db = state.derive();
        let mut legal: Vec<String> = state.legal_actions_in(&db, &role).into_iter().map(|a| game.format_term(&a.0)).collect();
        legal.sort();
        legal_every_turn.push(legal.join(","));
        let action = ggp::game::Action(game.parse_term(mv).unwrap());
        state = state.apply(&[(role.clone(), action)]).unwrap();
    }
    (state, legal_every_turn)
}

#[test]
fn legal_actions_never_change_and_utility_is_zero_until_the_end() {
    let game = Game::create(RULES).unwrap();
    let role = game.roles()[0].clone();
    let mut state = game.initial_state();
    for mv in ["a", "b", "c", "a", "b"] {
        assert_eq!(state.utility(&role), 0);
        let mut legal: Vec<String> = state.legal_actions(&role).into_iter().map(|a| game.format_term(&a.0)).collect();
        legal.sort();
        assert_eq!(legal, vec!["a", "b", "c"]);
        let action = ggp::game::Action(game.parse_term(mv).unwrap());
        state = state.apply(&[(role.clone(), action)]).unwrap();
    }
}

#[test]
fn forced_win_sequence_reaches_terminal_with_full_utility() {
    let (state, legal_every_turn) = play(&["a", "b", "c", "a", "b", "a"]);
    assert!(legal_every_turn.iter().all(|l| l == "a,b,c"));
    assert!(state.is_terminal());
    let role = state.game().roles()[0].clone();
    assert_eq!(state.utility(&role), 100);
}

#[test]
fn forced_loss_sequence_reaches_terminal_with_zero_utility() {
    let (state, _) = play(&["a", "b", "c", "a", "b", "b"]);
    assert!(state.is_terminal());
    let role = state.game().roles()[0].clone();
    assert_eq!(state.utility(&role), 0);
}
