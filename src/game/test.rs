use crate::game::{Action, Game, Role};
use crate::term::Term;

pub(crate) const BUTTONS_AND_LIGHTS: &str = "
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

fn robot(game: &Game) -> Role {
    game.roles()[0].clone()
}

fn action(game: &Game, name: &str) -> Action {
    Action(game.parse_term(name).unwrap())
}

fn apply_one(state: &crate::game::State, game: &Game, role: &Role, name: &str) -> crate::game::State {
    state.apply(&[(role.clone(), action(game, name))]).unwrap()
}

#[test]
fn initial_state_matches_expectations() {
    let game = Game::create(BUTTONS_AND_LIGHTS).unwrap();
    assert_eq!(game.roles().len(), 1);
    let state = game.initial_state();
    assert!(!state.is_terminal());
    assert_eq!(state.utility(&robot(&game)), 0);
    assert_eq!(state.true_propositions().count(), 1);
    assert_eq!(*state.true_propositions().next().unwrap(), Term::Integer(1));
}

#[test]
fn single_move_advances_counter_and_lights_p() {
    let game = Game::create(BUTTONS_AND_LIGHTS).unwrap();
    let role = robot(&game);
    let state = apply_one(&game.initial_state(), &game, &role, "a");
    let mut props: Vec<String> = state.true_propositions().map(|t| game.format_term(t)).collect();
    props.sort();
    assert_eq!(props, vec!["2", "p"]);
    assert!(!state.is_terminal());
    assert_eq!(state.utility(&role), 0);
}

#[test]
fn winning_sequence_reaches_full_utility() {
    let game = Game::create(BUTTONS_AND_LIGHTS).unwrap();
    let role = robot(&game);
    let mut state = game.initial_state();
    for mv in ["a", "b", "c", "a", "b", "a"] {
        state = apply_one(&state, &game, &role, mv);
    }
    let mut props: Vec<String> = state.true_propositions().map(|t| game.format_term(t)).collect();
    props.sort();
    assert_eq!(props, vec!["7", "p", "q", "r"]);
    assert!(state.is_terminal());
    assert_eq!(state.utility(&role), 100);
}

#[test]
fn losing_sequence_reaches_zero_utility() {
    let game = Game::create(BUTTONS_AND_LIGHTS).unwrap();
    let role = robot(&game);
    let mut state = game.initial_state();
    for mv in ["a", "b", "c", "a", "b", "b"] {
        state = apply_one(&state, &game, &role, mv);
    }
    let mut props: Vec<String> = state.true_propositions().map(|t| game.format_term(t)).collect();
    props.sort();
    assert_eq!(props, vec!["7", "p", "r"]);
    assert!(state.is_terminal());
    assert_eq!(state.utility(&role), 0);
}

#[test]
fn illegal_move_is_rejected() {
    let game = Game::create(BUTTONS_AND_LIGHTS).unwrap();
    let role = robot(&game);
    let bogus = Action(Term::atom(&mut game.interner.lock().unwrap(), "z"));
    let err = game.initial_state().apply(&[(role, bogus)]);
    assert!(err.is_err());
}
