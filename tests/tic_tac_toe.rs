//! End-to-end coverage of the two-player, simultaneous-move tic-tac-toe
//! fixture (each round both roles mark a previously agreed, distinct cell;
//! the board is shared, so a cell marked by either role becomes unavailable
//! to both).

use ggp::game::{Action, Game};

const RULES: &str = "
(role white)
(role black)

(input white (mark 1 1)) (input white (mark 1 2)) (input white (mark 1 3))
(input white (mark 2 1)) (input white (mark 2 2)) (input white (mark 2 3))
(input white (mark 3 1)) (input white (mark 3 2)) (input white (mark 3 3))
(input black (mark 1 1)) (input black (mark 1 2)) (input black (mark 1 3))
(input black (mark 2 1)) (input black (mark 2 2)) (input black (mark 2 3))
(input black (mark 3 1)) (input black (mark 3 2)) (input black (mark 3 3))

(base (step 1)) (base (step 2)) (base (step 3)) (base (step 4))
(base (step 5)) (base (step 6)) (base (step 7))
(base (cell 1 1 x)) (base (cell 1 1 o)) (base (cell 1 1 b))
(base (cell 1 2 x)) (base (cell 1 2 o)) (base (cell 1 2 b))
(base (cell 1 3 x)) (base (cell 1 3 o)) (base (cell 1 3 b))
(base (cell 2 1 x)) (base (cell 2 1 o)) (base (cell 2 1 b))
(base (cell 2 2 x)) (base (cell 2 2 o)) (base (cell 2 2 b))
(base (cell 2 3 x)) (base (cell 2 3 o)) (base (cell 2 3 b))
(base (cell 3 1 x)) (base (cell 3 1 o)) (base (cell 3 1 b))
(base (cell 3 2 x)) (base (cell 3 2 o)) (base (cell 3 2 b))
(base (cell 3 3 x)) (base (cell 3 3 o)) (base (cell 3 3 b))

(init (step 1))
(init (cell 1 1 b)) (init (cell 1 2 b)) (init (cell 1 3 b))
(init (cell 2 1 b)) (init (cell 2 2 b)) (init (cell 2 3 b))
(init (cell 3 1 b)) (init (cell 3 2 b)) (init (cell 3 3 b))

(<= (legal ?r (mark ?i ?j)) (role ?r) (true (cell ?i ?j b)))

(<= (next (cell ?i ?j x)) (does black (mark ?i ?j)) (true (cell ?i ?j b)))
(<= (next (cell ?i ?j o)) (does white (mark ?i ?j)) (true (cell ?i ?j b)))
(<= (next (cell ?i ?j b)) (true (cell ?i ?j b)) (not (does black (mark ?i ?j))) (not (does white (mark ?i ?j))))
(<= (next (cell ?i ?j ?m)) (true (cell ?i ?j ?m)) (distinct ?m b))
(<= (next (step ?n2)) (true (step ?n1)) (succ ?n1 ?n2))

(<= (line ?m) (true (cell 1 1 ?m)) (true (cell 1 2 ?m)) (true (cell 1 3 ?m)))
(<= (line ?m) (true (cell 2 1 ?m)) (true (cell 2 2 ?m)) (true (cell 2 3 ?m)))
(<= (line ?m) (true (cell 3 1 ?m)) (true (cell 3 2 ?m)) (true (cell 3 3 ?m)))
(<= (line ?m) (true (cell 1 1 ?m)) (true (cell 2 1 ?m)) (true (cell 3 1 ?m)))
(<= (line ?m) (true (cell 1 2 ?m)) (true (cell 2 2 ?m)) (true (cell 3 2 ?m)))
(<= (line ?m) (true (cell 1 3 ?m)) (true (cell 2 3 ?m)) (true (cell 3 3 ?m)))
(<= (line ?m) (true (cell 1 1 ?m)) (true (cell 2 2 ?m)) (true (cell 3 3 ?m)))
(<= (line ?m) (true (cell 1 3 ?m)) (true (cell 2 2 ?m)) (true (cell 3 1 ?m)))

(<= open (true (cell ?i ?j b)))

(<= terminal (line x))
(<= terminal (line o))
(<= terminal (not open))

(<= (goal black 100) (line x))
(<= (goal black 0) (line o) (not (line x)))
(<= (goal black 50) (not (line x)) (not (line o)))
(<= (goal white 100) (line o))
(<= (goal white 0) (line x) (not (line o)))
(<= (goal white 50) (not (line x)) (not (line o)))
";

fn mark(game: &Game, text: &str) -> Action {
    Action(game.parse_term(text).unwrap())
}

#[test]
fn initial_state_has_both_roles_even_and_full_action_space() {
    let game = Game::create(RULES).unwrap();
    assert_eq!(game.roles().len(), 2);
    let names: Vec<String> = game.roles().iter().map(|r| game.format_term(&r.0)).collect();
    assert_eq!(names, vec!["black", "white"]);

    let state = game.initial_state();
    for role in game.roles() {
        assert_eq!(state.utility(role), 50);
        assert_eq!(game.all_actions(role).len(), 9);
    }
    assert_eq!(game.base_propositions().len(), 7 + 27);
}

#[test]
fn black_forces_a_win_via_column_two() {
    let game = Game::create(RULES).unwrap();
    let white = game.roles().iter().find(|r| game.format_term(&r.0) == "white").unwrap().clone();
    let black = game.roles().iter().find(|r| game.format_term(&r.0) == "black").unwrap().clone();

    let plies = [
        ((2, 2), (2, 3)),
        ((1, 2), (1, 3)),
        ((2, 1), (3, 1)),
        ((3, 2), (1, 1)),
    ];

    let mut state = game.initial_state();
    for (b, w) in plies {
        let black_move = mark(&game, &format!("(mark {} {})", b.0, b.1));
        let white_move = mark(&game, &format!("(mark {} {})", w.0, w.1));
        state = state.apply(&[(black.clone(), black_move), (white.clone(), white_move)]).unwrap();
    }

    assert!(state.is_terminal());
    assert_eq!(state.utility(&black), 100);
    assert_eq!(state.utility(&white), 0);
}

#[test]
fn third_round_leaves_exactly_the_remaining_cells_legal_for_white() {
    let game = Game::create(RULES).unwrap();
    let white = game.roles().iter().find(|r| game.format_term(&r.0) == "white").unwrap().clone();
    let black = game.roles().iter().find(|r| game.format_term(&r.0) == "black").unwrap().clone();

    let plies = [((2, 2), (2, 3)), ((1, 2), (1, 3)), ((2, 1), (3, 1))];
    let mut state = game.initial_state();
    for (b, w) in plies {
        let black_move = mark(&game, &format!("(mark {} {})", b.0, b.1));
        let white_move = mark(&game, &format!("(mark {} {})", w.0, w.1));
        state = state.apply(&[(black.clone(), black_move), (white.clone(), white_move)]).unwrap();
    }

    let mut legal: Vec<String> = state.legal_actions(&white).into_iter().map(|a| game.format_term(&a.0)).collect();
    legal.sort();
    assert_eq!(legal, vec!["(mark 1 1)", "(mark 3 2)", "(mark 3 3)"]);
    assert!(!state.is_terminal());
}
