//! The state value type: a game reference plus the truth-set it denotes.

use std::sync::Arc;

use crate::game::{Action, Game, GameError, Proposition, Role};
use crate::reasoner::Database;
use crate::term::Term;

/// An immutable snapshot of which base propositions are true. Cheap to
/// clone: the truth-set is reference-counted and never mutated in place.
#[derive(Clone)]
pub struct State {
    game: Arc<Game>,
    truth: Arc<[Term]>,
}

impl State {
    pub(crate) fn new(game: Arc<Game>, mut truth: Vec<Term>) -> Self {
        truth.sort();
        truth.dedup();
        State { game, truth: truth.into() }
    }

    pub fn game(&self) -> &Arc<Game> {
        &self.game
    }

    pub fn true_propositions(&self) -> impl Iterator<Item = &Term> {
        self.truth.iter()
    }

    fn wrap_true(&self) -> Vec<Term> {
        self.truth
            .iter()
            .map(|p| Term::Compound(self.game.true_sym, vec![p.clone()].into()))
            .collect()
    }

    /// Runs the reasoner once against this state's truth-set (with no move
    /// context), deriving every predicate's extension. Callers that need
    /// more than one fact about a state (legality, terminality, utility)
    /// should derive once and query the result, rather than re-running the
    /// fixpoint per question.
    pub fn derive(&self) -> Database {
        self.game
            .reasoner
            .evaluate(&self.wrap_true(), &[], None)
            .expect("stratification was checked at game construction")
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal_in(&self.derive())
    }

    pub fn is_terminal_in(&self, db: &Database) -> bool {
        db.contains(&Term::Atom(self.game.terminal_sym))
    }

    pub fn utility(&self, role: &Role) -> i64 {
        self.utility_in(&self.derive(), role)
    }

    /// The maximum value among the solutions of `goal(role, V)`. See
    /// `DESIGN.md` for why the maximum, rather than requiring a unique
    /// solution, is the rule this implementation follows.
    pub fn utility_in(&self, db: &Database, role: &Role) -> i64 {
        let var = self.game.interner.lock().unwrap().intern("V");
        let pattern = Term::Compound(self.game.goal_sym, vec![role.0.clone(), Term::Variable(var)].into());
        self.game.reasoner.solutions(db, pattern).filter_map(|t| t.args()[1].as_integer()).max().unwrap_or(self.game.min_utility())
    }

    pub fn legal_actions(&self, role: &Role) -> Vec<Action> {
        self.legal_actions_in(&self.derive(), role)
    }

    pub fn legal_actions_in(&self, db: &Database, role: &Role) -> Vec<Action> {
        self.legal_action_terms(db, role).collect()
    }

    /// Legal actions for `role` against `db`, yielded lazily without first
    /// collecting them into a `Vec`. Used by callers (like reservoir-style
    /// random selection) that may not need the whole action list.
    pub fn legal_action_terms<'a>(&'a self, db: &'a Database, role: &'a Role) -> impl Iterator<Item = Action> + 'a {
        let var = self.game.interner.lock().unwrap().intern("A");
        let pattern = Term::Compound(self.game.legal_sym, vec![role.0.clone(), Term::Variable(var)].into());
        self.game.reasoner.solutions(db, pattern).map(|t| Action(t.args()[1].clone()))
    }

    /// Applies one action per role, returning the successor state.
    ///
    /// `joint` must contain exactly one `(role, action)` pair per role in
    /// `self.game().roles()`, each legal in the current state.
    pub fn apply(&self, joint: &[(Role, Action)]) -> Result<State, GameError> {
        let legal_db = self.derive();
        for (role, action) in joint {
            let legal = self.legal_actions_in(&legal_db, role);
            if !legal.contains(action) {
                return Err(GameError::IllegalMove {
                    role: self.game.format_term(&role.0),
                    action: self.game.format_term(&action.0),
                });
            }
        }
        let does: Vec<Term> = joint
            .iter()
            .map(|(r, a)| Term::Compound(self.game.does_sym, vec![r.0.clone(), a.0.clone()].into()))
            .collect();
        let db = self
            .game
            .reasoner
            .evaluate(&self.wrap_true(), &does, None)
            .expect("stratification was checked at game construction");
        let var = self.game.interner.lock().unwrap().intern("P");
        let pattern = Term::Compound(self.game.next_sym, vec![Term::Variable(var)].into());
        let next_truth: Vec<Term> = self.game.reasoner.solutions(&db, pattern).map(|t| t.args()[0].clone()).collect();
        Ok(State::new(Arc::clone(&self.game), next_truth))
    }

    pub fn propositions(&self) -> Vec<Proposition> {
        self.truth.iter().cloned().map(Proposition).collect()
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.game, &other.game) && self.truth == other.truth
    }
}

impl Eq for State {}

impl std::hash::Hash for State {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.truth.hash(state);
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("truth", &self.truth.iter().map(|t| self.game.format_term(t)).collect::<Vec<_>>())
            .finish()
    }
}
