//! # Game Module
//!
//! The immutable game abstraction built on top of [`crate::reasoner`]: a
//! [`Game`] is created once per match from parsed GDL rules and exposes the
//! fixed facts about it (roles, the action space, the maximum and minimum
//! achievable utility); a [`state::State`] is the truth-set at one instant
//! and is the value every search player branches from.

pub mod error;
pub mod state;

#[cfg(test)]
mod test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::gdl;
use crate::reasoner::Reasoner;
use crate::term::{Interner, Symbol, Term};

pub use error::GameError;
pub use state::State;

pub const MAX_UTILITY: i64 = 100;
pub const MIN_UTILITY: i64 = 0;

/// A ground term naming one of the game's roles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Role(pub Term);

/// A ground term naming a legal action for some role.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Action(pub Term);

/// A ground base proposition: one element of a state's truth-set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Proposition(pub Term);

/// An immutable, shareable game: the parsed rule set plus the facts about
/// it that never change over the course of a match.
pub struct Game {
    pub(crate) interner: Mutex<Interner>,
    pub(crate) reasoner: Reasoner,
    pub(crate) true_sym: Symbol,
    pub(crate) does_sym: Symbol,
    pub(crate) terminal_sym: Symbol,
    pub(crate) legal_sym: Symbol,
    pub(crate) goal_sym: Symbol,
    pub(crate) next_sym: Symbol,
    roles: Vec<Role>,
    base_propositions: Vec<Proposition>,
    all_actions: HashMap<Role, Vec<Action>>,
    initial_truth: Vec<Term>,
}

impl Game {
    /// Parses `rules_text`, checks stratification, and precomputes the
    /// roles, base propositions, action space, and initial state.
    pub fn create(rules_text: &str) -> Result<Arc<Game>, GameError> {
        let mut interner = Interner::new();
        let clauses = gdl::parse(&mut interner, rules_text)?;
        let reasoner = Reasoner::new(&mut interner, &clauses)?;

        let true_sym = interner.intern("true");
        let does_sym = interner.intern("does");
        let terminal_sym = interner.intern("terminal");
        let legal_sym = interner.intern("legal");
        let goal_sym = interner.intern("goal");
        let next_sym = interner.intern("next");
        let role_sym = interner.intern("role");
        let base_sym = interner.intern("base");
        let input_sym = interner.intern("input");
        let init_sym = interner.intern("init");

        // `role/1`, `base/1`, `input/2`, and `init/1` never depend on
        // `true`/`does`, so they can all be read off one evaluation with an
        // empty context.
        let db0 = reasoner.evaluate(&[], &[], None)?;

        let role_pattern = Term::Compound(role_sym, vec![Term::Variable(interner.intern("R"))].into());
        let mut roles: Vec<Role> = reasoner.solutions(&db0, role_pattern).map(|t| Role(t.args()[0].clone())).collect();
        roles.sort_by_key(|r| format!("{}", r.0.display(&interner)));
        roles.dedup();

        let base_pattern = Term::Compound(base_sym, vec![Term::Variable(interner.intern("P"))].into());
        let base_propositions: Vec<Proposition> =
            reasoner.solutions(&db0, base_pattern).map(|t| Proposition(t.args()[0].clone())).collect();

        let mut all_actions: HashMap<Role, Vec<Action>> = HashMap::new();
        for role in &roles {
            let pattern = Term::Compound(
                input_sym,
                vec![role.0.clone(), Term::Variable(interner.intern("A"))].into(),
            );
            let actions = reasoner.solutions(&db0, pattern).map(|t| Action(t.args()[1].clone())).collect();
            all_actions.insert(role.clone(), actions);
        }

        let init_pattern = Term::Compound(init_sym, vec![Term::Variable(interner.intern("P"))].into());
        let initial_truth: Vec<Term> = reasoner.solutions(&db0, init_pattern).map(|t| t.args()[0].clone()).collect();

        Ok(Arc::new(Game {
            interner: Mutex::new(interner),
            reasoner,
            true_sym,
            does_sym,
            terminal_sym,
            legal_sym,
            goal_sym,
            next_sym,
            roles,
            base_propositions,
            all_actions,
            initial_truth,
        }))
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn base_propositions(&self) -> &[Proposition] {
        &self.base_propositions
    }

    pub fn all_actions(&self, role: &Role) -> &[Action] {
        self.all_actions.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn max_utility(&self) -> i64 {
        MAX_UTILITY
    }

    pub fn min_utility(&self) -> i64 {
        MIN_UTILITY
    }

    pub fn initial_state(self: &Arc<Self>) -> State {
        State::new(Arc::clone(self), self.initial_truth.clone())
    }

    /// Parses a single term (a role name or an action) against this game's
    /// symbol table, so wire-level text lines up with the rule set's ids.
    pub fn parse_term(&self, text: &str) -> Result<Term, GameError> {
        let mut interner = self.interner.lock().unwrap();
        let clauses = gdl::parse(&mut interner, text)?;
        Ok(clauses.into_iter().next().map(|c| c.head).unwrap_or(Term::Atom(self.true_sym)))
    }

    /// Renders `term` in the prefix GDL surface syntax using this game's
    /// symbol table.
    pub fn format_term(&self, term: &Term) -> String {
        format!("{}", term.display(&self.interner.lock().unwrap()))
    }
}
