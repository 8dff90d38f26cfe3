//! # Term Module
//!
//! The term representation shared by the GDL parser, the reasoner, and the
//! game layer. A [`Term`] is either a ground value (atom, integer), a
//! variable, or a compound application of a functor to a fixed number of
//! argument terms. Atom and functor names are interned per [`Interner`]
//! instance so that structural equality and hashing reduce to integer
//! comparisons; there is no process-global symbol table, because two
//! unrelated matches must not leak symbol ids into each other.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/* DEFINITIONS */

/// An interned atom, functor, or variable name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

/// A GDL term: a ground value, a variable, or a compound application.
///
/// Variables carry an interned name rather than a process-wide unique id.
/// Identity is scoped to whatever evaluation constructs the substitution
/// environment (one rule body, one query): two occurrences of the same name
/// within that scope denote the same variable, and occurrences in unrelated
/// scopes never collide because each scope owns its own environment.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Atom(Symbol),
    Integer(i64),
    Variable(Symbol),
    Compound(Symbol, Arc<[Term]>),
}

/// A per-match symbol table. Built up during parsing and extended at
/// runtime when wire-level move terms are parsed against an existing game.
#[derive(Debug, Default)]
pub struct Interner {
    by_name: HashMap<Arc<str>, Symbol>,
    by_id: Vec<Arc<str>>,
}

/* IMPLEMENTATIONS */

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name`, returning its existing symbol if already known.
    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(&sym) = self.by_name.get(name) {
            return sym;
        }
        let rc: Arc<str> = Arc::from(name);
        let sym = Symbol(self.by_id.len() as u32);
        self.by_id.push(rc.clone());
        self.by_name.insert(rc, sym);
        sym
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.by_id[sym.0 as usize]
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.by_name.get(name).copied()
    }
}

impl Term {
    pub fn atom(interner: &mut Interner, name: &str) -> Term {
        Term::Atom(interner.intern(name))
    }

    pub fn compound(interner: &mut Interner, name: &str, args: Vec<Term>) -> Term {
        Term::Compound(interner.intern(name), Arc::from(args))
    }

    /// The functor symbol of an atom (arity 0) or compound term.
    pub fn functor(&self) -> Option<Symbol> {
        match self {
            Term::Atom(s) => Some(*s),
            Term::Compound(s, _) => Some(*s),
            Term::Integer(_) | Term::Variable(_) => None,
        }
    }

    pub fn args(&self) -> &[Term] {
        match self {
            Term::Compound(_, args) => args,
            _ => &[],
        }
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Atom(_) | Term::Integer(_) => true,
            Term::Compound(_, args) => args.iter().all(Term::is_ground),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Term::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Renders this term in the prefix GDL surface syntax.
    pub fn display<'a>(&'a self, interner: &'a Interner) -> TermDisplay<'a> {
        TermDisplay { term: self, interner }
    }
}

pub struct TermDisplay<'a> {
    term: &'a Term,
    interner: &'a Interner,
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_term(f, self.term, self.interner)
    }
}

fn write_term(f: &mut fmt::Formatter<'_>, term: &Term, interner: &Interner) -> fmt::Result {
    match term {
        Term::Integer(n) => write!(f, "{n}"),
        Term::Atom(s) => write!(f, "{}", interner.resolve(*s)),
        Term::Variable(s) => write!(f, "?{}", interner.resolve(*s)),
        Term::Compound(s, args) => {
            write!(f, "({}", interner.resolve(*s))?;
            for arg in args.iter() {
                write!(f, " ")?;
                write_term(f, arg, interner)?;
            }
            write!(f, ")")
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn interning_is_stable_and_deduplicates() {
        let mut interner = Interner::new();
        let a = interner.intern("robot");
        let b = interner.intern("robot");
        let c = interner.intern("wall");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "robot");
    }

    #[test]
    fn compound_equality_is_structural() {
        let mut interner = Interner::new();
        let one = Term::compound(
            &mut interner,
            "mark",
            vec![Term::Integer(1), Term::Integer(1)],
        );
        let two = Term::compound(
            &mut interner,
            "mark",
            vec![Term::Integer(1), Term::Integer(1)],
        );
        assert_eq!(one, two);
        assert!(one.is_ground());
    }

    #[test]
    fn variable_is_not_ground() {
        let mut interner = Interner::new();
        let var = Term::Variable(interner.intern("x"));
        assert!(!var.is_ground());
    }

    #[test]
    fn display_round_trips_prefix_syntax() {
        let mut interner = Interner::new();
        let term = Term::compound(
            &mut interner,
            "mark",
            vec![Term::Integer(1), Term::Variable(interner.intern("y"))],
        );
        assert_eq!(format!("{}", term.display(&interner)), "(mark 1 ?y)");
    }
}
