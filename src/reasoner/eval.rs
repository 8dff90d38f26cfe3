//! Bottom-up stratified evaluation of a GDL rule set against an explicit
//! `true`/`does` context, plus the ground/pattern query shapes the game
//! layer needs.

use std::collections::{HashMap, HashSet};

use crate::gdl::parser::{Clause, Literal};
use crate::player::timer::Timer;
use crate::reasoner::error::ReasonerError;
use crate::reasoner::stratify::compute_strata;
use crate::term::{Interner, Symbol, Term};

/* DATABASE */

/// A set of ground facts, indexed by predicate for fast literal lookup.
#[derive(Debug, Default, Clone)]
pub struct Database {
    by_pred: HashMap<Symbol, Vec<Term>>,
    seen: HashSet<Term>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a ground fact; returns `true` if it was not already present.
    pub fn insert(&mut self, fact: Term) -> bool {
        if self.seen.contains(&fact) {
            return false;
        }
        let pred = fact.functor().expect("facts are atoms or compounds");
        self.by_pred.entry(pred).or_default().push(fact.clone());
        self.seen.insert(fact);
        true
    }

    pub fn contains(&self, fact: &Term) -> bool {
        self.seen.contains(fact)
    }

    pub fn iter_pred(&self, pred: Symbol) -> impl Iterator<Item = &Term> {
        self.by_pred.get(&pred).into_iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/* ENVIRONMENT */

type Env = HashMap<Symbol, Term>;

fn resolve(term: &Term, env: &Env) -> Term {
    match term {
        Term::Variable(v) => env.get(v).cloned().unwrap_or_else(|| term.clone()),
        Term::Compound(functor, args) => {
            let resolved: Vec<Term> = args.iter().map(|a| resolve(a, env)).collect();
            Term::Compound(*functor, resolved.into())
        },
        other => other.clone(),
    }
}

/// Ground-matches `pattern` against the already-ground `fact`, extending
/// `env` and recording newly-bound variables on `trail` so the caller can
/// undo the bindings on backtrack.
fn unify(pattern: &Term, fact: &Term, env: &mut Env, trail: &mut Vec<Symbol>) -> bool {
    match (pattern, fact) {
        (Term::Variable(v), _) => {
            if let Some(bound) = env.get(v).cloned() {
                bound == *fact
            } else {
                env.insert(*v, fact.clone());
                trail.push(*v);
                true
            }
        },
        (Term::Atom(a), Term::Atom(b)) => a == b,
        (Term::Integer(a), Term::Integer(b)) => a == b,
        (Term::Compound(f1, a1), Term::Compound(f2, a2)) => {
            f1 == f2
                && a1.len() == a2.len()
                && a1.iter().zip(a2.iter()).all(|(p, f)| unify(p, f, env, trail))
        },
        _ => false,
    }
}

fn undo(env: &mut Env, trail: &[Symbol]) {
    for v in trail {
        env.remove(v);
    }
}

/* REASONER */

pub struct Reasoner {
    clauses_by_stratum: Vec<(u32, Vec<Clause>)>,
    distinct: Option<Symbol>,
    succ: Option<Symbol>,
    lt: Option<Symbol>,
    gt: Option<Symbol>,
    lte: Option<Symbol>,
    gte: Option<Symbol>,
}

impl Reasoner {
    pub fn new(interner: &mut Interner, clauses: &[Clause]) -> Result<Self, ReasonerError> {
        let strata = compute_strata(interner, clauses)?;
        let mut by_stratum: HashMap<u32, Vec<Clause>> = HashMap::new();
        for clause in clauses {
            if let Some(head) = clause.head.functor() {
                let stratum = strata.get(&head).copied().unwrap_or(0);
                by_stratum.entry(stratum).or_default().push(clause.clone());
            }
        }
        let mut clauses_by_stratum: Vec<(u32, Vec<Clause>)> = by_stratum.into_iter().collect();
        clauses_by_stratum.sort_by_key(|(s, _)| *s);

        Ok(Reasoner {
            clauses_by_stratum,
            distinct: interner.lookup("distinct"),
            succ: interner.lookup("succ"),
            lt: interner.lookup("<"),
            gt: interner.lookup(">"),
            lte: interner.lookup("<="),
            gte: interner.lookup(">="),
        })
    }

    /// Evaluates every stratum bottom-up, seeding the first stratum's
    /// database with the extensional `true`/`does` facts, and returns the
    /// full set of derived ground facts (every predicate's extension).
    pub fn evaluate(
        &self,
        truth: &[Term],
        does: &[Term],
        timer: Option<&Timer>,
    ) -> Result<Database, ReasonerError> {
        let mut db = Database::new();
        for fact in truth.iter().chain(does.iter()) {
            db.insert(fact.clone());
        }
        for (_, clauses) in &self.clauses_by_stratum {
            self.fire_stratum(clauses, &mut db, timer)?;
        }
        Ok(db)
    }

    /// Semi-naive bottom-up fixpoint: after the first round (which seeds
    /// `delta` with everything already known, so every clause fires at least
    /// once), each subsequent round re-derives only combinations that use at
    /// least one fact from the previous round's delta, joined against the
    /// full accumulated database for every other literal. A clause with no
    /// database-backed positive literal (pure builtins/negation) cannot ever
    /// gain a new solution from a growing delta, so it only runs once, on
    /// the first round.
    fn fire_stratum(
        &self,
        clauses: &[Clause],
        db: &mut Database,
        timer: Option<&Timer>,
    ) -> Result<(), ReasonerError> {
        let mut delta: Database = db.clone();
        let mut first_round = true;
        loop {
            if let Some(t) = timer {
                t.check().map_err(|_| ReasonerError::TimeUp)?;
            }
            if delta.is_empty() {
                return Ok(());
            }
            let mut new_facts = Vec::new();
            for clause in clauses {
                let focus_positions = self.focus_positions(&clause.body);
                if focus_positions.is_empty() {
                    if !first_round {
                        continue;
                    }
                    let mut env = Env::new();
                    self.solve_body(&clause.body, 0, &mut env, db, &delta, None, &mut |env| {
                        new_facts.push(resolve(&clause.head, env));
                    })?;
                    continue;
                }
                for focus in focus_positions {
                    let mut env = Env::new();
                    self.solve_body(&clause.body, 0, &mut env, db, &delta, Some(focus), &mut |env| {
                        new_facts.push(resolve(&clause.head, env));
                    })?;
                }
            }
            let mut next_delta = Database::new();
            for fact in new_facts {
                if db.insert(fact.clone()) {
                    next_delta.insert(fact);
                }
            }
            delta = next_delta;
            first_round = false;
        }
    }

    /// Positions of `body`'s database-backed positive literals: the ones
    /// eligible to be the round's "focus", i.e. drawn from the delta instead
    /// of the full database.
    fn focus_positions(&self, body: &[Literal]) -> Vec<usize> {
        body.iter()
            .enumerate()
            .filter_map(|(idx, literal)| match literal {
                Literal::Pos(atom) => {
                    let pred = atom.functor()?;
                    (!self.is_builtin_pred(pred)).then_some(idx)
                },
                Literal::Neg(_) => None,
            })
            .collect()
    }

    fn is_builtin_pred(&self, pred: Symbol) -> bool {
        Some(pred) == self.distinct
            || Some(pred) == self.succ
            || Some(pred) == self.lt
            || Some(pred) == self.gt
            || Some(pred) == self.lte
            || Some(pred) == self.gte
    }

    /// Solves `body` from position `idx`. `focus`, if set, names the one
    /// literal position that must draw its candidate facts from `delta`
    /// rather than the full `db`; every other database-backed literal draws
    /// from `db` (which already contains everything in `delta`).
    #[allow(clippy::too_many_arguments)]
    fn solve_body(
        &self,
        body: &[Literal],
        idx: usize,
        env: &mut Env,
        db: &Database,
        delta: &Database,
        focus: Option<usize>,
        on_solution: &mut dyn FnMut(&Env),
    ) -> Result<(), ReasonerError> {
        if idx == body.len() {
            on_solution(env);
            return Ok(());
        }
        match &body[idx] {
            Literal::Pos(atom) => {
                if let Some(implied) = self.builtin_fact(atom, env) {
                    let mut trail = Vec::new();
                    if unify(atom, &implied, env, &mut trail) {
                        self.solve_body(body, idx + 1, env, db, delta, focus, on_solution)?;
                    }
                    undo(env, &trail);
                    return Ok(());
                }
                let Some(pred) = atom.functor() else { return Ok(()) };
                let source = if focus == Some(idx) { delta } else { db };
                for fact in source.iter_pred(pred) {
                    let mut trail = Vec::new();
                    if unify(atom, fact, env, &mut trail) {
                        self.solve_body(body, idx + 1, env, db, delta, focus, on_solution)?;
                    }
                    undo(env, &trail);
                }
                Ok(())
            },
            Literal::Neg(atom) => {
                let resolved = resolve(atom, env);
                let holds = if resolved.is_ground() {
                    db.contains(&resolved)
                } else {
                    // Safe GDL never needs to negate an unbound literal; treat
                    // this conservatively as "holds" so the literal fails.
                    true
                };
                if !holds {
                    self.solve_body(body, idx + 1, env, db, delta, focus, on_solution)?;
                }
                Ok(())
            },
        }
    }

    /// Recognizes `distinct/2`, `succ/2`, and the integer comparison
    /// predicates, which are not stored as facts in the database. Returns
    /// the ground fact implied by the (possibly partially-bound) atom so
    /// the caller can unify against it with the ordinary machinery.
    fn builtin_fact(&self, atom: &Term, env: &Env) -> Option<Term> {
        let pred = atom.functor()?;
        let args = atom.args();
        if Some(pred) == self.distinct && args.len() == 2 {
            let a = resolve(&args[0], env);
            let b = resolve(&args[1], env);
            return (a.is_ground() && b.is_ground() && a != b).then(|| atom.clone());
        }
        if Some(pred) == self.succ && args.len() == 2 {
            let a = resolve(&args[0], env);
            let b = resolve(&args[1], env);
            if let Some(n) = a.as_integer() {
                return Some(Term::Compound(pred, vec![Term::Integer(n), Term::Integer(n + 1)].into()));
            }
            if let Some(n) = b.as_integer() {
                return Some(Term::Compound(pred, vec![Term::Integer(n - 1), Term::Integer(n)].into()));
            }
            return None;
        }
        if args.len() == 2 && (Some(pred) == self.lt || Some(pred) == self.gt || Some(pred) == self.lte || Some(pred) == self.gte) {
            let a = resolve(&args[0], env).as_integer()?;
            let b = resolve(&args[1], env).as_integer()?;
            let holds = if Some(pred) == self.lt {
                a < b
            } else if Some(pred) == self.gt {
                a > b
            } else if Some(pred) == self.lte {
                a <= b
            } else {
                a >= b
            };
            return holds.then(|| atom.clone());
        }
        None
    }

    /// All ground instantiations of `pattern` provable in `db`, yielded
    /// lazily as `db`'s matching facts are visited, so a caller that only
    /// needs one solution (or a reservoir sample) never forces the rest.
    /// Takes `pattern` by value so the returned iterator can own it, rather
    /// than borrowing a query term that might be a short-lived local.
    pub fn solutions<'a>(&self, db: &'a Database, pattern: Term) -> impl Iterator<Item = Term> + 'a {
        let pred = pattern.functor();
        pred.into_iter().flat_map(move |pred| db.iter_pred(pred)).filter_map(move |fact| {
            let mut env = Env::new();
            let mut trail = Vec::new();
            unify(&pattern, fact, &mut env, &mut trail).then(|| resolve(&pattern, &env))
        })
    }

    pub fn proves(&self, db: &Database, atom: &Term) -> bool {
        db.contains(atom)
    }
}
