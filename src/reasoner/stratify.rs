//! Stratification check for a GDL rule set.
//!
//! A rule set is stratified iff its predicate dependency graph has no cycle
//! that passes through at least one negated literal. Modelling a positive
//! dependency as a zero-weight edge and a negated dependency as a
//! weight-one edge reduces both "assign each predicate its stratum" and
//! "detect a disallowed cycle" to one Bellman-Ford relaxation: the stratum
//! of a predicate is the longest weighted path into it, and a cycle with a
//! strictly positive total weight (i.e. containing a negative edge) shows
//! up as a value that keeps growing past the `|predicates|`-th round.

use std::collections::HashMap;

use crate::gdl::parser::{Clause, Literal};
use crate::reasoner::error::ReasonerError;
use crate::term::{Interner, Symbol};

pub fn compute_strata(
    interner: &Interner,
    clauses: &[Clause],
) -> Result<HashMap<Symbol, u32>, ReasonerError> {
    let mut strata: HashMap<Symbol, u32> = HashMap::new();
    let mut edges: Vec<(Symbol, Symbol, u32)> = Vec::new();

    for clause in clauses {
        let Some(head) = clause.head.functor() else { continue };
        strata.entry(head).or_insert(0);
        for literal in &clause.body {
            let Some(body_pred) = literal.atom().functor() else { continue };
            strata.entry(body_pred).or_insert(0);
            let weight = match literal {
                Literal::Pos(_) => 0,
                Literal::Neg(_) => 1,
            };
            edges.push((body_pred, head, weight));
        }
    }

    let bound = strata.len() as u32 + 1;
    for round in 0..=bound {
        let mut changed = false;
        for &(from, to, weight) in &edges {
            let candidate = strata[&from] + weight;
            if candidate > strata[&to] {
                if round == bound {
                    return Err(ReasonerError::StratificationViolated {
                        predicate: interner.resolve(to).to_string(),
                    });
                }
                strata.insert(to, candidate);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    Ok(strata)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gdl::parser::parse;

    #[test]
    fn accepts_stratified_negation() {
        let mut interner = Interner::new();
        let clauses = parse(
            &mut interner,
            "(<= (legal robot noop) (true (step 1)) (not (true closed)))",
        )
        .unwrap();
        let strata = compute_strata(&interner, &clauses).unwrap();
        let legal = interner.lookup("legal").unwrap();
        let closed_dep = interner.lookup("true").unwrap();
        assert!(strata[&legal] > strata[&closed_dep]);
    }

    #[test]
    fn rejects_negative_cycle() {
        let mut interner = Interner::new();
        let clauses = parse(
            &mut interner,
            "(<= (p) (not (q))) (<= (q) (not (p)))",
        )
        .unwrap();
        let err = compute_strata(&interner, &clauses).unwrap_err();
        assert!(matches!(err, ReasonerError::StratificationViolated { .. }));
    }
}
