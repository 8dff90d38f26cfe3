//! Renders parsed clauses back to the prefix GDL surface syntax, reversing
//! [`crate::gdl::parser::parse`]'s desugaring of `(<= head body…)` rules.

use std::fmt::Write as _;

use crate::gdl::parser::{Clause, Literal};
use crate::term::Interner;

pub fn print_clause(interner: &Interner, clause: &Clause) -> String {
    if clause.body.is_empty() {
        return format!("{}", clause.head.display(interner));
    }
    let mut out = format!("(<= {}", clause.head.display(interner));
    for literal in &clause.body {
        match literal {
            Literal::Pos(term) => {
                let _ = write!(out, " {}", term.display(interner));
            },
            Literal::Neg(term) => {
                let _ = write!(out, " (not {})", term.display(interner));
            },
        }
    }
    out.push(')');
    out
}

pub fn print_rule_set(interner: &Interner, clauses: &[Clause]) -> String {
    clauses
        .iter()
        .map(|c| print_clause(interner, c))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gdl::parser::parse;

    #[test]
    fn round_trips_fact_and_rule() {
        let mut interner = Interner::new();
        let source = "(role robot)\n(<= (legal robot noop) (true (step 1)) (not (true closed)))";
        let clauses = parse(&mut interner, source).unwrap();
        let printed = print_rule_set(&interner, &clauses);
        let reparsed = parse(&mut interner, &printed).unwrap();
        assert_eq!(clauses, reparsed);
    }
}
