//! Errors produced while stratifying or evaluating a rule set.

use std::error::Error;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReasonerError {
    /// Negation forms a cycle through the predicate dependency graph.
    StratificationViolated { predicate: String },
    /// A literal referenced a predicate with the wrong number of arguments.
    ArityMismatch { predicate: String, expected: usize, found: usize },
    /// A query or fixpoint computation exceeded its configured bound.
    RecursionLimit { predicate: String },
    /// The caller-supplied cancellation budget expired mid-evaluation.
    TimeUp,
}

impl fmt::Display for ReasonerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonerError::StratificationViolated { predicate } => {
                write!(f, "negation cycles through predicate `{predicate}`; the rule set is not stratified")
            },
            ReasonerError::ArityMismatch { predicate, expected, found } => {
                write!(
                    f,
                    "predicate `{predicate}` used with {found} argument(s), expected {expected}"
                )
            },
            ReasonerError::RecursionLimit { predicate } => {
                write!(f, "evaluation of `{predicate}` exceeded its iteration bound")
            },
            ReasonerError::TimeUp => write!(f, "evaluation exceeded its time budget"),
        }
    }
}

impl Error for ReasonerError {}
