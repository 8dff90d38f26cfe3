//! # Reasoner Module
//!
//! A stratified-negation Datalog evaluator for GDL rule sets. Given a rule
//! set and an evaluation context (the currently-true base propositions and
//! the joint move just made), the reasoner derives every predicate's
//! extension bottom-up, one stratum at a time, and answers ground and
//! pattern queries against the result.
//!
//! This is a from-scratch, first-party evaluator: earlier designs of this
//! kind of system have reached for an embedded third-party Prolog engine,
//! but that couples the state representation to a foreign runtime's term
//! format and hides the stratification and indexing decisions that matter
//! for per-ply performance. Here the `State` holds nothing but a truth-set;
//! the reasoner is stateless across calls and takes its context as plain
//! arguments.

pub mod error;
pub mod eval;
pub mod stratify;

pub use error::ReasonerError;
pub use eval::{Database, Reasoner};
