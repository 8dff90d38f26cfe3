//! # GDL Module
//!
//! Parsing and printing for the Game Description Language's prefix concrete
//! syntax: `(role robot)`-style facts and `(<= head body…)`-style rules,
//! `?x`-prefixed variables, and bare integer constants. This module owns
//! only the textual surface; the semantics of the parsed rule set belong to
//! [`crate::reasoner`].

pub mod error;
pub mod parser;
pub mod printer;

pub use error::GdlError;
pub use parser::{parse, Clause, Literal};
pub use printer::{print_clause, print_rule_set};
