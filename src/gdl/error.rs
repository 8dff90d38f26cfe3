//! Errors produced while lexing or parsing prefix GDL.

use std::error::Error;
use std::fmt;

/// A failure while parsing GDL source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GdlError {
    /// The input is not well-formed prefix GDL.
    Malformed { offset: usize, message: String },
}

impl fmt::Display for GdlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GdlError::Malformed { offset, message } => {
                write!(f, "malformed GDL at byte {offset}: {message}")
            },
        }
    }
}

impl Error for GdlError {}
