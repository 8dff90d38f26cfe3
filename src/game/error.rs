//! Errors produced while constructing a [`crate::game::Game`] or applying a
//! move to a [`crate::game::state::State`].

use std::error::Error;
use std::fmt;

use crate::gdl::GdlError;
use crate::reasoner::ReasonerError;

#[derive(Debug)]
pub enum GameError {
    Parse(GdlError),
    Stratification(ReasonerError),
    /// A joint move did not contain exactly one legal action per role.
    IllegalMove { role: String, action: String },
    NoSuchRole { role: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Parse(e) => write!(f, "failed to parse game rules: {e}"),
            GameError::Stratification(e) => write!(f, "game rules rejected: {e}"),
            GameError::IllegalMove { role, action } => {
                write!(f, "`{action}` is not a legal move for role `{role}` in the current state")
            },
            GameError::NoSuchRole { role } => write!(f, "`{role}` is not a role in this game"),
        }
    }
}

impl Error for GameError {}

impl From<GdlError> for GameError {
    fn from(e: GdlError) -> Self {
        GameError::Parse(e)
    }
}

impl From<ReasonerError> for GameError {
    fn from(e: ReasonerError) -> Self {
        GameError::Stratification(e)
    }
}
