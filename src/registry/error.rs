//! Errors raised by the match registry's lifecycle operations.

use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum RegistryError {
    UnknownGameId { game_id: String },
    DuplicateGameId { game_id: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownGameId { game_id } => write!(f, "no match is running under game id `{game_id}`"),
            RegistryError::DuplicateGameId { game_id } => write!(f, "a match is already running under game id `{game_id}`"),
        }
    }
}

impl Error for RegistryError {}
