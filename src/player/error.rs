//! Errors a move search can fail with.

use std::error::Error;
use std::fmt;

use crate::game::GameError;
use crate::player::timer::TimeUp;
use crate::reasoner::ReasonerError;

#[derive(Debug)]
pub enum PlayerError {
    /// The play clock elapsed before a move could be selected.
    TimeUp,
    /// A non-terminal state had no legal action for this role: a rules bug.
    NoLegalMoves,
    Game(GameError),
    Reasoner(ReasonerError),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::TimeUp => write!(f, "play clock expired before a move was selected"),
            PlayerError::NoLegalMoves => write!(f, "no legal move available in a non-terminal state"),
            PlayerError::Game(e) => write!(f, "{e}"),
            PlayerError::Reasoner(e) => write!(f, "{e}"),
        }
    }
}

impl Error for PlayerError {}

impl From<GameError> for PlayerError {
    fn from(e: GameError) -> Self {
        PlayerError::Game(e)
    }
}

impl From<ReasonerError> for PlayerError {
    fn from(e: ReasonerError) -> Self {
        match e {
            ReasonerError::TimeUp => PlayerError::TimeUp,
            other => PlayerError::Reasoner(other),
        }
    }
}

impl From<TimeUp> for PlayerError {
    fn from(_: TimeUp) -> Self {
        PlayerError::TimeUp
    }
}
