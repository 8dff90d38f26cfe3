//! Errors the protocol driver can return to an HTTP client, each tagged with
//! the status code `§6` assigns it.

use std::error::Error;
use std::fmt;

use crate::game::GameError;
use crate::registry::MatchError;

#[derive(Debug)]
pub enum ProtocolError {
    /// The body was not exactly one well-formed s-expression, or a message
    /// had the wrong number of arguments for its type. -> 400.
    Malformed(String),
    /// No `Content-Length` header was present. -> 411.
    MissingContentLength,
    /// Unknown game id, or `start` for an id already in use. -> 403.
    Forbidden(String),
    /// Everything else (a rules bug, an internal reasoner failure, a search
    /// task that panicked). -> 500.
    Internal(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed(message) => write!(f, "malformed message: {message}"),
            ProtocolError::MissingContentLength => write!(f, "missing Content-Length header"),
            ProtocolError::Forbidden(message) => write!(f, "{message}"),
            ProtocolError::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ProtocolError {}

impl ProtocolError {
    /// Routes a registry failure to 400 (malformed/unstratified rules), 403
    /// (identity conflicts), or 500 (everything else), per `§7`'s
    /// propagation policy.
    pub fn from_match_error(e: MatchError) -> Self {
        match &e {
            MatchError::Registry(_) => ProtocolError::Forbidden(e.to_string()),
            MatchError::Game(GameError::Parse(_) | GameError::Stratification(_)) => ProtocolError::Malformed(e.to_string()),
            MatchError::Game(_) | MatchError::Player(_) => ProtocolError::Internal(e.to_string()),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ProtocolError::Malformed(_) => 400,
            ProtocolError::MissingContentLength => 411,
            ProtocolError::Forbidden(_) => 403,
            ProtocolError::Internal(_) => 500,
        }
    }
}
