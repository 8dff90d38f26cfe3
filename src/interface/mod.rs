//! # Interfaces
//!
//! Ways of driving the player server from outside the library: currently
//! just the command line.

pub mod cli;
