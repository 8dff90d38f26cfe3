#![forbid(unsafe_code)]
//! # GGP
//!
//! A General Game Playing agent server: a GDL-II reasoner, a game/state
//! engine built on top of it, a family of search players of increasing
//! sophistication, and a match registry and HTTP protocol driver that speak
//! the standard GGP wire protocol.

pub mod game;
pub mod gdl;
pub mod interface;
pub mod player;
pub mod players;
pub mod protocol;
pub mod reasoner;
pub mod registry;
pub mod term;
pub mod util;
