//! # Match Registry
//!
//! Owns the mapping from game-id to an in-progress match, mirroring the
//! source's `SerialGeneralGamePlayingMessageHandler.games` dict. Unlike the
//! source (which handles every request on one thread), lookups only hold the
//! top-level map lock long enough to clone a match's own handle; the
//! potentially multi-second `get_move` search runs under that match's own
//! lock, so distinct game ids never block each other.

pub mod error;
pub mod factory;

pub use error::RegistryError;
pub use factory::PlayerFactory;

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::game::{Action, Game, GameError, Role};
use crate::player::{Player, PlayerError};

/// Everything one active match needs to answer `play`/`stop`/`abort`.
struct MatchHandle {
    game: Arc<Game>,
    role: Role,
    player: Box<dyn Player>,
}

/// Wraps the errors a registry operation can surface to the protocol layer.
#[derive(Debug)]
pub enum MatchError {
    Registry(RegistryError),
    Game(GameError),
    Player(PlayerError),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Registry(e) => write!(f, "{e}"),
            MatchError::Game(e) => write!(f, "{e}"),
            MatchError::Player(e) => write!(f, "{e}"),
        }
    }
}

impl Error for MatchError {}

impl From<RegistryError> for MatchError {
    fn from(e: RegistryError) -> Self {
        MatchError::Registry(e)
    }
}

impl From<GameError> for MatchError {
    fn from(e: GameError) -> Self {
        MatchError::Game(e)
    }
}

impl From<PlayerError> for MatchError {
    fn from(e: PlayerError) -> Self {
        MatchError::Player(e)
    }
}

pub struct MatchRegistry {
    factory: PlayerFactory,
    seed: u64,
    max_simultaneous_matches: usize,
    matches: Mutex<HashMap<String, Arc<Mutex<MatchHandle>>>>,
}

impl MatchRegistry {
    pub fn new(factory: PlayerFactory, seed: u64) -> Self {
        MatchRegistry { factory, seed, max_simultaneous_matches: 1, matches: Mutex::new(HashMap::new()) }
    }

    pub fn player_name(&self) -> &'static str {
        self.factory.name()
    }

    /// `true` if another match can be started right now, for `(info)`.
    pub fn accepts_new_match(&self) -> bool {
        self.matches.lock().unwrap().len() < self.max_simultaneous_matches
    }

    fn discriminator(game_id: &str) -> u64 {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        game_id.hash(&mut hasher);
        hasher.finish()
    }

    /// Parses `rules_text`, constructs the `Game`, builds a player bound to
    /// `role_name`, and registers it under `game_id`. Rejects an id already
    /// in use.
    pub fn start(
        &self,
        game_id: String,
        role_name: &str,
        rules_text: &str,
        start_clock: Duration,
        play_clock: Duration,
    ) -> Result<(), MatchError> {
        let mut matches = self.matches.lock().unwrap();
        if matches.contains_key(&game_id) {
            return Err(RegistryError::DuplicateGameId { game_id }.into());
        }

        let game = Game::create(rules_text)?;
        let role = match game.roles().iter().find(|r| game.format_term(&r.0) == role_name).cloned() {
            Some(role) => role,
            None => {
                let known: Vec<String> = game.roles().iter().map(|r| game.format_term(&r.0)).collect();
                let known: Vec<&str> = known.iter().map(String::as_str).collect();
                let suggestion = crate::util::most_similar(role_name, &known);
                return Err(GameError::NoSuchRole { role: format!("{role_name} (did you mean `{suggestion}`?)") }.into());
            },
        };

        let discriminator = Self::discriminator(&game_id);
        let player = self.factory.build(Arc::clone(&game), role.clone(), start_clock, play_clock, self.seed, discriminator);

        matches.insert(game_id, Arc::new(Mutex::new(MatchHandle { game, role, player })));
        Ok(())
    }

    fn handle(&self, game_id: &str) -> Result<Arc<Mutex<MatchHandle>>, MatchError> {
        self.matches
            .lock()
            .unwrap()
            .get(game_id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownGameId { game_id: game_id.to_string() }.into())
    }

    fn remove(&self, game_id: &str) {
        self.matches.lock().unwrap().remove(game_id);
    }

    /// Parses `moves` (one action per role, in `game.roles()` order) against
    /// the match's own symbol table and feeds them to `update_moves`.
    fn apply_moves(handle: &mut MatchHandle, moves: Option<&[String]>) -> Result<(), MatchError> {
        let Some(moves) = moves else { return Ok(()) };
        let roles = handle.game.roles();
        if moves.len() != roles.len() {
            return Err(GameError::IllegalMove { role: "*".to_string(), action: "wrong arity joint move".to_string() }.into());
        }
        let joint: Result<Vec<(Role, Action)>, GameError> = roles
            .iter()
            .zip(moves.iter())
            .map(|(role, text)| Ok((role.clone(), Action(handle.game.parse_term(text)?))))
            .collect();
        handle.player.update_moves(&joint?)?;
        Ok(())
    }

    /// `update_moves` (if `moves` is `Some`) then `get_move`.
    /// `update_moves` (if `moves` is `Some`) then `get_move`, rendered back
    /// to prefix GDL text against this match's own symbol table.
    pub fn play(&self, game_id: &str, moves: Option<&[String]>) -> Result<String, MatchError> {
        let handle = self.handle(game_id)?;
        let mut handle = handle.lock().unwrap();
        Self::apply_moves(&mut handle, moves)?;
        let action = handle.player.get_move()?;
        Ok(handle.game.format_term(&action.0))
    }

    /// `update_moves`, then `stop`, then discard the match.
    pub fn stop(&self, game_id: &str, moves: Option<&[String]>) -> Result<(), MatchError> {
        let handle = self.handle(game_id)?;
        {
            let mut handle = handle.lock().unwrap();
            Self::apply_moves(&mut handle, moves)?;
            handle.player.stop();
        }
        self.remove(game_id);
        Ok(())
    }

    /// `abort`, then discard the match.
    pub fn abort(&self, game_id: &str) -> Result<(), MatchError> {
        let handle = self.handle(game_id)?;
        handle.lock().unwrap().player.abort();
        self.remove(game_id);
        Ok(())
    }
}
