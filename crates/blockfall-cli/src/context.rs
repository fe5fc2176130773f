use blockfall_engine::BoardConfig;

use crate::{score_store::ScoreStore, sound::SoundSink};

/// Result of a finished session, carried from the playing screen to the
/// game-over screen.
#[derive(Debug, Clone, Copy)]
pub struct GameSummary {
    pub score: usize,
    pub lines: usize,
    pub level: usize,
}

/// State shared by every screen: who is playing, where scores go, and
/// where sounds go. Passed `&mut` into each screen call.
pub struct AppContext {
    pub config: BoardConfig,
    pub player_name: String,
    pub last_game: Option<GameSummary>,
    pub score_store: ScoreStore,
    pub sound: Box<dyn SoundSink>,
    /// Whether the terminal reports key releases (keyboard enhancement
    /// flags accepted). Decides who owns key repeat.
    pub enhanced_input: bool,
}

impl AppContext {
    pub fn new(config: BoardConfig, score_store: ScoreStore, sound: Box<dyn SoundSink>) -> Self {
        Self {
            config,
            player_name: String::new(),
            last_game: None,
            score_store,
            sound,
            enhanced_input: false,
        }
    }
}
