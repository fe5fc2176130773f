use crossterm::event::{Event, KeyEvent, KeyEventKind};

pub use self::{
    confirm_name::ConfirmNameScreen, game_over::GameOverScreen, high_scores::HighScoresScreen,
    main_menu::MainMenuScreen, name_entry::NameEntryScreen, paused::PausedScreen,
    playing::PlayingScreen, title::TitleScreen,
};

mod confirm_name;
mod game_over;
mod high_scores;
mod main_menu;
mod name_entry;
mod paused;
mod playing;
mod title;

/// Key event unless it is a release.
///
/// With keyboard enhancement flags active, releases are delivered too; a
/// menu acting on them would double-fire on the release of the key that
/// opened it.
fn key_press(event: &Event) -> Option<KeyEvent> {
    event
        .as_key_event()
        .filter(|key| key.kind != KeyEventKind::Release)
}
