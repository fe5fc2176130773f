use crossterm::event::{Event, KeyCode};
use ratatui::{Frame, layout::Constraint, text::Line, widgets::Block};

use crate::{
    context::AppContext,
    screens::{MainMenuScreen, PlayingScreen, key_press},
    tui::{Pace, Screen, Transition, Tui},
    view::{
        theme::style,
        widgets::{MenuList, MenuState},
    },
};

const ITEMS: &[&str] = &["Resume", "Restart", "Main Menu"];

/// Pause menu, pushed over the playing screen so the session survives
/// until the player decides otherwise.
#[derive(Debug)]
pub struct PausedScreen {
    menu: MenuState,
}

impl PausedScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            menu: MenuState::new(ITEMS.len()),
        }
    }
}

impl Default for PausedScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for PausedScreen {
    fn on_active(&mut self, _ctx: &mut AppContext, tui: &mut Tui) {
        // The board below must not advance while paused.
        tui.set_pace(Pace::OnInput);
    }

    fn handle_event(&mut self, ctx: &mut AppContext, _tui: &mut Tui, event: &Event) -> Transition {
        let Some(key) = key_press(event) else {
            return Transition::Stay;
        };
        match key.code {
            KeyCode::Char('p') | KeyCode::Esc => return Transition::Pop,
            KeyCode::Char('q') => return Transition::Quit,
            _ => {}
        }
        match self.menu.handle_key(key.code) {
            Some(0) => Transition::Pop,
            // Restarting or leaving must drop the buried playing screen too.
            Some(1) => Transition::ResetTo(Box::new(PlayingScreen::new(ctx.config))),
            Some(_) => Transition::ResetTo(Box::new(MainMenuScreen::new())),
            None => Transition::Stay,
        }
    }

    fn draw(&self, _ctx: &AppContext, frame: &mut Frame) {
        let menu = MenuList::new(ITEMS, &self.menu).block(
            Block::bordered()
                .title(Line::from("PAUSED").centered())
                .style(style::DEFAULT),
        );

        let area = frame.area().centered(
            Constraint::Length(menu.width().max(20)),
            Constraint::Length(menu.height()),
        );
        frame.render_widget(menu, area);
    }
}
