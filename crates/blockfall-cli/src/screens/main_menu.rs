use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block,
};

use crate::{
    context::AppContext,
    screens::{HighScoresScreen, PlayingScreen, key_press},
    tui::{Pace, Screen, Transition, Tui},
    view::{
        theme::style,
        widgets::{MenuList, MenuState},
    },
};

const ITEMS: &[&str] = &["Start Game", "High Scores", "Exit"];

#[derive(Debug)]
pub struct MainMenuScreen {
    menu: MenuState,
}

impl MainMenuScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            menu: MenuState::new(ITEMS.len()),
        }
    }
}

impl Screen for MainMenuScreen {
    fn on_active(&mut self, _ctx: &mut AppContext, tui: &mut Tui) {
        tui.set_pace(Pace::OnInput);
    }

    fn handle_event(&mut self, ctx: &mut AppContext, _tui: &mut Tui, event: &Event) -> Transition {
        let Some(key) = key_press(event) else {
            return Transition::Stay;
        };
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            return Transition::Quit;
        }
        match self.menu.handle_key(key.code) {
            Some(0) => Transition::Switch(Box::new(PlayingScreen::new(ctx.config))),
            Some(1) => Transition::Push(Box::new(HighScoresScreen::new())),
            Some(_) => Transition::Quit,
            None => Transition::Stay,
        }
    }

    fn draw(&self, ctx: &AppContext, frame: &mut Frame) {
        let menu = MenuList::new(ITEMS, &self.menu).block(
            Block::bordered()
                .title(Line::from("BLOCKFALL").centered())
                .style(style::DEFAULT),
        );

        let area = frame.area().centered(
            Constraint::Length(menu.width().max(24)),
            Constraint::Length(menu.height() + 2),
        );
        let [menu_area, _, help_area] = Layout::vertical([
            Constraint::Length(menu.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(menu, menu_area);
        frame.render_widget(
            Line::styled(format!("playing as {}", ctx.player_name), style::HELP).centered(),
            help_area,
        );
    }
}
