use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
};

use crate::{
    context::AppContext,
    screens::{NameEntryScreen, key_press},
    tui::{Pace, Screen, Transition, Tui},
    view::theme::style,
};

/// First screen: the title, waiting for any key.
#[derive(Debug, Default)]
pub struct TitleScreen;

impl TitleScreen {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Screen for TitleScreen {
    fn on_active(&mut self, _ctx: &mut AppContext, tui: &mut Tui) {
        tui.set_pace(Pace::OnInput);
    }

    fn handle_event(&mut self, _ctx: &mut AppContext, _tui: &mut Tui, event: &Event) -> Transition {
        let Some(key) = key_press(event) else {
            return Transition::Stay;
        };
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Transition::Quit,
            _ => Transition::Switch(Box::new(NameEntryScreen::new())),
        }
    }

    fn draw(&self, _ctx: &AppContext, frame: &mut Frame) {
        let text = Text::from(vec![
            Line::styled("B L O C K F A L L", style::TITLE).centered(),
            Line::raw(""),
            Line::styled("press any key to start", style::HELP).centered(),
            Line::styled("q to quit", style::HELP).centered(),
        ]);
        let area = frame
            .area()
            .centered(Constraint::Length(40), Constraint::Length(4));
        frame.render_widget(text, area);
    }
}
