use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
};

use crate::{
    context::AppContext,
    screens::{MainMenuScreen, NameEntryScreen, PlayingScreen, key_press},
    tui::{Pace, Screen, Transition, Tui},
    view::theme::style,
};

/// Asks whether the next round is played under the same name.
#[derive(Debug, Default)]
pub struct ConfirmNameScreen;

impl ConfirmNameScreen {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Screen for ConfirmNameScreen {
    fn on_active(&mut self, _ctx: &mut AppContext, tui: &mut Tui) {
        tui.set_pace(Pace::OnInput);
    }

    fn handle_event(&mut self, ctx: &mut AppContext, _tui: &mut Tui, event: &Event) -> Transition {
        let Some(key) = key_press(event) else {
            return Transition::Stay;
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                Transition::Switch(Box::new(PlayingScreen::new(ctx.config)))
            }
            KeyCode::Char('n') => Transition::Switch(Box::new(NameEntryScreen::new())),
            KeyCode::Char('q') | KeyCode::Esc => {
                Transition::Switch(Box::new(MainMenuScreen::new()))
            }
            _ => Transition::Stay,
        }
    }

    fn draw(&self, ctx: &AppContext, frame: &mut Frame) {
        let text = Text::from(vec![
            Line::styled(
                format!("Play again as {}?", ctx.player_name),
                style::DEFAULT,
            )
            .centered(),
            Line::raw(""),
            Line::styled("y / Enter yes | n change name | Esc menu", style::HELP).centered(),
        ]);
        let area = frame
            .area()
            .centered(Constraint::Length(44), Constraint::Length(3));
        frame.render_widget(text, area);
    }
}
