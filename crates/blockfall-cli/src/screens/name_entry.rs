use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block,
};

use crate::{
    context::AppContext,
    screens::{MainMenuScreen, TitleScreen, key_press},
    tui::{Pace, Screen, Transition, Tui},
    view::{
        theme::style,
        widgets::{InputBox, InputState},
    },
};

/// Asks for the player's name before the main menu.
#[derive(Debug, Default)]
pub struct NameEntryScreen {
    input: InputState,
}

impl NameEntryScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for NameEntryScreen {
    fn on_active(&mut self, _ctx: &mut AppContext, tui: &mut Tui) {
        tui.set_pace(Pace::OnInput);
    }

    fn handle_event(&mut self, ctx: &mut AppContext, _tui: &mut Tui, event: &Event) -> Transition {
        let Some(key) = key_press(event) else {
            return Transition::Stay;
        };
        if key.code == KeyCode::Esc {
            return Transition::Switch(Box::new(TitleScreen::new()));
        }
        if let Some(name) = self.input.handle_key(key.code) {
            ctx.player_name = name;
            return Transition::Switch(Box::new(MainMenuScreen::new()));
        }
        Transition::Stay
    }

    fn draw(&self, _ctx: &AppContext, frame: &mut Frame) {
        let input_box = InputBox::new(&self.input).block(
            Block::bordered()
                .title(Line::from("ENTER YOUR NAME").centered())
                .style(style::DEFAULT),
        );

        let area = frame.area().centered(
            Constraint::Length(input_box.width()),
            Constraint::Length(input_box.height() + 2),
        );
        let [box_area, _, help_area] = Layout::vertical([
            Constraint::Length(input_box.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(input_box, box_area);
        frame.render_widget(
            Line::styled("Enter confirm | Esc back", style::HELP).centered(),
            help_area,
        );
    }
}
