use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block,
};

use crate::{
    context::AppContext,
    score_store::HighScoreTable,
    screens::key_press,
    tui::{Pace, Screen, Transition, Tui},
    view::{theme::style, widgets::ScoreTableDisplay},
};

/// The saved table. Pushed over whichever screen wants to show it.
#[derive(Debug, Default)]
pub struct HighScoresScreen {
    table: HighScoreTable,
}

impl HighScoresScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for HighScoresScreen {
    fn on_active(&mut self, ctx: &mut AppContext, tui: &mut Tui) {
        tui.set_pace(Pace::OnInput);
        self.table = ctx.score_store.load();
    }

    fn handle_event(&mut self, _ctx: &mut AppContext, _tui: &mut Tui, event: &Event) -> Transition {
        if key_press(event).is_some() {
            return Transition::Pop;
        }
        Transition::Stay
    }

    fn draw(&self, _ctx: &AppContext, frame: &mut Frame) {
        let table = ScoreTableDisplay::new(&self.table).block(
            Block::bordered()
                .title(Line::from("HIGH SCORES").centered())
                .style(style::DEFAULT),
        );

        let area = frame.area().centered(
            Constraint::Length(table.width()),
            Constraint::Length(table.height() + 2),
        );
        let [table_area, _, help_area] = Layout::vertical([
            Constraint::Length(table.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(table, table_area);
        frame.render_widget(
            Line::styled("press any key to go back", style::HELP).centered(),
            help_area,
        );
    }
}
