use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
};

use crate::{
    context::{AppContext, GameSummary},
    screens::{ConfirmNameScreen, HighScoresScreen, key_press},
    tui::{Pace, Screen, Transition, Tui},
    view::theme::{color, style},
};

/// Shown when the session ends. Records the result on first activation.
#[derive(Debug, Default)]
pub struct GameOverScreen {
    summary: Option<GameSummary>,
    rank: Option<usize>,
    recorded: bool,
}

impl GameOverScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for GameOverScreen {
    fn on_active(&mut self, ctx: &mut AppContext, tui: &mut Tui) {
        tui.set_pace(Pace::OnInput);
        // on_active fires again when the high-score view pops; the
        // result must only be written once.
        if self.recorded {
            return;
        }
        self.recorded = true;
        self.summary = ctx.last_game;
        if let Some(summary) = self.summary {
            self.rank = ctx.score_store.load().rank_of(summary.score);
            // A failed save costs the persisted entry, not the game.
            _ = ctx.score_store.record(&ctx.player_name, summary.score);
        }
    }

    fn handle_event(&mut self, _ctx: &mut AppContext, _tui: &mut Tui, event: &Event) -> Transition {
        let Some(key) = key_press(event) else {
            return Transition::Stay;
        };
        match key.code {
            KeyCode::Enter => Transition::Switch(Box::new(ConfirmNameScreen::new())),
            KeyCode::Char('h') => Transition::Push(Box::new(HighScoresScreen::new())),
            KeyCode::Char('q') | KeyCode::Esc => Transition::Quit,
            _ => Transition::Stay,
        }
    }

    fn draw(&self, _ctx: &AppContext, frame: &mut Frame) {
        let mut lines = vec![
            Line::styled("G A M E   O V E R", style::DEFAULT.fg(color::RED)).centered(),
            Line::raw(""),
        ];
        if let Some(summary) = self.summary {
            lines.push(
                Line::styled(format!("score  {}", summary.score), style::DEFAULT).centered(),
            );
            lines.push(
                Line::styled(
                    format!("lines  {}   level  {}", summary.lines, summary.level),
                    style::DEFAULT,
                )
                .centered(),
            );
        }
        if let Some(rank) = self.rank {
            lines.push(Line::raw(""));
            lines.push(
                Line::styled(format!("NEW HIGH SCORE  #{rank}"), style::HIGHLIGHT).centered(),
            );
        }
        lines.push(Line::raw(""));
        lines.push(
            Line::styled("Enter play again | h high scores | q quit", style::HELP).centered(),
        );

        let text = Text::from(lines);
        let area = frame
            .area()
            .centered(Constraint::Length(44), Constraint::Length(8));
        frame.render_widget(text, area);
    }
}
