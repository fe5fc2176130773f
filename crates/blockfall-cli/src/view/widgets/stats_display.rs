use blockfall_engine::Board;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::theme::style;

const ROWS: u16 = 6;

/// Player name plus the session counters.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    player_name: &'a str,
    board: &'a Board,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(player_name: &'a str, board: &'a Board) -> Self {
        Self {
            player_name,
            board,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        ROWS + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let [name_label, name_value, _, score_row, level_row, lines_row] =
            Layout::vertical([Constraint::Length(1); ROWS as usize]).areas(area);

        Line::styled("PLAYER:", style::DEFAULT)
            .left_aligned()
            .render(name_label, buf);
        Line::styled(self.player_name, style::DEFAULT)
            .right_aligned()
            .render(name_value, buf);

        let counters = [
            (score_row, "SCORE:", self.board.score().to_string()),
            (level_row, "LEVEL:", self.board.level().to_string()),
            (lines_row, "LINES:", self.board.lines_cleared().to_string()),
        ];
        for (row, label, value) in counters {
            let [label_area, value_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(row);
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value, style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
