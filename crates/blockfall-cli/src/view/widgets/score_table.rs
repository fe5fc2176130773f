use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::{
    score_store::{CAPACITY, HighScoreTable},
    view::theme::style,
};

/// The high-score table, one line per entry, best first.
#[derive(Debug)]
pub struct ScoreTableDisplay<'a> {
    table: &'a HighScoreTable,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ScoreTableDisplay<'a> {
    pub fn new(table: &'a HighScoreTable) -> Self {
        Self { table, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        36 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        CAPACITY as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for ScoreTableDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &ScoreTableDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        if self.table.is_empty() {
            Line::styled("no scores yet", style::HELP)
                .centered()
                .render(area, buf);
            return;
        }

        let rows = area.layout_vec(&Layout::vertical(
            (0..self.table.entries().len()).map(|_| Constraint::Length(1)),
        ));
        for ((index, entry), row) in self.table.entries().iter().enumerate().zip(rows) {
            let text = format!(
                "{rank:>2}. {name:<12} {score:>7}  {date}",
                rank = index + 1,
                name = entry.name,
                score = entry.score,
                date = entry.date,
            );
            Line::styled(text, style::DEFAULT)
                .left_aligned()
                .render(row, buf);
        }
    }
}
