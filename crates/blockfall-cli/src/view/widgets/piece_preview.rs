use blockfall_engine::{Cell, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::CellDisplay;

/// Preview of a piece in its spawn orientation, centered in its area.
#[derive(Debug)]
pub struct PiecePreview<'a> {
    piece: Option<&'a Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PiecePreview<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: &'a Piece) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        // Wide enough for the I piece, the widest spawn shape.
        4 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PiecePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PiecePreview<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };

        let (cols, rows) = piece.size();
        let piece_area = area.centered(
            Constraint::Length(cols as u16 * CellDisplay::width()),
            Constraint::Length(rows as u16 * CellDisplay::height()),
        );

        let col_constraints = (0..cols).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..rows).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (shape_row, grid_row) in piece.shape().iter().zip(grid_rows) {
            for (&occupied, grid_cell) in shape_row.iter().zip(grid_row) {
                let cell = if occupied {
                    Cell::Filled(piece.kind())
                } else {
                    Cell::Empty
                };
                CellDisplay::from_cell(cell, false).render(grid_cell, buf);
            }
        }
    }
}
