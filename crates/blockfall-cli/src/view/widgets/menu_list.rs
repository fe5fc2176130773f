use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::theme::style;

/// Cursor state of a vertical menu. Navigation wraps at both ends.
#[derive(Debug)]
pub struct MenuState {
    len: usize,
    selected: usize,
}

impl MenuState {
    #[must_use]
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "a menu needs at least one item");
        Self { len, selected: 0 }
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Moves the cursor or confirms. Returns the chosen index on Enter.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<usize> {
        match code {
            KeyCode::Up => self.selected = (self.selected + self.len - 1) % self.len,
            KeyCode::Down => self.selected = (self.selected + 1) % self.len,
            KeyCode::Enter => return Some(self.selected),
            _ => {}
        }
        None
    }
}

/// Renders menu items with the selected one highlighted.
#[derive(Debug)]
pub struct MenuList<'a> {
    items: &'a [&'a str],
    selected: usize,
    block: Option<BlockWidget<'a>>,
}

impl<'a> MenuList<'a> {
    pub fn new(items: &'a [&'a str], state: &MenuState) -> Self {
        Self {
            items,
            selected: state.selected(),
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        let longest = self.items.iter().map(|item| item.len()).max().unwrap_or(0);
        longest as u16 + 4 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        self.items.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for MenuList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &MenuList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = area.layout_vec(&Layout::vertical(
            (0..self.items.len()).map(|_| Constraint::Length(1)),
        ));
        for ((index, item), row) in self.items.iter().enumerate().zip(rows) {
            let style = if index == self.selected {
                style::HIGHLIGHT
            } else {
                style::DEFAULT
            };
            Line::styled(format!(" {item} "), style)
                .centered()
                .render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_at_both_ends() {
        let mut state = MenuState::new(3);
        assert_eq!(state.selected(), 0);

        state.handle_key(KeyCode::Up);
        assert_eq!(state.selected(), 2, "up from the top wraps to the bottom");

        state.handle_key(KeyCode::Down);
        assert_eq!(state.selected(), 0, "down from the bottom wraps to the top");
    }

    #[test]
    fn enter_confirms_the_selection() {
        let mut state = MenuState::new(3);
        state.handle_key(KeyCode::Down);
        assert_eq!(state.handle_key(KeyCode::Enter), Some(1));
        assert_eq!(state.handle_key(KeyCode::Char('x')), None);
    }
}
