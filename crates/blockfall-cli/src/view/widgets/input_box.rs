use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::theme::style;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 12;

/// Text being typed into a single-line field.
#[derive(Debug, Default)]
pub struct InputState {
    text: String,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Edits the field. Returns the finished text on Enter; an empty or
    /// all-whitespace field does not submit.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<String> {
        match code {
            KeyCode::Char(c) if self.text.chars().count() < MAX_NAME_LEN && !c.is_control() => {
                self.text.push(c);
            }
            KeyCode::Backspace => {
                self.text.pop();
            }
            KeyCode::Enter => {
                let trimmed = self.text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_owned());
                }
            }
            _ => {}
        }
        None
    }
}

/// Renders the field's text followed by a cursor mark.
#[derive(Debug)]
pub struct InputBox<'a> {
    text: &'a str,
    block: Option<BlockWidget<'a>>,
}

impl<'a> InputBox<'a> {
    pub fn new(state: &'a InputState) -> Self {
        Self {
            text: state.text(),
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
        MAX_NAME_LEN as u16 + 2 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        1 + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for InputBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &InputBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        Line::styled(format!("{}_", self.text), style::DEFAULT)
            .left_aligned()
            .render(area, buf);
    }
}
