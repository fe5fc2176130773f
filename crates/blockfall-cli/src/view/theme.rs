//! Color and style tables shared by every widget.

pub mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const PURPLE: Color = Color::Rgb(128, 0, 128);
    pub const ORANGE: Color = Color::Rgb(255, 165, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use blockfall_engine::PieceKind;
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const HIGHLIGHT: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const HELP: Style = fg_bg(color::GRAY, color::BLACK);
    pub const TITLE: Style = fg_bg(color::CYAN, color::BLACK);

    /// Fill style of a locked or falling cell of the given kind.
    #[must_use]
    pub const fn piece(kind: PieceKind) -> Style {
        match kind {
            PieceKind::I => bg_only(color::CYAN),
            PieceKind::O => bg_only(color::YELLOW),
            PieceKind::T => bg_only(color::PURPLE),
            PieceKind::L => bg_only(color::ORANGE),
            PieceKind::J => bg_only(color::BLUE),
            PieceKind::S => bg_only(color::GREEN),
            PieceKind::Z => bg_only(color::RED),
        }
    }
}
