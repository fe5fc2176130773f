use serde::{Deserialize, Serialize};

/// Board dimensions, fixed for the lifetime of a [`Board`](crate::Board).
///
/// Passed by value at construction so that every board instance carries its
/// own configuration instead of reading process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of columns in the grid.
    pub width: usize,
    /// Number of visible rows in the grid.
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(10, 20)
    }
}

impl BoardConfig {
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        assert!(width >= 4, "grid must be at least as wide as a piece");
        assert!(height >= 4, "grid must be at least as tall as a piece");
        Self { width, height }
    }
}
