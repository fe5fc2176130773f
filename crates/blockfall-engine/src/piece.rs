use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            3 => PieceKind::L,
            4 => PieceKind::J,
            5 => PieceKind::S,
            _ => PieceKind::Z,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }
}

/// Canonical spawn-orientation shape for each piece kind.
///
/// Matrices keep their natural bounding box (I is 1×4, O is 2×2, the rest
/// are 2×3). Pieces deep-copy their matrix at construction, so rotating a
/// live piece can never alias this table.
const SHAPES: [&[&[bool]]; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    [
        // I-piece
        &[&[C, C, C, C]],
        // O-piece
        &[&[C, C], &[C, C]],
        // T-piece
        &[&[C, C, C], &[E, C, E]],
        // L-piece
        &[&[C, C, C], &[C, E, E]],
        // J-piece
        &[&[C, C, C], &[E, E, C]],
        // S-piece
        &[&[E, C, C], &[C, C, E]],
        // Z-piece
        &[&[C, C, E], &[E, C, C]],
    ]
};

/// A falling tetromino: an owned shape matrix plus a grid anchor.
///
/// The anchor `(x, y)` is the top-left corner of the shape's bounding box.
/// `y` is negative while the piece is still above the visible grid, which is
/// how every piece starts its life. Rotation mutates the shape matrix in
/// place; validity of the result is the board's concern, not the piece's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Vec<Vec<bool>>,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece of the given kind, centered horizontally and anchored
    /// fully above the visible grid.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn new(kind: PieceKind, board_width: usize) -> Self {
        let shape: Vec<Vec<bool>> = SHAPES[kind as usize]
            .iter()
            .map(|row| row.to_vec())
            .collect();
        let rows = shape.len() as i32;
        let cols = shape[0].len() as i32;
        Self {
            kind,
            shape,
            x: board_width as i32 / 2 - cols / 2,
            y: -rows,
        }
    }

    /// Creates a piece of a uniformly random kind.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, board_width: usize) -> Self {
        Self::new(rng.random(), board_width)
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// The shape's bounding box as (columns, rows).
    #[must_use]
    pub fn size(&self) -> (usize, usize) {
        (self.shape[0].len(), self.shape.len())
    }

    /// Occupancy matrix of the current orientation, row-major.
    #[must_use]
    pub fn shape(&self) -> &[Vec<bool>] {
        &self.shape
    }

    /// Iterates over the absolute grid positions of every occupied cell.
    ///
    /// Positions may have negative `y` while the piece is above the grid.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.iter().enumerate().flat_map(move |(dy, row)| {
            row.iter().enumerate().filter_map(move |(dx, &cell)| {
                cell.then_some((self.x + dx as i32, self.y + dy as i32))
            })
        })
    }

    /// Rotates the shape matrix 90° clockwise in place.
    ///
    /// The O-piece is a deliberate fixed point: its matrix is left untouched
    /// rather than relying on the rotation happening to be symmetric.
    /// The anchor does not move; the board resolves any resulting collision
    /// or out-of-bounds position.
    pub fn rotate(&mut self) {
        if self.kind == PieceKind::O {
            return;
        }
        let rows = self.shape.len();
        let cols = self.shape[0].len();
        let mut rotated = vec![vec![false; rows]; cols];
        for (y, row) in self.shape.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                rotated[x][rows - 1 - y] = cell;
            }
        }
        self.shape = rotated;
    }

    pub(crate) fn offset(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}
