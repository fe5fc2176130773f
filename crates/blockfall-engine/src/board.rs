use rand::{SeedableRng as _, rngs::StdRng};

use crate::{
    config::BoardConfig,
    piece::{Piece, PieceKind},
    rules,
};

/// A single cell of the playfield grid.
///
/// A filled cell remembers which piece kind produced it; the rendering layer
/// maps kinds to colors, so this is the full per-cell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Empty cell (no locked piece).
    #[default]
    Empty,
    /// Cell occupied by a locked piece of the given kind.
    Filled(PieceKind),
}

/// Discrete notification produced while a piece locks into the board.
///
/// Consumed by the sound layer; not part of the board's returned state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    /// One or more rows were completed and removed.
    LinesCleared { count: usize },
    /// The level rose as a result of the cleared rows.
    LevelUp { level: usize },
}

/// The playfield: grid, active and next piece, and session score state.
///
/// A board is driven by one synchronous call sequence per game tick. All
/// gameplay operations are total: invalid moves and rotations return `false`
/// and leave the board unchanged, and the only state-changing failure mode
/// is the terminal game-over flag. Once `game_over` is set, mutating
/// operations become no-ops that report `false` until a fresh board is
/// constructed.
#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    grid: Vec<Vec<Cell>>,
    current: Piece,
    next: Piece,
    score: usize,
    lines_cleared: usize,
    level: usize,
    game_over: bool,
    events: Vec<TurnEvent>,
    rng: StdRng,
}

impl Board {
    /// Creates a board with an OS-seeded piece sequence.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a board with a caller-supplied generator, for deterministic
    /// piece sequences in tests.
    #[must_use]
    pub fn with_rng(config: BoardConfig, mut rng: StdRng) -> Self {
        let current = Piece::random(&mut rng, config.width);
        let next = Piece::random(&mut rng, config.width);
        Self {
            grid: vec![vec![Cell::Empty; config.width]; config.height],
            config,
            current,
            next,
            score: 0,
            lines_cleared: 0,
            level: 1,
            game_over: false,
            events: Vec::new(),
            rng,
        }
    }

    #[must_use]
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// Grid rows, top to bottom. Read-only view for the renderer.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.grid[y][x]
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Drains the notifications queued since the last call.
    pub fn take_events(&mut self) -> Vec<TurnEvent> {
        std::mem::take(&mut self.events)
    }

    /// Promotes the next piece to the active one and draws a fresh preview.
    ///
    /// Fails, setting the terminal game-over state, when the incoming piece
    /// overlaps an occupied cell. Cells still above the grid never count as
    /// colliding, so a freshly spawned piece (anchored fully off-screen)
    /// always enters; overlap is detected as it descends into the stack.
    pub fn spawn_new_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let fresh = Piece::random(&mut self.rng, self.config.width);
        self.current = std::mem::replace(&mut self.next, fresh);
        if !self.piece_fits(&self.current, 0, 0) {
            self.game_over = true;
            return false;
        }
        true
    }

    /// Whether `piece`, shifted by `(dx, dy)`, lies in a legal position.
    ///
    /// Columns must stay within `[0, width)` and rows must stay above the
    /// floor, but rows above the grid (negative) are permitted: pieces spawn
    /// and may rotate while still partly off-screen. Only in-grid cells are
    /// checked against the stack.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    pub fn piece_fits(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        let width = self.config.width as i32;
        let height = self.config.height as i32;
        piece.cells().all(|(cx, cy)| {
            let x = cx + dx;
            let y = cy + dy;
            if x < 0 || x >= width || y >= height {
                return false;
            }
            y < 0 || self.grid[y as usize][x as usize].is_empty()
        })
    }

    /// [`piece_fits`](Self::piece_fits) applied to the active piece.
    #[must_use]
    pub fn is_valid_position(&self, dx: i32, dy: i32) -> bool {
        self.piece_fits(&self.current, dx, dy)
    }

    /// Shifts the active piece by `(dx, dy)` if the target position is
    /// legal. Returns whether the move happened.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if self.game_over {
            return false;
        }
        if self.is_valid_position(dx, dy) {
            self.current.offset(dx, dy);
            return true;
        }
        false
    }

    /// Rotates the active piece clockwise, kicking off walls if needed.
    ///
    /// If the rotated shape collides in place, horizontal offsets are tried
    /// in the fixed order -1, +1, -2, +2 and the first legal one wins; the
    /// order is part of the rules, since it decides which kick applies when
    /// several would fit. If none fit, the rotation is undone.
    pub fn rotate_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let snapshot = self.current.clone();
        self.current.rotate();
        if self.is_valid_position(0, 0) {
            return true;
        }
        for dx in [-1, 1, -2, 2] {
            if self.is_valid_position(dx, 0) {
                self.current.offset(dx, 0);
                return true;
            }
        }
        self.current = snapshot;
        false
    }

    /// Locks the active piece into the grid, clears lines, and spawns the
    /// next piece. Returns `true` while the game continues.
    ///
    /// Only cells within the visible grid are written. A piece that locks
    /// while any of its cells is still above the grid means the stack has
    /// overflowed; that forces game over after line clearing has been
    /// evaluated, in addition to the spawn-time overlap check.
    #[expect(clippy::cast_sign_loss)]
    pub fn merge_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let kind = self.current.kind();
        let mut partly_above_grid = false;
        for (x, y) in self.current.cells() {
            if y < 0 {
                partly_above_grid = true;
            } else if (y as usize) < self.config.height {
                self.grid[y as usize][x as usize] = Cell::Filled(kind);
            }
        }

        self.clear_lines();
        self.spawn_new_piece();

        if partly_above_grid {
            self.game_over = true;
        }
        !self.game_over
    }

    /// Removes every complete row and returns how many were cleared.
    ///
    /// Rows are scanned top to bottom by index over the grid as it mutates:
    /// each cleared row shifts everything above it down one and leaves an
    /// empty top row before the scan moves on. Score, cumulative lines and
    /// level are updated from the count, with the score multiplier taken
    /// from the level in effect before the clear.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..self.config.height {
            if !self.grid[y].iter().all(Cell::is_filled) {
                continue;
            }
            cleared += 1;
            // Bubble the full row to the top, shifting rows 0..y down one.
            for row in (1..=y).rev() {
                self.grid.swap(row, row - 1);
            }
            self.grid[0].fill(Cell::Empty);
        }

        if cleared > 0 {
            self.score += rules::line_clear_score(cleared, self.level);
            self.lines_cleared += cleared;
            self.events.push(TurnEvent::LinesCleared { count: cleared });

            let level = rules::level_for_lines(self.lines_cleared);
            if level > self.level {
                self.events.push(TurnEvent::LevelUp { level });
            }
            self.level = level;
        }
        cleared
    }

    /// Drops the active piece to the lowest legal row and locks it there.
    ///
    /// Awards 2 points per row traveled, independent of any line-clear
    /// score, then merges. Returns [`merge_piece`](Self::merge_piece)'s
    /// result.
    pub fn hard_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let mut drop_distance = 0;
        while self.move_piece(0, 1) {
            drop_distance += 1;
        }
        self.score += rules::HARD_DROP_POINTS_PER_ROW * drop_distance;
        self.merge_piece()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;

    fn test_board() -> Board {
        Board::with_rng(BoardConfig::default(), StdRng::seed_from_u64(42))
    }

    /// Board whose active piece is replaced by the given kind at (x, y).
    fn board_with_piece(kind: PieceKind, x: i32, y: i32) -> Board {
        let mut board = test_board();
        let mut piece = Piece::new(kind, board.config.width);
        piece.place_at(x, y);
        board.current = piece;
        board
    }

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..board.config.width {
            board.grid[y][x] = Cell::Filled(PieceKind::I);
        }
    }

    fn occupied_in_row(board: &Board, y: usize) -> usize {
        board.grid[y].iter().filter(|c| c.is_filled()).count()
    }

    #[test]
    fn new_board_starts_clean() {
        let board = test_board();
        assert!(!board.is_game_over());
        assert_eq!(board.score(), 0);
        assert_eq!(board.lines_cleared(), 0);
        assert_eq!(board.level(), 1);
        assert_eq!(board.rows().count(), 20);
        assert!(board.rows().all(|row| {
            row.len() == 10 && row.iter().all(Cell::is_empty)
        }));
    }

    #[test]
    fn current_and_next_are_independent_pieces() {
        let mut board = test_board();
        let next_before = board.next.clone();
        board.current.rotate();
        board.current.offset(1, 1);
        assert_eq!(board.next, next_before);
    }

    #[test]
    fn i_piece_validity_at_the_edges() {
        // Horizontal I occupying columns 3..=6 of row 0.
        let board = board_with_piece(PieceKind::I, 3, 0);

        assert!(board.is_valid_position(0, 0));
        assert!(board.is_valid_position(-3, 0), "flush against the left wall");
        assert!(board.is_valid_position(3, 0), "flush against the right wall");
        assert!(!board.is_valid_position(-4, 0), "column -1 is out of bounds");
        assert!(!board.is_valid_position(4, 0), "column 10 is out of bounds");
        assert!(!board.is_valid_position(8, 0));

        assert!(board.is_valid_position(0, 19), "resting on the floor");
        assert!(!board.is_valid_position(0, 20), "row 20 is below the floor");
        assert!(board.is_valid_position(0, -5), "rows above the grid are open");
    }

    #[test]
    fn occupied_cells_block_placement() {
        let mut board = board_with_piece(PieceKind::I, 3, 0);
        board.grid[1][4] = Cell::Filled(PieceKind::O);
        assert!(board.is_valid_position(0, 0));
        assert!(!board.is_valid_position(0, 1));
    }

    #[test]
    fn move_piece_applies_or_rejects() {
        let mut board = board_with_piece(PieceKind::I, 3, 0);

        assert!(board.move_piece(1, 0));
        assert_eq!(board.current.x(), 4);
        assert!(board.move_piece(0, 1));
        assert_eq!(board.current.y(), 1);

        assert!(!board.move_piece(10, 0), "rejected move leaves the piece put");
        assert_eq!((board.current.x(), board.current.y()), (4, 1));
    }

    #[test]
    fn rotation_in_open_space_keeps_the_anchor() {
        let mut board = board_with_piece(PieceKind::I, 3, 5);
        assert!(board.rotate_piece());
        assert_eq!((board.current.x(), board.current.y()), (3, 5));
        assert_eq!(board.current.size(), (1, 4));
    }

    // Kick-order scenarios: a vertical I anchored at (x, 4) occupies rows
    // 4..=7 of column x and rotates into a horizontal bar over columns
    // x..=x+3 of row 4. Blocking cells in row 4 force successive kicks in
    // the fixed order -1, +1, -2, +2.
    fn vertical_i_at(x: i32) -> Board {
        let mut board = board_with_piece(PieceKind::I, x, 4);
        board.current.rotate();
        assert_eq!(board.current.size(), (1, 4));
        board
    }

    fn block_columns(board: &mut Board, y: usize, columns: &[usize]) {
        for &x in columns {
            board.grid[y][x] = Cell::Filled(PieceKind::O);
        }
    }

    #[test]
    fn rotation_without_obstruction_needs_no_kick() {
        let mut board = vertical_i_at(3);
        assert!(board.rotate_piece());
        assert_eq!(board.current.x(), 3);
    }

    #[test]
    fn nearest_left_kick_is_preferred() {
        // Column 6 blocks the unkicked bar (3..=6). Both -1 (2..=5) and -2
        // (1..=4) would fit; the nearer one must win.
        let mut board = vertical_i_at(3);
        block_columns(&mut board, 4, &[6]);
        assert!(board.rotate_piece());
        assert_eq!(board.current.x(), 2);
    }

    #[test]
    fn right_kick_applies_when_the_left_side_is_blocked() {
        // Vertical L at (4, 4) occupies (4,4) (5,4) (5,5) (5,6); rotating
        // yields cells (6,4) (4,5) (5,5) (6,5). A block at (4,5) collides
        // with both the unkicked and the -1 position, so +1 is chosen.
        let mut board = board_with_piece(PieceKind::L, 4, 4);
        board.current.rotate();
        board.grid[5][4] = Cell::Filled(PieceKind::O);

        assert!(board.rotate_piece());
        assert_eq!(board.current.x(), 5);
    }

    #[test]
    fn wide_left_kick_applies_when_both_near_kicks_fail() {
        // Columns 5 and 6 rule out the bar at 3..=6, 2..=5 and 4..=7;
        // -2 (1..=4) is the first remaining fit.
        let mut board = vertical_i_at(3);
        block_columns(&mut board, 4, &[5, 6]);
        assert!(board.rotate_piece());
        assert_eq!(board.current.x(), 1);
    }

    #[test]
    fn wide_right_kick_is_the_last_resort() {
        // A single block at column 4 intersects every candidate except
        // +2 (5..=8).
        let mut board = vertical_i_at(3);
        block_columns(&mut board, 4, &[4]);
        assert!(board.rotate_piece());
        assert_eq!(board.current.x(), 5);
    }

    #[test]
    fn failed_rotation_restores_the_shape() {
        // Columns 4 and 5 intersect all five candidate positions.
        let mut board = vertical_i_at(3);
        block_columns(&mut board, 4, &[4, 5]);
        let before = board.current.clone();
        assert!(!board.rotate_piece());
        assert_eq!(board.current, before);
    }

    #[test]
    fn wall_kick_recovers_rotation_at_the_right_wall() {
        // Vertical I in column 8: the horizontal bar would span 8..=11, and
        // only the -2 kick brings it back inside.
        let mut board = vertical_i_at(8);
        assert!(board.rotate_piece());
        assert_eq!(board.current.x(), 6);
        assert_eq!(board.current.size(), (4, 1));
    }

    #[test]
    fn merge_writes_cells_and_spawns_the_next_piece() {
        let mut board = board_with_piece(PieceKind::O, 4, 18);
        let promoted = board.next.kind();

        assert!(board.merge_piece());
        assert_eq!(board.cell(4, 18), Cell::Filled(PieceKind::O));
        assert_eq!(board.cell(5, 18), Cell::Filled(PieceKind::O));
        assert_eq!(board.cell(4, 19), Cell::Filled(PieceKind::O));
        assert_eq!(board.cell(5, 19), Cell::Filled(PieceKind::O));
        assert_eq!(board.current.kind(), promoted);
        assert!(!board.is_game_over());
    }

    #[test]
    fn merge_above_the_grid_is_an_overflow_game_over() {
        // Vertical I spanning rows -2..=1: locks its two visible cells but
        // ends the game, because part of the piece never entered the grid.
        let mut board = board_with_piece(PieceKind::I, 5, 5);
        board.current.rotate();
        board.current.place_at(5, -2);

        assert!(!board.merge_piece());
        assert!(board.is_game_over());
        assert_eq!(board.cell(5, 0), Cell::Filled(PieceKind::I));
        assert_eq!(board.cell(5, 1), Cell::Filled(PieceKind::I));
    }

    #[test]
    fn overflow_merge_still_scores_completed_rows() {
        let mut board = board_with_piece(PieceKind::I, 5, 5);
        board.current.rotate();
        board.current.place_at(5, -2);
        fill_row(&mut board, 0);
        board.grid[0][5] = Cell::Empty;
        fill_row(&mut board, 1);
        board.grid[1][5] = Cell::Empty;

        assert!(!board.merge_piece());
        assert!(board.is_game_over());
        assert_eq!(board.lines_cleared(), 2);
        assert_eq!(board.score(), 300);
    }

    #[test]
    fn clear_single_bottom_row_shifts_the_stack_down() {
        let mut board = test_board();
        fill_row(&mut board, 19);
        board.grid[18][0] = Cell::Filled(PieceKind::T);

        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.lines_cleared(), 1);
        assert_eq!(board.score(), 100);
        assert_eq!(board.cell(0, 18), Cell::Empty);
        assert_eq!(board.cell(0, 19), Cell::Filled(PieceKind::T), "marker shifted down");
        assert_eq!(occupied_in_row(&board, 19), 1);
        assert_eq!(occupied_in_row(&board, 18), 0);
    }

    #[test]
    fn clear_separated_rows_in_one_scan() {
        let mut board = test_board();
        fill_row(&mut board, 17);
        fill_row(&mut board, 19);
        board.grid[18][3] = Cell::Filled(PieceKind::S);

        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.score(), 300);
        // The partial row lands on the floor after both clears.
        assert_eq!(board.cell(3, 19), Cell::Filled(PieceKind::S));
        assert_eq!(occupied_in_row(&board, 19), 1);
    }

    #[test]
    fn clear_four_consecutive_rows_is_a_tetris() {
        let mut board = test_board();
        for y in 16..20 {
            fill_row(&mut board, y);
        }
        assert_eq!(board.clear_lines(), 4);
        assert_eq!(board.score(), 800);
        assert_eq!(
            board.take_events(),
            vec![TurnEvent::LinesCleared { count: 4 }]
        );
    }

    #[test]
    fn score_multiplier_uses_the_level_before_the_clear() {
        let mut board = test_board();
        board.lines_cleared = 20;
        board.level = 3;
        for y in 16..20 {
            fill_row(&mut board, y);
        }
        assert_eq!(board.clear_lines(), 4);
        assert_eq!(board.score(), 2400);
        assert_eq!(board.lines_cleared(), 24);
        assert_eq!(board.level(), 3);
    }

    #[test]
    fn level_up_is_recomputed_and_announced() {
        let mut board = test_board();
        board.lines_cleared = 9;
        fill_row(&mut board, 19);

        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.level(), 2);
        assert_eq!(
            board.take_events(),
            vec![
                TurnEvent::LinesCleared { count: 1 },
                TurnEvent::LevelUp { level: 2 },
            ]
        );
        assert!(board.take_events().is_empty(), "take_events drains the queue");
    }

    #[test]
    fn hard_drop_awards_two_points_per_row() {
        // Horizontal I at spawn height (y = -1) falls 20 rows to the floor.
        let mut board = board_with_piece(PieceKind::I, 3, -1);
        assert!(board.hard_drop());
        assert_eq!(board.score(), 40);
        assert_eq!(board.cell(3, 19), Cell::Filled(PieceKind::I));
    }

    #[test]
    fn hard_drop_onto_the_stack_measures_the_shorter_distance() {
        let mut board = board_with_piece(PieceKind::I, 3, -1);
        fill_row(&mut board, 19);
        board.grid[19][0] = Cell::Empty;

        assert!(board.hard_drop());
        // 19 rows traveled (rests on top of the stack), no line completed.
        assert_eq!(board.score(), 38);
        assert_eq!(board.cell(3, 18), Cell::Filled(PieceKind::I));
    }

    #[test]
    fn spawn_succeeds_even_over_a_tall_stack() {
        // Spawn positions sit fully above the grid, so the overlap check
        // cannot fail there; overflow is caught at merge time instead.
        let mut board = test_board();
        for y in 0..20 {
            fill_row(&mut board, y);
        }
        assert!(board.spawn_new_piece());
        assert!(!board.is_game_over());
    }

    #[test]
    fn operations_are_no_ops_after_game_over() {
        let mut board = board_with_piece(PieceKind::O, 4, 18);
        board.game_over = true;
        let piece_before = board.current.clone();
        let score_before = board.score();

        assert!(!board.move_piece(1, 0));
        assert!(!board.rotate_piece());
        assert!(!board.hard_drop());
        assert!(!board.merge_piece());
        assert!(!board.spawn_new_piece());
        assert_eq!(board.current, piece_before);
        assert_eq!(board.score(), score_before);
        assert!(board.rows().all(|row| row.iter().all(Cell::is_empty)));
    }
}
