//! Scoring and progression rules as pure functions.
//!
//! These are exact table lookups carried over from the original game, not
//! formulas; downstream score files depend on the values staying put.

/// Base score values for simultaneous line clears, indexed by count.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Points per row traveled during a hard drop, independent of line clears.
pub const HARD_DROP_POINTS_PER_ROW: usize = 2;

/// Score awarded for clearing `lines` rows at once on the given level.
///
/// 1 line → 100×level, 2 → 300×level, 3 → 500×level, 4 → 800×level.
/// Any other count scores nothing.
#[must_use]
pub fn line_clear_score(lines: usize, level: usize) -> usize {
    SCORE_TABLE.get(lines).map_or(0, |base| base * level)
}

/// Level derived from the cumulative number of cleared lines.
///
/// One level per 10 lines, starting at level 1.
#[must_use]
pub const fn level_for_lines(total_lines: usize) -> usize {
    total_lines / 10 + 1
}

/// Seconds a piece rests before an automatic one-row fall.
///
/// Starts at 1.0s and shrinks by 0.05s per level, clamped at 0.05s so the
/// game never becomes literally instantaneous.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn drop_interval_secs(level: usize) -> f64 {
    let interval = 1.0 - (level.saturating_sub(1)) as f64 * 0.05;
    interval.max(0.05)
}
