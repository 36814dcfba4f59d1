//! Scoring module - drop points, line clears, level and gravity
//!
//! Score drives everything else: the level is derived from the cumulative score and the
//! gravity interval from the level. Score never decreases, so neither does the level.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, HARD_DROP_POINTS, LINE_SCORES,
    POINTS_PER_LEVEL, SOFT_DROP_POINTS,
};

/// Points for clearing `lines` rows at once at `level` (1-based).
/// Zero rows or more than four score nothing.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Calculate drop score
/// soft drop: +1 per cell
/// hard drop: +2 per cell
pub fn drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level for a cumulative score: one level per 5000 points, starting at 1
pub fn level_for_score(score: u32) -> u32 {
    (score / POINTS_PER_LEVEL + 1).max(1)
}

/// Gravity interval for a level: 1000ms at level 1, 50ms faster per level, never below 100ms
pub fn drop_interval_ms(level: u32) -> u32 {
    let reduction = DROP_STEP_MS.saturating_mul(level.saturating_sub(1));
    BASE_DROP_MS
        .saturating_sub(reduction)
        .max(DROP_INTERVAL_MIN_MS)
}
