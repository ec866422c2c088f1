//! Board topology and engine parameters.
//!
//! Three Men's Morris is played on a 3x3 grid of points. Positions are
//! numbered 0-8 in row-major order:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```
//!
//! Everything in this module is fixed domain knowledge and never mutates.

// =============================================================================
// Board Geometry
// =============================================================================

/// Width and height of the grid.
pub const N: usize = 3;

/// Number of points on the board.
pub const CELLS: usize = N * N;

/// Pieces each side places before the game switches to sliding.
pub const PIECES_PER_SIDE: u8 = 3;

/// Points reachable from each point with a single slide.
///
/// The center is connected to every other point; corners and edges have
/// three neighbors each. Neighbor lists are in ascending order, which fixes
/// the order of generated slides.
pub const ADJACENT: [&[usize]; CELLS] = [
    &[1, 3, 4],
    &[0, 2, 4],
    &[1, 4, 5],
    &[0, 4, 6],
    &[0, 1, 2, 3, 5, 6, 7, 8],
    &[2, 4, 8],
    &[3, 4, 7],
    &[4, 6, 8],
    &[4, 5, 7],
];

/// The eight lines of three: rows, columns, diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

// =============================================================================
// Search Parameters
// =============================================================================

/// Base value of a won position. A win found at ply `d` scores `WIN_SCORE - d`.
pub const WIN_SCORE: i32 = 10;

/// Default search horizon in plies past the root.
pub const MAX_DEPTH: u32 = 6;

/// Ply limit for simulated games; sliding play can cycle forever.
pub const MAX_GAME_LEN: usize = 100;

// =============================================================================
// Glyphs
// =============================================================================

/// Human player's piece.
pub const PLAYER_GLYPH: char = 'X';

/// Computer's piece.
pub const AI_GLYPH: char = 'O';

/// Empty point.
pub const EMPTY_GLYPH: char = '.';

/// Returns true if `to` is reachable from `from` in one slide.
#[inline]
pub fn is_adjacent(from: usize, to: usize) -> bool {
    from < CELLS && ADJACENT[from].contains(&to)
}
