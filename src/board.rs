use std::fmt;
use std::str::FromStr;

use crate::constants::{AI_GLYPH, CELLS, EMPTY_GLYPH, N, PLAYER_GLYPH, WINNING_LINES};
use crate::position::MoveError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Player,
    Computer,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::Player => Mark::Computer,
            Mark::Computer => Mark::Player,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::Player => PLAYER_GLYPH,
            Mark::Computer => AI_GLYPH,
        }
    }

    fn from_symbol(c: char) -> Option<Option<Mark>> {
        match c.to_ascii_uppercase() {
            PLAYER_GLYPH => Some(Some(Mark::Player)),
            AI_GLYPH => Some(Some(Mark::Computer)),
            EMPTY_GLYPH => Some(None),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The nine points of the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Mark>; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of point `p`; out-of-range points read as empty.
    pub fn get(&self, p: usize) -> Option<Mark> {
        self.cells.get(p).copied().flatten()
    }

    pub(crate) fn set(&mut self, p: usize, mark: Option<Mark>) {
        self.cells[p] = mark;
    }

    pub fn is_empty(&self, p: usize) -> bool {
        p < CELLS && self.cells[p].is_none()
    }

    pub fn empty_positions(&self) -> Vec<usize> {
        (0..CELLS).filter(|&p| self.cells[p].is_none()).collect()
    }

    pub fn positions_of(&self, mark: Mark) -> Vec<usize> {
        (0..CELLS).filter(|&p| self.cells[p] == Some(mark)).collect()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == Some(mark)).count()
    }

    /// True if `mark` holds all three points of some line.
    pub fn has_line(&self, mark: Mark) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&p| self.cells[p] == Some(mark)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(N) {
            let glyphs: Vec<String> = row
                .iter()
                .map(|&c| c.map_or(EMPTY_GLYPH, Mark::symbol).to_string())
                .collect();
            writeln!(f, "{}", glyphs.join(" "))?;
        }
        Ok(())
    }
}

/// Parses a diagram such as `"XX./.O./..."` or the `Display` output.
/// Whitespace and `/` separators are ignored.
impl FromStr for Board {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut n = 0;
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            let cell = Mark::from_symbol(c)
                .ok_or_else(|| MoveError::Board(format!("unexpected character {c:?}")))?;
            if n >= CELLS {
                return Err(MoveError::Board(format!("more than {CELLS} points")));
            }
            board.cells[n] = cell;
            n += 1;
        }
        if n != CELLS {
            return Err(MoveError::Board(format!("expected {CELLS} points, got {n}")));
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let board: Board = "XX./.O./...".parse().unwrap();
        assert_eq!(board.get(0), Some(Mark::Player));
        assert_eq!(board.get(4), Some(Mark::Computer));
        assert_eq!(board.to_string(), "X X .\n. O .\n. . .\n");
        let again: Board = board.to_string().parse().unwrap();
        assert_eq!(again, board);
    }

    #[test]
    fn test_parse_rejects_bad_diagrams() {
        assert!("XX./.O.".parse::<Board>().is_err());
        assert!("XX./.O./....".parse::<Board>().is_err());
        assert!("XZ./.O./...".parse::<Board>().is_err());
    }

    #[test]
    fn test_has_line() {
        let board: Board = "OOO/X.X/..X".parse().unwrap();
        assert!(board.has_line(Mark::Computer));
        assert!(!board.has_line(Mark::Player));
        let diag: Board = "X.O/.X./O.X".parse().unwrap();
        assert!(diag.has_line(Mark::Player));
    }

    #[test]
    fn test_out_of_range_reads_empty() {
        let board = Board::new();
        assert_eq!(board.get(9), None);
        assert!(!board.is_empty(9));
    }
}
