//! Game state and move execution for Three Men's Morris.
//!
//! This module provides the core game logic:
//! - Board contents and per-side piece counts
//! - Phase tracking (placing pieces vs. sliding them)
//! - Legal move generation over the adjacency graph
//! - Exact apply/undo of moves, checked against a move history
//! - Win and draw detection
//!
//! The search mutates a single `GameState` in place and reverts every
//! move it tries, so `undo` must restore the state bit for bit. Every
//! applied move is pushed onto a history stack and `undo` refuses any
//! move that is not on top of it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Board, Mark};
use crate::constants::{ADJACENT, CELLS, PIECES_PER_SIDE};

/// A point on the board, 0-8 in row-major order.
pub type Point = usize;

/// Errors raised by the game core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The move is not in `legal_moves` for this side and phase.
    #[error("illegal move {mv} for {mark}")]
    IllegalMove { mv: Move, mark: Mark },
    /// The side to move has nothing to play.
    #[error("no legal move available")]
    NoMoveAvailable,
    /// `undo` was called with a move other than the last one applied.
    #[error("cannot undo {mv} for {mark}: it is not the last applied move")]
    UndoMismatch { mv: Move, mark: Mark },
    #[error("cannot parse move: {0}")]
    Parse(String),
    #[error("invalid board: {0}")]
    Board(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Placing,
    Moving,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Placing => write!(f, "placing"),
            Phase::Moving => write!(f, "moving"),
        }
    }
}

/// A single move. The variant says what kind of move it is, so undoing
/// never depends on the phase the state happens to be in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Put a new piece on an empty point.
    Placement(Point),
    /// Slide a piece to an adjacent empty point.
    Slide { from: Point, to: Point },
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Placement(p) => write!(f, "{p}"),
            Move::Slide { from, to } => write!(f, "{from}-{to}"),
        }
    }
}

/// Parses `"4"` as a placement and `"0-1"`, `"0 1"`, `"0,1"` or `"0>1"`
/// as a slide.
impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let points = s
            .split(|c: char| c.is_whitespace() || matches!(c, '-' | ',' | '>'))
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<Point>()
                    .map_err(|_| MoveError::Parse(format!("{part:?} is not a number")))
                    .and_then(|p| {
                        if p < CELLS {
                            Ok(p)
                        } else {
                            Err(MoveError::Parse(format!("{p} is off the board")))
                        }
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match points[..] {
            [p] => Ok(Move::Placement(p)),
            [from, to] => Ok(Move::Slide { from, to }),
            [] => Err(MoveError::Parse("empty input".to_string())),
            _ => Err(MoveError::Parse(format!("too many points in {s:?}"))),
        }
    }
}

/// Final result of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    PlayerWins,
    ComputerWins,
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PlayerWins => write!(f, "Player wins!"),
            Outcome::ComputerWins => write!(f, "AI wins!"),
            Outcome::Draw => write!(f, "It's a draw."),
        }
    }
}

/// A Three Men's Morris position.
///
/// The phase is not stored: it is `Moving` exactly when both sides have
/// three pieces on the board, so undoing a placement drops back to
/// `Placing` without extra bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    player_pieces: u8,
    ai_pieces: u8,
    /// Moves applied and not yet undone, most recent last.
    history: Vec<(Move, Mark)>,
}

impl GameState {
    /// Empty board, no pieces placed, `Placing` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary board. Piece counts are taken from the marks.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            player_pieces: board.count(Mark::Player) as u8,
            ai_pieces: board.count(Mark::Computer) as u8,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, p: Point) -> Option<Mark> {
        self.board.get(p)
    }

    pub fn player_pieces(&self) -> u8 {
        self.player_pieces
    }

    pub fn ai_pieces(&self) -> u8 {
        self.ai_pieces
    }

    pub fn pieces(&self, mark: Mark) -> u8 {
        match mark {
            Mark::Player => self.player_pieces,
            Mark::Computer => self.ai_pieces,
        }
    }

    fn pieces_mut(&mut self, mark: Mark) -> &mut u8 {
        match mark {
            Mark::Player => &mut self.player_pieces,
            Mark::Computer => &mut self.ai_pieces,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.player_pieces == PIECES_PER_SIDE && self.ai_pieces == PIECES_PER_SIDE {
            Phase::Moving
        } else {
            Phase::Placing
        }
    }

    /// Moves applied and not yet undone, oldest first.
    pub fn history(&self) -> &[(Move, Mark)] {
        &self.history
    }

    /// Empty points in ascending order.
    pub fn available_positions(&self) -> Vec<Point> {
        self.board.empty_positions()
    }

    /// Points held by `mark` in ascending order.
    pub fn positions_of(&self, mark: Mark) -> Vec<Point> {
        self.board.positions_of(mark)
    }

    /// All moves `mark` may make in the current phase.
    ///
    /// Placements come in ascending point order. Slides are ordered by
    /// source point, then by the adjacency list of that point. The search
    /// relies on this order for its tie-breaking.
    pub fn legal_moves(&self, mark: Mark) -> Vec<Move> {
        let board = &self.board;
        match self.phase() {
            Phase::Placing => self
                .available_positions()
                .into_iter()
                .map(Move::Placement)
                .collect(),
            Phase::Moving => self
                .positions_of(mark)
                .into_iter()
                .flat_map(move |from| {
                    ADJACENT[from]
                        .iter()
                        .filter(move |&&to| board.is_empty(to))
                        .map(move |&to| Move::Slide { from, to })
                })
                .collect(),
        }
    }

    pub fn is_legal(&self, mv: Move, mark: Mark) -> bool {
        self.legal_moves(mark).contains(&mv)
    }

    /// Apply a move produced by `legal_moves(mark)`.
    ///
    /// No legality check is made; use [`GameState::try_apply`] for
    /// untrusted input. Panics if a point is off the board.
    pub fn apply(&mut self, mv: Move, mark: Mark) {
        match mv {
            Move::Placement(p) => {
                self.board.set(p, Some(mark));
                *self.pieces_mut(mark) += 1;
            }
            Move::Slide { from, to } => {
                self.board.set(from, None);
                self.board.set(to, Some(mark));
            }
        }
        self.history.push((mv, mark));
    }

    /// Apply `mv` only if it is legal for `mark`; the state is untouched
    /// otherwise.
    pub fn try_apply(&mut self, mv: Move, mark: Mark) -> Result<(), MoveError> {
        if !self.is_legal(mv, mark) {
            return Err(MoveError::IllegalMove { mv, mark });
        }
        self.apply(mv, mark);
        Ok(())
    }

    /// Revert the most recent `apply`. `(mv, mark)` must match the top of
    /// the history; otherwise nothing changes and `UndoMismatch` is returned.
    pub fn undo(&mut self, mv: Move, mark: Mark) -> Result<(), MoveError> {
        if self.history.last() != Some(&(mv, mark)) {
            return Err(MoveError::UndoMismatch { mv, mark });
        }
        self.history.pop();
        match mv {
            Move::Placement(p) => {
                self.board.set(p, None);
                *self.pieces_mut(mark) -= 1;
            }
            Move::Slide { from, to } => {
                self.board.set(to, None);
                self.board.set(from, Some(mark));
            }
        }
        Ok(())
    }

    pub fn is_winner(&self, mark: Mark) -> bool {
        self.board.has_line(mark)
    }

    /// Nobody has won and neither side can move.
    pub fn is_draw(&self) -> bool {
        !self.is_winner(Mark::Player)
            && !self.is_winner(Mark::Computer)
            && self.legal_moves(Mark::Player).is_empty()
            && self.legal_moves(Mark::Computer).is_empty()
    }

    /// The result of the game if it is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_winner(Mark::Player) {
            Some(Outcome::PlayerWins)
        } else if self.is_winner(Mark::Computer) {
            Some(Outcome::ComputerWins)
        } else if self.is_draw() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl FromStr for GameState {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(GameState::with_board)
    }
}
