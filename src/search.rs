//! Depth-bounded minimax search with alpha-beta pruning.
//!
//! The search plays hypothetical moves directly on the caller's
//! [`GameState`] and undoes each one before trying the next, so the state
//! is unchanged when the search returns.
//!
//! Scores are always from the computer's point of view:
//! - a computer win found at ply `d` scores `WIN_SCORE - d`
//! - a human win found at ply `d` scores `d - WIN_SCORE`
//! - draws, blocked sides and positions past the horizon score 0
//!
//! Nearer wins therefore beat distant ones, and distant losses beat near
//! ones. There is no positional evaluation beyond that.

use tracing::{debug, trace};

use crate::board::Mark;
use crate::constants::WIN_SCORE;
use crate::position::{GameState, Move, MoveError};

/// Result of a root search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Minimax value of the root, computer's perspective.
    pub score: i32,
    /// Move achieving `score`, or `None` if the root was terminal or the
    /// computer had nothing to play.
    pub best: Option<Move>,
    /// Number of nodes visited, root included.
    pub nodes: u64,
}

/// Minimax searcher with a fixed horizon.
pub struct Searcher {
    max_depth: u32,
    nodes: u64,
}

impl Searcher {
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            nodes: 0,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `state` with the computer to move.
    pub fn search(&mut self, state: &mut GameState) -> Result<SearchResult, MoveError> {
        self.nodes = 0;
        let (score, best) = self.minimax(state, 0, i32::MIN, i32::MAX, true)?;

        debug!(
            score,
            best = %best.map_or_else(|| "none".to_string(), |m| m.to_string()),
            nodes = self.nodes,
            max_depth = self.max_depth,
            "search finished"
        );

        Ok(SearchResult {
            score,
            best,
            nodes: self.nodes,
        })
    }

    fn minimax(
        &mut self,
        state: &mut GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<(i32, Option<Move>), MoveError> {
        self.nodes += 1;

        if depth > self.max_depth {
            return Ok((0, None));
        }
        let ply = depth as i32;
        if state.is_winner(Mark::Computer) {
            return Ok((WIN_SCORE - ply, None));
        }
        if state.is_winner(Mark::Player) {
            return Ok((ply - WIN_SCORE, None));
        }
        if state.is_draw() {
            return Ok((0, None));
        }

        let mark = if maximizing {
            Mark::Computer
        } else {
            Mark::Player
        };
        let moves = state.legal_moves(mark);
        // A blocked side at an inner node counts as neutral even if the
        // other side could still move.
        if moves.is_empty() {
            return Ok((0, None));
        }

        let mut best_move = None;

        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in moves {
                state.apply(mv, mark);
                let (score, _) = self.minimax(state, depth + 1, alpha, beta, false)?;
                state.undo(mv, mark)?;

                if depth == 0 {
                    trace!(%mv, score, "root move");
                }

                if score > max_eval {
                    max_eval = score;
                    best_move = Some(mv);
                    if max_eval == WIN_SCORE - ply {
                        return Ok((max_eval, best_move));
                    }
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            Ok((max_eval, best_move))
        } else {
            let mut min_eval = i32::MAX;
            for mv in moves {
                state.apply(mv, mark);
                let (score, _) = self.minimax(state, depth + 1, alpha, beta, true)?;
                state.undo(mv, mark)?;

                if score < min_eval {
                    min_eval = score;
                    best_move = Some(mv);
                    if min_eval == ply - WIN_SCORE {
                        return Ok((min_eval, best_move));
                    }
                }
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            Ok((min_eval, best_move))
        }
    }
}

/// Find the computer's best move in `state`, looking `max_depth` plies past
/// the root. `state` is restored before returning.
pub fn best_move(state: &mut GameState, max_depth: u32) -> Result<SearchResult, MoveError> {
    Searcher::new(max_depth).search(state)
}

/// Like [`best_move`], but a missing move is an error.
pub fn choose_move(state: &mut GameState, max_depth: u32) -> Result<Move, MoveError> {
    best_move(state, max_depth)?
        .best
        .ok_or(MoveError::NoMoveAvailable)
}
