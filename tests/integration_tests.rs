//! Integration tests for morris-rust
//!
//! Properties of move generation and apply/undo are checked over positions
//! reached by random play from the empty board; search tests use small
//! hand-built positions.

use morris_rust::board::Mark;
use morris_rust::constants::{ADJACENT, CELLS, MAX_DEPTH, WIN_SCORE, WINNING_LINES, is_adjacent};
use morris_rust::position::{GameState, Move, Outcome, Phase};
use morris_rust::search::{Searcher, best_move, choose_move};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Build a position from a diagram such as "XX./.O./...".
fn setpos(diagram: &str) -> GameState {
    diagram
        .parse()
        .unwrap_or_else(|e| panic!("bad diagram {diagram:?}: {e}"))
}

/// Play `plies` random legal moves from the empty board, human first,
/// stopping early at a finished game.
fn random_game(seed: u64, plies: usize) -> (GameState, Mark) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut state = GameState::new();
    let mut mark = Mark::Player;
    for _ in 0..plies {
        if state.outcome().is_some() {
            break;
        }
        let moves = state.legal_moves(mark);
        if moves.is_empty() {
            break;
        }
        state.apply(moves[rng.usize(..moves.len())], mark);
        mark = mark.opponent();
    }
    (state, mark)
}

/// A sample of reachable positions in both phases.
fn reachable_positions() -> Vec<(GameState, Mark)> {
    (0..200).map(|seed| random_game(seed, (seed % 14) as usize)).collect()
}

// =============================================================================
// Apply / undo
// =============================================================================

#[test]
fn test_apply_undo_restores_everything() {
    for (mut state, mark) in reachable_positions() {
        for mark in [mark, mark.opponent()] {
            for mv in state.legal_moves(mark) {
                let before = state.clone();
                state.apply(mv, mark);
                assert_ne!(state, before);
                state.undo(mv, mark).unwrap();
                assert_eq!(state, before, "apply/undo of {mv} for {mark}");
                assert_eq!(state.phase(), before.phase());
            }
        }
    }
}

#[test]
fn test_undo_follows_stack_order() {
    let mut state = GameState::new();
    let played = [
        (Move::Placement(4), Mark::Player),
        (Move::Placement(0), Mark::Computer),
        (Move::Placement(8), Mark::Player),
    ];
    for (mv, mark) in played {
        state.apply(mv, mark);
    }
    assert_eq!(state.history(), &played);

    assert!(state.undo(Move::Placement(4), Mark::Player).is_err());
    for (mv, mark) in played.into_iter().rev() {
        state.undo(mv, mark).unwrap();
    }
    assert_eq!(state, GameState::new());
}

#[test]
fn test_piece_counts_match_board() {
    for (state, _) in reachable_positions() {
        assert_eq!(
            state.positions_of(Mark::Player).len(),
            state.player_pieces() as usize
        );
        assert_eq!(
            state.positions_of(Mark::Computer).len(),
            state.ai_pieces() as usize
        );
    }
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_placing_moves_cover_empty_points() {
    for (state, mark) in reachable_positions() {
        if state.phase() != Phase::Placing {
            continue;
        }
        let expected: Vec<Move> = state
            .available_positions()
            .into_iter()
            .map(Move::Placement)
            .collect();
        assert_eq!(state.legal_moves(mark), expected);
    }
}

#[test]
fn test_slides_are_adjacent_and_owned() {
    let mut seen_moving = false;
    for (state, mark) in reachable_positions() {
        if state.phase() != Phase::Moving {
            continue;
        }
        seen_moving = true;
        for mv in state.legal_moves(mark) {
            let Move::Slide { from, to } = mv else {
                panic!("placement {mv} in moving phase");
            };
            assert_eq!(state.cell(from), Some(mark));
            assert_eq!(state.cell(to), None);
            assert!(is_adjacent(from, to));
        }
    }
    assert!(seen_moving, "sample should reach the moving phase");
}

#[test]
fn test_slide_order() {
    let state = setpos("XO./XO./O.X");
    assert_eq!(state.phase(), Phase::Moving);
    let moves = state.legal_moves(Mark::Computer);
    assert_eq!(
        moves,
        vec![
            Move::Slide { from: 1, to: 2 },
            Move::Slide { from: 4, to: 2 },
            Move::Slide { from: 4, to: 5 },
            Move::Slide { from: 4, to: 7 },
            Move::Slide { from: 6, to: 7 },
        ]
    );
    for mv in &moves {
        if let Move::Slide { from, to } = *mv {
            assert!(ADJACENT[from].contains(&to));
        }
    }
}

// =============================================================================
// Phase transitions
// =============================================================================

#[test]
fn test_phase_changes_after_six_placements() {
    let mut state = GameState::new();
    let mut mark = Mark::Player;
    for p in [0, 4, 8, 1, 7, 6] {
        assert_eq!(state.phase(), Phase::Placing);
        state.apply(Move::Placement(p), mark);
        mark = mark.opponent();
    }
    assert_eq!(state.phase(), Phase::Moving);

    // Slides never leave the moving phase.
    state.apply(Move::Slide { from: 0, to: 3 }, Mark::Player);
    assert_eq!(state.phase(), Phase::Moving);
    state.undo(Move::Slide { from: 0, to: 3 }, Mark::Player).unwrap();

    state.undo(Move::Placement(6), Mark::Computer).unwrap();
    assert_eq!(state.phase(), Phase::Placing);
}

// =============================================================================
// Terminal detection
// =============================================================================

#[test]
fn test_every_winning_line() {
    for line in WINNING_LINES {
        let mut cells = ['.'; CELLS];
        for p in line {
            cells[p] = 'O';
        }
        let diagram: String = cells.iter().collect();
        let state = setpos(&diagram);
        assert!(state.is_winner(Mark::Computer), "line {line:?}");
        assert!(!state.is_winner(Mark::Player));
        assert_eq!(state.outcome(), Some(Outcome::ComputerWins));
    }
}

#[test]
fn test_fresh_state_has_no_winner() {
    let state = GameState::new();
    assert!(!state.is_winner(Mark::Player));
    assert!(!state.is_winner(Mark::Computer));
    assert!(!state.is_draw());
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_empty_board_search() {
    let mut state = GameState::new();
    let result = best_move(&mut state, MAX_DEPTH).unwrap();
    assert!(matches!(result.best, Some(Move::Placement(_))));
    assert_eq!(state, GameState::new());
}

#[test]
fn test_blocks_open_row() {
    let mut state = setpos("XX./.O./...");
    let result = best_move(&mut state, MAX_DEPTH).unwrap();
    assert_eq!(result.best, Some(Move::Placement(2)));
    // Blocking leads to a forced win five plies out.
    assert_eq!(result.score, WIN_SCORE - 5);
}

#[test]
fn test_immediate_slide_win() {
    let mut state = setpos("XOX/O.O/X..");
    let mv = choose_move(&mut state, MAX_DEPTH).unwrap();
    assert_eq!(mv, Move::Slide { from: 1, to: 4 });
    state.apply(mv, Mark::Computer);
    assert!(state.is_winner(Mark::Computer));
}

#[test]
fn test_delays_unavoidable_loss() {
    let mut state = setpos("XO./.OO/.XX");
    let result = best_move(&mut state, MAX_DEPTH).unwrap();
    assert!(result.score < 0);
    assert!(result.score > 2 - WIN_SCORE);
    assert_eq!(result.best, Some(Move::Slide { from: 5, to: 2 }));
}

#[test]
fn test_deeper_search_visits_more_nodes() {
    let mut state = setpos("X../.../...");
    let mut shallow = Searcher::new(2);
    let mut deep = Searcher::new(4);
    shallow.search(&mut state).unwrap();
    deep.search(&mut state).unwrap();
    assert!(deep.nodes() > shallow.nodes());
    assert_eq!(deep.max_depth(), 4);
}

#[test]
fn test_search_leaves_reachable_positions_untouched() {
    for (mut state, _) in reachable_positions().into_iter().step_by(10) {
        let before = state.clone();
        best_move(&mut state, 4).unwrap();
        assert_eq!(state, before);
    }
}
