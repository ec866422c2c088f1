//! Morris-Rust: a Three Men's Morris engine.
//!
//! This crate plays Three Men's Morris against a human, choosing its moves
//! with a depth-limited minimax search and alpha-beta pruning.
//!
//! ## Modules
//!
//! - [`constants`] - Board topology and search parameters
//! - [`board`] - The nine-point board and its text form
//! - [`position`] - Game state, moves, apply/undo, win and draw detection
//! - [`search`] - Minimax search with alpha-beta pruning
//! - [`session`] - Interactive text game loop
//! - [`playout`] - Games against a random mover
//!
//! ## Example
//!
//! ```
//! use morris_rust::board::Mark;
//! use morris_rust::position::{GameState, Move};
//! use morris_rust::search::best_move;
//!
//! // Create a new game
//! let mut state = GameState::new();
//!
//! // The human takes the center
//! state.apply(Move::Placement(4), Mark::Player);
//!
//! // Search for the computer's reply
//! let result = best_move(&mut state, 6).unwrap();
//! println!("Best move: {}", result.best.unwrap());
//! ```

pub mod board;
pub mod constants;
pub mod playout;
pub mod position;
pub mod search;
pub mod session;
