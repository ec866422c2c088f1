//! Interactive text game between a human and the engine.
//!
//! The session reads moves line by line and writes the board, prompts and
//! results to any `BufRead`/`Write` pair, so the same loop serves a
//! terminal and the tests.
//!
//! ## Input
//!
//! - `4` - place a piece on point 4 (placing phase)
//! - `0-1` (or `0 1`, `0,1`) - slide a piece from 0 to 1 (moving phase)
//! - `board` - show the board again
//! - `help` - show the point numbers and move syntax
//! - `quit` / `exit` - leave the game
//!
//! Malformed or illegal moves are reported and the prompt repeats.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::board::Mark;
use crate::constants::MAX_DEPTH;
use crate::position::{GameState, Move, MoveError, Outcome, Phase};
use crate::search::Searcher;

const HELP: &str = "\
Points are numbered:
  0 1 2
  3 4 5
  6 7 8
Placing: enter a point, e.g. 4
Moving:  enter from-to, e.g. 0-1
Commands: board, help, quit";

/// Options for a game.
#[derive(Copy, Clone, Debug)]
pub struct SessionConfig {
    /// Search horizon for the computer.
    pub max_depth: u32,
    /// Let the computer make the first move.
    pub computer_first: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            computer_first: false,
        }
    }
}

enum Turn {
    Played,
    /// The side to move had nothing to play.
    Stuck,
    Quit,
}

/// A game in progress.
pub struct Session<R, W> {
    input: R,
    output: W,
    state: GameState,
    config: SessionConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: SessionConfig) -> Self {
        Self::with_state(input, output, config, GameState::new())
    }

    /// Continue from an existing position.
    pub fn with_state(input: R, output: W, config: SessionConfig, state: GameState) -> Self {
        Self {
            input,
            output,
            state,
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Play until the game ends. Returns `None` if the human quits or the
    /// input runs out.
    pub fn run(&mut self) -> Result<Option<Outcome>> {
        if let Some(outcome) = self.state.outcome() {
            self.announce(outcome)?;
            return Ok(Some(outcome));
        }

        let mut human_to_move = !self.config.computer_first;
        loop {
            let turn = if human_to_move {
                self.human_turn()?
            } else {
                self.computer_turn()?
            };
            match turn {
                Turn::Played => {}
                // A side that cannot move ends the game as a draw.
                Turn::Stuck => {
                    self.announce(Outcome::Draw)?;
                    return Ok(Some(Outcome::Draw));
                }
                Turn::Quit => return Ok(None),
            }

            if let Some(outcome) = self.state.outcome() {
                self.announce(outcome)?;
                return Ok(Some(outcome));
            }
            human_to_move = !human_to_move;
        }
    }

    fn human_turn(&mut self) -> Result<Turn> {
        if self.state.legal_moves(Mark::Player).is_empty() {
            return Ok(Turn::Stuck);
        }
        self.show_board()?;
        loop {
            let prompt = match self.state.phase() {
                Phase::Placing => "Enter position to place (0-8): ",
                Phase::Moving => "Move from-to (e.g. 0-1): ",
            };
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            let n = self
                .input
                .read_line(&mut line)
                .context("failed to read move")?;
            if n == 0 {
                debug!("input closed");
                return Ok(Turn::Quit);
            }

            match line.trim().to_lowercase().as_str() {
                "" => continue,
                "quit" | "exit" => return Ok(Turn::Quit),
                "help" => {
                    writeln!(self.output, "{HELP}")?;
                    continue;
                }
                "board" => {
                    self.show_board()?;
                    continue;
                }
                _ => {}
            }

            let result = line
                .trim()
                .parse::<Move>()
                .and_then(|mv| self.state.try_apply(mv, Mark::Player).map(|_| mv));
            match result {
                Ok(mv) => {
                    info!(%mv, "player move");
                    return Ok(Turn::Played);
                }
                Err(MoveError::IllegalMove { mv, .. }) => {
                    debug!(%mv, "rejected illegal move");
                    writeln!(self.output, "Invalid move. Try again.")?;
                }
                Err(err) => {
                    debug!(%err, "rejected input");
                    writeln!(self.output, "Please enter a valid number.")?;
                }
            }
        }
    }

    fn computer_turn(&mut self) -> Result<Turn> {
        let mut searcher = Searcher::new(self.config.max_depth);
        let result = searcher.search(&mut self.state)?;
        match result.best {
            Some(mv) => {
                self.state.apply(mv, Mark::Computer);
                info!(%mv, score = result.score, nodes = result.nodes, "computer move");
                writeln!(self.output, "AI plays {mv}")?;
                Ok(Turn::Played)
            }
            None => {
                debug!("computer has no move");
                Ok(Turn::Stuck)
            }
        }
    }

    fn show_board(&mut self) -> Result<()> {
        writeln!(self.output, "{}", self.state)?;
        Ok(())
    }

    fn announce(&mut self, outcome: Outcome) -> Result<()> {
        self.show_board()?;
        writeln!(self.output, "{outcome}")?;
        self.output.flush()?;
        Ok(())
    }
}
