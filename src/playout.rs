//! Simulated games between the engine and a random mover.
//!
//! The random side picks uniformly among its legal moves; the engine plays
//! the computer side with a normal search. Games that run past
//! `MAX_GAME_LEN` plies are scored as draws.

use tracing::debug;

use crate::board::Mark;
use crate::constants::MAX_GAME_LEN;
use crate::position::{GameState, MoveError, Outcome};
use crate::search::best_move;

/// Win/draw/loss counts over a series of games, from the engine's side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub engine_wins: u32,
    pub random_wins: u32,
    pub draws: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::ComputerWins => self.engine_wins += 1,
            Outcome::PlayerWins => self.random_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.engine_wins + self.random_wins + self.draws
    }
}

/// Play one game from the empty board. The random mover plays as the human.
pub fn play_against_random(
    rng: &mut fastrand::Rng,
    max_depth: u32,
    engine_first: bool,
) -> Result<Outcome, MoveError> {
    let mut state = GameState::new();
    let mut mark = if engine_first {
        Mark::Computer
    } else {
        Mark::Player
    };

    for ply in 0..MAX_GAME_LEN {
        if let Some(outcome) = state.outcome() {
            debug!(ply, ?outcome, "playout finished");
            return Ok(outcome);
        }

        let mv = match mark {
            Mark::Player => {
                let moves = state.legal_moves(mark);
                if moves.is_empty() {
                    return Ok(Outcome::Draw);
                }
                moves[rng.usize(..moves.len())]
            }
            Mark::Computer => match best_move(&mut state, max_depth)?.best {
                Some(mv) => mv,
                None => return Ok(Outcome::Draw),
            },
        };
        state.apply(mv, mark);
        mark = mark.opponent();
    }

    Ok(state.outcome().unwrap_or(Outcome::Draw))
}

/// Play `games` games, alternating who opens.
pub fn run_series(seed: u64, games: u32, max_depth: u32) -> Result<Tally, MoveError> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut tally = Tally::default();
    for game in 0..games {
        let outcome = play_against_random(&mut rng, max_depth, game % 2 == 1)?;
        tally.record(outcome);
    }
    Ok(tally)
}
