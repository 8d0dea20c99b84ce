use crate::chess_board::{ChessField, Color, Move};
use crate::game::Game;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    MoveLimit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "{} mates", winner),
            Outcome::Stalemate => write!(f, "stalemate"),
            Outcome::MoveLimit => write!(f, "move limit"),
        }
    }
}

/// Plays uniformly random legal moves through the public [`Game`] commands.
pub struct RandomPlayer {
    rng: Pcg64,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    pub fn choose_move(&mut self, game: &Game) -> Option<(ChessField, ChessField)> {
        game.all_legal_moves().choose(&mut self.rng).copied()
    }

    pub fn play_move(&mut self, game: &mut Game) -> Option<Move> {
        let (from, to) = self.choose_move(game)?;
        game.select_piece(from).ok()?;
        game.move_piece(to).ok()
    }

    /// Plays until the game ends or `max_plies` moves were made.
    pub fn play_out(&mut self, game: &mut Game, max_plies: usize) -> Outcome {
        for _ in 0..max_plies {
            if self.play_move(game).is_none() {
                break;
            }
        }
        if game.is_checkmate() {
            Outcome::Checkmate {
                winner: game.current_player().opposite(),
            }
        } else if game.is_stalemate() {
            Outcome::Stalemate
        } else {
            Outcome::MoveLimit
        }
    }
}
