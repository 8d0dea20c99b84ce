pub mod chess_board;
pub mod game;
pub mod perft;
pub mod playout;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use chess_board::{ChessBoard, ChessField, Color, LegalityMode, Move, Piece, PieceType};
pub use game::{CommandError, Game, GameConfig, GameSnapshot, Subscription};
