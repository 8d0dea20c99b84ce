pub mod zobrist_hash;
pub use zobrist_hash::ZobristHash;
pub use zobrist_hash::ZOBRIST;
pub mod model;
pub use model::{parse_coordinate_move, ChessField, Color, Move, Piece, PieceId, PieceType, Square};

mod chess_board;
mod legality;
mod move_generation;
mod threats;
#[cfg(test)]
pub mod test_utils;
pub use chess_board::ChessBoard;
pub use legality::LegalityMode;
pub use move_generation::CastleSide;
