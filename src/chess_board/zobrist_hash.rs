use super::move_generation::CastleSide;
use super::{ChessBoard, ChessField, Color, Move, PieceType};
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::sync::Arc;

const BOARD_SIZE: usize = 8;

/// Position keys. A front-end compares them to skip redundant re-renders.
pub struct ZobristHash {
    piece_keys: [[[u64; BOARD_SIZE * BOARD_SIZE]; 6]; 2],
    side_to_move_key: u64,
    castling_keys: [u64; 4],
    en_passant_keys: [u64; BOARD_SIZE],
}

impl ZobristHash {
    fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);

        // Random numbers for pieces on squares
        let mut piece_keys = [[[0; BOARD_SIZE * BOARD_SIZE]; 6]; 2];
        for color_keys in &mut piece_keys {
            for piece_type_keys in color_keys {
                for square_key in piece_type_keys {
                    *square_key = rng.gen();
                }
            }
        }

        let side_to_move_key = rng.gen();

        let mut castling_keys = [0; 4];
        for key in &mut castling_keys {
            *key = rng.gen();
        }

        let mut en_passant_keys = [0; BOARD_SIZE];
        for file in &mut en_passant_keys {
            *file = rng.gen();
        }

        ZobristHash {
            piece_keys,
            side_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    /// Hashes placement, side to move, castling availability and a pending en passant
    /// file. Piece identities do not take part.
    pub fn calculate_hash(&self, board: &ChessBoard, side_to_move: Color, last_move: Option<&Move>) -> u64 {
        let mut hash = 0;

        for piece in board.pieces() {
            let color_index = match piece.color {
                Color::White => 0,
                Color::Black => 1,
            };
            let square_index = piece.position.row as usize * BOARD_SIZE + piece.position.col as usize;
            hash ^= self.piece_keys[color_index][piece.kind.index()][square_index];
        }

        if side_to_move == Color::Black {
            hash ^= self.side_to_move_key;
        }

        for (i, (color, side)) in [
            (Color::White, CastleSide::King),
            (Color::White, CastleSide::Queen),
            (Color::Black, CastleSide::King),
            (Color::Black, CastleSide::Queen),
        ]
        .iter()
        .enumerate()
        {
            if Self::castling_available(board, *color, *side) {
                hash ^= self.castling_keys[i];
            }
        }

        if let Some(last) = last_move.filter(|mv| mv.is_double_pawn_step()) {
            hash ^= self.en_passant_keys[last.to.col as usize];
        }

        hash
    }

    fn castling_available(board: &ChessBoard, color: Color, side: CastleSide) -> bool {
        let king_unmoved = board
            .find_king_position(color)
            .and_then(|field| board.piece_at(field))
            .map(|king| !king.has_moved)
            .unwrap_or(false);
        let rook_unmoved = board
            .piece_at(ChessField::new(color.home_row(), side.rook_col()))
            .map(|rook| rook.kind == PieceType::Rook && rook.color == color && !rook.has_moved)
            .unwrap_or(false);
        king_unmoved && rook_unmoved
    }
}

lazy_static! {
    pub static ref ZOBRIST: Arc<ZobristHash> = Arc::new(ZobristHash::new(42));
}
