use super::{ChessBoard, ChessField, Color, Move, Piece, PieceType};

pub(crate) const KNIGHT_MOVES: [(isize, isize); 8] =
    [(-2, -1), (-1, -2), (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1)];
pub(crate) const KING_MOVES: [(isize, isize); 8] =
    [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
pub(crate) const QUEEN_DIRECTIONS: [(isize, isize); 8] =
    [(-1, -1), (-1, 1), (1, -1), (1, 1), (0, -1), (0, 1), (-1, 0), (1, 0)];

/// Which wing a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub fn rook_col(&self) -> u8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    fn direction(&self) -> isize {
        match self {
            CastleSide::King => 1,
            CastleSide::Queen => -1,
        }
    }

    /// Classifies a king move as castling by its two-column jump.
    pub fn of_king_move(from: ChessField, to: ChessField) -> Option<Self> {
        if from.row != to.row || from.col.abs_diff(to.col) != 2 {
            return None;
        }
        if to.col > from.col {
            Some(CastleSide::King)
        } else {
            Some(CastleSide::Queen)
        }
    }
}

impl ChessBoard {
    /// Destinations allowed by the movement pattern of the piece on `from` and by
    /// board occupancy. King exposure is not considered. `last_move` is the most
    /// recent history entry and only matters for en passant.
    pub fn pseudo_legal_moves(&self, from: ChessField, last_move: Option<&Move>) -> Vec<ChessField> {
        match self.piece_at(from) {
            Some(piece) => match piece.kind {
                PieceType::Pawn => self.generate_pawn_moves(piece, last_move),
                PieceType::Knight => self.generate_moves_from_offsets(piece, &KNIGHT_MOVES),
                PieceType::Bishop => self.generate_sliding_moves(piece, &BISHOP_DIRECTIONS),
                PieceType::Rook => self.generate_sliding_moves(piece, &ROOK_DIRECTIONS),
                PieceType::Queen => self.generate_sliding_moves(piece, &QUEEN_DIRECTIONS),
                PieceType::King => self.generate_king_moves(piece),
            },
            None => Vec::new(),
        }
    }

    fn generate_pawn_moves(&self, pawn: &Piece, last_move: Option<&Move>) -> Vec<ChessField> {
        let mut moves = Vec::new();
        let forward = pawn.color.forward();
        let from = pawn.position;

        // Regular forward move
        if let Some(one_step) = from.offset(forward, 0) {
            if self.is_empty(one_step) {
                moves.push(one_step);

                // Double move while the pawn has never moved
                if !pawn.has_moved {
                    if let Some(two_steps) = from.offset(2 * forward, 0) {
                        if self.is_empty(two_steps) {
                            moves.push(two_steps);
                        }
                    }
                }
            }
        }

        // Capture diagonally
        for dx in [-1, 1] {
            if let Some(target) = from.offset(forward, dx) {
                if self.is_enemy(target, pawn.color) {
                    moves.push(target);
                }
            }
        }

        if let Some(target) = self.en_passant_target(pawn, last_move) {
            moves.push(target);
        }

        moves
    }

    /// The square behind an enemy pawn that has just double-stepped next to `pawn`.
    pub fn en_passant_target(&self, pawn: &Piece, last_move: Option<&Move>) -> Option<ChessField> {
        let last = last_move?;
        if !last.is_double_pawn_step()
            || last.piece.color == pawn.color
            || last.to.row != pawn.position.row
            || last.to.col.abs_diff(pawn.position.col) != 1
        {
            return None;
        }
        let target = last.to.offset(pawn.color.forward(), 0)?;
        if self.is_empty(target) {
            Some(target)
        } else {
            None
        }
    }

    /// Whether moving `piece` to `to` lands a pawn on the opponent's back rank.
    pub fn is_promotion(piece: &Piece, to: ChessField) -> bool {
        piece.kind == PieceType::Pawn && to.row == piece.color.promotion_row()
    }

    /// Generate sliding piece moves (bishop, rook, queen).
    fn generate_sliding_moves(&self, piece: &Piece, directions: &[(isize, isize)]) -> Vec<ChessField> {
        let mut moves = Vec::new();

        for &(dx, dy) in directions {
            let mut current = piece.position;
            while let Some(next) = current.offset(dx, dy) {
                match self.square(next).piece {
                    None => moves.push(next),
                    Some(p) => {
                        if p.color != piece.color {
                            moves.push(next);
                        }
                        break; // Block sliding
                    }
                }
                current = next;
            }
        }

        moves
    }

    /// Generate king moves, castling candidates included.
    fn generate_king_moves(&self, king: &Piece) -> Vec<ChessField> {
        let mut moves = self.generate_moves_from_offsets(king, &KING_MOVES);
        for side in [CastleSide::King, CastleSide::Queen] {
            if let Some(target) = self.castling_candidate(king, side) {
                moves.push(target);
            }
        }
        moves
    }

    /// The king's castling destination when the structural conditions hold: king and
    /// rook unmoved and every square strictly between them empty. Attacks are checked
    /// by the legality filter.
    pub(crate) fn castling_candidate(&self, king: &Piece, side: CastleSide) -> Option<ChessField> {
        if king.kind != PieceType::King
            || king.has_moved
            || king.position != ChessField::new(king.color.home_row(), 4)
        {
            return None;
        }
        let row = king.position.row;
        let rook_field = ChessField::new(row, side.rook_col());
        let rook = self.piece_at(rook_field)?;
        if rook.kind != PieceType::Rook || rook.color != king.color || rook.has_moved {
            return None;
        }

        let (low, high) = if king.position.col < rook_field.col {
            (king.position.col + 1, rook_field.col)
        } else {
            (rook_field.col + 1, king.position.col)
        };
        if (low..high).any(|col| !self.is_empty(ChessField::new(row, col))) {
            return None;
        }

        king.position.offset(0, 2 * side.direction())
    }

    fn generate_moves_from_offsets(&self, piece: &Piece, offsets: &[(isize, isize)]) -> Vec<ChessField> {
        offsets
            .iter()
            .filter_map(|&(dx, dy)| piece.position.offset(dx, dy))
            .filter(|&target| !self.is_friend(target, piece.color))
            .collect()
    }

    fn is_enemy(&self, field: ChessField, color: Color) -> bool {
        matches!(self.square(field).piece, Some(p) if p.color != color)
    }

    fn is_friend(&self, field: ChessField, color: Color) -> bool {
        matches!(self.square(field).piece, Some(p) if p.color == color)
    }
}
