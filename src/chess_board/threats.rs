use super::move_generation::{BISHOP_DIRECTIONS, KING_MOVES, KNIGHT_MOVES, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};
use super::{ChessBoard, ChessField, Color, Piece, PieceType};

impl ChessBoard {
    /// Rebuilds the threat map from scratch.
    ///
    /// Every attacked square adds one to the attacker's color counter, except when it
    /// holds a piece of the attacker's own color: such hits only raise the square's
    /// `defender_count` and leave both threat counters untouched.
    pub fn recompute_threats(&mut self) {
        for square in self.squares.iter_mut().flatten() {
            square.clear_threats();
        }

        let attackers: Vec<Piece> = self.pieces().copied().collect();
        for attacker in &attackers {
            for target in self.attack_set(attacker) {
                let square = self.square_mut(target);
                match square.piece {
                    Some(occupant) if occupant.color == attacker.color => {
                        square.defender_count += 1;
                    }
                    _ => match attacker.color {
                        Color::White => square.white_threat_count += 1,
                        Color::Black => square.black_threat_count += 1,
                    },
                }
            }
        }
    }

    /// Squares the piece attacks, whose turn it is notwithstanding. Unlike move
    /// generation, pawns only attack diagonally and the first occupied square on a
    /// line is included whatever its color.
    pub fn attack_set(&self, piece: &Piece) -> Vec<ChessField> {
        match piece.kind {
            PieceType::Pawn => [-1, 1]
                .iter()
                .filter_map(|&dx| piece.position.offset(piece.color.forward(), dx))
                .collect(),
            PieceType::Knight => Self::attacks_from_offsets(piece.position, &KNIGHT_MOVES),
            PieceType::King => Self::attacks_from_offsets(piece.position, &KING_MOVES),
            PieceType::Bishop => self.sliding_attacks(piece.position, &BISHOP_DIRECTIONS),
            PieceType::Rook => self.sliding_attacks(piece.position, &ROOK_DIRECTIONS),
            PieceType::Queen => self.sliding_attacks(piece.position, &QUEEN_DIRECTIONS),
        }
    }

    fn attacks_from_offsets(from: ChessField, offsets: &[(isize, isize)]) -> Vec<ChessField> {
        offsets.iter().filter_map(|&(dx, dy)| from.offset(dx, dy)).collect()
    }

    fn sliding_attacks(&self, from: ChessField, directions: &[(isize, isize)]) -> Vec<ChessField> {
        let mut attacks = Vec::new();
        for &(dx, dy) in directions {
            let mut current = from;
            while let Some(next) = current.offset(dx, dy) {
                attacks.push(next);
                if !self.is_empty(next) {
                    break;
                }
                current = next;
            }
        }
        attacks
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::*;

    #[test]
    fn test_opening_threat_map() {
        let board = ChessBoard::standard();
        // Third rank: pawns and knights of white cover it.
        assert_eq!(board.threat_count(field("a3"), Color::White), 2); // b2 pawn, b1 knight
        assert_eq!(board.threat_count(field("c3"), Color::White), 3); // b2, d2, b1
        assert_eq!(board.threat_count(field("e3"), Color::White), 2); // d2, f2
        assert_eq!(board.threat_count(field("f3"), Color::White), 3); // e2, g2, g1
        assert_eq!(board.threat_count(field("e4"), Color::White), 0);
        assert_eq!(board.threat_count(field("f6"), Color::Black), 3);
        assert_eq!(board.threat_count(field("e3"), Color::Black), 0);

        // Own pieces are defended, never threatened.
        for piece in board.pieces() {
            assert_eq!(board.threat_count(piece.position, piece.color), 0);
            assert_eq!(board.threat_count(piece.position, piece.color.opposite()), 0);
        }
        assert_eq!(board.square(field("d2")).defender_count, 4); // c1, d1, e1, b1
        assert_eq!(board.square(field("a1")).defender_count, 0);
    }

    #[test]
    fn test_pawns_never_attack_forward() {
        let board = board_from_diagram([
            "....k...",
            "........",
            "........",
            "........",
            "....P...",
            "........",
            "........",
            "K.......",
        ]);
        let pawn = board.piece_at(field("e4")).unwrap();
        assert_fields(board.attack_set(pawn), vec!["d5", "f5"]);
        assert_eq!(board.threat_count(field("e5"), Color::White), 0);
    }

    #[test]
    fn test_sliding_attacks_include_first_blocker() {
        let board = board_from_diagram([
            "....k...",
            "........",
            "........",
            "........",
            "........",
            "R..N..r.",
            "........",
            "K.......",
        ]);
        let rook = board.piece_at(field("a3")).unwrap();
        assert_fields(board.attack_set(rook), vec!["b3", "c3", "d3", "a4", "a5", "a6", "a7", "a8", "a2", "a1"]);

        // d3 is white: defended by the rook, not threatened.
        assert_eq!(board.threat_count(field("d3"), Color::White), 0);
        assert_eq!(board.square(field("d3")).defender_count, 1);
        // The black rook on g3 reaches d3 through e3 and f3.
        assert_eq!(board.threat_count(field("d3"), Color::Black), 1);
        assert_eq!(board.threat_count(field("e3"), Color::Black), 1);
        // Squares beyond the knight are shielded from the white rook.
        assert_eq!(board.threat_count(field("e3"), Color::White), 0);
    }

    #[test]
    fn test_counts_accumulate() {
        let board = board_from_diagram([
            "....k...",
            "........",
            "........",
            "...q....",
            "........",
            "..N.N...",
            "........",
            "...RK...",
        ]);
        // d5 queen attacked by c3 knight, e3 knight and d1 rook.
        assert_eq!(board.threat_count(field("d5"), Color::White), 3);
        assert_eq!(board.square(field("d5")).defender_count, 0);
    }
}
