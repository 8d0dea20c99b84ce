use super::move_generation::CastleSide;
use super::{ChessBoard, ChessField, Color, Move, Piece, PieceType};
use serde::Serialize;

/// How thoroughly ordinary moves are checked for king safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalityMode {
    /// King moves and moves made while in check are played out on a scratch board.
    /// Any other move is accepted as is, so a piece may step off a line and expose
    /// its own king to a discovered attack.
    #[default]
    Reference,
    /// Every move is played out on a scratch board.
    Strict,
}

impl ChessBoard {
    /// Pseudo-legal moves of the piece on `from` that pass the king safety filter.
    pub fn legal_moves(&self, from: ChessField, last_move: Option<&Move>, mode: LegalityMode) -> Vec<ChessField> {
        let piece = match self.piece_at(from) {
            Some(piece) => *piece,
            None => return Vec::new(),
        };
        let in_check = self.is_in_check(piece.color);

        self.pseudo_legal_moves(from, last_move)
            .into_iter()
            .filter(|&to| self.is_legal(&piece, to, in_check, mode))
            .collect()
    }

    /// Every legal `(from, to)` pair for `color`.
    pub fn all_legal_moves(
        &self,
        color: Color,
        last_move: Option<&Move>,
        mode: LegalityMode,
    ) -> Vec<(ChessField, ChessField)> {
        self.pieces_of(color)
            .flat_map(|piece| {
                self.legal_moves(piece.position, last_move, mode)
                    .into_iter()
                    .map(move |to| (piece.position, to))
            })
            .collect()
    }

    pub fn has_any_legal_move(&self, color: Color, last_move: Option<&Move>, mode: LegalityMode) -> bool {
        self.pieces_of(color)
            .any(|piece| !self.legal_moves(piece.position, last_move, mode).is_empty())
    }

    /// Whether `color`'s king stands on a square the opponent attacks.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.find_king_position(color)
            .map(|king| self.is_square_attacked_by_color(king, color.opposite()))
            .unwrap_or(false)
    }

    fn is_legal(&self, piece: &Piece, to: ChessField, in_check: bool, mode: LegalityMode) -> bool {
        // Kings are never captured.
        if matches!(self.square(to).piece, Some(target) if target.kind == PieceType::King) {
            return false;
        }

        if piece.kind == PieceType::King {
            if let Some(side) = CastleSide::of_king_move(piece.position, to) {
                return !in_check && self.is_castling_path_safe(piece, side);
            }
        }

        let needs_simulation = match mode {
            LegalityMode::Strict => true,
            LegalityMode::Reference => piece.kind == PieceType::King || in_check,
        };
        !needs_simulation || self.leaves_king_safe(piece, to)
    }

    /// The squares the king crosses and lands on must not be attacked. The rook's own
    /// path does not matter.
    fn is_castling_path_safe(&self, king: &Piece, side: CastleSide) -> bool {
        if self.castling_candidate(king, side).is_none() {
            return false;
        }
        let step = if side == CastleSide::King { 1 } else { -1 };
        let opponent = king.color.opposite();
        [step, 2 * step].iter().all(|&d_col| {
            king.position
                .offset(0, d_col)
                .map(|field| !self.is_square_attacked_by_color(field, opponent))
                .unwrap_or(false)
        })
    }

    /// Plays the move on a scratch board, recomputing its threat map, and looks at
    /// the mover's king afterwards.
    fn leaves_king_safe(&self, piece: &Piece, to: ChessField) -> bool {
        let mut scratch = self.clone();
        if scratch.apply_move(piece.position, to).is_none() {
            return false;
        }
        !scratch.is_in_check(piece.color)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::*;

    #[test]
    fn test_opening_has_twenty_moves() {
        let board = ChessBoard::standard();
        for mode in [LegalityMode::Reference, LegalityMode::Strict] {
            assert_eq!(board.all_legal_moves(Color::White, None, mode).len(), 20);
            assert_eq!(board.all_legal_moves(Color::Black, None, mode).len(), 20);
        }
        assert!(!board.is_in_check(Color::White));
    }

    #[test]
    fn test_king_cannot_take_a_defended_piece() {
        let board = board_from_diagram([
            "....r..k",
            "........",
            "........",
            "........",
            "........",
            "........",
            "....p...",
            "....K...",
        ]);
        // The pawn is defended, which the threat counts alone do not show.
        assert_eq!(board.threat_count(field("e2"), Color::Black), 0);
        assert_eq!(board.square(field("e2")).defender_count, 1);

        assert_fields(board.legal_moves(field("e1"), None, LegalityMode::Reference), vec!["d2", "f2"]);
    }

    #[test]
    fn test_king_cannot_retreat_along_the_checking_line() {
        let board = board_from_diagram([
            "R.....k.",
            ".....ppp",
            "........",
            "........",
            "........",
            "........",
            "........",
            "......K.",
        ]);
        assert!(board.is_in_check(Color::Black));
        // h8 is shielded by the king in the current threat map.
        assert_eq!(board.threat_count(field("h8"), Color::White), 0);
        assert_fields(board.legal_moves(field("g8"), None, LegalityMode::Reference), vec![]);
        assert!(!board.has_any_legal_move(Color::Black, None, LegalityMode::Reference));
    }

    #[test]
    fn test_discovered_attack_is_only_caught_in_strict_mode() {
        let board = board_from_diagram([
            "....r..k",
            "........",
            "........",
            "........",
            "........",
            "........",
            "....B...",
            "....K...",
        ]);
        assert_fields(board.legal_moves(field("e2"), None, LegalityMode::Reference), vec![
            "d3", "c4", "b5", "a6", "f3", "g4", "h5", "d1", "f1",
        ]);
        assert_fields(board.legal_moves(field("e2"), None, LegalityMode::Strict), vec![]);
    }

    #[test]
    fn test_in_check_only_evasions() {
        let board = board_from_diagram([
            "....r..k",
            "........",
            "........",
            "........",
            "........",
            "........",
            "R.......",
            "....K...",
        ]);
        assert!(board.is_in_check(Color::White));
        for mode in [LegalityMode::Reference, LegalityMode::Strict] {
            assert_fields(board.legal_moves(field("a2"), None, mode), vec!["e2"]);
            assert_fields(board.legal_moves(field("e1"), None, mode), vec!["d1", "d2", "f1", "f2"]);
        }
    }

    #[test]
    fn test_castling_with_clear_path() {
        let board = board_from_diagram([
            "rnbqkbnr",
            "pppppppp",
            "........",
            "........",
            "........",
            "........",
            "PPPPPPPP",
            "RNBQK..R",
        ]);
        assert_fields(board.legal_moves(ChessField::new(7, 4), None, LegalityMode::Reference), vec!["f1", "g1"]);
    }

    #[test]
    fn test_castling_through_attacked_square() {
        let board = board_from_diagram([
            "....k...",
            ".....r..",
            "........",
            "........",
            "........",
            "........",
            "........",
            "R...K..R",
        ]);
        assert_fields(board.legal_moves(field("e1"), None, LegalityMode::Reference), vec!["d1", "d2", "e2", "c1"]);
    }

    #[test]
    fn test_castling_ignores_attacks_on_rook_path() {
        let board = board_from_diagram([
            "....k...",
            ".r......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "R...K..R",
        ]);
        assert!(board.is_square_attacked_by_color(field("b1"), Color::Black));
        assert_fields(board.legal_moves(field("e1"), None, LegalityMode::Reference), vec![
            "d1", "d2", "e2", "f1", "f2", "g1", "c1",
        ]);
    }

    #[test]
    fn test_no_castling_out_of_check() {
        let board = board_from_diagram([
            "....k...",
            "....r...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "R...K..R",
        ]);
        assert_fields(board.legal_moves(field("e1"), None, LegalityMode::Reference), vec!["d1", "d2", "f1", "f2"]);
    }

    #[test]
    fn test_enemy_king_is_never_a_destination() {
        let board = board_from_diagram([
            "....k...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "....R..K",
        ]);
        let moves = board.legal_moves(field("e1"), None, LegalityMode::Reference);
        assert!(board.pseudo_legal_moves(field("e1"), None).contains(&field("e8")));
        assert!(!moves.contains(&field("e8")));
        assert_fields(moves, vec!["e2", "e3", "e4", "e5", "e6", "e7", "a1", "b1", "c1", "d1", "f1", "g1"]);
    }

    #[test]
    fn test_en_passant_out_of_check() {
        // The double-stepped pawn gives check; taking it en passant resolves it.
        let mut board = board_from_diagram([
            "........",
            "........",
            "........",
            "....k...",
            "....p...",
            "........",
            "...P....",
            "....K...",
        ]);
        let last = board.apply_move(field("d2"), field("d4")).unwrap();
        assert!(board.is_in_check(Color::Black));
        assert_fields(board.legal_moves(field("e4"), Some(&last), LegalityMode::Reference), vec!["d3"]);
    }
}
