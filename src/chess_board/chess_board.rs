use super::{ChessField, Color, Move, Piece, PieceId, PieceType, Square};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    pub squares: [[Square; 8]; 8],
    next_id: u8,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBoard {
    /// Creates an empty chess board
    pub fn new() -> Self {
        let mut squares = [[Square::empty(ChessField::new(0, 0)); 8]; 8];
        for (row, rank) in squares.iter_mut().enumerate() {
            for (col, square) in rank.iter_mut().enumerate() {
                square.position = ChessField::new(row as u8, col as u8);
            }
        }
        Self { squares, next_id: 0 }
    }

    /// The standard opening position with threats already computed.
    pub fn standard() -> Self {
        let mut board = Self::new();
        for color in [Color::White, Color::Black] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.add_piece(color, *kind, ChessField::new(color.home_row(), col as u8));
            }
            for col in 0..8 {
                board.add_piece(color, PieceType::Pawn, ChessField::new(color.pawn_row(), col));
            }
        }
        board.recompute_threats();
        board
    }

    /// Puts a fresh, unmoved piece on `field`, replacing any occupant. Threats are
    /// not recomputed; callers setting up a position do that once at the end.
    pub fn add_piece(&mut self, color: Color, kind: PieceType, field: ChessField) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.square_mut(field).piece = Some(Piece {
            id,
            color,
            kind,
            position: field,
            has_moved: false,
        });
        id
    }

    /// Bounds-checked lookup.
    pub fn get(&self, field: ChessField) -> Option<&Square> {
        self.squares.get(field.row as usize)?.get(field.col as usize)
    }

    /// Unchecked lookup for fields already known to be on the board.
    pub(crate) fn square(&self, field: ChessField) -> &Square {
        &self.squares[field.row as usize][field.col as usize]
    }

    pub(crate) fn square_mut(&mut self, field: ChessField) -> &mut Square {
        &mut self.squares[field.row as usize][field.col as usize]
    }

    pub fn piece_at(&self, field: ChessField) -> Option<&Piece> {
        self.get(field).and_then(|square| square.piece.as_ref())
    }

    pub fn is_empty(&self, field: ChessField) -> bool {
        self.get(field).is_some_and(|square| square.is_empty())
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten().filter_map(|square| square.piece.as_ref())
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.color == color)
    }

    pub fn find_king_position(&self, color: Color) -> Option<ChessField> {
        self.pieces_of(color)
            .find(|piece| piece.kind == PieceType::King)
            .map(|king| king.position)
    }

    pub fn threat_count(&self, field: ChessField, by: Color) -> u8 {
        self.get(field).map_or(0, |square| square.threat_count(by))
    }

    pub fn is_square_attacked_by_color(&self, field: ChessField, by: Color) -> bool {
        self.threat_count(field, by) > 0
    }

    /// Moves the piece on `from` to `to` and carries out every side effect: capture,
    /// the en passant removal, the castling rook hop and promotion to a queen. The
    /// threat map is recomputed before returning. Legality is the caller's concern.
    pub(crate) fn apply_move(&mut self, from: ChessField, to: ChessField) -> Option<Move> {
        let mut piece = self.square_mut(from).piece.take()?;
        let mut mv = Move::new(piece, to);
        mv.captured_piece = self.square_mut(to).piece.take();

        if piece.kind == PieceType::King && from.col.abs_diff(to.col) == 2 {
            mv.is_castle = true;
            let (rook_col, rook_to_col) = if to.col > from.col { (7, to.col - 1) } else { (0, to.col + 1) };
            if let Some(mut rook) = self.square_mut(ChessField::new(from.row, rook_col)).piece.take() {
                let rook_to = ChessField::new(from.row, rook_to_col);
                rook.position = rook_to;
                rook.has_moved = true;
                self.square_mut(rook_to).piece = Some(rook);
            }
        }

        if piece.kind == PieceType::Pawn && from.col != to.col && mv.captured_piece.is_none() {
            // Diagonal step onto an empty square: the passed pawn sits beside `from`.
            let passed = ChessField::new(from.row, to.col);
            if let Some(pawn) = self.square(passed).piece.filter(|p| p.kind == PieceType::Pawn && p.color != piece.color) {
                mv.is_en_passant = true;
                mv.captured_piece = Some(pawn);
                self.square_mut(passed).piece = None;
            }
        }

        if Self::is_promotion(&piece, to) {
            mv.is_promotion = true;
            mv.promoted_to = Some(PieceType::Queen);
            piece.kind = PieceType::Queen;
        }

        piece.position = to;
        piece.has_moved = true;
        self.square_mut(to).piece = Some(piece);

        self.recompute_threats();
        Some(mv)
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for row in 0..8 {
            let rank = 8 - row;
            board_representation.push_str(&format!("{} │", rank));
            for col in 0..8 {
                let c = match &self.squares[row][col].piece {
                    Some(piece) => piece.to_char(),
                    None => ' ',
                };
                board_representation.push_str(&format!(" {} │", c));
            }
            board_representation.push_str(&format!(" {}\n", rank));

            if row < 7 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}
