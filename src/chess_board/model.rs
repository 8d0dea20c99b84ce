use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step. White advances toward row 0.
    pub fn forward(&self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn home_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn pawn_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// The opponent's back rank, where this color's pawns promote.
    pub fn promotion_row(&self) -> u8 {
        self.opposite().home_row()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn index(&self) -> usize {
        match self {
            PieceType::Pawn => 0,
            PieceType::Knight => 1,
            PieceType::Bishop => 2,
            PieceType::Rook => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "P"),
            PieceType::Knight => write!(f, "N"),
            PieceType::Bishop => write!(f, "B"),
            PieceType::Rook => write!(f, "R"),
            PieceType::Queen => write!(f, "Q"),
            PieceType::King => write!(f, "K"),
        }
    }
}

/// Identity of a piece within one game. Survives moves and promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PieceId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceType,
    pub position: ChessField,
    pub has_moved: bool,
}

impl Piece {
    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        if self.color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Square {
    pub position: ChessField,
    pub piece: Option<Piece>,
    pub white_threat_count: u8,
    pub black_threat_count: u8,
    /// Same-color attackers of the occupant. Never part of the threat counts.
    pub defender_count: u8,
}

impl Square {
    pub fn empty(position: ChessField) -> Self {
        Self {
            position,
            piece: None,
            white_threat_count: 0,
            black_threat_count: 0,
            defender_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    pub fn threat_count(&self, by: Color) -> u8 {
        match by {
            Color::White => self.white_threat_count,
            Color::Black => self.black_threat_count,
        }
    }

    pub(crate) fn clear_threats(&mut self) {
        self.white_threat_count = 0;
        self.black_threat_count = 0;
        self.defender_count = 0;
    }
}

/// A board coordinate. Row 0 is black's home rank (rank 8), column 0 is file "a".
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Serialize)]
pub struct ChessField {
    pub row: u8,
    pub col: u8,
}

impl ChessField {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn try_new(row: isize, col: isize) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.row < 8 && self.col < 8
    }

    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Self> {
        Self::try_new(self.row as isize + d_row, self.col as isize + d_col)
    }

    pub fn from_algebraic(algebraic: &str) -> Result<Self, String> {
        let mut chars = algebraic.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => {
                let col = file as u8 - b'a';
                let row = b'8' - rank as u8;
                Ok(Self { row, col })
            }
            _ => Err(format!("Invalid square: {}", algebraic)),
        }
    }

    pub fn as_algebraic(&self) -> String {
        to_algebraic_square(self.row, self.col)
    }
}

impl fmt::Display for ChessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

/// Record of a completed move. Pieces are snapshots taken before the move.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub piece: Piece,
    pub from: ChessField,
    pub to: ChessField,
    pub captured_piece: Option<Piece>,
    pub is_castle: bool,
    pub is_en_passant: bool,
    pub is_promotion: bool,
    pub promoted_to: Option<PieceType>,
    pub is_check: bool,
    pub is_checkmate: bool,
}

impl Move {
    pub fn new(piece: Piece, to: ChessField) -> Self {
        Self {
            piece,
            from: piece.position,
            to,
            captured_piece: None,
            is_castle: false,
            is_en_passant: false,
            is_promotion: false,
            promoted_to: None,
            is_check: false,
            is_checkmate: false,
        }
    }

    pub fn is_double_pawn_step(&self) -> bool {
        self.piece.kind == PieceType::Pawn && self.from.row.abs_diff(self.to.row) == 2
    }

    pub fn as_algebraic(&self) -> String {
        let base_move = format!("{}{}", self.from.as_algebraic(), self.to.as_algebraic());
        if let Some(promo) = self.promoted_to {
            base_move + &promo.to_string().to_lowercase()
        } else {
            base_move
        }
    }
}

/// Parses a coordinate move like "e2e4". A trailing promotion letter is accepted and
/// ignored since pawns always promote to a queen.
pub fn parse_coordinate_move(algebraic: &str) -> Result<(ChessField, ChessField), String> {
    if !(4..=5).contains(&algebraic.len()) || !algebraic.is_ascii() {
        return Err(format!("Invalid move: {}", algebraic));
    }
    let from = ChessField::from_algebraic(&algebraic[0..2])?;
    let to = ChessField::from_algebraic(&algebraic[2..4])?;
    Ok((from, to))
}

fn to_algebraic_square(row: u8, col: u8) -> String {
    if row >= 8 || col >= 8 {
        return format!("({},{})", row, col);
    }
    let file = (b'a' + col) as char;
    let rank = 8 - row;
    format!("{}{}", file, rank)
}
