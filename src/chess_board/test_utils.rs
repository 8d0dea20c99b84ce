use super::{ChessBoard, ChessField, Color, PieceType};

pub fn field(algebraic: &str) -> ChessField {
    ChessField::from_algebraic(algebraic).unwrap()
}

pub fn assert_fields(generated: Vec<ChessField>, mut expected: Vec<&str>) {
    let mut generated_converted: Vec<_> = generated.iter().map(|f| f.as_algebraic()).collect();
    generated_converted.sort();
    expected.sort();

    assert_eq!(generated_converted, expected);
}

/// Builds a board from eight rank strings, rank 8 first, using piece letters and
/// '.' for empty squares. Pawns off their starting rank count as moved; every other
/// piece is unmoved.
pub fn board_from_diagram(rows: [&str; 8]) -> ChessBoard {
    let mut board = ChessBoard::new();
    for (row, line) in rows.iter().enumerate() {
        assert_eq!(line.len(), 8, "rank {} must have 8 squares", 8 - row);
        for (col, c) in line.chars().enumerate() {
            let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
            let kind = match c.to_ascii_lowercase() {
                'p' => PieceType::Pawn,
                'n' => PieceType::Knight,
                'b' => PieceType::Bishop,
                'r' => PieceType::Rook,
                'q' => PieceType::Queen,
                'k' => PieceType::King,
                '.' => continue,
                other => panic!("Invalid piece character in diagram: {}", other),
            };
            let position = ChessField::new(row as u8, col as u8);
            board.add_piece(color, kind, position);
            if kind == PieceType::Pawn && position.row != color.pawn_row() {
                board.square_mut(position).piece.as_mut().unwrap().has_moved = true;
            }
        }
    }
    board.recompute_threats();
    board
}
