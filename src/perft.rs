use crate::chess_board::{ChessBoard, Color, LegalityMode, Move};

pub fn perft(board: &ChessBoard, side_to_move: Color, last_move: Option<&Move>, depth: u8, mode: LegalityMode) -> u64 {
    let mut node_count = 0u64;

    if depth == 0 {
        return 1u64;
    }

    for (from, to) in board.all_legal_moves(side_to_move, last_move, mode) {
        let mut new_board = board.clone();
        if let Some(mv) = new_board.apply_move(from, to) {
            node_count += perft(&new_board, side_to_move.opposite(), Some(&mv), depth - 1, mode);
        }
    }
    node_count
}

/// Node counts per root move, sorted by move text.
pub fn divide(
    board: &ChessBoard,
    side_to_move: Color,
    last_move: Option<&Move>,
    depth: u8,
    mode: LegalityMode,
) -> Vec<(String, u64)> {
    let mut result_moves = Vec::new();
    if depth == 0 {
        return result_moves;
    }

    for (from, to) in board.all_legal_moves(side_to_move, last_move, mode) {
        let mut new_board = board.clone();
        if let Some(mv) = new_board.apply_move(from, to) {
            let nodes = perft(&new_board, side_to_move.opposite(), Some(&mv), depth - 1, mode);
            result_moves.push((mv.as_algebraic(), nodes));
        }
    }
    result_moves.sort();
    result_moves
}
