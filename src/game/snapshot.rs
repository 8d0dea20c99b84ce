use super::Game;
use crate::chess_board::{ChessBoard, ChessField, Color, Move, Piece, PieceId, PieceType, ZOBRIST};
use serde::Serialize;

/// What the pointer is doing right now. Owned by the game, copied out on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionState {
    pub hovered_square: Option<ChessField>,
    pub selected_square: Option<ChessField>,
    /// Legal destinations of the selected piece; empty without a selection.
    pub legal_moves: Vec<ChessField>,
    pub show_threats: bool,
}

impl InteractionState {
    pub fn new(show_threats: bool) -> Self {
        Self {
            hovered_square: None,
            selected_square: None,
            legal_moves: Vec::new(),
            show_threats,
        }
    }
}

/// How a hover-preview destination is covered, seen from the moving side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationState {
    /// Attacked by the opponent and covered by a friendly piece.
    Contested,
    /// Attacked by the opponent only.
    Threatened,
    /// Covered by a friendly piece only.
    Protected,
    Neutral,
}

impl DestinationState {
    fn classify(board: &ChessBoard, mover: &Piece, to: ChessField) -> Self {
        let enemy = mover.color.opposite();
        let Some(square) = board.get(to) else {
            return DestinationState::Neutral;
        };
        // An enemy occupant's own coverage lands in the defender count.
        let enemy_pressure = match square.piece {
            Some(p) if p.color == enemy => square.defender_count,
            _ => square.threat_count(enemy),
        };
        let mut support = square.threat_count(mover.color);
        if board.attack_set(mover).contains(&to) {
            support = support.saturating_sub(1);
        }

        match (enemy_pressure > 0, support > 0) {
            (true, true) => DestinationState::Contested,
            (true, false) => DestinationState::Threatened,
            (false, true) => DestinationState::Protected,
            (false, false) => DestinationState::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceView {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceType,
    pub has_moved: bool,
    pub symbol: char,
    /// The opponent attacks this piece.
    pub is_threatened: bool,
    /// A piece of the same color covers this piece.
    pub is_protected: bool,
    /// Attacks the hovered square, against the color holding it (the side to move
    /// when it is empty).
    pub is_threatener: bool,
    /// Covers the hovered square for that same color.
    pub is_protector: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareView {
    pub position: ChessField,
    pub piece: Option<PieceView>,
    pub white_threat_count: u8,
    pub black_threat_count: u8,
    pub defender_count: u8,
    pub contention_volume: u16,
    /// `(white - black) / volume`, or 0 on an uncontested square.
    pub contention_ratio: f32,
    pub is_selected: bool,
    pub is_legal_move: bool,
    pub is_hovered: bool,
    /// Set on the king square of the side to move while it is in check.
    pub is_check: bool,
    /// Reachable by the hovered piece.
    pub is_possible_move: bool,
    pub destination: Option<DestinationState>,
}

/// Everything a renderer needs for one frame. Owns its data, so later commands
/// never change a snapshot already handed out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub squares: [[SquareView; 8]; 8],
    pub current_player: Color,
    pub selected_piece: Option<Piece>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub move_history: Vec<Move>,
    pub captured_pieces: Vec<Piece>,
    pub interaction: InteractionState,
    pub position_hash: u64,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        let board = game.board();
        let interaction = game.interaction_state();
        let checked_king = if game.is_check() {
            board.find_king_position(game.current_player())
        } else {
            None
        };

        let preview: Vec<(ChessField, DestinationState)> = interaction
            .hovered_square
            .and_then(|hovered| board.piece_at(hovered))
            .filter(|piece| piece.color == game.current_player())
            .map(|piece| {
                game.legal_moves_for(piece.position)
                    .into_iter()
                    .map(|to| (to, DestinationState::classify(board, piece, to)))
                    .collect()
            })
            .unwrap_or_default();

        let hover_target = interaction.hovered_square.and_then(|hovered| {
            board
                .get(hovered)
                .map(|square| (hovered, square.piece.map_or(game.current_player(), |p| p.color)))
        });

        let squares = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                let position = ChessField::new(row as u8, col as u8);
                let square = board.square(position);
                let white = square.white_threat_count;
                let black = square.black_threat_count;
                let volume = white as u16 + black as u16;
                let ratio = if volume == 0 {
                    0.0
                } else {
                    (white as f32 - black as f32) / volume as f32
                };
                let destination = preview.iter().find(|(to, _)| *to == position).map(|(_, state)| *state);

                SquareView {
                    position,
                    piece: square.piece.map(|piece| {
                        let hover_side = hover_target
                            .filter(|(hovered, _)| board.attack_set(&piece).contains(hovered))
                            .map(|(_, side)| side);
                        PieceView {
                            id: piece.id,
                            color: piece.color,
                            kind: piece.kind,
                            has_moved: piece.has_moved,
                            symbol: piece.to_char(),
                            is_threatened: square.threat_count(piece.color.opposite()) > 0,
                            is_protected: square.defender_count > 0,
                            is_threatener: hover_side.is_some_and(|side| side != piece.color),
                            is_protector: hover_side == Some(piece.color),
                        }
                    }),
                    white_threat_count: white,
                    black_threat_count: black,
                    defender_count: square.defender_count,
                    contention_volume: volume,
                    contention_ratio: ratio,
                    is_selected: interaction.selected_square == Some(position),
                    is_legal_move: interaction.legal_moves.contains(&position),
                    is_hovered: interaction.hovered_square == Some(position),
                    is_check: checked_king == Some(position),
                    is_possible_move: destination.is_some(),
                    destination,
                }
            })
        });

        Self {
            squares,
            current_player: game.current_player(),
            selected_piece: game.selected_piece().copied(),
            is_check: game.is_check(),
            is_checkmate: game.is_checkmate(),
            is_stalemate: game.is_stalemate(),
            move_history: game.move_history().to_vec(),
            captured_pieces: game.captured_pieces().to_vec(),
            interaction,
            position_hash: ZOBRIST.calculate_hash(board, game.current_player(), game.last_move()),
        }
    }

    pub fn get(&self, field: ChessField) -> Option<&SquareView> {
        self.squares.get(field.row as usize)?.get(field.col as usize)
    }

    pub(crate) fn square(&self, field: ChessField) -> &SquareView {
        &self.squares[field.row as usize][field.col as usize]
    }
}
