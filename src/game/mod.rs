//! The game state manager: turn order, selection, move execution, status and
//! change notification on top of [`ChessBoard`].

mod config;
mod error;
mod snapshot;
mod subscribers;

pub use config::GameConfig;
pub use error::CommandError;
pub use snapshot::{DestinationState, GameSnapshot, InteractionState, PieceView, SquareView};
pub use subscribers::{Listener, Subscription};

use crate::chess_board::{ChessBoard, ChessField, Color, Move, Piece};
use subscribers::Subscribers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: ChessBoard,
    pub current_player: Color,
    pub selected_piece: Option<Piece>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub move_history: Vec<Move>,
    pub captured_pieces: Vec<Piece>,
}

impl GameState {
    fn new(board: ChessBoard, current_player: Color) -> Self {
        Self {
            board,
            current_player,
            selected_piece: None,
            is_check: false,
            is_checkmate: false,
            is_stalemate: false,
            move_history: Vec::new(),
            captured_pieces: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct Game {
    state: GameState,
    interaction: InteractionState,
    config: GameConfig,
    subscribers: Subscribers,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::from_position(ChessBoard::standard(), Color::White, config)
    }

    /// Starts from an arbitrary position with an empty history. Check, checkmate and
    /// stalemate are evaluated for `current_player` right away.
    pub fn from_position(mut board: ChessBoard, current_player: Color, config: GameConfig) -> Self {
        board.recompute_threats();
        let mut game = Self {
            state: GameState::new(board, current_player),
            interaction: InteractionState::new(config.show_threats),
            config,
            subscribers: Subscribers::default(),
        };
        game.update_game_status();
        game
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &ChessBoard {
        &self.state.board
    }

    pub fn current_player(&self) -> Color {
        self.state.current_player
    }

    pub fn selected_piece(&self) -> Option<&Piece> {
        self.state.selected_piece.as_ref()
    }

    pub fn is_check(&self) -> bool {
        self.state.is_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.state.is_checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.state.is_stalemate
    }

    pub fn is_over(&self) -> bool {
        self.state.is_checkmate || self.state.is_stalemate
    }

    pub fn move_history(&self) -> &[Move] {
        &self.state.move_history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.state.move_history.last()
    }

    pub fn captured_pieces(&self) -> &[Piece] {
        &self.state.captured_pieces
    }

    /// Legal destinations of whatever piece stands on `from`, regardless of turn.
    pub fn legal_moves_for(&self, from: ChessField) -> Vec<ChessField> {
        self.state.board.legal_moves(from, self.last_move(), self.config.legality)
    }

    pub fn pseudo_legal_moves_for(&self, from: ChessField) -> Vec<ChessField> {
        self.state.board.pseudo_legal_moves(from, self.last_move())
    }

    /// Every legal `(from, to)` pair of the side to move.
    pub fn all_legal_moves(&self) -> Vec<(ChessField, ChessField)> {
        self.state
            .board
            .all_legal_moves(self.state.current_player, self.last_move(), self.config.legality)
    }

    pub fn game_state(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.clone()
    }

    /// Selects the side to move's piece on `field`, replacing any earlier selection.
    pub fn select_piece(&mut self, field: ChessField) -> Result<(), CommandError> {
        let piece = self
            .state
            .board
            .get(field)
            .and_then(|square| square.piece)
            .filter(|piece| piece.color == self.state.current_player)
            .ok_or(CommandError::InvalidSelection)?;

        self.interaction.legal_moves = self.legal_moves_for(field);
        self.interaction.selected_square = Some(field);
        self.state.selected_piece = Some(piece);
        self.notify_change();
        Ok(())
    }

    pub fn deselect_piece(&mut self) {
        self.clear_selection();
        self.notify_change();
    }

    /// Updates the hover highlight. Off-board squares are ignored and reported as `false`.
    pub fn hover_square(&mut self, field: Option<ChessField>) -> bool {
        if field.is_some_and(|f| !f.is_valid()) {
            return false;
        }
        self.interaction.hovered_square = field;
        self.notify_change();
        true
    }

    /// Moves the selected piece to `to` and hands the turn over. Returns the applied
    /// move with its check flags filled in.
    pub fn move_piece(&mut self, to: ChessField) -> Result<Move, CommandError> {
        let selected = self.state.selected_piece.ok_or(CommandError::NoActiveSelection)?;
        if !self.interaction.legal_moves.contains(&to) {
            return Err(CommandError::IllegalDestination);
        }
        let mv = self
            .state
            .board
            .apply_move(selected.position, to)
            .ok_or(CommandError::NoActiveSelection)?;

        if let Some(captured) = mv.captured_piece {
            self.state.captured_pieces.push(captured);
        }
        self.state.move_history.push(mv);
        self.state.current_player = self.state.current_player.opposite();
        self.clear_selection();
        self.update_game_status();

        let applied = *self.state.move_history.last().unwrap_or(&mv);
        self.notify_change();
        Ok(applied)
    }

    /// Back to the initial position. The configuration and subscriptions survive.
    pub fn reset_game(&mut self) {
        self.state = GameState::new(ChessBoard::standard(), Color::White);
        self.interaction = InteractionState::new(self.config.show_threats);
        self.update_game_status();
        self.notify_change();
    }

    /// Flips the threat overlay and returns the new setting.
    pub fn toggle_threat_indicators(&mut self) -> bool {
        self.interaction.show_threats = !self.interaction.show_threats;
        self.notify_change();
        self.interaction.show_threats
    }

    /// Registers a listener called after every successful command, in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&Game) + 'static,
    {
        self.subscribers.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.subscribers.remove(subscription)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn clear_selection(&mut self) {
        self.state.selected_piece = None;
        self.interaction.selected_square = None;
        self.interaction.legal_moves.clear();
    }

    fn update_game_status(&mut self) {
        let color = self.state.current_player;
        let in_check = self.state.board.is_in_check(color);
        let can_move = self
            .state
            .board
            .has_any_legal_move(color, self.state.move_history.last(), self.config.legality);

        self.state.is_check = in_check;
        self.state.is_checkmate = in_check && !can_move;
        self.state.is_stalemate = !in_check && !can_move;

        if let Some(last) = self.state.move_history.last_mut() {
            last.is_check = in_check;
            last.is_checkmate = in_check && !can_move;
        }
    }

    fn notify_change(&mut self) {
        let mut listeners = self.subscribers.take();
        for (_, listener) in listeners.iter_mut() {
            listener(&*self);
        }
        self.subscribers.restore(listeners);
    }
}
