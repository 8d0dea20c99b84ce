use crate::chess_board::{ChessField, LegalityMode};
use crate::game::{Game, GameConfig};
use wasm_bindgen::prelude::*;

/// Browser-facing handle. Squares travel as `(row, col)` pairs, snapshots as JSON.
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(strict: bool, show_threats: bool) -> WasmGame {
        let legality = if strict { LegalityMode::Strict } else { LegalityMode::Reference };
        WasmGame {
            game: Game::with_config(GameConfig::default().with_legality(legality).with_show_threats(show_threats)),
        }
    }

    pub fn select_piece(&mut self, row: u8, col: u8) -> bool {
        self.game.select_piece(ChessField::new(row, col)).is_ok()
    }

    pub fn deselect_piece(&mut self) {
        self.game.deselect_piece();
    }

    pub fn hover_square(&mut self, row: u8, col: u8) -> bool {
        self.game.hover_square(Some(ChessField::new(row, col)))
    }

    pub fn clear_hover(&mut self) {
        self.game.hover_square(None);
    }

    pub fn move_piece(&mut self, row: u8, col: u8) -> bool {
        self.game.move_piece(ChessField::new(row, col)).is_ok()
    }

    pub fn reset_game(&mut self) {
        self.game.reset_game();
    }

    pub fn toggle_threat_indicators(&mut self) -> bool {
        self.game.toggle_threat_indicators()
    }

    pub fn position_hash(&self) -> String {
        format!("{:016x}", self.game.game_state().position_hash)
    }

    pub fn game_state(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.game_state()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn interaction_state(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.interaction_state()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
