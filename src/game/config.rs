use crate::chess_board::LegalityMode;
use serde::Serialize;

/// Settings fixed for the lifetime of a [`Game`](super::Game); `reset_game` keeps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub legality: LegalityMode,
    /// Initial state of the threat overlay toggle.
    pub show_threats: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            legality: LegalityMode::Reference,
            show_threats: true,
        }
    }
}

impl GameConfig {
    pub fn with_legality(mut self, legality: LegalityMode) -> Self {
        self.legality = legality;
        self
    }

    pub fn with_show_threats(mut self, show_threats: bool) -> Self {
        self.show_threats = show_threats;
        self
    }
}
