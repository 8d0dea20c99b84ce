use std::fmt;

/// Why a command was refused. A refused command never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The square is empty, off the board or holds a piece of the side not to move.
    InvalidSelection,
    /// The destination is not among the selected piece's legal moves.
    IllegalDestination,
    /// A move was requested with nothing selected.
    NoActiveSelection,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidSelection => write!(f, "no piece of the side to move on that square"),
            CommandError::IllegalDestination => write!(f, "the selected piece cannot move there"),
            CommandError::NoActiveSelection => write!(f, "no piece is selected"),
        }
    }
}

impl std::error::Error for CommandError {}
