pub mod board;
pub mod display_format;
pub mod error;
pub mod game;
pub mod location;
pub mod piece;
pub mod rules;
pub mod simulate;
pub mod threats;

pub use game::{Game, GameState, new_game};
pub use location::{Location, Move};
pub use piece::{Piece, PieceKind, Side};
