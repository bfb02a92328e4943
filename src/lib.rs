pub mod board;
pub mod error;
pub mod hash;
#[cfg(feature = "cli")]
pub mod logger;
pub mod moves;
pub mod search;
pub mod square;
pub mod status;

pub use board::{Board, Color, Piece, PieceKind};
pub use error::{BoardError, FenError, SearchError, SquareError};
pub use moves::types::{Move, MoveKind};
pub use search::search::{SearchLimits, SearchResult, best_move, search};
pub use square::Square;
