use thiserror::Error;

/// Failure to build a board from a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN needs at least 4 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("invalid piece character '{0}' in FEN placement")]
    InvalidPiece(char),

    #[error("FEN placement has a bad layout at rank {rank}")]
    BadRank { rank: u8 },

    #[error("invalid side to move '{0}', expected 'w' or 'b'")]
    InvalidSide(String),

    #[error("invalid castling character '{0}'")]
    InvalidCastling(char),

    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid move counter '{0}'")]
    InvalidCounter(String),

    #[error("{0:?} has no king on the board")]
    MissingKing(crate::board::Color),
}

/// Failure to parse algebraic square notation such as `e4`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square notation '{0}'")]
pub struct SquareError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("no moves to undo")]
    NothingToUndo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("position has no legal moves")]
    NoLegalMoves,
}
