use crate::board::castle_bits::CastleBits;
use crate::moves::types::Move;
use crate::square::Square;

/// State captured immediately before a move is applied.
///
/// Only the fields a move can overwrite irrecoverably are kept; the piece
/// layout is rebuilt from the move itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryItem {
    pub mv: Move,
    pub castling: [CastleBits; 2],
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    /// Position hash before `mv`.
    pub zobrist: u64,
}
