// src/board/castle_bits.rs

use crate::board::Color;
use crate::square::Square;

/// Per-side castling flags. Only the low two bits are used.
pub type CastleBits = u8;

pub const CASTLE_NONE: CastleBits = 0b00;
pub const CASTLE_SHORT: CastleBits = 0b01;
pub const CASTLE_LONG: CastleBits = 0b10;
pub const CASTLE_BOTH: CastleBits = CASTLE_SHORT | CASTLE_LONG;

/// King home square per color.
pub const KING_START: [Square; 2] = [Square::E1, Square::E8];

/// Rook corners per color: `[short, long]`.
pub const ROOK_START: [[Square; 2]; 2] = [[Square::H1, Square::A1], [Square::H8, Square::A8]];

/// The right that is lost when `color`'s rook leaves or is captured on `sq`.
#[inline(always)]
pub fn rook_right_at(color: Color, sq: Square) -> CastleBits {
    let corners = ROOK_START[color.index()];
    if sq == corners[0] {
        CASTLE_SHORT
    } else if sq == corners[1] {
        CASTLE_LONG
    } else {
        CASTLE_NONE
    }
}
