//! 0x88 square encoding.
//!
//! A square is a byte whose high nibble is the rank and low nibble the file.
//! Any index with bit 0x08 or 0x80 set lies off the 8x8 board, so stepping by
//! a direction offset and testing `& 0x88` is the whole bounds check.

use crate::error::SquareError;
use std::fmt;
use std::str::FromStr;

/// Size of the backing array for a 0x88 board.
pub const BOARD_SIZE: usize = 128;

/// Mask that is non-zero for every off-board index.
pub const OFF_BOARD: u8 = 0x88;

/// One rank up.
pub const NEXT_RANK: i8 = 0x10;
/// One file right.
pub const NEXT_FILE: i8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

macro_rules! named_squares {
    ($($name:ident = $val:expr),* $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square($val);)*
        }
    };
}

named_squares! {
    A1 = 0x00, B1 = 0x01, C1 = 0x02, D1 = 0x03, E1 = 0x04, F1 = 0x05, G1 = 0x06, H1 = 0x07,
    A2 = 0x10, B2 = 0x11, C2 = 0x12, D2 = 0x13, E2 = 0x14, F2 = 0x15, G2 = 0x16, H2 = 0x17,
    A3 = 0x20, B3 = 0x21, C3 = 0x22, D3 = 0x23, E3 = 0x24, F3 = 0x25, G3 = 0x26, H3 = 0x27,
    A4 = 0x30, B4 = 0x31, C4 = 0x32, D4 = 0x33, E4 = 0x34, F4 = 0x35, G4 = 0x36, H4 = 0x37,
    A5 = 0x40, B5 = 0x41, C5 = 0x42, D5 = 0x43, E5 = 0x44, F5 = 0x45, G5 = 0x46, H5 = 0x47,
    A6 = 0x50, B6 = 0x51, C6 = 0x52, D6 = 0x53, E6 = 0x54, F6 = 0x55, G6 = 0x56, H6 = 0x57,
    A7 = 0x60, B7 = 0x61, C7 = 0x62, D7 = 0x63, E7 = 0x64, F7 = 0x65, G7 = 0x66, H7 = 0x67,
    A8 = 0x70, B8 = 0x71, C8 = 0x72, D8 = 0x73, E8 = 0x74, F8 = 0x75, G8 = 0x76, H8 = 0x77,
}

impl Square {
    /// True iff `raw` addresses a real square.
    #[inline(always)]
    pub const fn is_valid(raw: u8) -> bool {
        raw & OFF_BOARD == 0
    }

    /// Build from 0-based rank and file. Both must be in 0..8.
    #[inline(always)]
    pub const fn new(rank: u8, file: u8) -> Self {
        debug_assert!(rank < 8 && file < 8);
        Square((rank << 4) | file)
    }

    /// Wrap a raw 0x88 index. Panics in debug builds on off-board indices.
    #[inline(always)]
    pub const fn from_index(raw: u8) -> Self {
        debug_assert!(Self::is_valid(raw));
        Square(raw)
    }

    #[inline(always)]
    pub const fn try_from_index(raw: u8) -> Option<Self> {
        if Self::is_valid(raw) {
            Some(Square(raw))
        } else {
            None
        }
    }

    /// Step by a signed 0x88 offset; `None` once the result leaves the board.
    ///
    /// Negative results wrap to bytes >= 0x80 and are rejected by the same mask.
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        Self::try_from_index(self.0.wrapping_add(delta as u8))
    }

    /// Raw 0x88 index.
    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Raw index as a `usize`, for array lookups.
    #[inline(always)]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.0 >> 4
    }

    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    /// Dense 0..64 index (a1 = 0, h8 = 63).
    #[inline(always)]
    pub const fn to_dense(self) -> usize {
        (self.rank() * 8 + self.file()) as usize
    }

    /// All 64 on-board squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .filter(|&raw| Self::is_valid(raw))
            .map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(SquareError(s.to_string()));
        }
        Ok(Square::new(rank, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_and_file_come_from_nibbles() {
        assert_eq!(Square::E4.rank(), 3);
        assert_eq!(Square::E4.file(), 4);
        assert_eq!(Square::new(6, 2), Square::C7);
    }

    #[test]
    fn offset_stops_at_every_edge() {
        assert_eq!(Square::H1.offset(NEXT_FILE), None);
        assert_eq!(Square::A1.offset(-NEXT_FILE), None);
        assert_eq!(Square::A1.offset(-NEXT_RANK), None);
        assert_eq!(Square::H8.offset(NEXT_RANK), None);
        assert_eq!(Square::H8.offset(NEXT_RANK + NEXT_FILE), None);
        assert_eq!(Square::B1.offset(-0x21), None);
        assert_eq!(Square::E4.offset(0x21), Some(Square::F6));
    }

    #[test]
    fn there_are_64_squares() {
        assert_eq!(Square::all().count(), 64);
        assert!(Square::all().all(|s| Square::is_valid(s.index())));
    }

    #[test]
    fn algebraic_parse_and_print() {
        assert_eq!("e4".parse::<Square>(), Ok(Square::E4));
        assert_eq!(Square::H8.to_string(), "h8");
        assert!("i9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
    }
}
