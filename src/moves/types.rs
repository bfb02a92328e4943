use crate::board::{Piece, PieceKind};
use crate::square::Square;
use arrayvec::ArrayVec;
use std::fmt;
use std::ops::{Deref, DerefMut};

pub trait MoveBuffer: Deref<Target = [Move]> + DerefMut {
    fn push(&mut self, mv: Move);
    fn clear(&mut self);
}

impl MoveBuffer for Vec<Move> {
    fn push(&mut self, mv: Move) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<const N: usize> MoveBuffer for ArrayVec<Move, N> {
    fn push(&mut self, mv: Move) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

/// How a move rearranges the board beyond "from empties, to fills".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Ordinary,
    CastleShort,
    CastleLong,
    EnPassant,
    Promotion,
}

/// A fully described move.
///
/// Moves carry the captured piece so that undo and hashing never need to
/// look at the board. Only moves produced by the generator for the current
/// position may be passed to `Board::make_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    /// `Piece::EMPTY` if nothing is taken.
    pub captured: Piece,
    pub kind: MoveKind,
    /// Only meaningful for `MoveKind::Promotion`.
    pub promotion: Piece,
}

impl Move {
    pub const fn new(from: Square, to: Square, piece: Piece, captured: Piece) -> Self {
        Move {
            from,
            to,
            piece,
            captured,
            kind: MoveKind::Ordinary,
            promotion: Piece::EMPTY,
        }
    }

    pub const fn with_kind(mut self, kind: MoveKind) -> Self {
        self.kind = kind;
        self
    }

    pub const fn promoting_to(mut self, promotion: Piece) -> Self {
        self.kind = MoveKind::Promotion;
        self.promotion = promotion;
        self
    }

    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    #[inline(always)]
    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::CastleShort | MoveKind::CastleLong)
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.kind == MoveKind::Promotion
    }

    #[inline(always)]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind() == Some(PieceKind::Pawn) && self.from.rank().abs_diff(self.to.rank()) == 2
    }

    #[inline(always)]
    pub fn is_quiet(&self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    /// Square of the pawn removed by an en passant capture.
    #[inline(always)]
    pub fn en_passant_victim(&self) -> Square {
        Square::new(self.from.rank(), self.to.file())
    }

    /// `(rook_from, rook_to)` for a castling move.
    #[inline(always)]
    pub fn castling_rook_squares(&self) -> (Square, Square) {
        let king = self.from.index();
        match self.kind {
            MoveKind::CastleLong => (Square::from_index(king - 4), Square::from_index(king - 1)),
            _ => (Square::from_index(king + 3), Square::from_index(king + 1)),
        }
    }

    pub fn to_uci(&self) -> String {
        format!("{self}")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;

        if self.is_promotion() {
            write!(f, "{}", self.promotion.to_char().to_ascii_lowercase())?;
        }

        // "{:#}" adds a tag for special moves
        if f.alternate() {
            if self.is_castling() {
                f.write_str(" (castle)")?;
            } else if self.is_en_passant() {
                f.write_str(" (ep)")?;
            } else if self.is_capture() {
                f.write_str(" (x)")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_strings() {
        let push = Move::new(Square::E2, Square::E4, Piece::WHITE_PAWN, Piece::EMPTY);
        assert_eq!(push.to_uci(), "e2e4");
        assert!(push.is_quiet());
        assert!(push.is_double_pawn_push());

        let promo = Move::new(Square::B7, Square::A8, Piece::WHITE_PAWN, Piece::BLACK_ROOK)
            .promoting_to(Piece::WHITE_KNIGHT);
        assert_eq!(promo.to_uci(), "b7a8n");
        assert_eq!(format!("{promo:#}"), "b7a8n (x)");
    }

    #[test]
    fn castling_rook_squares() {
        let short = Move::new(Square::E1, Square::G1, Piece::WHITE_KING, Piece::EMPTY)
            .with_kind(MoveKind::CastleShort);
        assert_eq!(short.castling_rook_squares(), (Square::H1, Square::F1));
        let long = Move::new(Square::E8, Square::C8, Piece::BLACK_KING, Piece::EMPTY)
            .with_kind(MoveKind::CastleLong);
        assert_eq!(long.castling_rook_squares(), (Square::A8, Square::D8));
    }

    #[test]
    fn en_passant_victim_is_beside_origin() {
        let ep = Move::new(Square::E5, Square::D6, Piece::WHITE_PAWN, Piece::BLACK_PAWN)
            .with_kind(MoveKind::EnPassant);
        assert_eq!(ep.en_passant_victim(), Square::D5);
    }
}
