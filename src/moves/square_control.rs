use crate::board::{Board, Color, PieceKind};
use crate::moves::types::{Move, MoveKind};
use crate::square::Square;

/// 0x88 offsets of the eight knight jumps.
pub const KNIGHT_OFFSETS: [i8; 8] = [33, 31, 18, 14, -14, -18, -31, -33];
/// 0x88 offsets of the eight king steps.
pub const KING_OFFSETS: [i8; 8] = [1, 15, 16, 17, -1, -15, -16, -17];
pub const BISHOP_DIRECTIONS: [i8; 4] = [15, 17, -15, -17];
pub const ROOK_DIRECTIONS: [i8; 4] = [1, 16, -1, -16];

/// Diagonal offsets a pawn of `color` captures along.
#[inline(always)]
pub const fn pawn_capture_offsets(color: Color) -> [i8; 2] {
    match color {
        Color::White => [15, 17],
        Color::Black => [-15, -17],
    }
}

/// True iff any piece of `attacker` hits `square`. Pins are irrelevant here.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    // Pawns: walk back from the target along the attacker's capture diagonals.
    for delta in pawn_capture_offsets(attacker) {
        if let Some(from) = square.offset(-delta) {
            if board.piece_at(from).is(attacker, PieceKind::Pawn) {
                return true;
            }
        }
    }

    for delta in KNIGHT_OFFSETS {
        if let Some(from) = square.offset(delta) {
            if board.piece_at(from).is(attacker, PieceKind::Knight) {
                return true;
            }
        }
    }

    for delta in KING_OFFSETS {
        if let Some(from) = square.offset(delta) {
            if board.piece_at(from).is(attacker, PieceKind::King) {
                return true;
            }
        }
    }

    slider_hits(board, square, attacker, &ROOK_DIRECTIONS, PieceKind::Rook)
        || slider_hits(board, square, attacker, &BISHOP_DIRECTIONS, PieceKind::Bishop)
}

/// Walks each ray out of `square` to the first occupant and checks for `kind` or a queen.
#[inline]
fn slider_hits(
    board: &Board,
    square: Square,
    attacker: Color,
    directions: &[i8],
    kind: PieceKind,
) -> bool {
    for &delta in directions {
        let mut cur = square.offset(delta);
        while let Some(sq) = cur {
            let piece = board.piece_at(sq);
            if !piece.is_empty() {
                if piece.is(attacker, kind) || piece.is(attacker, PieceKind::Queen) {
                    return true;
                }
                break;
            }
            cur = sq.offset(delta);
        }
    }
    false
}

#[inline(always)]
pub fn in_check(board: &Board, side: Color) -> bool {
    let king_sq = board.king_square(side);
    is_square_attacked(board, king_sq, side.opposite())
}

/// Whether the side to move is in check.
#[inline(always)]
pub fn is_in_check(board: &Board) -> bool {
    in_check(board, board.side_to_move())
}

/// The king may not castle out of, through, or into an attacked square.
///
/// Rights and empty in-between squares are the generator's concern.
pub fn is_legal_castling(board: &Board, mv: Move) -> bool {
    let color = board.side_to_move();
    let step: i8 = match mv.kind {
        MoveKind::CastleShort => 1,
        MoveKind::CastleLong => -1,
        _ => return false,
    };

    let opp = color.opposite();
    let mut sq = Some(mv.from);
    for _ in 0..3 {
        match sq {
            Some(s) if !is_square_attacked(board, s, opp) => sq = s.offset(step),
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_attacks_point_forward() {
        let b: Board = "4k3/8/8/3p4/4P3/8/8/4K3 w - -".parse().unwrap();
        assert!(is_square_attacked(&b, Square::D5, Color::White));
        assert!(is_square_attacked(&b, Square::F5, Color::White));
        assert!(!is_square_attacked(&b, Square::E5, Color::White));
        assert!(is_square_attacked(&b, Square::E4, Color::Black));
        assert!(is_square_attacked(&b, Square::C4, Color::Black));
        assert!(!is_square_attacked(&b, Square::D4, Color::Black));
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let b: Board = "4k3/8/8/8/8/2N5/8/R3K2q w - -".parse().unwrap();
        // queen on h1 sees along rank 1 up to the king but not past it
        assert!(is_square_attacked(&b, Square::F1, Color::Black));
        assert!(is_square_attacked(&b, Square::E1, Color::Black));
        assert!(!is_square_attacked(&b, Square::D1, Color::Black));
        // rook on a1 runs the open file but is cut off on the rank by its own king
        assert!(is_square_attacked(&b, Square::A8, Color::White));
        assert!(!is_square_attacked(&b, Square::G1, Color::White));
        assert!(in_check(&b, Color::White));
        assert!(!in_check(&b, Color::Black));
    }

    #[test]
    fn knight_jumps_do_not_wrap() {
        let b: Board = "4k3/8/8/8/8/8/8/N3K3 w - -".parse().unwrap();
        assert!(is_square_attacked(&b, Square::B3, Color::White));
        assert!(is_square_attacked(&b, Square::C2, Color::White));
        assert!(!is_square_attacked(&b, Square::H2, Color::White));
        assert!(!is_square_attacked(&b, Square::G3, Color::White));
    }
}
