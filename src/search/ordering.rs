use crate::moves::types::Move;

const PV_SCORE: i32 = 2_000_000_000;
const PROMOTION_BASE: i32 = 20000;
const CAPTURE_BASE: i32 = 10000;
const KILLER1_SCORE: i32 = 9000;
const KILLER2_SCORE: i32 = 8000;

/// Most valuable victim, least valuable attacker. 0 for non-captures.
pub fn mvv_lva_score(mv: Move) -> i32 {
    match (mv.captured.kind(), mv.piece.kind()) {
        (Some(victim), Some(attacker)) => victim.value() * 10 - attacker.attacker_value(),
        _ => 0,
    }
}

/// Ordering key; larger is searched earlier.
fn move_priority(mv: Move, pv_move: Option<Move>, killers: &[Option<Move>; 2]) -> i32 {
    if pv_move == Some(mv) {
        return PV_SCORE;
    }

    let mut score = 0;
    if mv.is_promotion() {
        score += PROMOTION_BASE + mv.promotion.kind().map_or(0, |k| k.value());
    }
    if mv.is_capture() {
        score += CAPTURE_BASE + mvv_lva_score(mv);
    }
    if score > 0 {
        return score;
    }

    if killers[0] == Some(mv) {
        KILLER1_SCORE
    } else if killers[1] == Some(mv) {
        KILLER2_SCORE
    } else {
        0
    }
}

/// PV move first, then promotions and captures (MVV-LVA), then killers.
///
/// The sort is stable, so quiet moves keep their generation order.
pub fn order_moves(moves: &mut [Move], pv_move: Option<Move>, killers: &[Option<Move>; 2]) {
    moves.sort_by_cached_key(|&mv| -move_priority(mv, pv_move, killers));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;
    use crate::square::Square;

    #[test]
    fn pawn_takes_queen_beats_queen_takes_pawn() {
        let pxq = Move::new(Square::D4, Square::E5, Piece::WHITE_PAWN, Piece::BLACK_QUEEN);
        let qxp = Move::new(Square::D1, Square::D7, Piece::WHITE_QUEEN, Piece::BLACK_PAWN);
        assert!(mvv_lva_score(pxq) > mvv_lva_score(qxp));
    }

    #[test]
    fn pv_then_captures_then_killers_then_quiets() {
        let quiet = Move::new(Square::A2, Square::A3, Piece::WHITE_PAWN, Piece::EMPTY);
        let killer = Move::new(Square::G1, Square::F3, Piece::WHITE_KNIGHT, Piece::EMPTY);
        let capture = Move::new(Square::D1, Square::D7, Piece::WHITE_QUEEN, Piece::BLACK_PAWN);
        let pv = Move::new(Square::B1, Square::C3, Piece::WHITE_KNIGHT, Piece::EMPTY);

        let mut moves = vec![quiet, killer, capture, pv];
        order_moves(&mut moves, Some(pv), &[Some(killer), None]);
        assert_eq!(moves, vec![pv, capture, killer, quiet]);
    }
}
