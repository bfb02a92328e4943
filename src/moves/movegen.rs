use crate::board::{Board, Color, KING_START, Piece, PieceKind, ROOK_START};
use crate::moves::square_control::{
    BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS, is_legal_castling,
    pawn_capture_offsets,
};
use crate::moves::types::{Move, MoveBuffer, MoveKind};
use crate::square::Square;

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Which moves a generator pass should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenMode {
    All,
    /// Captures, en passant and promotions only.
    Tactical,
}

/// True iff `target` may be landed on by `color`: empty or a non-king enemy.
#[inline(always)]
fn is_target(target: Piece, color: Color) -> bool {
    target.is_empty() || (!target.is_color(color) && target.kind() != Some(PieceKind::King))
}

fn push_pawn_move(
    color: Color,
    from: Square,
    to: Square,
    captured: Piece,
    moves: &mut impl MoveBuffer,
) {
    let base = Move::new(from, to, Piece::new(color, PieceKind::Pawn), captured);
    if to.rank() == color.promotion_rank() {
        for kind in PROMOTION_KINDS {
            moves.push(base.promoting_to(Piece::new(color, kind)));
        }
    } else {
        moves.push(base);
    }
}

fn generate_pawn_moves(board: &Board, from: Square, mode: GenMode, moves: &mut impl MoveBuffer) {
    let color = board.side_to_move();
    let pawn = Piece::new(color, PieceKind::Pawn);
    let forward = color.forward();

    // Pushes; in tactical mode only those that promote
    if let Some(one) = from.offset(forward) {
        if board.is_empty(one) {
            let promotes = one.rank() == color.promotion_rank();
            if mode == GenMode::All || promotes {
                push_pawn_move(color, from, one, Piece::EMPTY, moves);
            }
            if mode == GenMode::All && from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(forward) {
                    if board.is_empty(two) {
                        moves.push(Move::new(from, two, pawn, Piece::EMPTY));
                    }
                }
            }
        }
    }

    for delta in pawn_capture_offsets(color) {
        let Some(to) = from.offset(delta) else {
            continue;
        };
        let target = board.piece_at(to);
        if !target.is_empty() && is_target(target, color) {
            push_pawn_move(color, from, to, target, moves);
        } else if board.en_passant() == Some(to) {
            moves.push(Move::new(from, to, pawn, -pawn).with_kind(MoveKind::EnPassant));
        }
    }
}

fn generate_leaper_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    offsets: &[i8],
    mode: GenMode,
    moves: &mut impl MoveBuffer,
) {
    let color = board.side_to_move();
    for &delta in offsets {
        let Some(to) = from.offset(delta) else {
            continue;
        };
        let target = board.piece_at(to);
        if !is_target(target, color) || (mode == GenMode::Tactical && target.is_empty()) {
            continue;
        }
        moves.push(Move::new(from, to, piece, target));
    }
}

fn generate_slider_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[i8],
    mode: GenMode,
    moves: &mut impl MoveBuffer,
) {
    let color = board.side_to_move();
    for &delta in directions {
        let mut cur = from.offset(delta);
        while let Some(to) = cur {
            let target = board.piece_at(to);
            if target.is_empty() {
                if mode == GenMode::All {
                    moves.push(Move::new(from, to, piece, Piece::EMPTY));
                }
                cur = to.offset(delta);
                continue;
            }
            if is_target(target, color) {
                moves.push(Move::new(from, to, piece, target));
            }
            break;
        }
    }
}

fn generate_castling_moves(board: &Board, moves: &mut impl MoveBuffer) {
    let color = board.side_to_move();
    let from = board.king_square(color);
    if from != KING_START[color.index()] {
        return;
    }
    let king = Piece::new(color, PieceKind::King);
    let rook = Piece::new(color, PieceKind::Rook);
    let corners = ROOK_START[color.index()];

    let candidates = [
        (board.has_short_castle(color), MoveKind::CastleShort, corners[0], 2i8),
        (board.has_long_castle(color), MoveKind::CastleLong, corners[1], -2i8),
    ];

    for (allowed, kind, corner, king_step) in candidates {
        if !allowed || board.piece_at(corner) != rook {
            continue;
        }
        let Some(to) = from.offset(king_step) else {
            continue;
        };
        // Everything strictly between king and rook must be empty
        let step = king_step.signum();
        let mut between = from.offset(step);
        let mut clear = true;
        while let Some(sq) = between {
            if sq == corner {
                break;
            }
            if !board.is_empty(sq) {
                clear = false;
                break;
            }
            between = sq.offset(step);
        }
        if !clear {
            continue;
        }

        let mv = Move::new(from, to, king, Piece::EMPTY).with_kind(kind);
        if is_legal_castling(board, mv) {
            moves.push(mv);
        }
    }
}

fn generate(board: &Board, mode: GenMode, moves: &mut impl MoveBuffer) {
    let color = board.side_to_move();
    for (from, piece) in board.pieces(color) {
        match piece.kind() {
            Some(PieceKind::Pawn) => generate_pawn_moves(board, from, mode, moves),
            Some(PieceKind::Knight) => {
                generate_leaper_moves(board, from, piece, &KNIGHT_OFFSETS, mode, moves)
            }
            Some(PieceKind::Bishop) => {
                generate_slider_moves(board, from, piece, &BISHOP_DIRECTIONS, mode, moves)
            }
            Some(PieceKind::Rook) => {
                generate_slider_moves(board, from, piece, &ROOK_DIRECTIONS, mode, moves)
            }
            Some(PieceKind::Queen) => {
                generate_slider_moves(board, from, piece, &ROOK_DIRECTIONS, mode, moves);
                generate_slider_moves(board, from, piece, &BISHOP_DIRECTIONS, mode, moves);
            }
            Some(PieceKind::King) => {
                generate_leaper_moves(board, from, piece, &KING_OFFSETS, mode, moves);
                if mode == GenMode::All {
                    generate_castling_moves(board, moves);
                }
            }
            None => {}
        }
    }
}

/// All pseudo-legal moves for the side to move. Clears `moves` first.
pub fn generate_pseudo_legal(board: &Board, moves: &mut impl MoveBuffer) {
    moves.clear();
    generate(board, GenMode::All, moves);
}

/// Pseudo-legal captures, en passant captures and promotions. Clears `moves` first.
pub fn generate_pseudo_legal_captures(board: &Board, moves: &mut impl MoveBuffer) {
    moves.clear();
    generate(board, GenMode::Tactical, moves);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pseudo(fen: &str) -> Vec<Move> {
        let b: Board = fen.parse().unwrap();
        let mut moves = Vec::new();
        generate_pseudo_legal(&b, &mut moves);
        moves
    }

    #[test]
    fn promotions_come_in_queen_rook_bishop_knight_order() {
        let moves = pseudo("7k/P7/8/8/8/8/8/K7 w - -");
        let promos: Vec<String> = moves
            .iter()
            .filter(|m| m.is_promotion())
            .map(|m| m.to_uci())
            .collect();
        assert_eq!(promos, ["a7a8q", "a7a8r", "a7a8b", "a7a8n"]);
    }

    #[test]
    fn en_passant_target_is_generated() {
        let moves = pseudo("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let ep: Vec<&Move> = moves.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, Square::D6);
        assert_eq!(ep[0].captured, Piece::BLACK_PAWN);
    }

    #[test]
    fn enemy_king_is_never_a_target() {
        let moves = pseudo("8/8/8/k7/8/8/8/R3K3 w - -");
        assert!(moves.iter().all(|m| m.captured.kind() != Some(PieceKind::King)));
        assert!(moves.iter().any(|m| m.to_uci() == "a1a4"));
        assert!(!moves.iter().any(|m| m.to == Square::A5));
    }

    #[test]
    fn blocked_castling_is_not_generated() {
        let moves = pseudo("4k3/8/8/8/8/8/8/RN2K1NR w KQ -");
        assert!(!moves.iter().any(|m| m.is_castling()));
        let moves = pseudo("4k3/8/8/8/8/8/8/R3K2R w KQ -");
        assert_eq!(moves.iter().filter(|m| m.is_castling()).count(), 2);
    }

    #[test]
    fn tactical_mode_only_emits_captures_and_promotions() {
        let b: Board = "r3k3/1P6/8/8/8/8/8/4K2R w - -".parse().unwrap();
        let mut moves = Vec::new();
        generate_pseudo_legal_captures(&b, &mut moves);
        assert!(moves.iter().all(|m| m.is_capture() || m.is_promotion()));
        // b7b8 x4, b7xa8 x4
        assert_eq!(moves.len(), 8);
    }
}
