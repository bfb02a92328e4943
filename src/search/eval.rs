use crate::board::{Board, Color, PieceKind};
use crate::square::Square;

// Phase weights
const KNIGHT_PHASE: i32 = 1;
const BISHOP_PHASE: i32 = 1;
const ROOK_PHASE: i32 = 2;
const QUEEN_PHASE: i32 = 4;
const TOTAL_PHASE: i32 = 24;

// Piece-square tables, rank 8 first (index 0 = a8), from White's point of view.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MG_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_EG_TABLE: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

/// Index into a rank-8-first table for a piece of `color` on `sq`.
#[inline(always)]
fn table_index(sq: Square, color: Color) -> usize {
    let rank = match color {
        Color::White => 7 - sq.rank(),
        Color::Black => sq.rank(),
    };
    rank as usize * 8 + sq.file() as usize
}

fn psqt(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_MG_TABLE,
    }
}

fn phase_weight(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Knight => KNIGHT_PHASE,
        PieceKind::Bishop => BISHOP_PHASE,
        PieceKind::Rook => ROOK_PHASE,
        PieceKind::Queen => QUEEN_PHASE,
        PieceKind::Pawn | PieceKind::King => 0,
    }
}

/// 24 with all minor and major pieces on the board, 0 with none.
pub fn calculate_phase(board: &Board) -> i32 {
    Color::ALL
        .into_iter()
        .flat_map(|c| board.pieces(c))
        .filter_map(|(_, p)| p.kind())
        .map(phase_weight)
        .sum::<i32>()
        .clamp(0, TOTAL_PHASE)
}

/// Non-king material of one side.
pub fn material(board: &Board, color: Color) -> i32 {
    board
        .pieces(color)
        .filter_map(|(_, p)| p.kind())
        .map(|k| k.value())
        .sum()
}

/// Material plus piece-square terms from White's point of view.
pub fn material_and_psqt(board: &Board) -> i32 {
    let phase = calculate_phase(board);
    let mut score = 0;

    for color in Color::ALL {
        let sign = color.sign() as i32;
        for (sq, piece) in board.pieces(color) {
            let Some(kind) = piece.kind() else {
                continue;
            };
            let idx = table_index(sq, color);
            let positional = if kind == PieceKind::King {
                (KING_MG_TABLE[idx] * phase + KING_EG_TABLE[idx] * (TOTAL_PHASE - phase))
                    / TOTAL_PHASE
            } else {
                psqt(kind)[idx]
            };
            score += sign * (kind.value() + positional);
        }
    }
    score
}

/// Mop-Up Evaluation: Guides the engine to push enemy king to edges in won endgames
/// Only activates when we have a significant material advantage (>200cp) AND in endgame
fn mop_up_eval(board: &Board, my_color: Color) -> i32 {
    let non_king_pieces = Color::ALL
        .into_iter()
        .flat_map(|c| board.pieces(c))
        .filter(|(_, p)| p.kind() != Some(PieceKind::King))
        .count();
    if non_king_pieces > 10 {
        return 0;
    }

    if material(board, my_color) < material(board, my_color.opposite()) + 200 {
        return 0;
    }

    let my_king = board.king_square(my_color);
    let enemy_king = board.king_square(my_color.opposite());

    // Doubled Manhattan distance from the centre: 0 in the middle, 14 in a corner
    let enemy_rank = enemy_king.rank() as i32;
    let enemy_file = enemy_king.file() as i32;
    let center_dist = (2 * enemy_rank - 7).abs() + (2 * enemy_file - 7).abs();

    let my_rank = my_king.rank() as i32;
    let my_file = my_king.file() as i32;
    let king_dist = (my_rank - enemy_rank).abs() + (my_file - enemy_file).abs();

    (10 * center_dist) + (4 * (14 - king_dist))
}

/// Static evaluation from the side to move's point of view. Pure function of the position.
pub fn static_eval(board: &Board) -> i32 {
    let side = board.side_to_move();
    let color_multiplier = side.sign() as i32;

    material_and_psqt(board) * color_multiplier + mop_up_eval(board, side)
        - mop_up_eval(board, side.opposite())
}
