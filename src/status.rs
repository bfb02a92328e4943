use crate::board::{Board, Color};
use crate::moves::execute::generate_legal;
use crate::moves::square_control::is_in_check;

/// Classification of a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate { winner: Color },
    Stalemate,
    DrawThreefold,
    DrawFiftyMove,
}

impl GameStatus {
    /// True once the game cannot continue (mate, stalemate or a draw).
    pub fn is_game_over(self) -> bool {
        !matches!(self, GameStatus::Normal | GameStatus::Check)
    }
}

// Free helpers that do not live on Board (prevents board → status imports)
pub fn is_draw_by_threefold(board: &Board) -> bool {
    board.is_threefold()
}
pub fn is_draw_by_fifty_move(board: &Board) -> bool {
    board.halfmove_clock() >= 100
}

/// Mate, stalemate, check or normal, from the legal moves alone.
///
/// Draw rules are not consulted; see [`position_status`].
pub fn terminal_status(board: &mut Board) -> GameStatus {
    let mut legal = Vec::with_capacity(64);
    let mut scratch = Vec::with_capacity(128);
    generate_legal(board, &mut legal, &mut scratch);

    let checked = is_in_check(board);
    match (legal.is_empty(), checked) {
        (true, true) => GameStatus::Checkmate {
            winner: board.side_to_move().opposite(),
        },
        (true, false) => GameStatus::Stalemate,
        (false, true) => GameStatus::Check,
        (false, false) => GameStatus::Normal,
    }
}

/// Determine the game status for the current position.
///
/// Priority (highest → lowest):
///  1) `Checkmate`
///  2) `DrawThreefold`
///  3) `DrawFiftyMove` (halfmove_clock ≥ 100)
///  4) `Stalemate` / `Check` / `Normal`
pub fn position_status(board: &mut Board) -> GameStatus {
    let base = terminal_status(board);
    if matches!(base, GameStatus::Checkmate { .. }) {
        return base;
    }
    if is_draw_by_threefold(board) {
        return GameStatus::DrawThreefold;
    }
    if is_draw_by_fifty_move(board) {
        return GameStatus::DrawFiftyMove;
    }
    base
}
