use crate::board::Board;
use crate::error::SearchError;
use crate::moves::execute::{generate_captures, generate_legal};
use crate::moves::square_control::is_in_check;
use crate::moves::types::Move;
use crate::search::context::{MAX_PLY, SearchContext};
use crate::search::eval::static_eval;
use crate::search::ordering::order_moves;
use arrayvec::ArrayVec;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

pub const INF: i32 = 32000;
pub const MATE_SCORE: i32 = 31000;
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;
pub const DRAW_SCORE: i32 = 0;

const MAX_MOVES: usize = 256;
type MoveList = ArrayVec<Move, MAX_MOVES>;

/// Depth and wall-clock budget of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u32,
    /// Checked between iterations only; a started iteration always completes.
    pub time_limit: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: 6,
            time_limit: Some(Duration::from_secs(5)),
        }
    }
}

impl SearchLimits {
    pub fn depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            time_limit: None,
        }
    }
}

/// Outcome of the deepest completed iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Side-to-move point of view, centipawns or a mate score.
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

/// Full moves to mate encoded in `score`: positive when the side to move
/// mates, negative when it gets mated, `None` for ordinary scores.
pub fn mate_in(score: i32) -> Option<i32> {
    if score.abs() < MATE_THRESHOLD {
        return None;
    }
    let moves = (MATE_SCORE - score.abs() + 1) / 2;
    Some(if score > 0 { moves } else { -moves })
}

pub struct TimeManager {
    pub start_time: Instant,
    pub allotted: Option<Duration>,
}

impl TimeManager {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            start_time: Instant::now(),
            allotted: limit,
        }
    }

    /// Returns the allocated time limit
    #[inline(always)]
    pub fn allocated_time(&self) -> Option<Duration> {
        self.allotted
    }

    /// Returns elapsed time since search started
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Whether an iteration expected to take about three times the previous one still fits.
    pub fn can_start_iteration(&self, last_iteration: Duration) -> bool {
        match self.allotted {
            Some(limit) => self.elapsed() + last_iteration * 3 <= limit,
            None => true,
        }
    }
}

/// Quiet moves that give check, appended after the tactical moves already in `moves`.
fn push_quiet_checks(board: &mut Board, moves: &mut MoveList) {
    let mut all = MoveList::new();
    let mut scratch = MoveList::new();
    generate_legal(board, &mut all, &mut scratch);
    for &mv in all.iter() {
        if mv.is_quiet() && board.with_move(mv, |b| is_in_check(b)) {
            moves.push(mv);
        }
    }
}

/// Captures and promotions until the position is quiet; all evasions while in check.
///
/// On its first ply (`qply == 0`) quiet checking moves are tried as well, so a
/// check at the horizon is followed by the evasions it forces. Deeper plies
/// only add captures, which keeps the extension finite.
pub fn quiescence(
    board: &mut Board,
    ctx: &mut SearchContext,
    ply: usize,
    qply: u32,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    ctx.nodes += 1;

    if ply >= MAX_PLY - 1 {
        return static_eval(board);
    }

    let mut moves = MoveList::new();
    let mut scratch = MoveList::new();

    if is_in_check(board) {
        generate_legal(board, &mut moves, &mut scratch);
        if moves.is_empty() {
            return -MATE_SCORE + ply as i32;
        }
        order_moves(&mut moves, None, &[None, None]);
    } else {
        let stand_pat = static_eval(board);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        generate_captures(board, &mut moves, &mut scratch);
        order_moves(&mut moves, None, &[None, None]);
        if qply == 0 {
            push_quiet_checks(board, &mut moves);
        }
    }

    for &mv in moves.iter() {
        board.make_move(mv);
        let score = -quiescence(board, ctx, ply + 1, qply + 1, -beta, -alpha);
        board.unmake();

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}

/// True iff the side to move has at least one legal move.
fn has_legal_move(board: &mut Board) -> bool {
    let mut moves = MoveList::new();
    let mut scratch = MoveList::new();
    generate_legal(board, &mut moves, &mut scratch);
    !moves.is_empty()
}

/// Fail-hard alpha-beta over legal moves. Every `make_move` is paired with an
/// undo before the next statement that can return.
pub fn alpha_beta(
    board: &mut Board,
    ctx: &mut SearchContext,
    depth: u32,
    ply: usize,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    ctx.pv.clear_line(ply);

    // A position seen before cannot be mate, so repetition is tested first
    if ply > 0 && board.is_repetition() {
        ctx.nodes += 1;
        return DRAW_SCORE;
    }

    // Fifty-move draw, unless the move that reached it delivered mate
    if ply > 0 && board.halfmove_clock() >= 100 {
        ctx.nodes += 1;
        if is_in_check(board) && !has_legal_move(board) {
            return -MATE_SCORE + ply as i32;
        }
        return DRAW_SCORE;
    }

    if depth == 0 || ply >= MAX_PLY - 1 {
        return quiescence(board, ctx, ply, 0, alpha, beta);
    }

    ctx.nodes += 1;

    let mut moves = MoveList::new();
    let mut scratch = MoveList::new();
    generate_legal(board, &mut moves, &mut scratch);

    if moves.is_empty() {
        return if is_in_check(board) {
            -MATE_SCORE + ply as i32
        } else {
            DRAW_SCORE
        };
    }
    order_moves(&mut moves, ctx.pv_move(ply), &ctx.killer_moves[ply]);

    for &mv in moves.iter() {
        board.make_move(mv);
        let score = -alpha_beta(board, ctx, depth - 1, ply + 1, -beta, -alpha);
        board.unmake();

        if score >= beta {
            if mv.is_quiet() {
                ctx.update_killer(ply, mv);
            }
            return beta;
        }
        if score > alpha {
            alpha = score;
            ctx.pv.update(ply, mv);
        }
    }
    alpha
}

fn format_pv(pv: &[Move]) -> String {
    pv.iter().map(Move::to_uci).collect::<Vec<_>>().join(" ")
}

/// Iterative deepening from depth 1 up to `limits.max_depth`.
///
/// The board is searched in place and is back in its original state when
/// this returns. A position without legal moves is an error.
#[instrument(skip(board), fields(fen = %board.to_fen()))]
pub fn search(board: &mut Board, limits: SearchLimits) -> Result<SearchResult, SearchError> {
    let mut root_moves = MoveList::new();
    let mut scratch = MoveList::new();
    generate_legal(board, &mut root_moves, &mut scratch);
    let Some(&first) = root_moves.first() else {
        debug!("search called on a position without legal moves");
        return Err(SearchError::NoLegalMoves);
    };

    let time = TimeManager::new(limits.time_limit);
    let mut ctx = SearchContext::new();
    let mut result = SearchResult {
        best_move: first,
        score: 0,
        depth: 0,
        nodes: 0,
        pv: vec![first],
    };
    let mut last_iter_duration = Duration::ZERO;

    for depth in 1..=limits.max_depth.max(1) {
        if depth > 1 && !time.can_start_iteration(last_iter_duration) {
            debug!(depth, elapsed_ms = time.elapsed().as_millis() as u64, "time budget spent");
            break;
        }

        let iter_start = Instant::now();
        let score = alpha_beta(board, &mut ctx, depth, 0, -INF, INF);
        last_iter_duration = iter_start.elapsed();

        let pv = ctx.pv.line(0).to_vec();
        if let Some(&best) = pv.first() {
            result = SearchResult {
                best_move: best,
                score,
                depth,
                nodes: ctx.nodes,
                pv,
            };
        }
        ctx.prev_pv = result.pv.clone();

        info!(
            depth,
            score,
            nodes = ctx.nodes,
            elapsed_ms = time.elapsed().as_millis() as u64,
            pv = %format_pv(&result.pv),
            "iteration complete"
        );

        if mate_within_depth(score, depth) {
            break;
        }
    }

    result.nodes = ctx.nodes;
    Ok(result)
}

/// True once `score` is a mate no longer than the full-width `depth`.
///
/// A mate first seen through quiescence may be longer than one a deeper
/// full-width iteration would find, so deepening continues in that case.
fn mate_within_depth(score: i32, depth: u32) -> bool {
    score.abs() >= MATE_THRESHOLD && (MATE_SCORE - score.abs()) as u32 <= depth
}

/// Best move under the default limits.
pub fn best_move(board: &mut Board) -> Result<Move, SearchError> {
    search(board, SearchLimits::default()).map(|r| r.best_move)
}
