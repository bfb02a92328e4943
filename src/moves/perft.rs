use crate::board::Board;
use crate::moves::{execute::generate_legal, square_control::is_in_check, types::Move};
use std::ops::AddAssign;
use tracing::{debug, instrument};

const MAX_LOG_DEPTH: u32 = 3; // only trace details for shallow runs

/// Leaf statistics in the layout of the usual perft reference tables.
///
/// Move tags (captures, castles, ...) are counted on the last ply only, and
/// `checks`/`checkmates` describe the leaf positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounters {
    pub nodes: u64,
    pub captures: u64,
    pub ep_captures: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl AddAssign for PerftCounters {
    fn add_assign(&mut self, o: Self) {
        self.nodes += o.nodes;
        self.captures += o.captures;
        self.ep_captures += o.ep_captures;
        self.castles += o.castles;
        self.promotions += o.promotions;
        self.checks += o.checks;
        self.checkmates += o.checkmates;
    }
}

/// One legal-move buffer and one pseudo-legal scratch buffer per ply.
struct PlyBuffers {
    moves: Vec<Vec<Move>>,
    scratch: Vec<Vec<Move>>,
}

impl PlyBuffers {
    fn new(depth: u32) -> Self {
        let plies = depth as usize + 1;
        Self {
            moves: (0..plies).map(|_| Vec::with_capacity(64)).collect(),
            scratch: (0..plies).map(|_| Vec::with_capacity(128)).collect(),
        }
    }

    /// Fills the legal moves at `ply` and returns how many there are.
    fn generate(&mut self, board: &mut Board, ply: usize) -> usize {
        generate_legal(board, &mut self.moves[ply], &mut self.scratch[ply]);
        self.moves[ply].len()
    }
}

fn perft_recursive(board: &mut Board, depth: u32, ply: usize, bufs: &mut PlyBuffers) -> u64 {
    if depth == 0 {
        return 1;
    }

    let move_count = bufs.generate(board, ply);
    if depth == 1 {
        return move_count as u64;
    }

    let mut node_count = 0;
    for i in 0..move_count {
        let mv = bufs.moves[ply][i];
        board.make_move(mv);
        node_count += perft_recursive(board, depth - 1, ply + 1, bufs);
        board.unmake();
    }
    node_count
}

/// Number of leaf nodes of the legal move tree `depth` plies deep.
#[instrument(skip(board), fields(fen = %board.to_fen()))]
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    let mut bufs = PlyBuffers::new(depth);
    perft_recursive(board, depth, 0, &mut bufs)
}

/// Per-root-move node counts, in generation order.
#[instrument(skip(board), fields(fen = %board.to_fen()))]
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut bufs = PlyBuffers::new(depth);
    let move_count = bufs.generate(board, 0);
    if depth <= MAX_LOG_DEPTH {
        debug!(depth, moves = move_count, "divide: root legal moves");
    }

    let mut out = Vec::with_capacity(move_count);
    for i in 0..move_count {
        let mv = bufs.moves[0][i];
        board.make_move(mv);
        let count = perft_recursive(board, depth - 1, 1, &mut bufs);
        board.unmake();

        if depth <= MAX_LOG_DEPTH {
            debug!(%mv, nodes = count, "divide: root child total");
        }
        out.push((mv, count));
    }

    debug!(depth, total = out.iter().map(|(_, n)| n).sum::<u64>(), "divide: total");
    out
}

fn perft_count_recursive(
    board: &mut Board,
    depth: u32,
    ply: usize,
    out: &mut PerftCounters,
    bufs: &mut PlyBuffers,
) {
    if depth == 0 {
        out.nodes += 1;
        if is_in_check(board) {
            out.checks += 1;
            if bufs.generate(board, ply) == 0 {
                out.checkmates += 1;
            }
        }
        return;
    }

    let move_count = bufs.generate(board, ply);
    for i in 0..move_count {
        let mv = bufs.moves[ply][i];

        if depth == 1 {
            if mv.is_capture() {
                out.captures += 1;
                if mv.is_en_passant() {
                    out.ep_captures += 1;
                }
            }
            if mv.is_castling() {
                out.castles += 1;
            }
            if mv.is_promotion() {
                out.promotions += 1;
            }
        }

        #[cfg(debug_assertions)]
        let z0 = board.zobrist();

        board.make_move(mv);
        perft_count_recursive(board, depth - 1, ply + 1, out, bufs);
        board.unmake();

        #[cfg(debug_assertions)]
        debug_assert_eq!(board.zobrist(), z0, "zobrist changed across make/undo");
    }
}

/// Perft with per-category leaf statistics.
#[instrument(skip(board), fields(fen = %board.to_fen()))]
pub fn perft_breakdown(board: &mut Board, depth: u32) -> PerftCounters {
    let mut out = PerftCounters::default();
    let mut bufs = PlyBuffers::new(depth);
    perft_count_recursive(board, depth, 0, &mut out, &mut bufs);
    out
}

/// `perft_breakdown` split by root move.
pub fn perft_divide_with_breakdown(board: &mut Board, depth: u32) -> Vec<(Move, PerftCounters)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut bufs = PlyBuffers::new(depth);
    let move_count = bufs.generate(board, 0);
    let mut out = Vec::with_capacity(move_count);

    for i in 0..move_count {
        let mv = bufs.moves[0][i];
        let mut pc = PerftCounters::default();
        if depth == 1 {
            // the root move itself is the last ply
            pc.nodes = 1;
            pc.captures = mv.is_capture() as u64;
            pc.ep_captures = mv.is_en_passant() as u64;
            pc.castles = mv.is_castling() as u64;
            pc.promotions = mv.is_promotion() as u64;
        }
        board.make_move(mv);
        if depth == 1 {
            if is_in_check(board) {
                pc.checks = 1;
                pc.checkmates = (bufs.generate(board, 1) == 0) as u64;
            }
        } else {
            perft_count_recursive(board, depth - 1, 1, &mut pc, &mut bufs);
        }
        board.unmake();
        out.push((mv, pc));
    }
    out
}
