use crate::moves::types::Move;

/// Deepest ply the search tables are sized for, quiescence included.
pub const MAX_PLY: usize = 128;

/// Triangular principal-variation table: `lines[ply]` is the best line found
/// from `ply` in the current node.
pub struct PvTable {
    lines: Vec<Vec<Move>>,
}

impl PvTable {
    pub fn new() -> Self {
        Self {
            lines: (0..=MAX_PLY).map(|_| Vec::with_capacity(MAX_PLY)).collect(),
        }
    }

    #[inline]
    pub fn clear_line(&mut self, ply: usize) {
        self.lines[ply].clear();
    }

    /// `mv` followed by the child's line becomes the line at `ply`.
    pub fn update(&mut self, ply: usize, mv: Move) {
        let (head, tail) = self.lines.split_at_mut(ply + 1);
        let line = &mut head[ply];
        line.clear();
        line.push(mv);
        line.extend_from_slice(&tail[0]);
    }

    pub fn line(&self, ply: usize) -> &[Move] {
        &self.lines[ply]
    }
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SearchContext {
    pub killer_moves: Vec<[Option<Move>; 2]>,
    pub pv: PvTable,
    /// Best line of the last completed iteration, used for ordering.
    pub prev_pv: Vec<Move>,
    pub nodes: u64,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchContext {
    pub fn new() -> Self {
        Self {
            killer_moves: vec![[None; 2]; MAX_PLY + 1],
            pv: PvTable::new(),
            prev_pv: Vec::new(),
            nodes: 0,
        }
    }

    pub fn update_killer(&mut self, ply: usize, mv: Move) {
        if self.killer_moves[ply][0] != Some(mv) {
            self.killer_moves[ply][1] = self.killer_moves[ply][0];
            self.killer_moves[ply][0] = Some(mv);
        }
    }

    #[inline]
    pub fn pv_move(&self, ply: usize) -> Option<Move> {
        self.prev_pv.get(ply).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;
    use crate::square::Square;

    fn quiet(from: Square, to: Square) -> Move {
        Move::new(from, to, Piece::WHITE_KNIGHT, Piece::EMPTY)
    }

    #[test]
    fn pv_update_prepends_to_child_line() {
        let mut pv = PvTable::new();
        let a = quiet(Square::G1, Square::F3);
        let b = quiet(Square::B1, Square::C3);
        pv.update(1, b);
        pv.update(0, a);
        assert_eq!(pv.line(0), &[a, b]);
        pv.clear_line(1);
        assert!(pv.line(1).is_empty());
        assert_eq!(pv.line(0).len(), 2);
    }

    #[test]
    fn killers_shift_without_duplicates() {
        let mut ctx = SearchContext::new();
        let a = quiet(Square::G1, Square::F3);
        let b = quiet(Square::B1, Square::C3);
        ctx.update_killer(3, a);
        ctx.update_killer(3, a);
        assert_eq!(ctx.killer_moves[3], [Some(a), None]);
        ctx.update_killer(3, b);
        assert_eq!(ctx.killer_moves[3], [Some(b), Some(a)]);
    }
}
