use crate::board::castle_bits::*;
use crate::board::{Board, Color, HistoryItem, Piece, PieceKind};
use crate::error::BoardError;
use crate::hash::zobrist::zobrist_keys;
use crate::moves::movegen::{generate_pseudo_legal, generate_pseudo_legal_captures};
use crate::moves::square_control::{in_check, is_legal_castling};
use crate::moves::types::{Move, MoveBuffer, MoveKind};
use tracing::warn;

impl Board {
    /// Play `mv` for the side to move.
    ///
    /// Precondition: `mv` was produced by the move generator for this exact
    /// position. Anything else leaves the board in an unspecified state; the
    /// call is not checked at runtime.
    pub fn make_move(&mut self, mv: Move) {
        let keys = zobrist_keys();
        let color = self.side_to_move;
        let opp = color.opposite();
        let ci = color.index();

        self.history.push(HistoryItem {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            zobrist: self.zobrist,
        });
        let prev_castling = self.castling;
        let prev_en_passant = self.en_passant;

        // 1) Piece layout
        self.squares[mv.from.idx()] = Piece::EMPTY;
        match mv.kind {
            MoveKind::Ordinary => self.squares[mv.to.idx()] = mv.piece,
            MoveKind::Promotion => self.squares[mv.to.idx()] = mv.promotion,
            MoveKind::EnPassant => {
                self.squares[mv.to.idx()] = mv.piece;
                self.squares[mv.en_passant_victim().idx()] = Piece::EMPTY;
            }
            MoveKind::CastleShort | MoveKind::CastleLong => {
                let (rook_from, rook_to) = mv.castling_rook_squares();
                self.squares[mv.to.idx()] = mv.piece;
                self.squares[rook_to.idx()] = self.squares[rook_from.idx()];
                self.squares[rook_from.idx()] = Piece::EMPTY;
            }
        }

        // 2) King tracker and castling rights
        match mv.piece.kind() {
            Some(PieceKind::King) => {
                self.king_squares[ci] = mv.to;
                self.castling[ci] = CASTLE_NONE;
            }
            Some(PieceKind::Rook) => self.castling[ci] &= !rook_right_at(color, mv.from),
            _ => {}
        }
        if mv.captured.kind() == Some(PieceKind::Rook) {
            self.castling[opp.index()] &= !rook_right_at(opp, mv.to);
        }

        // 3) En passant target, only right after a double push
        self.en_passant = if mv.is_double_pawn_push() {
            mv.from.offset(color.forward())
        } else {
            None
        };

        // 4) Clocks and side
        self.halfmove_clock += 1;
        if mv.is_capture() || mv.piece.kind() == Some(PieceKind::Pawn) {
            self.halfmove_clock = 0;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }
        self.ply += 1;
        self.side_to_move = opp;

        // 5) Hash: exactly the difference between the two states
        self.zobrist ^= keys.move_delta(mv, color)
            ^ keys.castling_delta(prev_castling, self.castling)
            ^ keys.ep_key(prev_en_passant)
            ^ keys.ep_key(self.en_passant)
            ^ keys.side_to_move;

        #[cfg(all(debug_assertions, feature = "paranoid_hash"))]
        self.assert_hash();
    }

    /// Take back the most recent move.
    ///
    /// On an empty history the board is left untouched and
    /// [`BoardError::NothingToUndo`] is returned.
    pub fn undo_move(&mut self) -> Result<Move, BoardError> {
        match self.unmake() {
            Some(mv) => Ok(mv),
            None => {
                warn!(fen = %self.to_fen(), "undo requested with empty history");
                Err(BoardError::NothingToUndo)
            }
        }
    }

    /// Inverse of `make_move`; `None` if there is nothing to undo.
    pub(crate) fn unmake(&mut self) -> Option<Move> {
        let item = self.history.pop()?;
        let mv = item.mv;
        let color = self.side_to_move.opposite();
        let keys = zobrist_keys();

        // Same deltas as at make time, taken against the post-move state
        self.zobrist ^= keys.move_delta(mv, color)
            ^ keys.castling_delta(self.castling, item.castling)
            ^ keys.ep_key(self.en_passant)
            ^ keys.ep_key(item.en_passant)
            ^ keys.side_to_move;

        self.squares[mv.from.idx()] = mv.piece;
        match mv.kind {
            MoveKind::Ordinary | MoveKind::Promotion => self.squares[mv.to.idx()] = mv.captured,
            MoveKind::EnPassant => {
                self.squares[mv.to.idx()] = Piece::EMPTY;
                self.squares[mv.en_passant_victim().idx()] = mv.captured;
            }
            MoveKind::CastleShort | MoveKind::CastleLong => {
                let (rook_from, rook_to) = mv.castling_rook_squares();
                self.squares[mv.to.idx()] = Piece::EMPTY;
                self.squares[rook_from.idx()] = self.squares[rook_to.idx()];
                self.squares[rook_to.idx()] = Piece::EMPTY;
            }
        }

        if mv.piece.kind() == Some(PieceKind::King) {
            self.king_squares[color.index()] = mv.from;
        }

        self.castling = item.castling;
        self.en_passant = item.en_passant;
        self.halfmove_clock = item.halfmove_clock;
        if color == Color::Black {
            self.fullmove_number -= 1;
        }
        self.ply -= 1;
        self.side_to_move = color;

        debug_assert_eq!(
            self.zobrist, item.zobrist,
            "hash after undo of {mv} differs from the recorded pre-move hash"
        );
        #[cfg(all(debug_assertions, feature = "paranoid_hash"))]
        self.assert_hash();

        Some(mv)
    }

    /// Play `mv`, run `f` on the resulting position, take `mv` back.
    #[inline]
    pub fn with_move<R>(&mut self, mv: Move, f: impl FnOnce(&mut Board) -> R) -> R {
        self.make_move(mv);
        let out = f(self);
        self.unmake();
        out
    }
}

/// True iff `mv` does not leave the mover's king attacked.
#[inline]
fn survives(board: &mut Board, mv: Move) -> bool {
    let mover = board.side_to_move();
    board.with_move(mv, |b| !in_check(b, mover))
}

/// Fill `moves` with the legal moves of the side to move.
///
/// `scratch` receives the pseudo-legal candidates; each one is made, tested
/// for a king left in check, and unmade.
pub fn generate_legal(
    board: &mut Board,
    moves: &mut impl MoveBuffer,
    scratch: &mut impl MoveBuffer,
) {
    generate_pseudo_legal(board, scratch);
    moves.clear();

    for mv in scratch.iter().copied() {
        if survives(board, mv) {
            moves.push(mv);
        }
    }
}

/// Convenience wrapper returning the legal moves as a `Vec`.
pub fn legal_moves(board: &mut Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    let mut scratch = Vec::with_capacity(64);
    generate_legal(board, &mut moves, &mut scratch);
    moves
}

/// Check if a pseudo-legal move is legal (doesn't leave own king in check).
/// For castling moves, this also checks that the king doesn't pass through check.
#[inline]
pub fn is_legal_move(board: &mut Board, mv: Move) -> bool {
    if mv.is_castling() && !is_legal_castling(board, mv) {
        return false;
    }
    survives(board, mv)
}

/// Legal captures, en passant captures and promotions only.
pub fn generate_captures(
    board: &mut Board,
    moves: &mut impl MoveBuffer,
    scratch: &mut impl MoveBuffer,
) {
    generate_pseudo_legal_captures(board, scratch);
    moves.clear();

    for mv in scratch.iter().copied() {
        if survives(board, mv) {
            moves.push(mv);
        }
    }
}
