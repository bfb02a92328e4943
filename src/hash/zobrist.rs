// src/hash/zobrist.rs

use crate::board::{Color, Piece, PieceKind};
use crate::moves::types::{Move, MoveKind};
use crate::square::{BOARD_SIZE, Square};
use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};

#[cfg(feature = "deterministic_zobrist")]
const ZOBRIST_SEED: u64 = 0x9E37_79B9_AAAC_5C87;

fn make_zobrist_rng() -> StdRng {
    #[cfg(feature = "deterministic_zobrist")]
    {
        StdRng::seed_from_u64(ZOBRIST_SEED)
    }
    #[cfg(not(feature = "deterministic_zobrist"))]
    {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        StdRng::from_seed(seed)
    }
}

pub struct ZobristKeys {
    /// [kind][color][0x88 square]; off-board slots are never read.
    pub piece: [[[u64; BOARD_SIZE]; 2]; 6],
    pub side_to_move: u64,
    /// [color][castling bits 0..4]; one key per rights state of a side.
    pub castling: [[u64; 4]; 2],
    /// a..h => 0..7
    pub ep_file: [u64; 8],
}

impl ZobristKeys {
    /// Key of a non-empty `piece` standing on `sq`.
    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        match (piece.kind(), piece.color()) {
            (Some(kind), Some(color)) => self.piece[kind.index()][color.index()][sq.idx()],
            _ => 0,
        }
    }

    /// XOR of the piece keys for every square `mv` changes, as played by `color`.
    ///
    /// Applying the same delta again undoes it, so make and undo share it.
    pub fn move_delta(&self, mv: Move, color: Color) -> u64 {
        let mut delta = self.piece_key(mv.piece, mv.from);

        match mv.kind {
            MoveKind::Ordinary => {
                delta ^= self.piece_key(mv.piece, mv.to);
                delta ^= self.piece_key(mv.captured, mv.to);
            }
            MoveKind::Promotion => {
                delta ^= self.piece_key(mv.promotion, mv.to);
                delta ^= self.piece_key(mv.captured, mv.to);
            }
            MoveKind::EnPassant => {
                delta ^= self.piece_key(mv.piece, mv.to);
                delta ^= self.piece_key(mv.captured, mv.en_passant_victim());
            }
            MoveKind::CastleShort | MoveKind::CastleLong => {
                delta ^= self.piece_key(mv.piece, mv.to);
                let (rook_from, rook_to) = mv.castling_rook_squares();
                let rook = Piece::new(color, PieceKind::Rook);
                delta ^= self.piece_key(rook, rook_from) ^ self.piece_key(rook, rook_to);
            }
        }
        delta
    }

    /// Key difference between two castling states of both sides.
    #[inline]
    pub fn castling_delta(&self, old: [u8; 2], new_: [u8; 2]) -> u64 {
        let mut delta = 0;
        for color in Color::ALL {
            let ci = color.index();
            if old[ci] != new_[ci] {
                delta ^= self.castling[ci][old[ci] as usize] ^ self.castling[ci][new_[ci] as usize];
            }
        }
        delta
    }

    /// Key contributed by an en passant target, 0 if none.
    #[inline(always)]
    pub fn ep_key(&self, ep: Option<Square>) -> u64 {
        ep.map_or(0, |sq| self.ep_file[sq.file() as usize])
    }
}

// Global keys, initialized on first use.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| generate_zobrist_keys_with_rng(make_zobrist_rng()))
}

fn generate_zobrist_keys_with_rng(mut rng: StdRng) -> ZobristKeys {
    #[inline]
    fn non_zero(r: &mut StdRng) -> u64 {
        // avoid zero keys to reduce degenerate collisions
        let mut v = r.next_u64();
        while v == 0 {
            v = r.next_u64();
        }
        v
    }

    let mut keys = ZobristKeys {
        piece: [[[0u64; BOARD_SIZE]; 2]; 6],
        side_to_move: 0,
        castling: [[0u64; 4]; 2],
        ep_file: [0u64; 8],
    };

    for kind in PieceKind::ALL {
        for color in Color::ALL {
            for sq in Square::all() {
                keys.piece[kind.index()][color.index()][sq.idx()] = non_zero(&mut rng);
            }
        }
    }

    for side in keys.castling.iter_mut() {
        for key in side.iter_mut() {
            *key = non_zero(&mut rng);
        }
    }

    for key in keys.ep_file.iter_mut() {
        *key = non_zero(&mut rng);
    }

    keys.side_to_move = non_zero(&mut rng);

    keys
}
