mod fen;

use crate::moves::types::Move;
use crate::square::{BOARD_SIZE, NEXT_RANK, Square};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

pub mod castle_bits;
pub mod history;
pub use castle_bits::*;
pub use history::HistoryItem;

pub use fen::START_FEN;

/// Which side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

/// Piece type without color. Discriminants are the magnitude of [`Piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

/// A colored piece or an empty square.
///
/// Sign carries color (positive = White, negative = Black, zero = empty) and
/// magnitude carries the [`PieceKind`], so "same kind, other side" is plain
/// negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece(i8);

/// Core board representation on a 0x88 array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// 128 cells; only indices passing the 0x88 test are ever read.
    pub(crate) squares: [Piece; BOARD_SIZE],
    pub(crate) side_to_move: Color,
    /// Castling rights indexed by `Color::index()`.
    pub(crate) castling: [CastleBits; 2],
    pub(crate) en_passant: Option<Square>,
    /// Halfmove clock (for fifty-move draw rule).
    pub(crate) halfmove_clock: u32,
    /// Fullmove number (starts at 1 and increments after Black's move).
    pub(crate) fullmove_number: u32,
    /// Plies played since construction.
    pub(crate) ply: u32,
    pub(crate) king_squares: [Square; 2],
    pub(crate) zobrist: u64,
    /// Undo log; strictly LIFO with respect to play order.
    pub(crate) history: Vec<HistoryItem>,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// +1 for White, -1 for Black.
    #[inline(always)]
    pub const fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// 0x88 offset of a pawn push for this side.
    #[inline(always)]
    pub const fn forward(self) -> i8 {
        NEXT_RANK * self.sign()
    }

    /// Rank a pawn of this side starts on.
    #[inline(always)]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank a pawn of this side promotes on.
    #[inline(always)]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Decode a 1–6 magnitude.
    #[inline(always)]
    pub(crate) const fn from_magnitude(v: i8) -> Option<Self> {
        match v {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// 0-based slot for key and table lookups.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub fn value(&self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    pub fn attacker_value(&self) -> i32 {
        *self as i32
    }
}

impl Piece {
    pub const EMPTY: Piece = Piece(0);

    pub const WHITE_PAWN: Piece = Piece::new(Color::White, PieceKind::Pawn);
    pub const WHITE_KNIGHT: Piece = Piece::new(Color::White, PieceKind::Knight);
    pub const WHITE_BISHOP: Piece = Piece::new(Color::White, PieceKind::Bishop);
    pub const WHITE_ROOK: Piece = Piece::new(Color::White, PieceKind::Rook);
    pub const WHITE_QUEEN: Piece = Piece::new(Color::White, PieceKind::Queen);
    pub const WHITE_KING: Piece = Piece::new(Color::White, PieceKind::King);
    pub const BLACK_PAWN: Piece = Piece::new(Color::Black, PieceKind::Pawn);
    pub const BLACK_KNIGHT: Piece = Piece::new(Color::Black, PieceKind::Knight);
    pub const BLACK_BISHOP: Piece = Piece::new(Color::Black, PieceKind::Bishop);
    pub const BLACK_ROOK: Piece = Piece::new(Color::Black, PieceKind::Rook);
    pub const BLACK_QUEEN: Piece = Piece::new(Color::Black, PieceKind::Queen);
    pub const BLACK_KING: Piece = Piece::new(Color::Black, PieceKind::King);

    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece(kind as i8 * color.sign())
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn color(self) -> Option<Color> {
        if self.0 > 0 {
            Some(Color::White)
        } else if self.0 < 0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn kind(self) -> Option<PieceKind> {
        PieceKind::from_magnitude(self.0.abs())
    }

    /// True iff the square holds a piece of `color`.
    #[inline(always)]
    pub const fn is_color(self, color: Color) -> bool {
        self.0 * color.sign() > 0
    }

    #[inline(always)]
    pub const fn is(self, color: Color, kind: PieceKind) -> bool {
        self.0 == kind as i8 * color.sign()
    }

    pub fn to_char(self) -> char {
        let c = match self.kind() {
            None => return '.',
            Some(PieceKind::Pawn) => 'p',
            Some(PieceKind::Knight) => 'n',
            Some(PieceKind::Bishop) => 'b',
            Some(PieceKind::Rook) => 'r',
            Some(PieceKind::Queen) => 'q',
            Some(PieceKind::King) => 'k',
        };
        if self.0 > 0 { c.to_ascii_uppercase() } else { c }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }
}

impl Neg for Piece {
    type Output = Piece;

    fn neg(self) -> Piece {
        Piece(-self.0)
    }
}

impl Board {
    /// Create an empty board (no pieces, White to move).
    ///
    /// King squares point at the home squares until a placement sets them;
    /// such a board is only a staging area for the FEN parser.
    pub fn new_empty() -> Self {
        let mut b = Board {
            squares: [Piece::EMPTY; BOARD_SIZE],
            side_to_move: Color::White,
            castling: [CASTLE_NONE; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            ply: 0,
            king_squares: KING_START,
            zobrist: 0,
            history: Vec::new(),
        };
        b.refresh_zobrist();
        b
    }

    /// Standard starting position.
    pub fn new() -> Self {
        let mut b = Board::new_empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            let file = file as u8;
            b.squares[Square::new(0, file).idx()] = Piece::new(Color::White, kind);
            b.squares[Square::new(1, file).idx()] = Piece::WHITE_PAWN;
            b.squares[Square::new(6, file).idx()] = Piece::BLACK_PAWN;
            b.squares[Square::new(7, file).idx()] = Piece::new(Color::Black, kind);
        }
        b.castling = [CASTLE_BOTH; 2];
        b.king_squares = KING_START;
        b.refresh_zobrist();
        b
    }

    /// Recompute from current state and store into `self.zobrist`.
    #[inline]
    pub(crate) fn refresh_zobrist(&mut self) {
        self.zobrist = self.compute_zobrist_full();
    }

    /// Piece on `sq`, `Piece::EMPTY` if none.
    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.squares[sq.idx()]
    }

    #[inline(always)]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.idx()].is_empty()
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub fn castling_rights(&self, color: Color) -> CastleBits {
        self.castling[color.index()]
    }

    #[inline(always)]
    pub fn has_short_castle(&self, color: Color) -> bool {
        self.castling[color.index()] & CASTLE_SHORT != 0
    }

    #[inline(always)]
    pub fn has_long_castle(&self, color: Color) -> bool {
        self.castling[color.index()] & CASTLE_LONG != 0
    }

    #[inline(always)]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline(always)]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline(always)]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline(always)]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Incrementally maintained position hash.
    #[inline(always)]
    pub fn zobrist(&self) -> u64 {
        self.zobrist
    }

    /// Function to get exactly what square the king sits on
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Most recently played move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|item| item.mv)
    }

    /// Number of moves that can still be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Occupied squares of one side together with their piece.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all()
            .map(|sq| (sq, self.squares[sq.idx()]))
            .filter(move |(_, p)| p.is_color(color))
    }

    /// Full recompute from current state. Must match the incremental hash at all times.
    pub fn compute_zobrist_full(&self) -> u64 {
        use crate::hash::zobrist::zobrist_keys;

        let keys = zobrist_keys();
        let mut board_hash: u64 = 0;

        // 1) Pieces by (kind, color, square)
        for sq in Square::all() {
            let piece = self.squares[sq.idx()];
            if !piece.is_empty() {
                board_hash ^= keys.piece_key(piece, sq);
            }
        }

        // 2) Castling state of each side
        for color in Color::ALL {
            board_hash ^= keys.castling[color.index()][self.castling[color.index()] as usize];
        }

        // 3) En passant file
        if let Some(ep) = self.en_passant {
            board_hash ^= keys.ep_file[ep.file() as usize];
        }

        // 4) Side to move (only when Black to move)
        if self.side_to_move == Color::Black {
            board_hash ^= keys.side_to_move;
        }

        board_hash
    }

    /// Counts earlier occurrences of the current position.
    ///
    /// Only the last `halfmove_clock` plies are scanned: a capture or pawn move
    /// makes every older position unreachable.
    pub fn repetitions(&self) -> usize {
        let window = (self.halfmove_clock as usize).min(self.history.len());
        let current = self.zobrist;
        self.history[self.history.len() - window..]
            .iter()
            .filter(|item| item.zobrist == current)
            .count()
    }

    /// True iff the current position already occurred since the last irreversible move.
    pub fn is_repetition(&self) -> bool {
        self.repetitions() >= 1
    }

    /// True iff the current position occurs for at least the third time.
    pub fn is_threefold(&self) -> bool {
        self.repetitions() >= 2
    }

    #[cfg(debug_assertions)]
    #[inline]
    pub fn assert_hash(&self) {
        let full = self.compute_zobrist_full();
        debug_assert_eq!(
            self.zobrist, full,
            "Zobrist parity mismatch: stored={:#018x}, full={:#018x}",
            self.zobrist, full
        );
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl FromStr for Board {
    type Err = crate::error::FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new_empty();
        board.set_fen(s)?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
