use super::*;
use crate::error::FenError;

/// Standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Replace the whole state with the position described by `fen`.
    ///
    /// The halfmove clock and fullmove number are optional and default to 0
    /// and 1. On error the board is left in an unspecified state and must not
    /// be used.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewFields { found: parts.len() });
        }

        *self = Board::new_empty();

        // 1) Placement, rank 8 down to rank 1
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRank { rank: ranks.len() as u8 });
        }
        let mut kings = [None; 2];
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file: u8 = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) || u32::from(file) + skip > 8 {
                        return Err(FenError::BadRank { rank: rank + 1 });
                    }
                    file += skip as u8;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece(c))?;
                    if file > 7 {
                        return Err(FenError::BadRank { rank: rank + 1 });
                    }
                    let sq = Square::new(rank, file);
                    self.squares[sq.idx()] = piece;
                    if let (Some(color), Some(PieceKind::King)) = (piece.color(), piece.kind()) {
                        kings[color.index()] = Some(sq);
                    }
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadRank { rank: rank + 1 });
            }
        }
        for color in Color::ALL {
            self.king_squares[color.index()] =
                kings[color.index()].ok_or(FenError::MissingKing(color))?;
        }

        // 2) Side to move
        self.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSide(other.to_string())),
        };

        // 3) Castling availability
        if parts[2] != "-" {
            for c in parts[2].chars() {
                let (color, bit) = match c {
                    'K' => (Color::White, CASTLE_SHORT),
                    'Q' => (Color::White, CASTLE_LONG),
                    'k' => (Color::Black, CASTLE_SHORT),
                    'q' => (Color::Black, CASTLE_LONG),
                    other => return Err(FenError::InvalidCastling(other)),
                };
                self.castling[color.index()] |= bit;
            }
        }

        // 4) En passant target
        self.en_passant = match parts[3] {
            "-" => None,
            s => Some(
                s.parse::<Square>()
                    .map_err(|_| FenError::InvalidEnPassant(s.to_string()))?,
            ),
        };

        // 5) + 6) Clocks
        if let Some(s) = parts.get(4) {
            self.halfmove_clock = s
                .parse()
                .map_err(|_| FenError::InvalidCounter(s.to_string()))?;
        }
        if let Some(s) = parts.get(5) {
            self.fullmove_number = s
                .parse()
                .map_err(|_| FenError::InvalidCounter(s.to_string()))?;
        }

        self.refresh_zobrist();
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let piece = self.squares[Square::new(rank, file).idx()];
                if piece.is_empty() {
                    empty += 1;
                    continue;
                }
                if empty > 0 {
                    fen.push(char::from(b'0' + empty));
                    empty = 0;
                }
                fen.push(piece.to_char());
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank != 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let before = fen.len();
        if self.has_short_castle(Color::White) {
            fen.push('K');
        }
        if self.has_long_castle(Color::White) {
            fen.push('Q');
        }
        if self.has_short_castle(Color::Black) {
            fen.push('k');
        }
        if self.has_long_castle(Color::Black) {
            fen.push('q');
        }
        if fen.len() == before {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }
}
