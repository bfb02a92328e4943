use ox88::board::{Board, Color, Piece};
use ox88::error::BoardError;
use ox88::moves::execute::legal_moves;
use ox88::moves::types::{Move, MoveKind};
use ox88::square::Square;

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
];

fn find(board: &mut Board, uci: &str) -> Move {
    legal_moves(board)
        .into_iter()
        .find(|m| m.to_uci() == uci)
        .unwrap_or_else(|| panic!("{uci} not legal in {}", board.to_fen()))
}

#[test]
fn make_then_undo_restores_every_field() {
    for fen in POSITIONS {
        let mut board: Board = fen.parse().unwrap();
        let before = board.clone();
        for mv in legal_moves(&mut board) {
            board.make_move(mv);
            assert_eq!(board.zobrist(), board.compute_zobrist_full(), "{fen} after {mv}");
            assert_eq!(board.last_move(), Some(mv));
            let undone = board.undo_move().unwrap();
            assert_eq!(undone, mv);
            assert_eq!(board, before, "{fen}: {mv} did not round-trip");
        }
    }
}

#[test]
fn two_ply_round_trip() {
    for fen in POSITIONS {
        let mut board: Board = fen.parse().unwrap();
        let before = board.clone();
        for mv in legal_moves(&mut board) {
            board.make_move(mv);
            let after_first = board.clone();
            for reply in legal_moves(&mut board) {
                board.make_move(reply);
                board.undo_move().unwrap();
                assert_eq!(board, after_first, "{fen}: {mv} {reply}");
            }
            board.undo_move().unwrap();
        }
        assert_eq!(board, before);
    }
}

#[test]
fn undo_with_empty_history_is_an_error() {
    let mut board = Board::new();
    let before = board.clone();
    assert_eq!(board.undo_move(), Err(BoardError::NothingToUndo));
    assert_eq!(board, before);

    let e4 = find(&mut board, "e2e4");
    board.make_move(e4);
    assert!(board.undo_move().is_ok());
    assert_eq!(board.undo_move(), Err(BoardError::NothingToUndo));
    assert_eq!(board, before);
}

#[test]
fn en_passant_capture_removes_the_passed_pawn() {
    let mut board: Board = POSITIONS[5].parse().unwrap();
    let exf6 = find(&mut board, "e5f6");
    assert_eq!(exf6.kind, MoveKind::EnPassant);
    board.make_move(exf6);
    assert!(board.is_empty(Square::F5));
    assert_eq!(board.piece_at(Square::F6), Piece::WHITE_PAWN);
    assert_eq!(board.halfmove_clock(), 0);
    board.undo_move().unwrap();
    assert_eq!(board.piece_at(Square::F5), Piece::BLACK_PAWN);
    assert!(board.is_empty(Square::F6));
}

#[test]
fn promotion_and_undo() {
    let mut board: Board = POSITIONS[4].parse().unwrap();
    let before = board.clone();
    let promo = find(&mut board, "d7c8q");
    assert_eq!(promo.captured, Piece::BLACK_BISHOP);
    board.make_move(promo);
    assert_eq!(board.piece_at(Square::C8), Piece::WHITE_QUEEN);
    assert!(board.is_empty(Square::D7));
    board.undo_move().unwrap();
    assert_eq!(board, before);
}

#[test]
fn king_tracker_follows_king_and_castling() {
    let mut board: Board = POSITIONS[1].parse().unwrap();
    let ooo = find(&mut board, "e1c1");
    board.make_move(ooo);
    assert_eq!(board.king_square(Color::White), Square::C1);
    assert_eq!(board.piece_at(Square::D1), Piece::WHITE_ROOK);
    assert!(board.is_empty(Square::A1));

    let kf8 = find(&mut board, "e8f8");
    board.make_move(kf8);
    assert_eq!(board.king_square(Color::Black), Square::F8);
    assert_eq!(board.castling_rights(Color::Black), 0);
    assert_eq!(board.fullmove_number(), 2);

    board.undo_move().unwrap();
    board.undo_move().unwrap();
    assert_eq!(board.king_square(Color::White), Square::E1);
    assert_eq!(board.king_square(Color::Black), Square::E8);
}
