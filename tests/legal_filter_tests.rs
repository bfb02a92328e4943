use ox88::board::Board;
use ox88::moves::execute::{generate_captures, generate_legal, is_legal_move, legal_moves};
use ox88::moves::movegen::generate_pseudo_legal;
use ox88::moves::types::{Move, MoveKind};

fn uci_set(moves: &[Move]) -> Vec<String> {
    let mut v: Vec<String> = moves.iter().map(|m| m.to_uci()).collect();
    v.sort();
    v
}

#[test]
fn start_position_has_twenty_moves() {
    let mut board = Board::new();
    let moves = legal_moves(&mut board);
    assert_eq!(moves.len(), 20);
    let pawn_moves = moves.iter().filter(|m| m.piece.kind() == Some(ox88::PieceKind::Pawn)).count();
    assert_eq!(pawn_moves, 16);
    assert_eq!(board, Board::new());
}

#[test]
fn check_evasions_are_exactly_the_four_king_moves() {
    let mut board: Board = "8/7p/1R2k1p1/3pp1P1/7P/7r/8/5K2 b - - 3 39".parse().unwrap();
    let moves = legal_moves(&mut board);
    assert_eq!(uci_set(&moves), ["e6d7", "e6e7", "e6f5", "e6f7"]);
}

#[test]
fn pinned_piece_cannot_leave_the_pin_line() {
    // Black bishop on e7 is pinned by the rook on e1
    let mut board: Board = "4k3/4b3/8/8/8/8/8/4RK2 b - - 0 1".parse().unwrap();
    let moves = legal_moves(&mut board);
    assert!(moves.iter().all(|m| m.piece.kind() != Some(ox88::PieceKind::Bishop)));
}

#[test]
fn en_passant_exposing_the_king_is_illegal() {
    // e5xd6 would clear the fifth rank between the king on a5 and the rook on h5
    let mut board: Board = "8/8/8/K2pP2r/8/8/8/7k w - d6 0 1".parse().unwrap();
    let mut pseudo = Vec::new();
    generate_pseudo_legal(&board, &mut pseudo);
    let ep = pseudo
        .iter()
        .copied()
        .find(|m| m.kind == MoveKind::EnPassant)
        .expect("pseudo-legal en passant");
    assert!(!is_legal_move(&mut board, ep));
    assert!(legal_moves(&mut board).iter().all(|m| !m.is_en_passant()));
}

#[test]
fn castling_through_or_out_of_check_is_not_allowed() {
    // f1 covered by the bishop on c4: no short castling, long is fine
    let mut board: Board = "r3k2r/8/8/8/2b5/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
    let moves = uci_set(&legal_moves(&mut board));
    assert!(!moves.contains(&"e1g1".to_string()));
    assert!(moves.contains(&"e1c1".to_string()));

    // in check: no castling at all
    let mut board: Board = "r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1".parse().unwrap();
    let moves = legal_moves(&mut board);
    assert!(moves.iter().all(|m| !m.is_castling()));

    // b1 must be empty but may be attacked
    let mut board: Board = "r3k2r/8/8/8/8/8/8/Rn2K2R w KQkq - 0 1".parse().unwrap();
    let moves = uci_set(&legal_moves(&mut board));
    assert!(!moves.contains(&"e1c1".to_string()));
    let mut board: Board = "1r2k2r/8/8/8/8/8/8/R3K2R w KQk - 0 1".parse().unwrap();
    let moves = uci_set(&legal_moves(&mut board));
    assert!(moves.contains(&"e1c1".to_string()));
}

#[test]
fn legal_captures_are_a_subset_of_legal_moves() {
    let mut board: Board = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
        .parse()
        .unwrap();
    let all = legal_moves(&mut board);
    let mut captures = Vec::new();
    let mut scratch = Vec::new();
    generate_captures(&mut board, &mut captures, &mut scratch);

    assert_eq!(captures.len(), 8);
    assert!(captures.iter().all(|m| all.contains(m)));
    assert_eq!(
        all.iter().filter(|m| m.is_capture() || m.is_promotion()).count(),
        captures.len()
    );
}

#[test]
fn generate_legal_reuses_buffers() {
    let mut board = Board::new();
    let mut moves = Vec::new();
    let mut scratch = Vec::new();
    generate_legal(&mut board, &mut moves, &mut scratch);
    generate_legal(&mut board, &mut moves, &mut scratch);
    assert_eq!(moves.len(), 20);
}
