// tests/zobrist_hash_tests.rs
use ox88::board::Board;
use ox88::moves::execute::legal_moves;
use ox88::moves::types::Move;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn find(board: &mut Board, uci: &str) -> Move {
    legal_moves(board)
        .into_iter()
        .find(|m| m.to_uci() == uci)
        .unwrap_or_else(|| panic!("{uci} not legal in {}", board.to_fen()))
}

fn play(board: &mut Board, line: &[&str]) {
    for uci in line {
        let mv = find(board, uci);
        board.make_move(mv);
    }
}

#[test]
fn zobrist_start_hash_stable() {
    let b = Board::new();
    assert_eq!(b.zobrist(), b.compute_zobrist_full());
}

#[test]
fn zobrist_fen_recompute_stable() {
    let fens = &[
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let b: Board = fen.parse().unwrap();
        assert_eq!(b.zobrist(), b.compute_zobrist_full(), "{fen}");
    }
}

#[test]
fn every_state_component_feeds_the_hash() {
    let base: Board = "r3k2r/8/8/8/4P3/8/8/R3K2R b KQkq e3 0 1".parse().unwrap();
    let other_side: Board = "r3k2r/8/8/8/4P3/8/8/R3K2R w KQkq e3 0 1".parse().unwrap();
    let no_ep: Board = "r3k2r/8/8/8/4P3/8/8/R3K2R b KQkq - 0 1".parse().unwrap();
    let fewer_rights: Board = "r3k2r/8/8/8/4P3/8/8/R3K2R b Kkq e3 0 1".parse().unwrap();
    let clocks: Board = "r3k2r/8/8/8/4P3/8/8/R3K2R b KQkq e3 7 30".parse().unwrap();

    assert_ne!(base.zobrist(), other_side.zobrist());
    assert_ne!(base.zobrist(), no_ep.zobrist());
    assert_ne!(base.zobrist(), fewer_rights.zobrist());
    // clocks are not part of the position identity
    assert_eq!(base.zobrist(), clocks.zobrist());
}

#[test]
fn transpositions_hash_equal() {
    let mut a = Board::new();
    play(&mut a, &["e2e3", "e7e6", "d2d3"]);
    let mut b = Board::new();
    play(&mut b, &["d2d3", "e7e6", "e2e3"]);
    assert_eq!(a.zobrist(), b.zobrist());
    assert_eq!(a.zobrist(), a.compute_zobrist_full());
}

#[test]
fn knight_tour_returns_to_start_hash() {
    let mut b = Board::new();
    let start = b.zobrist();
    play(&mut b, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert_eq!(b.zobrist(), start);
    assert_eq!(b.repetitions(), 1);
}

#[test]
fn random_walks_keep_incremental_equal_to_full() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ];

    for (seed, fen) in fens.iter().enumerate() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE + seed as u64);
        let mut board: Board = fen.parse().unwrap();
        let start = board.clone();
        let mut hashes = vec![board.zobrist()];

        for _ in 0..200 {
            let moves = legal_moves(&mut board);
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.random_range(0..moves.len())];
            board.make_move(mv);
            assert_eq!(
                board.zobrist(),
                board.compute_zobrist_full(),
                "after {mv} in {}",
                board.to_fen()
            );
            hashes.push(board.zobrist());
        }

        // unwind and compare against the hashes recorded on the way in
        hashes.pop();
        while let Ok(mv) = board.undo_move() {
            let expected = hashes.pop().unwrap();
            assert_eq!(board.zobrist(), expected, "undo of {mv}");
            assert_eq!(board.zobrist(), board.compute_zobrist_full());
        }
        assert!(hashes.is_empty());
        assert_eq!(board, start);
    }
}
