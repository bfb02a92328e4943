use indicatif::{ProgressBar, ProgressStyle};
use ox88::board::{Board, START_FEN};
use ox88::logger::init_logging;
use ox88::moves::perft::{perft, perft_breakdown, perft_divide};
use ox88::search::search::{SearchLimits, mate_in, search};
use ox88::status::position_status;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::{Duration, Instant};

const LOG_PATH: &str = "logs/ox88.log";

fn usage() {
    eprintln!("usage:");
    eprintln!("  ox88 search [--depth N] [--movetime MS] [FEN]");
    eprintln!("  ox88 perft <depth> [FEN]");
    eprintln!("  ox88 divide <depth> [FEN]");
    eprintln!("  ox88 stats <depth> [FEN]");
}

/// Remaining words joined back into a FEN, start position if none.
fn parse_board(words: &[String]) -> Result<Board, String> {
    let fen = if words.is_empty() {
        START_FEN.to_string()
    } else {
        words.join(" ")
    };
    Board::from_str(&fen).map_err(|e| format!("bad FEN '{fen}': {e}"))
}

fn parse_depth(arg: Option<&String>) -> Result<u32, String> {
    let raw = arg.ok_or("missing depth")?;
    raw.parse().map_err(|_| format!("bad depth '{raw}'"))
}

fn handle_search(args: &[String]) -> Result<(), String> {
    let mut limits = SearchLimits::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--depth" => {
                limits.max_depth = parse_depth(args.get(i + 1))?;
                i += 2;
            }
            "--movetime" => {
                let raw = args.get(i + 1).ok_or("missing movetime")?;
                let ms: u64 = raw.parse().map_err(|_| format!("bad movetime '{raw}'"))?;
                limits.time_limit = Some(Duration::from_millis(ms));
                i += 2;
            }
            _ => break,
        }
    }

    let mut board = parse_board(&args[i..])?;
    println!("status: {:?}", position_status(&mut board));

    let start = Instant::now();
    let result = search(&mut board, limits).map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();

    let score = match mate_in(result.score) {
        Some(n) => format!("mate {n}"),
        None => format!("cp {}", result.score),
    };
    let pv: Vec<String> = result.pv.iter().map(|m| m.to_uci()).collect();
    println!(
        "depth {} score {} nodes {} time {}ms pv {}",
        result.depth,
        score,
        result.nodes,
        elapsed.as_millis(),
        pv.join(" ")
    );
    println!("bestmove {}", result.best_move);
    Ok(())
}

fn handle_perft(args: &[String]) -> Result<(), String> {
    let depth = parse_depth(args.first())?;
    let mut board = parse_board(&args[1..])?;

    for d in 1..=depth {
        let start = Instant::now();
        let nodes = perft(&mut board, d);
        let secs = start.elapsed().as_secs_f64();
        let nps = if secs > 0.0 { nodes as f64 / secs } else { 0.0 };
        println!("perft({d}) = {nodes}  [{secs:.3}s, {nps:.0} nps]");
    }
    Ok(())
}

fn handle_divide(args: &[String]) -> Result<(), String> {
    let depth = parse_depth(args.first())?;
    let mut board = parse_board(&args[1..])?;

    let split = perft_divide(&mut board, depth);
    let mut total: u64 = 0;
    for (mv, count) in &split {
        println!("{mv}: {count}");
        total += count;
    }
    println!("Total: {total}");
    Ok(())
}

fn handle_stats(args: &[String]) -> Result<(), String> {
    let depth = parse_depth(args.first())?;
    let mut board = parse_board(&args[1..])?;

    let bar = ProgressBar::new(depth as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} depth {msg}") {
        bar.set_style(style);
    }

    let mut rows = Vec::with_capacity(depth as usize);
    for d in 1..=depth {
        bar.set_message(d.to_string());
        let start = Instant::now();
        let pc = perft_breakdown(&mut board, d);
        rows.push((d, pc, start.elapsed()));
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!("D        Nodes    Capt.   E.p.   Cast.   Prom.  Checks   Mates    Time");
    for (d, pc, elapsed) in rows {
        println!(
            "{d} {:>12} {:>8} {:>6} {:>7} {:>7} {:>7} {:>7} {:>6.2}s",
            pc.nodes,
            pc.captures,
            pc.ep_captures,
            pc.castles,
            pc.promotions,
            pc.checks,
            pc.checkmates,
            elapsed.as_secs_f64()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = init_logging(LOG_PATH, "info") {
        eprintln!("logging disabled: {e}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        usage();
        return ExitCode::FAILURE;
    };

    let rest = &args[1..];
    let outcome = match command.as_str() {
        "search" => handle_search(rest),
        "perft" => handle_perft(rest),
        "divide" => handle_divide(rest),
        "stats" => handle_stats(rest),
        _ => {
            usage();
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
