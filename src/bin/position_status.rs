use std::env;
use std::process;

use duel_chess::board::{Board, KingState};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: position_status [--fen FEN] <move1> <move2> ...");
        process::exit(2);
    }

    let mut moves = args.iter().map(String::as_str).peekable();
    let mut board = if moves.peek() == Some(&"--fen") {
        moves.next();
        let fen = moves.next().unwrap_or_default();
        match Board::from_fen(fen) {
            Ok(board) => board,
            Err(err) => {
                eprintln!("bad FEN: {err}");
                process::exit(2);
            }
        }
    } else {
        Board::default()
    };

    for text in moves {
        let played = board
            .parse_move(text)
            .map_err(|err| err.to_string())
            .and_then(|(idx, mv)| board.apply_local_move(idx, &mv).map_err(|err| err.to_string()));
        if let Err(err) = played {
            eprintln!("{text}: {err}");
            process::exit(1);
        }
    }

    let team = board.team_to_move();
    let snapshot = board.snapshot();
    let legal_moves = snapshot.legal_moves(team);
    println!("side_to_move: {}", team.to_string().to_lowercase());
    println!("legal_moves: {}", legal_moves.len());
    println!(
        "checkmate: {}",
        board.king_state(team) == KingState::Checkmate
    );
    println!("stalemate: {}", board.is_stalemate());
    println!("fen: {}", board.fen());
    println!("pgn: {}", board.pgn_text());
    for (idx, mv) in &legal_moves {
        println!("{}{}", snapshot.pieces[*idx].square, mv.target);
    }
}
