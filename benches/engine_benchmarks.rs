//! Benchmarks for move generation, check evaluation and history navigation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use duel_chess::board::{Board, Color, Snapshot};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    // Starting position
    let startpos = Snapshot::standard();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(Color::White, black_box(depth)))
        });
    }

    // Complex middlegame position (Kiwipete)
    let kiwipete = Board::from_fen(KIWIPETE).unwrap().snapshot();
    for depth in 1..=2 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(Color::White, black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let positions = [
        (
            "startpos",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ),
        (
            "middlegame",
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        ),
        ("kiwipete", KIWIPETE),
    ];

    for (name, fen) in positions {
        let snapshot = Board::from_fen(fen).unwrap().snapshot();
        group.bench_with_input(BenchmarkId::new("legal", name), &snapshot, |b, snapshot| {
            b.iter(|| black_box(snapshot.legal_moves(Color::White)))
        });
        group.bench_with_input(
            BenchmarkId::new("unfiltered", name),
            &snapshot,
            |b, snapshot| {
                b.iter(|| {
                    snapshot
                        .active(Color::White)
                        .map(|idx| snapshot.generate_moves(idx, false).len())
                        .sum::<usize>()
                })
            },
        );
    }

    group.finish();
}

fn bench_king_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("king_state");

    let positions = [
        ("quiet", Color::White, KIWIPETE),
        (
            "check",
            Color::Black,
            "rnbqkbnr/ppppp1pp/5p2/7Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2",
        ),
        (
            "checkmate",
            Color::Black,
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
        ),
    ];

    for (name, color, fen) in positions {
        let snapshot = Board::from_fen(fen).unwrap().snapshot();
        group.bench_with_input(BenchmarkId::new("position", name), &snapshot, |b, snapshot| {
            b.iter(|| black_box(snapshot.king_state(color)))
        });
    }

    group.finish();
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    let mut board = Board::default();
    for text in [
        "e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6", "e1g1", "f8e7",
    ] {
        let (idx, mv) = board.parse_move(text).unwrap();
        board.apply_local_move(idx, &mv).unwrap();
    }

    group.bench_function("scroll_start_to_end", |b| {
        b.iter(|| {
            board.scroll_to_start();
            board.scroll_to_end();
        })
    });
    group.bench_function("fen", |b| b.iter(|| black_box(board.fen())));

    group.finish();
}

criterion_group!(
    benches,
    bench_perft,
    bench_movegen,
    bench_king_state,
    bench_history
);
criterion_main!(benches);
