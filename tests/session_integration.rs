use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;

use duel_chess::board::{Color, GameConfig, KingState, Move, ProtocolError, Square};
use duel_chess::net::{ChannelTransport, NetError, NetEvent, Session, SessionUpdate, Transport};

/// Host and guest sessions joined by an in-memory link, setup already done.
fn connected_pair(config: GameConfig, seed: u64) -> (Session, ChannelTransport, Session, ChannelTransport) {
    let mut rng = StdRng::seed_from_u64(seed);
    let host = Session::host(config, &mut rng);
    let mut guest = Session::guest();
    let (mut host_link, mut guest_link) = ChannelTransport::pair();

    host_link.send_event(&host.connected().unwrap()).unwrap();
    let update = guest.receive(&mut guest_link).unwrap();
    assert_eq!(
        update,
        SessionUpdate::Initialized {
            color: host.local_color().unwrap().opponent()
        }
    );
    (host, host_link, guest, guest_link)
}

/// Play `text` on `mover` and deliver it to `receiver`, returning both PGN texts.
fn exchange(
    mover: &mut Session,
    mover_link: &mut ChannelTransport,
    receiver: &mut Session,
    receiver_link: &mut ChannelTransport,
    text: &str,
) -> (String, String) {
    let (idx, mv) = mover.board().unwrap().parse_move(text).unwrap();
    let (local_pgn, event) = mover.play_local(idx, &mv).unwrap();
    mover_link.send_event(&event).unwrap();
    match receiver.receive(receiver_link).unwrap() {
        SessionUpdate::MoveApplied { pgn } => (local_pgn, pgn),
        other => panic!("expected a move, got {other:?}"),
    }
}

#[test]
fn full_game_stays_in_sync() {
    let (mut host, mut host_link, mut guest, mut guest_link) =
        connected_pair(GameConfig::default(), 1);

    let script = ["f2f3", "e7e5", "g2g4", "d8h4"];
    for (ply, text) in script.iter().enumerate() {
        let (local, remote) = if ply % 2 == 0 {
            exchange(&mut host, &mut host_link, &mut guest, &mut guest_link, text)
        } else {
            exchange(&mut guest, &mut guest_link, &mut host, &mut host_link, text)
        };
        assert_eq!(local, remote);
    }

    let host_board = host.board().unwrap();
    let guest_board = guest.board().unwrap();
    assert_eq!(host_board.fen(), guest_board.fen());
    assert_eq!(host_board.pgn_text(), "1. f3 e5 2. g4 Qh4#");
    assert_eq!(guest_board.pgn_text(), host_board.pgn_text());
    assert_eq!(host_board.king_state(Color::White), KingState::Checkmate);
    assert!(!host.is_local_turn() || !host_board.is_movable_position());
}

#[test]
fn guest_on_another_thread() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut host = Session::host(GameConfig::default(), &mut rng);
    let (mut host_link, mut guest_link) = ChannelTransport::pair();

    let guest = thread::spawn(move || {
        let mut guest = Session::guest();
        guest.receive(&mut guest_link).unwrap();
        guest.receive(&mut guest_link).unwrap();

        let (idx, mv) = guest.board().unwrap().parse_move("c7c5").unwrap();
        let (_, event) = guest.play_local(idx, &mv).unwrap();
        guest_link.send_event(&event).unwrap();
        guest.board().unwrap().fen()
    });

    host_link.send_event(&host.connected().unwrap()).unwrap();
    let (idx, mv) = host.board().unwrap().parse_move("e2e4").unwrap();
    let (_, event) = host.play_local(idx, &mv).unwrap();
    host_link.send_event(&event).unwrap();

    let update = host.receive(&mut host_link).unwrap();
    assert_eq!(
        update,
        SessionUpdate::MoveApplied {
            pgn: "c5".to_string()
        }
    );
    assert_eq!(guest.join().unwrap(), host.board().unwrap().fen());
}

#[test]
fn forged_move_for_local_piece_is_rejected() {
    let (mut host, mut host_link, _guest, mut guest_link) =
        connected_pair(GameConfig::default(), 3);
    let fen = host.board().unwrap().fen();

    // the guest plays Black but claims to move a white pawn
    let snapshot = host.board().unwrap().snapshot();
    let e2 = snapshot.piece_at(Square::at('E', 2)).unwrap();
    let forged = NetEvent::Move {
        mv: Move::two_square(Square::at('E', 4)),
        piece: snapshot.pieces[e2],
    };
    guest_link.send_event(&forged).unwrap();

    assert!(matches!(
        host.receive(&mut host_link),
        Err(NetError::Protocol(ProtocolError::IllegalMove { .. }))
    ));
    assert_eq!(host.board().unwrap().fen(), fen);
}

#[test]
fn unknown_piece_and_garbage_are_rejected() {
    let (mut host, mut host_link, mut guest, mut guest_link) =
        connected_pair(GameConfig::default(), 4);
    exchange(&mut host, &mut host_link, &mut guest, &mut guest_link, "d2d4");

    let mut ghost = guest.board().unwrap().snapshot().pieces[1];
    ghost.square = Square::at('D', 4);
    guest_link
        .send_event(&NetEvent::Move {
            mv: Move::quiet(Square::at('D', 3)),
            piece: ghost,
        })
        .unwrap();
    assert!(matches!(
        host.receive(&mut host_link),
        Err(NetError::Protocol(ProtocolError::UnknownPiece { .. }))
    ));

    guest_link.send(b"{\"event\":\"draw\"}").unwrap();
    assert!(matches!(
        host.receive(&mut host_link),
        Err(NetError::Protocol(ProtocolError::Malformed { .. }))
    ));

    // the link survives rejected messages
    let (local, remote) = exchange(&mut guest, &mut guest_link, &mut host, &mut host_link, "d7d5");
    assert_eq!((local.as_str(), remote.as_str()), ("d5", "d5"));
}

#[test]
fn remote_move_lands_while_reviewing_history() {
    let (mut host, mut host_link, mut guest, mut guest_link) =
        connected_pair(GameConfig::default(), 5);
    exchange(&mut host, &mut host_link, &mut guest, &mut guest_link, "e2e4");
    exchange(&mut guest, &mut guest_link, &mut host, &mut host_link, "e7e5");
    exchange(&mut host, &mut host_link, &mut guest, &mut guest_link, "g1f3");

    host.board_mut().unwrap().scroll_to_start();
    exchange(&mut guest, &mut guest_link, &mut host, &mut host_link, "b8c6");

    let board = host.board().unwrap();
    assert_eq!(board.cursor(), 4);
    assert!(board.history().is_at_end());
    assert_eq!(board.fen(), guest.board().unwrap().fen());
}

#[test]
fn host_restarts_after_disconnect() {
    let config = GameConfig {
        user_color: None,
        ..GameConfig::default()
    };
    let (mut host, mut host_link, guest, guest_link) = connected_pair(config, 6);
    let host_color = host.local_color().unwrap();
    assert_eq!(guest.local_color(), Some(host_color.opponent()));

    if host_color == Color::White {
        let (idx, mv) = host.board().unwrap().parse_move("e2e4").unwrap();
        host.play_local(idx, &mv).unwrap();
    }

    drop(guest_link);
    let err = host.receive(&mut host_link).unwrap_err();
    assert!(err.is_disconnect());
    host.disconnected();

    let board = host.board().unwrap();
    assert_eq!(board.move_count(), 0);
    assert_eq!(host.local_color(), Some(host_color));
    assert_eq!(
        host.connected(),
        Some(NetEvent::Initialize {
            config: GameConfig {
                user_color: Some(host_color.opponent()),
                ..GameConfig::default()
            }
        })
    );
}
