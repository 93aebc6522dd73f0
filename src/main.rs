use std::env;
use std::io::{self, BufRead, Write};
use std::net::TcpListener;
use std::process;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{error, info, warn, LevelFilter, Log, Metadata, Record};

use duel_chess::board::{BoardEvent, Color, GameConfig, TimeControl, DEFAULT_PORT};
use duel_chess::net::{NetError, Session, SessionUpdate, TcpTransport, Transport};

const USAGE: &str = "usage:
  duel_chess host [port] [--color white|black|random] [--timer SECS INC]
  duel_chess join <host:port>";

const HELP: &str = "commands:
  e2e4      play a move (coordinates, optional promotion letter q)
  moves     list legal moves of the side to move
  board     print the board
  fen       print the FEN of the shown position
  pgn       print the game so far
  goto N    show the position after N plies
  end       show the latest position
  resign    give up the game
  quit      leave";

/// Writes log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = env::var("DUEL_CHESS_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

enum Mode {
    Host { port: u16, config: GameConfig },
    Join { addr: String },
}

fn parse_args(args: &[String]) -> Result<Mode, String> {
    let mut args = args.iter().map(String::as_str);
    match args.next() {
        Some("host") => {
            let mut port = DEFAULT_PORT;
            let mut config = GameConfig::default();
            while let Some(arg) = args.next() {
                match arg {
                    "--color" => {
                        config.user_color = match args.next() {
                            Some("white") => Some(Color::White),
                            Some("black") => Some(Color::Black),
                            Some("random") => None,
                            other => return Err(format!("bad color: {other:?}")),
                        };
                    }
                    "--timer" => {
                        let mut number = |name: &str| {
                            args.next()
                                .and_then(|v| v.parse::<u32>().ok())
                                .ok_or_else(|| format!("--timer needs {name}"))
                        };
                        config.time_left_secs = number("SECS")?;
                        config.increment_secs = number("INC")?;
                        config.time_control = TimeControl::Timer;
                    }
                    other => {
                        port = other.parse().map_err(|_| format!("bad port: {other}"))?;
                    }
                }
            }
            Ok(Mode::Host { port, config })
        }
        Some("join") => {
            let addr = args.next().ok_or("join needs an address")?.to_string();
            Ok(Mode::Join { addr })
        }
        _ => Err(USAGE.to_string()),
    }
}

enum Input {
    Line(String),
    Net(Result<Vec<u8>, NetError>),
}

/// Forward stdin lines until it closes.
fn spawn_stdin(tx: Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::Line(line)).is_err() {
                break;
            }
        }
        let _ = tx.send(Input::Line("quit".to_string()));
    });
}

/// Forward payloads from the peer until the connection drops.
fn spawn_reader(mut transport: TcpTransport, tx: Sender<Input>) {
    thread::spawn(move || loop {
        let result = transport.recv();
        let done = result.is_err();
        if tx.send(Input::Net(result)).is_err() || done {
            break;
        }
    });
}

fn attach_printer(session: &mut Session) {
    if let Some(board) = session.board_mut() {
        board.add_observer(Box::new(|event| {
            if let BoardEvent::GameOver(reason) = event {
                println!("game over: {reason}");
            }
        }));
    }
}

fn show(session: &Session) {
    if let Some(board) = session.board() {
        println!("{board}");
        println!("{} to move", board.team_to_move());
    }
}

enum Outcome {
    Quit,
    Disconnected,
}

/// Run one game over `transport` until the user quits or the peer leaves.
fn play(session: &mut Session, transport: &mut TcpTransport, rx: &Receiver<Input>) -> Outcome {
    if let Some(event) = session.connected() {
        if let Err(err) = transport.send_event(&event) {
            error!("could not send setup: {err}");
            return Outcome::Disconnected;
        }
        attach_printer(session);
        println!("you play {}", session.local_color().unwrap_or(Color::White));
        show(session);
    }

    for input in rx {
        match input {
            Input::Net(Ok(payload)) => match session.handle_payload(&payload) {
                Ok(SessionUpdate::Initialized { color }) => {
                    attach_printer(session);
                    println!("you play {color}");
                    show(session);
                }
                Ok(SessionUpdate::MoveApplied { pgn }) => {
                    println!("peer played {pgn}");
                    show(session);
                }
                Err(err) => println!("rejected message from peer: {err}"),
            },
            Input::Net(Err(err)) => {
                if !err.is_disconnect() {
                    warn!("connection error: {err}");
                }
                return Outcome::Disconnected;
            }
            Input::Line(line) => {
                if !command(session, transport, line.trim()) {
                    let _ = transport.shutdown();
                    return Outcome::Quit;
                }
            }
        }
        let _ = io::stdout().flush();
    }
    Outcome::Quit
}

/// Handle one command line. Returns false on quit.
fn command(session: &mut Session, transport: &mut TcpTransport, line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&first) = parts.first() else {
        return true;
    };
    if first == "quit" {
        return false;
    }
    if first == "help" {
        println!("{HELP}");
        return true;
    }

    let Some(color) = session.local_color() else {
        println!("waiting for the host to set up the game");
        return true;
    };
    let Some(board) = session.board_mut() else {
        return true;
    };

    match first {
        "board" => show(session),
        "fen" => println!("{}", board.fen()),
        "pgn" => println!("{}", board.pgn_text()),
        "moves" => {
            let snapshot = board.snapshot();
            let list: Vec<String> = snapshot
                .legal_moves(board.team_to_move())
                .iter()
                .map(|(idx, mv)| format!("{}{}", snapshot.pieces[*idx].square, mv.target))
                .collect();
            println!("{}", list.join(" "));
        }
        "goto" => match parts.get(1).and_then(|n| n.parse::<usize>().ok()) {
            Some(index) => match board.scroll_to_move(index) {
                Ok(()) => show(session),
                Err(err) => println!("{err}"),
            },
            None => println!("goto needs a ply number"),
        },
        "end" => {
            board.scroll_to_end();
            show(session);
        }
        "resign" => board.resign(color),
        text => match board.parse_move(text) {
            Ok((idx, mv)) => match session.play_local(idx, &mv) {
                Ok((pgn, event)) => {
                    println!("you played {pgn}");
                    if let Err(err) = transport.send_event(&event) {
                        error!("could not send move: {err}");
                    }
                    show(session);
                }
                Err(err) => println!("{err}"),
            },
            Err(err) => println!("{err}"),
        },
    }
    true
}

fn run(mode: Mode) -> Result<(), NetError> {
    let (tx, rx) = mpsc::channel();
    spawn_stdin(tx.clone());

    match mode {
        Mode::Host { port, config } => {
            let mut session = Session::host(config, &mut rand::thread_rng());
            let listener = TcpListener::bind(("0.0.0.0", port))?;
            info!("waiting for a guest on port {port}");
            loop {
                let mut transport = TcpTransport::accept(&listener)?;
                spawn_reader(transport.try_clone()?, tx.clone());
                match play(&mut session, &mut transport, &rx) {
                    Outcome::Quit => return Ok(()),
                    Outcome::Disconnected => {
                        println!("guest left, waiting for a new one");
                        session.disconnected();
                    }
                }
            }
        }
        Mode::Join { addr } => {
            let mut session = Session::guest();
            let mut transport = TcpTransport::connect(addr.as_str())?;
            spawn_reader(transport.try_clone()?, tx);
            if let Outcome::Disconnected = play(&mut session, &mut transport, &rx) {
                println!("host left");
                session.disconnected();
            }
            Ok(())
        }
    }
}

fn main() {
    init_logging();
    let args: Vec<String> = env::args().skip(1).collect();
    let mode = match parse_args(&args) {
        Ok(mode) => mode,
        Err(msg) => {
            eprintln!("{msg}");
            process::exit(2);
        }
    };
    if let Err(err) = run(mode) {
        error!("{err}");
        process::exit(1);
    }
}
