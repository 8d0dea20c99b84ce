use std::io::{self, BufRead, Write};
use std::time::Instant;

use threat_board::chess_board::{parse_coordinate_move, ChessField, LegalityMode};
use threat_board::game::{Game, GameConfig, GameSnapshot, SquareView};
use threat_board::perft::divide;
use threat_board::playout::RandomPlayer;

use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

fn cli() -> Command {
    command!()
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Print status and threat counts after every change"
        ).global(true))
        .arg(arg!(
            --strict "Check every move for king safety, not only king moves and check evasions"
        ).global(true))
        .arg(arg!(
            --"hide-threats" "Start with the threat overlay switched off"
        ).global(true))
        .subcommand(Command::new("play").about("Play a game in the terminal"))
        .subcommand(
            Command::new("threats")
                .about("Print the threat map after a sequence of moves")
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves"
                            )
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(
                    --json "Print the full snapshot as JSON"
                )),
        )
        .subcommand(
            Command::new("perft")
                .about("Count leaf nodes per root move")
                .arg(
                    arg!(
                    -x --depth <d> "depth"
                            )
                    .default_value("3")
                    .value_parser(clap::value_parser!(u8)),
                )
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves"
                            )
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("benchmark")
                .about("Plays random games and reports their speed")
                .arg(
                    arg!(
                    -g --games <n> "Number of games"
                            )
                    .default_value("10")
                    .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(
                    -p --plies <n> "Move limit per game"
                            )
                    .default_value("200")
                    .value_parser(clap::value_parser!(usize)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    let debug = matches.get_flag("debug");
    let legality = if matches.get_flag("strict") {
        LegalityMode::Strict
    } else {
        LegalityMode::Reference
    };
    let config = GameConfig::default()
        .with_legality(legality)
        .with_show_threats(!matches.get_flag("hide-threats"));

    let result = match matches.subcommand() {
        Some(("threats", arg_matches)) => threats(config, moves_arg(arg_matches), arg_matches.get_flag("json")),
        Some(("perft", arg_matches)) => {
            let depth = arg_matches.get_one::<u8>("depth").copied().unwrap_or(3);
            perft(config, moves_arg(arg_matches), depth)
        }
        Some(("benchmark", arg_matches)) => {
            let games = arg_matches.get_one::<u64>("games").copied().unwrap_or(10);
            let plies = arg_matches.get_one::<usize>("plies").copied().unwrap_or(200);
            benchmark(config, games, plies);
            Ok(())
        }
        Some(("play", _)) | None => play(config, debug),
        _ => unreachable!("Exhausted list of subcommands"),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn moves_arg(arg_matches: &ArgMatches) -> Vec<String> {
    arg_matches
        .get_many::<String>("moves")
        .unwrap_or_default()
        .filter(|v| !v.is_empty())
        .cloned()
        .collect()
}

fn play_move(game: &mut Game, text: &str) -> Result<(), String> {
    let (from, to) = parse_coordinate_move(text)?;
    game.select_piece(from).map_err(|e| format!("{}: {}", text, e))?;
    if let Err(e) = game.move_piece(to) {
        game.deselect_piece();
        return Err(format!("{}: {}", text, e));
    }
    Ok(())
}

fn play(config: GameConfig, debug: bool) -> Result<(), String> {
    let mut game = Game::with_config(config);
    if debug {
        game.subscribe(|g| {
            eprintln!(
                "[debug] {} to move, check: {}, checkmate: {}, stalemate: {}, hash: {:016x}",
                g.current_player(),
                g.is_check(),
                g.is_checkmate(),
                g.is_stalemate(),
                g.game_state().position_hash
            );
        });
    }

    println!("Commands: e2e4, select e2, deselect, hover e4, moves, threats, toggle, reset, quit");
    print_position(&game);

    let stdin = io::stdin();
    loop {
        print!("{}> ", game.current_player());
        io::stdout().flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(|e| e.to_string())? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        let outcome = match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("quit"), _) | (Some("exit"), _) => break,
            (Some("reset"), _) => {
                game.reset_game();
                Ok(true)
            }
            (Some("deselect"), _) => {
                game.deselect_piece();
                Ok(false)
            }
            (Some("toggle"), _) => {
                let shown = game.toggle_threat_indicators();
                println!("Threat overlay {}", if shown { "on" } else { "off" });
                Ok(false)
            }
            (Some("threats"), _) => {
                println!("{}", threat_table(&game.game_state()));
                Ok(false)
            }
            (Some("moves"), _) => {
                let moves: Vec<String> = game
                    .all_legal_moves()
                    .iter()
                    .map(|(from, to)| format!("{}{}", from, to))
                    .collect();
                println!("{}", moves.join(" "));
                Ok(false)
            }
            (Some("select"), Some(square)) => ChessField::from_algebraic(square).and_then(|field| {
                game.select_piece(field).map_err(|e| e.to_string())?;
                let targets: Vec<String> =
                    game.interaction_state().legal_moves.iter().map(|f| f.as_algebraic()).collect();
                println!("Legal moves: {}", targets.join(" "));
                Ok(false)
            }),
            (Some("hover"), square) => match square.map(ChessField::from_algebraic).transpose() {
                Ok(field) => {
                    game.hover_square(field);
                    print_hover_preview(&game.game_state());
                    Ok(false)
                }
                Err(e) => Err(e),
            },
            (Some(text), None) => {
                if game.selected_piece().is_some() && text.len() == 2 {
                    ChessField::from_algebraic(text)
                        .and_then(|to| game.move_piece(to).map(|_| true).map_err(|e| e.to_string()))
                } else {
                    play_move(&mut game, text).map(|_| true)
                }
            }
            (Some(text), Some(_)) => Err(format!("Unknown command: {}", text)),
        };

        match outcome {
            Ok(true) => {
                print_position(&game);
                if debug {
                    eprintln!("{}", threat_table(&game.game_state()));
                }
            }
            Ok(false) => {}
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}

fn print_position(game: &Game) {
    println!("{}", game.board().render_to_string());
    if let Some(last) = game.last_move() {
        println!("Last move: {}", last.as_algebraic());
    }
    if game.is_checkmate() {
        println!("Checkmate, {} wins", game.current_player().opposite());
    } else if game.is_stalemate() {
        println!("Stalemate");
    } else if game.is_check() {
        println!("{} is in check", game.current_player());
    }
    if game.interaction_state().show_threats {
        println!("{}", threat_table(&game.game_state()));
    }
}

fn print_hover_preview(snapshot: &GameSnapshot) {
    let preview: Vec<String> = snapshot
        .squares
        .iter()
        .flatten()
        .filter_map(|square| square.destination.map(|state| format!("{} ({:?})", square.position, state)))
        .collect();
    if preview.is_empty() {
        println!("No preview");
    } else {
        println!("{}", preview.join(", "));
    }
}

#[derive(Tabled)]
struct ThreatRow {
    rank: u8,
    a: String,
    b: String,
    c: String,
    d: String,
    e: String,
    f: String,
    g: String,
    h: String,
}

impl ThreatRow {
    fn from_squares(rank: u8, squares: &[SquareView; 8]) -> Self {
        let cell = |square: &SquareView| {
            let symbol = square.piece.map(|p| p.symbol).unwrap_or('.');
            format!("{} {}/{}", symbol, square.white_threat_count, square.black_threat_count)
        };
        ThreatRow {
            rank,
            a: cell(&squares[0]),
            b: cell(&squares[1]),
            c: cell(&squares[2]),
            d: cell(&squares[3]),
            e: cell(&squares[4]),
            f: cell(&squares[5]),
            g: cell(&squares[6]),
            h: cell(&squares[7]),
        }
    }
}

fn threat_table(snapshot: &GameSnapshot) -> String {
    let rows = snapshot
        .squares
        .iter()
        .enumerate()
        .map(|(row, squares)| ThreatRow::from_squares(8 - row as u8, squares));
    Table::new(rows).with(Style::modern()).to_string()
}

fn threats(config: GameConfig, moves: Vec<String>, json: bool) -> Result<(), String> {
    let mut game = Game::with_config(config);
    for m in &moves {
        play_move(&mut game, m)?;
    }

    let snapshot = game.game_state();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?);
    } else {
        println!("{}", game.board().render_to_string());
        println!("{}", threat_table(&snapshot));
    }
    Ok(())
}

fn perft(config: GameConfig, moves: Vec<String>, depth: u8) -> Result<(), String> {
    println!("Perft test for moves {:?} with depth {} ({:?})", moves, depth, config.legality);
    let mut game = Game::with_config(config);
    for m in &moves {
        play_move(&mut game, m)?;
    }

    let start_time = Instant::now();
    let result_moves = divide(
        game.board(),
        game.current_player(),
        game.last_move(),
        depth,
        config.legality,
    );

    let mut num_nodes = 0;
    for (m, c) in result_moves {
        println!("{}: {}", m, c);
        num_nodes += c;
    }
    println!("\nNodes searched: {}", num_nodes);
    println!("Time: {:.3}s", start_time.elapsed().as_secs_f32());
    Ok(())
}

#[derive(Tabled)]
struct BenchmarkRow {
    seed: u64,
    plies: usize,
    outcome: String,
    elapsed_time: f32,
    plies_per_sec: f32,
}

fn benchmark(config: GameConfig, games: u64, max_plies: usize) {
    let mut table_rows = Vec::new();
    for seed in 0..games {
        let mut game = Game::with_config(config);
        let start_time = Instant::now();
        let outcome = RandomPlayer::new(seed).play_out(&mut game, max_plies);
        let elapsed = start_time.elapsed();
        let plies = game.move_history().len();
        table_rows.push(BenchmarkRow {
            seed,
            plies,
            outcome: outcome.to_string(),
            elapsed_time: elapsed.as_secs_f32(),
            plies_per_sec: plies as f32 / elapsed.as_secs_f32().max(f32::EPSILON),
        });
    }
    println!("{}", Table::new(table_rows).with(Style::modern()));
}
