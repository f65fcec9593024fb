use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use cozy_chess::Color;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use piecoach::board::MoveGenerator;
use piecoach::chess_openings::Opening;
use piecoach::config::{Difficulty, EngineConfig};
use piecoach::protocol::CoachProtocol;
use piecoach::session::{Mode, Session};
use piecoach::{Engine, EngineMove, Position};

#[derive(Parser, Debug)]
#[command(author, version, about = "Chess coach: plays, hints and explains moves", long_about = None)]
struct Cli {
    /// Engine strength: easy, medium or hard
    #[arg(long, global = true)]
    difficulty: Option<Difficulty>,

    /// Seed for the easy tier's random choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Abandon a search that takes longer than this
    #[arg(long, global = true)]
    movetime_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct PositionArg {
    /// FEN string or "startpos"
    #[arg(long, default_value = "startpos")]
    fen: String,
    /// Moves played from the position, SAN or coordinate notation
    #[arg(long, num_args = 1.., value_delimiter = ' ')]
    moves: Vec<String>,
}

impl PositionArg {
    fn load(&self) -> Result<Position> {
        let mut pos = Position::parse(&self.fen)?;
        pos.play_line(&self.moves)?;
        Ok(pos)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the engine's move with its explanation
    Best(PositionArg),
    /// Suggest a move for the side to move
    Hint(PositionArg),
    /// Learning-mode feedback on the position
    Analyze(PositionArg),
    /// Name the opening on the board, if known
    Opening(PositionArg),
    /// Tags for one move
    Classify {
        #[command(flatten)]
        position: PositionArg,
        /// Move in SAN or coordinate notation
        #[arg(value_name = "MOVE")]
        mv: String,
    },
    /// Analyse a file of FENs (one per line), writing JSON lines to stdout
    Batch {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Number of worker threads
        #[arg(long, default_value_t = 1)]
        threads: usize,
    },
    /// Play a game on the terminal
    Play {
        /// Your colour: 'w' or 'b'
        #[arg(long, default_value = "w")]
        color: String,
        /// computer or learning
        #[arg(long, default_value = "computer")]
        mode: Mode,
    },
    /// Speak the line protocol on stdin/stdout
    Protocol,
}

#[derive(Serialize)]
struct BatchRecord {
    fen: String,
    best: Option<EngineMove>,
    opening: Option<&'static Opening>,
    analysis: Vec<String>,
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn print_move(label: &str, found: Option<EngineMove>) {
    match found {
        Some(m) => println!("{label}: {} ({}) - {}", m.notation, m.uci, m.explanation),
        None => println!("{label}: no move available"),
    }
}

fn run_batch(cfg: &EngineConfig, file: &Path, threads: usize) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let fens: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#')).collect();

    let pb = ProgressBar::new(fens.len() as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {elapsed_precise}")?);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads.max(1)).build()?;
    let records: Vec<Result<BatchRecord>> = pool.install(|| {
        fens.par_iter()
            .enumerate()
            .map(|(i, fen)| -> Result<BatchRecord> {
                let mut pos = Position::from_fen(fen)?;
                let mut engine = match cfg.seed {
                    Some(seed) => Engine::from_config(&EngineConfig { seed: Some(seed.wrapping_add(i as u64)), ..cfg.clone() }),
                    None => Engine::from_config(cfg),
                };
                let record = BatchRecord {
                    fen: fen.to_string(),
                    best: engine.best_move(&mut pos),
                    opening: engine.detect_opening(&pos),
                    analysis: engine.analyze_position(&mut pos),
                };
                pb.inc(1);
                Ok(record)
            })
            .collect()
    });
    pb.finish_and_clear();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in records {
        match record {
            Ok(r) => writeln!(out, "{}", serde_json::to_string(&r)?)?,
            Err(e) => log::warn!("skipping line: {e}"),
        }
    }
    Ok(())
}

fn run_play(engine: Engine, player: Color, mode: Mode) -> Result<()> {
    let mut session = Session::new(engine, player, mode);
    let persona = session.engine().difficulty().persona();
    println!("{} {} \"{}\" ({}) - {}", persona.emoji, persona.name, persona.nickname, persona.era, persona.style);
    println!("Commands: a move (e4, Nf3, e2e4), hint, undo, new, quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let status = session.status();
        println!("\n{}", session.position().fen());
        println!("{status}");
        if status.is_over() {
            break;
        }

        if !session.is_players_turn() {
            match session.play_engine_move()? {
                Some(reply) => println!("{} plays {} - {}", persona.name, reply.notation, reply.explanation),
                None => break,
            }
            continue;
        }

        if session.mode() == Mode::Learning {
            for line in session.learning_feedback()? {
                println!("  {line}");
            }
        }
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let input = line?;
        match input.trim() {
            "quit" => break,
            "hint" => match session.hint() {
                Ok(found) => print_move("Hint", found),
                Err(e) => println!("{e}"),
            },
            "undo" => match session.undo() {
                Ok(taken) => println!("Took back {}", taken.join(", ")),
                Err(e) => println!("{e}"),
            },
            "new" => session.new_game(),
            text => match session.play_player_move(text) {
                Ok(report) => {
                    for line in &report.feedback {
                        println!("  {line}");
                    }
                }
                Err(e) => println!("{e}"),
            },
        }
    }

    if let Some(opening) = session.current_opening() {
        println!("Opening: {}", opening.name);
    }
    println!("Moves: {}", session.history().join(" "));
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut cfg = EngineConfig::default();
    if let Some(d) = cli.difficulty { cfg.difficulty = d; }
    if cli.seed.is_some() { cfg.seed = cli.seed; }
    if cli.movetime_ms.is_some() { cfg.movetime_ms = cli.movetime_ms; }
    let cfg = cfg.with_env_overrides()?;
    let mut engine = Engine::from_config(&cfg);

    match cli.command {
        Command::Best(p) => print_move("Best move", engine.best_move(&mut p.load()?)),
        Command::Hint(p) => print_move("Hint", engine.hint(&mut p.load()?)),
        Command::Analyze(p) => {
            for line in engine.analyze_position(&mut p.load()?) {
                println!("{line}");
            }
        }
        Command::Opening(p) => match engine.detect_opening(&p.load()?) {
            Some(o) => println!("{}: {}", o.name, o.description),
            None => println!("No known opening"),
        },
        Command::Classify { position, mv } => {
            let pos = position.load()?;
            let mv = pos.find_move(&mv)?;
            let tags = engine.classify(&pos, &mv);
            if tags.is_empty() {
                println!("{}: no tags", pos.san(&mv));
            }
            for tag in tags {
                println!("{tag}");
            }
        }
        Command::Batch { file, threads } => run_batch(&cfg, &file, threads)?,
        Command::Play { color, mode } => run_play(engine, parse_color(&color)?, mode)?,
        Command::Protocol => {
            let stdin = io::stdin();
            CoachProtocol::new(engine).run_loop(stdin.lock(), io::stdout())?;
        }
    }
    Ok(())
}
