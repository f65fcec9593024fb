use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;
use std::time::Instant;

use piecoach::board::MoveGenerator;
use piecoach::perft::{divide, perft};
use piecoach::Position;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Perft driver for the coach's move generator")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Print the count below each root move
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut base = Position::parse(&args.fen)?;

    if args.divide {
        let parts = divide(&mut base, args.depth);
        for (mv, n) in &parts {
            println!("{mv}: {n}");
        }
        println!("nodes: {}", parts.iter().map(|(_, n)| n).sum::<u64>());
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let depth = args.depth;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 || depth == 0 {
            perft(&mut base, depth)
        } else {
            base.legal_moves()
                .par_iter()
                .map(|mv| {
                    let mut child = base.clone();
                    child.apply(mv);
                    perft(&mut child, depth - 1)
                })
                .sum()
        };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
