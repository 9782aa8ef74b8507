use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use rkorf::cubie::CubieCube;
use rkorf::error::Error;
use rkorf::heuristic::Heuristic;
#[cfg(feature = "term")]
use rkorf::{facelet::FaceCube, printer::print_facelet};
use rkorf::search::IdaStar;
use rkorf::{moves_from_str, moves_to_str, scramble_with_seed};

/// 3x3x3 Rubik's cube solver using IDA* with pattern databases.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Number of random moves for scrambling.
    #[arg(long, default_value_t = 25)]
    scramble: usize,
    /// Random seed for a reproducible scramble.
    #[arg(long)]
    seed: Option<u64>,
    /// Literal scramble as space-separated moves, e.g. "U R F2".
    #[arg(long)]
    moves: Option<String>,
    /// Maximum number of IDA* threshold iterations.
    #[arg(long, default_value_t = 50)]
    max_iterations: usize,
    /// Directory holding the pattern database cache.
    #[arg(long, default_value = "tables")]
    pdb_dir: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, Error> {
    let scramble = match &args.moves {
        Some(s) => moves_from_str(s)?,
        None => {
            if let Some(seed) = args.seed {
                println!("Scrambling with {} random moves (seed: {seed})", args.scramble);
            } else {
                println!("Scrambling with {} random moves", args.scramble);
            }
            scramble_with_seed(args.scramble, args.seed)
        }
    };
    println!("Scramble: {}", moves_to_str(&scramble));

    let state = CubieCube::default().apply_moves(&scramble);
    #[cfg(feature = "term")]
    if let Ok(face) = FaceCube::try_from(&state) {
        print_facelet(&face);
    }

    if state.is_solved() {
        println!("Cube is already solved!");
        return Ok(ExitCode::SUCCESS);
    }
    if !state.is_valid() {
        println!("Initial state does not satisfy the physical invariants.");
        return Ok(ExitCode::FAILURE);
    }

    let heuristic = Heuristic::load_or_build(&args.pdb_dir)?;
    let mut solver = IdaStar::new(heuristic);

    let start = Instant::now();
    let solution = solver.solve(&state, args.max_iterations);
    let elapsed = start.elapsed().as_secs_f64();

    match solution {
        Some(solution) => {
            println!("Solution found ({} moves):", solution.len());
            println!("  {}", moves_to_str(&solution));
            println!("Nodes expanded: {}", solver.nodes_expanded);
            println!("Time: {elapsed:.2} seconds");
            debug_assert!(state.apply_moves(&solution).is_solved());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!(
                "No solution found within {} iterations.",
                args.max_iterations
            );
            println!("Nodes expanded: {}", solver.nodes_expanded);
            println!("Time: {elapsed:.2} seconds");
            Ok(ExitCode::FAILURE)
        }
    }
}
