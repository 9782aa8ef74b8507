//! # RKorf
//! `RKorf` - crate for solving the 3x3 Rubik's cube optimally with Korf's
//! IDA* algorithm over precomputed pattern databases.

pub mod error;
/// Module containing 3x3 cube constants.
pub mod constants;
/// Module for representing a cube on the facelet level.
pub mod facelet;
/// Module for representing a cube on the cubie level.
pub mod cubie;
/// Module for representing moves and the 18 generator tables.
pub mod moves;
/// Module for the bijective encodings indexing the pattern databases.
pub mod ranker;
/// Module for building, persisting and querying pattern databases.
pub mod pdb;
/// Module for the max-combined database heuristic.
pub mod heuristic;
/// Module for the IDA* solver.
pub mod search;
#[cfg(feature = "term")]
/// Module for printing a facelet cube on the terminal with color.
pub mod printer;

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use constants::ALL_MOVES;
use error::Error;
use moves::Move;

/// Generate a random scramble of `n` moves with no two consecutive turns of
/// the same face. A seed gives a reproducible sequence.
pub fn scramble_with_seed(n: usize, seed: Option<u64>) -> Vec<Move> {
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut r = Vec::with_capacity(n);
    let mut prev_face = usize::MAX;
    while r.len() < n {
        let m = ALL_MOVES[rng.gen_range(0..ALL_MOVES.len())];
        if m.face() == prev_face {
            continue;
        }
        prev_face = m.face();
        r.push(m);
    }
    r
}

/// Generate a random 25-move scramble.
pub fn scramble() -> Vec<Move> {
    scramble_with_seed(25, None)
}

/// Parse a whitespace-separated scramble such as `"U R' F2"`.
pub fn moves_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace().map(Move::from_str).collect()
}

/// Render a move sequence in the whitespace notation.
pub fn moves_to_str(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
