use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::cubie::{CubieCube, Edge};
use crate::error::Error;
use crate::moves::MOVE_TABLE;
use crate::ranker::{base_rank, base_unrank, combination_rank, lehmer_rank, lehmer_unrank};

/// Bumped whenever the index layout or the on-disk format changes; a cached
/// file with another version is rebuilt rather than reinterpreted.
pub const SCHEMA_VERSION: u32 = 1;

/// Above this size the distance file is memory-mapped instead of read onto
/// the heap.
const MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;

pub const CORNER_PDB_NAME: &str = "korf_corner";
pub const EDGE6_A_PDB_NAME: &str = "korf_edge6_a";
pub const EDGE6_B_PDB_NAME: &str = "korf_edge6_b";

/// Sidecar metadata stored next to the raw distance bytes.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct PdbMeta {
    schema_version: u32,
    entries: u64,
    /// Tracked edge cubies for the six-edge databases, `None` for corners.
    tracked: Option<[u8; 6]>,
}

enum Table {
    Heap(Vec<u8>),
    Mapped(Mmap),
}

/// One pattern database: a dense array of optimal abstract-space distances,
/// read-only after construction.
pub struct PatternDb {
    table: Table,
}

impl PatternDb {
    fn from_vec(data: Vec<u8>) -> Self {
        Self {
            table: Table::Heap(data),
        }
    }

    /// An all-zero table of the given size, the degenerate "no information"
    /// bound.
    pub fn zeroed(entries: usize) -> Self {
        Self::from_vec(vec![0; entries])
    }

    fn bytes(&self) -> &[u8] {
        match &self.table {
            Table::Heap(v) => v,
            Table::Mapped(m) => m,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    /// Distance lower bound stored for an abstract rank.
    pub fn get(&self, rank: usize) -> u8 {
        self.bytes()[rank]
    }
}

/// One bit per abstract rank; separates "never discovered" from distance 0.
struct Bitmap {
    words: Vec<u64>,
}

impl Bitmap {
    fn new(bits: usize) -> Self {
        Self {
            words: vec![0; (bits + 63) / 64],
        }
    }

    fn get(&self, i: usize) -> bool {
        self.words[i / 64] >> (i % 64) & 1 != 0
    }

    fn set(&mut self, i: usize) {
        self.words[i / 64] |= 1u64 << (i % 64);
    }
}

/// Rank of the full corner configuration:
/// `lehmer(cp) * 3^7 + base3(co[0..7])`. The eighth orientation is implied
/// by the twist invariant and not encoded.
pub fn corner_rank(state: &CubieCube) -> usize {
    let mut cp = [0u8; 8];
    for i in 0..8 {
        cp[i] = state.cp[i] as u8;
    }
    lehmer_rank(&cp) * N_CORNER_TWIST + base_rank(3, &state.co[..7])
}

fn corner_unrank(rank: usize, cp: &mut [u8; 8], co: &mut [u8; 8]) {
    lehmer_unrank(rank / N_CORNER_TWIST, cp);
    base_unrank(3, rank % N_CORNER_TWIST, &mut co[..7]);
    let twist: u8 = co[..7].iter().map(|&o| o % 3).sum::<u8>() % 3;
    co[7] = (3 - twist) % 3;
}

/// Six tracked edge cubies and the reverse index from cubie to tracked slot.
pub struct Edge6Set {
    cubies: [Edge; 6],
    slot_of: [i8; 12],
}

impl Edge6Set {
    pub const fn new(cubies: [Edge; 6]) -> Self {
        let mut slot_of = [-1i8; 12];
        let mut i = 0;
        while i < 6 {
            slot_of[cubies[i] as usize] = i as i8;
            i += 1;
        }
        Self { cubies, slot_of }
    }

    pub fn tracked(&self) -> [u8; 6] {
        let mut t = [0u8; 6];
        for i in 0..6 {
            t[i] = self.cubies[i] as u8;
        }
        t
    }

    /// Rank of the tracked cubies' placement:
    /// `which_edges * (6! * 64) + perm * 64 + orient_bits`.
    ///
    /// Scanning positions in ascending order yields the occupied positions
    /// already sorted, the relative permutation of tracked slots, and the
    /// orientation bits in one pass.
    pub fn rank(&self, state: &CubieCube) -> usize {
        let mut positions = [0u8; 6];
        let mut perm = [0u8; 6];
        let mut bits = [0u8; 6];
        let mut found = 0;
        for pos in 0..12 {
            let slot = self.slot_of[state.ep[pos] as usize];
            if slot >= 0 {
                positions[found] = pos as u8;
                perm[found] = slot as u8;
                bits[found] = state.eo[pos];
                found += 1;
            }
        }
        debug_assert_eq!(found, 6);
        combination_rank(&positions) * (N_EDGE6_PERM * N_EDGE6_ORIENT)
            + lehmer_rank(&perm) * N_EDGE6_ORIENT
            + base_rank(2, &bits)
    }
}

/// First tracked edge half.
pub static EDGE6_A: Edge6Set = Edge6Set::new(EDGE_SET_A);
/// Second tracked edge half.
pub static EDGE6_B: Edge6Set = Edge6Set::new(EDGE_SET_B);

/// Breadth-first build of the corner database. The frontier stores bare
/// ranks; every node is decoded, moved on the corner action only, and
/// re-ranked.
pub fn build_corner() -> Vec<u8> {
    println!(
        "Building {} ({} entries)...",
        CORNER_PDB_NAME, CORNER_PDB_SIZE
    );
    let mut dist = vec![u8::MAX; CORNER_PDB_SIZE];
    let mut visited = Bitmap::new(CORNER_PDB_SIZE);
    let start = corner_rank(&CubieCube::default());
    dist[start] = 0;
    visited.set(start);
    let mut frontier: Vec<u32> = vec![start as u32];
    let mut depth: u8 = 0;
    let mut done: usize = 1;

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for &rank in &frontier {
            let mut cp = [0u8; 8];
            let mut co = [0u8; 8];
            corner_unrank(rank as usize, &mut cp, &mut co);
            for m in ALL_MOVES {
                let mut cp2 = cp;
                let mut co2 = co;
                MOVE_TABLE
                    .generator(m)
                    .apply_corners_in_place(&mut cp2, &mut co2);
                let r = lehmer_rank(&cp2) * N_CORNER_TWIST + base_rank(3, &co2[..7]);
                if !visited.get(r) {
                    visited.set(r);
                    dist[r] = depth + 1;
                    next.push(r as u32);
                    done += 1;
                }
            }
        }
        depth += 1;
        frontier = next;
        println!("Depth: {} done: {}/{}", depth, done, CORNER_PDB_SIZE);
    }
    dist
}

/// Breadth-first build of a six-edge database. The frontier keeps whole
/// states; per node a single scratch state is moved in place and undone with
/// the inverse generator, so the only copies are the enqueued discoveries.
pub fn build_edge6(name: &str, set: &Edge6Set) -> Vec<u8> {
    println!("Building {} ({} entries)...", name, EDGE6_PDB_SIZE);
    let mut dist = vec![u8::MAX; EDGE6_PDB_SIZE];
    let mut visited = Bitmap::new(EDGE6_PDB_SIZE);
    let solved = CubieCube::default();
    let start = set.rank(&solved);
    dist[start] = 0;
    visited.set(start);
    let mut frontier: Vec<CubieCube> = vec![solved];
    let mut depth: u8 = 0;
    let mut done: usize = 1;

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for state in &frontier {
            let mut scratch = *state;
            for m in ALL_MOVES {
                MOVE_TABLE.generator(m).apply_in_place(&mut scratch);
                let r = set.rank(&scratch);
                if !visited.get(r) {
                    visited.set(r);
                    dist[r] = depth + 1;
                    next.push(scratch);
                    done += 1;
                }
                MOVE_TABLE
                    .generator(m.inverse())
                    .apply_in_place(&mut scratch);
            }
        }
        depth += 1;
        frontier = next;
        println!("Depth: {} done: {}/{}", depth, done, EDGE6_PDB_SIZE);
    }
    dist
}

fn save(dir: &Path, name: &str, data: &[u8], tracked: Option<[u8; 6]>) -> Result<(), Error> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join(format!("{name}.data")), data)?;
    let meta = PdbMeta {
        schema_version: SCHEMA_VERSION,
        entries: data.len() as u64,
        tracked,
    };
    fs::write(dir.join(format!("{name}.meta")), bincode::serialize(&meta)?)?;
    Ok(())
}

fn load(
    dir: &Path,
    name: &str,
    entries: usize,
    tracked: Option<[u8; 6]>,
) -> Result<PatternDb, Error> {
    let data_path = dir.join(format!("{name}.data"));
    let meta_path = dir.join(format!("{name}.meta"));
    if !data_path.exists() || !meta_path.exists() {
        return Err(Error::PdbNotFound(format!(
            "{} has not been built under {}",
            name,
            dir.display()
        )));
    }

    let meta: PdbMeta = bincode::deserialize(&fs::read(&meta_path)?)?;
    let expected = PdbMeta {
        schema_version: SCHEMA_VERSION,
        entries: entries as u64,
        tracked,
    };
    if meta != expected {
        return Err(Error::PdbNotFound(format!(
            "{} metadata does not match this build (found {:?})",
            name, meta
        )));
    }

    let file = File::open(&data_path)?;
    let len = file.metadata()?.len();
    if len != entries as u64 {
        return Err(Error::PdbNotFound(format!(
            "{} holds {} bytes, expected {}",
            data_path.display(),
            len,
            entries
        )));
    }

    let table = if len > MMAP_THRESHOLD {
        // The file is opened read-only and never touched again while mapped.
        let map = unsafe { Mmap::map(&file)? };
        Table::Mapped(map)
    } else {
        Table::Heap(fs::read(&data_path)?)
    };
    Ok(PatternDb { table })
}

pub fn load_corner(dir: &Path) -> Result<PatternDb, Error> {
    load(dir, CORNER_PDB_NAME, CORNER_PDB_SIZE, None)
}

pub fn load_edge6(dir: &Path, name: &str, set: &Edge6Set) -> Result<PatternDb, Error> {
    load(dir, name, EDGE6_PDB_SIZE, Some(set.tracked()))
}

pub fn load_or_build_corner(dir: &Path) -> Result<PatternDb, Error> {
    match load_corner(dir) {
        Ok(db) => Ok(db),
        Err(Error::PdbNotFound(_)) => {
            let data = build_corner();
            save(dir, CORNER_PDB_NAME, &data, None)?;
            Ok(PatternDb::from_vec(data))
        }
        Err(e) => Err(e),
    }
}

pub fn load_or_build_edge6(dir: &Path, name: &str, set: &Edge6Set) -> Result<PatternDb, Error> {
    match load_edge6(dir, name, set) {
        Ok(db) => Ok(db),
        Err(Error::PdbNotFound(_)) => {
            let data = build_edge6(name, set);
            save(dir, name, &data, Some(set.tracked()))?;
            Ok(PatternDb::from_vec(data))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move::*;

    #[test]
    fn test_corner_rank_solved_is_zero() {
        assert_eq!(corner_rank(&CubieCube::default()), 0);
    }

    #[test]
    fn test_corner_rank_roundtrip() {
        let scrambles: [&[crate::moves::Move]; 4] = [
            &[R],
            &[R, U, R3, U3],
            &[F, B2, L3, D, R2, U3],
            &[U, F3, D3, F2, D, B2, D3, R2, U3, F2],
        ];
        for moves in scrambles {
            let state = CubieCube::default().apply_moves(moves);
            let rank = corner_rank(&state);
            assert!(rank < CORNER_PDB_SIZE);
            let mut cp = [0u8; 8];
            let mut co = [0u8; 8];
            corner_unrank(rank, &mut cp, &mut co);
            for i in 0..8 {
                assert_eq!(cp[i], state.cp[i] as u8);
                assert_eq!(co[i], state.co[i]);
            }
        }
    }

    #[test]
    fn test_corner_unrank_restores_twist_invariant() {
        let mut cp = [0u8; 8];
        let mut co = [0u8; 8];
        for rank in (0..CORNER_PDB_SIZE).step_by(CORNER_PDB_SIZE / 1000) {
            corner_unrank(rank, &mut cp, &mut co);
            let twist: u32 = co.iter().map(|&o| o as u32).sum();
            assert_eq!(twist % 3, 0);
            assert_eq!(
                lehmer_rank(&cp) * N_CORNER_TWIST + base_rank(3, &co[..7]),
                rank
            );
        }
    }

    #[test]
    fn test_edge6_rank_solved() {
        let solved = CubieCube::default();
        assert_eq!(EDGE6_A.rank(&solved), 0);
        // the second half occupies the lexicographically last position subset
        assert_eq!(
            EDGE6_B.rank(&solved),
            (N_EDGE_COMB - 1) * N_EDGE6_PERM * N_EDGE6_ORIENT
        );
    }

    #[test]
    fn test_edge6_rank_in_range_and_move_sensitive() {
        let solved = CubieCube::default();
        for m in ALL_MOVES {
            let state = solved.apply_move(m);
            assert!(EDGE6_A.rank(&state) < EDGE6_PDB_SIZE);
            assert!(EDGE6_B.rank(&state) < EDGE6_PDB_SIZE);
        }
        // U only moves cubies of the first half, D only the second;
        // F and R touch both halves
        assert_ne!(EDGE6_A.rank(&solved.apply_move(U)), EDGE6_A.rank(&solved));
        assert_eq!(EDGE6_B.rank(&solved.apply_move(U)), EDGE6_B.rank(&solved));
        assert_eq!(EDGE6_A.rank(&solved.apply_move(D)), EDGE6_A.rank(&solved));
        assert_ne!(EDGE6_B.rank(&solved.apply_move(D)), EDGE6_B.rank(&solved));
        for m in [F, R] {
            assert_ne!(EDGE6_A.rank(&solved.apply_move(m)), EDGE6_A.rank(&solved));
            assert_ne!(EDGE6_B.rank(&solved.apply_move(m)), EDGE6_B.rank(&solved));
        }
    }

    #[test]
    fn test_edge6_rank_undone_by_inverse() {
        let state = CubieCube::default().apply_moves(&[R, U, F3, L2, B, D3]);
        for m in ALL_MOVES {
            let mut s = state;
            MOVE_TABLE.generator(m).apply_in_place(&mut s);
            MOVE_TABLE.generator(m.inverse()).apply_in_place(&mut s);
            assert_eq!(EDGE6_A.rank(&s), EDGE6_A.rank(&state));
            assert_eq!(EDGE6_B.rank(&s), EDGE6_B.rank(&state));
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("rkorf-pdb-roundtrip");
        let data: Vec<u8> = (0u8..64).collect();
        save(&dir, "tiny", &data, Some([0, 1, 2, 3, 4, 5])).unwrap();
        let db = load(&dir, "tiny", 64, Some([0, 1, 2, 3, 4, 5])).unwrap();
        assert_eq!(db.len(), 64);
        assert_eq!(db.get(0), 0);
        assert_eq!(db.get(63), 63);
        // a mismatched shape is rejected, not reinterpreted
        assert!(matches!(
            load(&dir, "tiny", 65, Some([0, 1, 2, 3, 4, 5])),
            Err(Error::PdbNotFound(_))
        ));
        assert!(matches!(
            load(&dir, "tiny", 64, None),
            Err(Error::PdbNotFound(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = std::env::temp_dir().join("rkorf-pdb-missing");
        let _ = fs::remove_dir_all(&dir);
        assert!(matches!(
            load_corner(&dir),
            Err(Error::PdbNotFound(_))
        ));
    }
}
