use std::path::Path;

use crate::cubie::CubieCube;
use crate::error::Error;
use crate::pdb::{
    self, corner_rank, PatternDb, EDGE6_A, EDGE6_A_PDB_NAME, EDGE6_B, EDGE6_B_PDB_NAME,
};

/// The combined lower bound: the max of the corner database and the two
/// disjoint six-edge databases.
///
/// Each abstraction is a homomorphism onto a smaller puzzle, so each lookup
/// is an admissible and consistent bound on the remaining distance; the max
/// of admissible bounds stays admissible.
pub struct Heuristic {
    corner: PatternDb,
    edge_a: PatternDb,
    edge_b: PatternDb,
}

impl Heuristic {
    /// Load the three databases from `dir`, failing with
    /// [`Error::PdbNotFound`] when any cache file is missing or stale.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        Ok(Self {
            corner: pdb::load_corner(dir)?,
            edge_a: pdb::load_edge6(dir, EDGE6_A_PDB_NAME, &EDGE6_A)?,
            edge_b: pdb::load_edge6(dir, EDGE6_B_PDB_NAME, &EDGE6_B)?,
        })
    }

    /// Load the databases from `dir`, building and caching any that are
    /// missing. A full build explores all three abstract spaces and takes
    /// minutes.
    pub fn load_or_build(dir: &Path) -> Result<Self, Error> {
        Ok(Self {
            corner: pdb::load_or_build_corner(dir)?,
            edge_a: pdb::load_or_build_edge6(dir, EDGE6_A_PDB_NAME, &EDGE6_A)?,
            edge_b: pdb::load_or_build_edge6(dir, EDGE6_B_PDB_NAME, &EDGE6_B)?,
        })
    }

    /// A uniform zero bound. Search degenerates to plain iterative
    /// deepening, which only remains practical for shallow scrambles.
    pub fn uniform_zero() -> Self {
        use crate::constants::{CORNER_PDB_SIZE, EDGE6_PDB_SIZE};
        Self {
            corner: PatternDb::zeroed(CORNER_PDB_SIZE),
            edge_a: PatternDb::zeroed(EDGE6_PDB_SIZE),
            edge_b: PatternDb::zeroed(EDGE6_PDB_SIZE),
        }
    }

    /// h(s) = max of the three database lookups.
    pub fn h(&self, state: &CubieCube) -> u8 {
        let c = self.corner.get(corner_rank(state));
        let a = self.edge_a.get(EDGE6_A.rank(state));
        let b = self.edge_b.get(EDGE6_B.rank(state));
        c.max(a).max(b)
    }
}
