use crate::cubie::Corner::{self, *};
use crate::cubie::Edge::{self, *};
use crate::facelet::Color;
use crate::moves::Move::{self, *};

pub const ALL_CORNERS: [Corner; 8] = [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB];
pub const ALL_EDGES: [Edge; 12] = [UF, UR, UB, UL, FL, FR, BR, BL, DF, DR, DB, DL];
pub const ALL_COLORS: [Color; 6] = [Color::W, Color::Y, Color::R, Color::O, Color::B, Color::G];

/// The 18 face generators in canonical search order.
pub const ALL_MOVES: [Move; 18] = [
    U, U2, U3, D, D2, D3, L, L2, L3, R, R2, R3, F, F2, F3, B, B2, B3,
];

/// number of possible face moves
pub const N_MOVE: usize = 18;
/// 8! permutations of the corners
pub const N_CORNER_PERM: usize = 40320;
/// 3^7 corner orientations (the eighth is forced by the twist invariant)
pub const N_CORNER_TWIST: usize = 2187;
/// corner database: every (permutation, orientation) pair of the 8 corners
pub const CORNER_PDB_SIZE: usize = N_CORNER_PERM * N_CORNER_TWIST;
/// C(12,6) placements of six tracked edge cubies
pub const N_EDGE_COMB: usize = 924;
/// 6! orderings of the tracked cubies over their positions
pub const N_EDGE6_PERM: usize = 720;
/// 2^6 orientations of the tracked cubies
pub const N_EDGE6_ORIENT: usize = 64;
/// six-edge database: C(12,6) * 6! * 2^6
pub const EDGE6_PDB_SIZE: usize = N_EDGE_COMB * N_EDGE6_PERM * N_EDGE6_ORIENT;

/// First tracked half of the edges; the complement is [`EDGE_SET_B`].
pub const EDGE_SET_A: [Edge; 6] = [UF, UR, UB, UL, FL, FR];
/// Second tracked half of the edges.
pub const EDGE_SET_B: [Edge; 6] = [BR, BL, DF, DR, DB, DL];

/// Upper bound on any solution the solver will emit.
pub const MAX_SOLUTION_LEN: usize = 50;
