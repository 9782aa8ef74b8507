use std::fmt;

use self::{Corner::*, Edge::*};
use crate::constants::*;
use crate::error::Error;
use crate::moves::{Move, MOVE_TABLE};

/// Represents the 8 corner positions on the cube, described by the faces they touch.
///
/// Example: `ULB` (Up, Left, Back).
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Clone, Copy, Hash)]
pub enum Corner {
    URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Corner {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(URF),
            1 => Ok(UFL),
            2 => Ok(ULB),
            3 => Ok(UBR),
            4 => Ok(DFR),
            5 => Ok(DLF),
            6 => Ok(DBL),
            7 => Ok(DRB),
            _ => Err(Error::InvalidCorner),
        }
    }
}

impl TryFrom<&str> for Corner {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "URF" => Ok(URF),
            "UFL" => Ok(UFL),
            "ULB" => Ok(ULB),
            "UBR" => Ok(UBR),
            "DFR" => Ok(DFR),
            "DLF" => Ok(DLF),
            "DBL" => Ok(DBL),
            "DRB" => Ok(DRB),
            _ => Err(Error::InvalidCorner),
        }
    }
}

/// Represents the 12 edge positions on the cube, described by the faces they touch.
///
/// Example: `BL` (Back, Left).
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Clone, Copy, Hash)]
pub enum Edge {
    UF, UR, UB, UL, FL, FR, BR, BL, DF, DR, DB, DL,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Edge {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UF),
            1 => Ok(UR),
            2 => Ok(UB),
            3 => Ok(UL),
            4 => Ok(FL),
            5 => Ok(FR),
            6 => Ok(BR),
            7 => Ok(BL),
            8 => Ok(DF),
            9 => Ok(DR),
            10 => Ok(DB),
            11 => Ok(DL),
            _ => Err(Error::InvalidEdge),
        }
    }
}

impl TryFrom<&str> for Edge {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "UF" => Ok(UF),
            "UR" => Ok(UR),
            "UB" => Ok(UB),
            "UL" => Ok(UL),
            "FL" => Ok(FL),
            "FR" => Ok(FR),
            "BR" => Ok(BR),
            "BL" => Ok(BL),
            "DF" => Ok(DF),
            "DR" => Ok(DR),
            "DB" => Ok(DB),
            "DL" => Ok(DL),
            _ => Err(Error::InvalidEdge),
        }
    }
}

/// Cube on the cubie level.
///
/// A configuration is the 4-tuple (cp, co, ep, eo). Centers are fixed, so they
/// carry no state. The struct is `Copy`; cloning is a memcpy and never touches
/// the heap.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct CubieCube {
    /// Corner permutation: `cp[i]` is the corner cubie sitting at position `i`.
    pub cp: [Corner; 8],
    /// Corner orientation: 0 (U/D facet up), 1 (twisted clockwise), 2 (counter-clockwise).
    pub co: [u8; 8],
    /// Edge permutation: `ep[i]` is the edge cubie sitting at position `i`.
    pub ep: [Edge; 12],
    /// Edge orientation: 0 (reference facet on its designated face), 1 (flipped).
    pub eo: [u8; 12],
}

/// Solved cube on the cubie level.
pub const SOLVED_CUBIE_CUBE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
    co: [0; 8],
    ep: [UF, UR, UB, UL, FL, FR, BR, BL, DF, DR, DB, DL],
    eo: [0; 12],
};

impl Default for CubieCube {
    fn default() -> Self {
        SOLVED_CUBIE_CUBE
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        for i in 0..8 {
            s.push_str(&format!("({},{})", self.cp[i], self.co[i]));
        }
        for i in 0..12 {
            s.push_str(&format!("({},{})", self.ep[i], self.eo[i]));
        }
        write!(f, "{s}")
    }
}

impl From<&[Move]> for CubieCube {
    fn from(moves: &[Move]) -> Self {
        CubieCube::default().apply_moves(moves)
    }
}

impl CubieCube {
    /// Applies a move to the current state, returning the successor.
    pub fn apply_move(self, m: Move) -> Self {
        MOVE_TABLE.generator(m).apply(&self)
    }

    /// Applies a sequence of moves to the current state.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |acc, &m| acc.apply_move(m))
    }

    /// Checks if the cube is in the solved state.
    pub fn is_solved(&self) -> bool {
        *self == SOLVED_CUBIE_CUBE
    }

    /// Parity of the corner permutation: 0 for even, 1 for odd.
    pub fn corner_parity(&self) -> u8 {
        let mut perm = [0u8; 8];
        for i in 0..8 {
            perm[i] = self.cp[i] as u8;
        }
        cycle_parity(&perm)
    }

    /// Parity of the edge permutation. A solvable cube has the same corner and edge parity.
    pub fn edge_parity(&self) -> u8 {
        let mut perm = [0u8; 12];
        for i in 0..12 {
            perm[i] = self.ep[i] as u8;
        }
        cycle_parity(&perm)
    }

    /// Checks the four physical invariants:
    /// `cp`/`ep` are permutations, their parities agree, the corner twist sum
    /// is 0 mod 3 and the edge flip sum is 0 mod 2.
    pub fn is_valid(&self) -> bool {
        let mut corner_count = [0u8; 8];
        for c in self.cp {
            corner_count[c as usize] += 1;
        }
        if corner_count.iter().any(|&n| n != 1) {
            return false;
        }
        let mut edge_count = [0u8; 12];
        for e in self.ep {
            edge_count[e as usize] += 1;
        }
        if edge_count.iter().any(|&n| n != 1) {
            return false;
        }
        if self.co.iter().any(|&o| o > 2) || self.eo.iter().any(|&o| o > 1) {
            return false;
        }
        if self.co.iter().map(|&o| o as u32).sum::<u32>() % 3 != 0 {
            return false;
        }
        if self.eo.iter().map(|&o| o as u32).sum::<u32>() % 2 != 0 {
            return false;
        }
        self.corner_parity() == self.edge_parity()
    }

    /// Return the group inverse of this state.
    pub fn inverse(&self) -> Self {
        let mut d = CubieCube::default();
        for i in 0..12 {
            d.ep[self.ep[i] as usize] = ALL_EDGES[i];
        }
        for i in 0..12 {
            d.eo[i] = self.eo[d.ep[i] as usize];
        }
        for i in 0..8 {
            d.cp[self.cp[i] as usize] = ALL_CORNERS[i];
        }
        for i in 0..8 {
            d.co[i] = (3 - self.co[d.cp[i] as usize]) % 3;
        }
        d
    }
}

/// Permutation sign by cycle decomposition: the sum over cycles of
/// (length - 1), reduced mod 2.
fn cycle_parity(perm: &[u8]) -> u8 {
    let mut visited = [false; 12];
    let mut parity = 0usize;
    for start in 0..perm.len() {
        if visited[start] {
            continue;
        }
        let mut len = 0;
        let mut j = start;
        while !visited[j] {
            visited[j] = true;
            j = perm[j] as usize;
            len += 1;
        }
        parity += len - 1;
    }
    (parity % 2) as u8
}

#[cfg(test)]
mod tests {
    use crate::cubie::*;
    use crate::moves::Move::*;

    #[test]
    fn test_eq_and_hash_inputs() {
        let state = CubieCube::default();
        let state2 = CubieCube::default();
        assert_eq!(state, state2);
        let state3 = state.apply_move(R);
        assert_ne!(state, state3);
    }

    #[test]
    fn test_corner_and_edge_conversions() {
        for (i, &c) in ALL_CORNERS.iter().enumerate() {
            assert_eq!(Corner::try_from(i as u8).unwrap(), c);
            assert_eq!(Corner::try_from(c.to_string().as_str()).unwrap(), c);
        }
        for (i, &e) in ALL_EDGES.iter().enumerate() {
            assert_eq!(Edge::try_from(i as u8).unwrap(), e);
            assert_eq!(Edge::try_from(e.to_string().as_str()).unwrap(), e);
        }
        assert!(Corner::try_from(8u8).is_err());
        assert!(Edge::try_from(12u8).is_err());
        assert!(Corner::try_from("UFR").is_err());
        assert!(Edge::try_from("LU").is_err());
    }

    #[test]
    fn test_solved() {
        assert!(CubieCube::default().is_solved());
        assert!(!CubieCube::default().apply_move(U).is_solved());
    }

    #[test]
    fn test_parity() {
        let state = CubieCube::default();
        assert_eq!(state.corner_parity(), 0);
        assert_eq!(state.edge_parity(), 0);

        // a quarter turn is an odd permutation on both cycles
        let state = state.apply_move(R);
        assert_eq!(state.corner_parity(), 1);
        assert_eq!(state.edge_parity(), 1);

        let state = CubieCube::from(&[R, U, R3, U3, R3, F, R, F3][..]);
        assert_eq!(state.corner_parity(), state.edge_parity());
    }

    #[test]
    fn test_validity_after_sequences() {
        let state = CubieCube::from(&[R, U, R3, U3, F2, B, D3, L2, U2, B3][..]);
        assert!(state.is_valid());
        assert!(!state.is_solved());
    }

    #[test]
    fn test_invalid_twist() {
        let mut state = CubieCube::default();
        state.co[0] = 1;
        assert!(!state.is_valid());
        state.co[0] = 0;
        state.eo[3] = 1;
        assert!(!state.is_valid());
    }

    #[test]
    fn test_invalid_permutation() {
        let mut state = CubieCube::default();
        state.cp.swap(0, 1);
        // corner swap alone breaks the parity agreement
        assert!(!state.is_valid());
        state.ep.swap(4, 7);
        assert!(state.is_valid());
    }

    #[test]
    fn test_inverse() {
        let state = CubieCube::from(&[R, U2, F3, L, D, B2, R3, U][..]);
        let inv = state.inverse();
        let mut product = CubieCube::default();
        // applying s then s^-1 as move sequences is awkward; check the
        // defining property positionally instead
        for i in 0..8 {
            product.cp[i] = state.cp[inv.cp[i] as usize];
            product.co[i] = (state.co[inv.cp[i] as usize] + inv.co[i]) % 3;
        }
        for i in 0..12 {
            product.ep[i] = state.ep[inv.ep[i] as usize];
            product.eo[i] = (state.eo[inv.ep[i] as usize] + inv.eo[i]) % 2;
        }
        assert_eq!(product, CubieCube::default());
        assert_eq!(inv.inverse(), state);
    }

    #[test]
    fn test_sexy_move_six_times() {
        // (R U R' U') * 6
        let mut moves = Vec::new();
        for _ in 0..6 {
            moves.extend_from_slice(&[R, U, R3, U3]);
        }
        let state = CubieCube::default().apply_moves(&moves);
        assert_eq!(state, SOLVED_CUBIE_CUBE);
    }

    #[test]
    fn test_scramble_reaches_expected_cycle_structure() {
        // U alone: a 4-cycle on the top corners and top edges
        let state = CubieCube::default().apply_move(U);
        assert_eq!(state.cp, [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB]);
        assert_eq!(
            state.ep,
            [UR, UB, UL, UF, FL, FR, BR, BL, DF, DR, DB, DL]
        );
        assert_eq!(state.co, [0; 8]);
        assert_eq!(state.eo, [0; 12]);
    }
}
