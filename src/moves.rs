use std::{fmt, str::FromStr};

use static_init::dynamic;

use self::Move::*;
use crate::constants::N_MOVE;
use crate::cubie::{Corner, CubieCube, Edge, SOLVED_CUBIE_CUBE};
use crate::error::Error;

/// Face turns in the quarter-turn metric: Up, Down, Left, Right, Front, Back.
///
/// `$` clockwise, `$2` double, `$3` counter-clockwise (printed `$'`).
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Move {
    U, U2, U3,
    D, D2, D3,
    L, L2, L3,
    R, R2, R3,
    F, F2, F3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            L3 => write!(f, "L'"),
            R3 => write!(f, "R'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(U),
            "U2" => Ok(U2),
            "U'" => Ok(U3),
            "D" => Ok(D),
            "D2" => Ok(D2),
            "D'" => Ok(D3),
            "L" => Ok(L),
            "L2" => Ok(L2),
            "L'" => Ok(L3),
            "R" => Ok(R),
            "R2" => Ok(R2),
            "R'" => Ok(R3),
            "F" => Ok(F),
            "F2" => Ok(F2),
            "F'" => Ok(F3),
            "B" => Ok(B),
            "B2" => Ok(B2),
            "B'" => Ok(B3),
            _ => Err(Error::UnknownMove(s.to_string())),
        }
    }
}

impl Move {
    /// The move undoing this one. Half turns are their own inverse.
    pub fn inverse(self) -> Self {
        match self {
            U => U3,
            U3 => U,
            D => D3,
            D3 => D,
            L => L3,
            L3 => L,
            R => R3,
            R3 => R,
            F => F3,
            F3 => F,
            B => B3,
            B3 => B,
            half => half,
        }
    }

    /// Face index 0..=5 in U, D, L, R, F, B order.
    ///
    /// Relies on the declaration order grouping the three turns of a face.
    pub fn face(self) -> usize {
        self as usize / 3
    }

    pub fn is_half_turn(self) -> bool {
        matches!(self, U2 | D2 | L2 | R2 | F2 | B2)
    }

    /// The three moves of a face commute; search only ever keeps one of them.
    pub fn same_face(self, other: Move) -> bool {
        self.face() == other.face()
    }
}

/// One face generator (σc, δc, σe, δe).
///
/// `cp`/`ep` are the forward permutations: `cp[i]` is the position the content
/// of position `i` moves to. The deltas are orientation increments indexed by
/// destination position. The inverse permutations needed by the application
/// rule are precomputed once at table construction.
#[derive(Debug, Clone, Copy)]
pub struct Generator {
    pub name: Move,
    cp: [u8; 8],
    co_delta: [u8; 8],
    ep: [u8; 12],
    eo_delta: [u8; 12],
    cp_inv: [u8; 8],
    ep_inv: [u8; 12],
}

impl Generator {
    fn new(
        name: Move,
        cp: [u8; 8],
        co_delta: [u8; 8],
        ep: [u8; 12],
        eo_delta: [u8; 12],
    ) -> Self {
        let mut cp_inv = [0u8; 8];
        for (i, &dst) in cp.iter().enumerate() {
            cp_inv[dst as usize] = i as u8;
        }
        let mut ep_inv = [0u8; 12];
        for (i, &dst) in ep.iter().enumerate() {
            ep_inv[dst as usize] = i as u8;
        }
        Self {
            name,
            cp,
            co_delta,
            ep,
            eo_delta,
            cp_inv,
            ep_inv,
        }
    }

    /// Applies the generator in place, using fixed scratch buffers.
    ///
    /// ```text
    /// cp'[i] = cp[σc⁻¹(i)]        co'[i] = (co[σc⁻¹(i)] + δc[i]) mod 3
    /// ep'[i] = ep[σe⁻¹(i)]        eo'[i] = (eo[σe⁻¹(i)] + δe[i]) mod 2
    /// ```
    pub fn apply_in_place(&self, state: &mut CubieCube) {
        let mut cp = [Corner::URF; 8];
        let mut co = [0u8; 8];
        let mut ep = [Edge::UF; 12];
        let mut eo = [0u8; 12];
        for i in 0..8 {
            let src = self.cp_inv[i] as usize;
            cp[i] = state.cp[src];
            co[i] = (state.co[src] + self.co_delta[i]) % 3;
        }
        for i in 0..12 {
            let src = self.ep_inv[i] as usize;
            ep[i] = state.ep[src];
            eo[i] = (state.eo[src] + self.eo_delta[i]) % 2;
        }
        state.cp = cp;
        state.co = co;
        state.ep = ep;
        state.eo = eo;
    }

    /// Applies the generator to a fresh copy of `state`.
    pub fn apply(&self, state: &CubieCube) -> CubieCube {
        let mut next = *state;
        self.apply_in_place(&mut next);
        next
    }

    /// Applies only the corner action, on raw permutation/orientation arrays.
    /// Used by the corner database build, which never materializes edges.
    pub fn apply_corners_in_place(&self, cp: &mut [u8; 8], co: &mut [u8; 8]) {
        let mut cp2 = [0u8; 8];
        let mut co2 = [0u8; 8];
        for i in 0..8 {
            let src = self.cp_inv[i] as usize;
            cp2[i] = cp[src];
            co2[i] = (co[src] + self.co_delta[i]) % 3;
        }
        *cp = cp2;
        *co = co2;
    }
}

/// The 18 generators, indexed by `Move as usize`.
pub struct MoveTable {
    generators: [Generator; N_MOVE],
}

impl MoveTable {
    pub fn generator(&self, m: Move) -> &Generator {
        &self.generators[m as usize]
    }

    #[rustfmt::skip]
    fn new() -> Self {
        // Corner positions: URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB.
        // Edge positions:   UF, UR, UB, UL, FL, FR, BR, BL, DF, DR, DB, DL.
        // Quarter-turn deltas follow the usual scheme: U/D/L/R leave edge
        // orientation alone, F/B flip their four edges, U/D leave corner
        // orientation alone.
        let generators = [
            Generator::new(U,
                [1, 2, 3, 0, 4, 5, 6, 7], [0; 8],
                [3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11], [0; 12]),
            Generator::new(U2,
                [2, 3, 0, 1, 4, 5, 6, 7], [0; 8],
                [2, 3, 0, 1, 4, 5, 6, 7, 8, 9, 10, 11], [0; 12]),
            Generator::new(U3,
                [3, 0, 1, 2, 4, 5, 6, 7], [0; 8],
                [1, 2, 3, 0, 4, 5, 6, 7, 8, 9, 10, 11], [0; 12]),
            Generator::new(D,
                [0, 1, 2, 3, 7, 4, 5, 6], [0; 8],
                [0, 1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 8], [0; 12]),
            Generator::new(D2,
                [0, 1, 2, 3, 6, 7, 4, 5], [0; 8],
                [0, 1, 2, 3, 4, 5, 6, 7, 10, 11, 8, 9], [0; 12]),
            Generator::new(D3,
                [0, 1, 2, 3, 5, 6, 7, 4], [0; 8],
                [0, 1, 2, 3, 4, 5, 6, 7, 11, 8, 9, 10], [0; 12]),
            Generator::new(L,
                [0, 5, 1, 3, 4, 6, 2, 7], [0, 1, 2, 0, 0, 2, 1, 0],
                [0, 1, 2, 4, 11, 5, 6, 3, 8, 9, 10, 7], [0; 12]),
            Generator::new(L2,
                [0, 6, 5, 3, 4, 2, 1, 7], [0; 8],
                [0, 1, 2, 11, 7, 5, 6, 4, 8, 9, 10, 3], [0; 12]),
            Generator::new(L3,
                [0, 2, 6, 3, 4, 1, 5, 7], [0, 1, 2, 0, 0, 2, 1, 0],
                [0, 1, 2, 7, 3, 5, 6, 11, 8, 9, 10, 4], [0; 12]),
            Generator::new(R,
                [3, 1, 2, 7, 0, 5, 6, 4], [2, 0, 0, 1, 1, 0, 0, 2],
                [0, 6, 2, 3, 4, 1, 9, 7, 8, 5, 10, 11], [0; 12]),
            Generator::new(R2,
                [7, 1, 2, 4, 3, 5, 6, 0], [0; 8],
                [0, 9, 2, 3, 4, 6, 5, 7, 8, 1, 10, 11], [0; 12]),
            Generator::new(R3,
                [4, 1, 2, 0, 7, 5, 6, 3], [2, 0, 0, 1, 1, 0, 0, 2],
                [0, 5, 2, 3, 4, 9, 1, 7, 8, 6, 10, 11], [0; 12]),
            Generator::new(F,
                [4, 0, 2, 3, 5, 1, 6, 7], [1, 2, 0, 0, 2, 1, 0, 0],
                [5, 1, 2, 3, 0, 8, 6, 7, 4, 9, 10, 11],
                [1, 0, 0, 0, 1, 1, 0, 0, 1, 0, 0, 0]),
            Generator::new(F2,
                [5, 4, 2, 3, 1, 0, 6, 7], [0; 8],
                [8, 1, 2, 3, 5, 4, 6, 7, 0, 9, 10, 11], [0; 12]),
            Generator::new(F3,
                [1, 5, 2, 3, 0, 4, 6, 7], [1, 2, 0, 0, 2, 1, 0, 0],
                [4, 1, 2, 3, 8, 0, 6, 7, 5, 9, 10, 11],
                [1, 0, 0, 0, 1, 1, 0, 0, 1, 0, 0, 0]),
            Generator::new(B,
                [0, 1, 6, 2, 4, 5, 7, 3], [0, 0, 1, 2, 0, 0, 2, 1],
                [0, 1, 7, 3, 4, 5, 2, 10, 8, 9, 6, 11],
                [0, 0, 1, 0, 0, 0, 1, 1, 0, 0, 1, 0]),
            Generator::new(B2,
                [0, 1, 7, 6, 4, 5, 3, 2], [0; 8],
                [0, 1, 10, 3, 4, 5, 7, 6, 8, 9, 2, 11], [0; 12]),
            Generator::new(B3,
                [0, 1, 3, 7, 4, 5, 2, 6], [0, 0, 1, 2, 0, 0, 2, 1],
                [0, 1, 6, 3, 4, 5, 10, 2, 8, 9, 7, 11],
                [0, 0, 1, 0, 0, 0, 1, 1, 0, 0, 1, 0]),
        ];
        let table = Self { generators };
        table.self_check();
        table
    }

    /// Structural sanity of the literal tables: any typo in a permutation or
    /// delta breaks one of these group identities.
    fn self_check(&self) {
        for (i, g) in self.generators.iter().enumerate() {
            assert_eq!(g.name as usize, i, "generator order must match Move order");

            for j in 0..8 {
                assert_eq!(g.cp_inv[g.cp[j] as usize] as usize, j);
            }
            for j in 0..12 {
                assert_eq!(g.ep_inv[g.ep[j] as usize] as usize, j);
            }

            let once = g.apply(&SOLVED_CUBIE_CUBE);
            assert!(once.is_valid(), "{} breaks an invariant", g.name);
            assert_ne!(once, SOLVED_CUBIE_CUBE, "{} is the identity", g.name);

            let back = self.generator(g.name.inverse()).apply(&once);
            assert_eq!(back, SOLVED_CUBIE_CUBE, "{} inverse does not undo it", g.name);

            let order = if g.name.is_half_turn() { 2 } else { 4 };
            let mut state = SOLVED_CUBIE_CUBE;
            for _ in 0..order {
                g.apply_in_place(&mut state);
            }
            assert_eq!(state, SOLVED_CUBIE_CUBE, "{} has wrong order", g.name);
        }
    }
}

/// The 18 generator tables, built and verified on first access.
#[dynamic]
pub static MOVE_TABLE: MoveTable = MoveTable::new();

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Move::{self, *};
    use super::MOVE_TABLE;
    use crate::constants::ALL_MOVES;
    use crate::cubie::CubieCube;

    #[test]
    fn test_parse_and_display_roundtrip() {
        for m in ALL_MOVES {
            let printed = m.to_string();
            assert_eq!(Move::from_str(&printed).unwrap(), m);
        }
        assert!(Move::from_str("X").is_err());
        assert!(Move::from_str("U3").is_err());
        assert!(Move::from_str("u").is_err());
    }

    #[test]
    fn test_inverse_mapping() {
        assert_eq!(U.inverse(), U3);
        assert_eq!(U3.inverse(), U);
        assert_eq!(F2.inverse(), F2);
        for m in ALL_MOVES {
            assert_eq!(m.inverse().inverse(), m);
            assert!(m.same_face(m.inverse()));
        }
    }

    #[test]
    fn test_faces() {
        assert_eq!(U.face(), U2.face());
        assert_eq!(B.face(), B3.face());
        assert_ne!(U.face(), D.face());
        assert_ne!(L.face(), R.face());
    }

    #[test]
    fn test_moves_undo_on_arbitrary_state() {
        let scrambled = CubieCube::from(&[R, U, F3, D2, L, B, U3, R2][..]);
        for m in ALL_MOVES {
            let there = scrambled.apply_move(m);
            let back = there.apply_move(m.inverse());
            assert_eq!(back, scrambled, "{m} inverse fails away from solved");
        }
    }

    #[test]
    fn test_quarter_turn_order_four() {
        let scrambled = CubieCube::from(&[F, U2, L3, D][..]);
        for m in ALL_MOVES.iter().filter(|m| !m.is_half_turn()) {
            let mut state = scrambled;
            for _ in 0..4 {
                state = state.apply_move(*m);
            }
            assert_eq!(state, scrambled);
        }
    }

    #[test]
    fn test_half_turn_order_two() {
        let scrambled = CubieCube::from(&[R3, B, U][..]);
        for m in ALL_MOVES.iter().filter(|m| m.is_half_turn()) {
            let mut state = scrambled;
            for _ in 0..2 {
                state = state.apply_move(*m);
            }
            assert_eq!(state, scrambled);
        }
    }

    #[test]
    fn test_half_turn_equals_doubled_quarter() {
        for face in [U, D, L, R, F, B] {
            let quarter = CubieCube::default().apply_move(face).apply_move(face);
            let half =
                CubieCube::default().apply_move(ALL_MOVES[face as usize + 1]);
            assert_eq!(quarter, half);
        }
    }

    #[test]
    fn test_all_generators_stay_valid() {
        let mut state = CubieCube::default();
        for m in ALL_MOVES {
            state = state.apply_move(m);
            assert!(state.is_valid());
        }
    }

    #[test]
    fn test_apply_matches_apply_in_place() {
        let state = CubieCube::from(&[U, R2, F][..]);
        for m in ALL_MOVES {
            let fresh = MOVE_TABLE.generator(m).apply(&state);
            let mut inplace = state;
            MOVE_TABLE.generator(m).apply_in_place(&mut inplace);
            assert_eq!(fresh, inplace);
        }
    }
}
