use crate::constants::{ALL_MOVES, MAX_SOLUTION_LEN};
use crate::cubie::CubieCube;
use crate::heuristic::Heuristic;
use crate::moves::{Move, MOVE_TABLE};

/// Outcome of one bounded depth-first traversal.
enum Dfs {
    /// Goal reached at this depth; the path buffer holds the solution.
    Found(usize),
    /// Smallest f-value that exceeded the threshold, `u8::MAX` when the
    /// subtree was exhausted without any overshoot.
    Overshoot(u8),
}

/// IDA* over the cubie model.
///
/// Iteratively deepens on the f = g + h bound. Every iteration runs a
/// depth-first traversal on a single working state: each candidate move is
/// applied in place and undone by its precomputed inverse, the path lives in
/// a fixed buffer indexed by depth, and nothing allocates inside the
/// recursion.
/// # Example
/// ```no_run
/// use std::path::Path;
/// use rkorf::cubie::CubieCube;
/// use rkorf::heuristic::Heuristic;
/// use rkorf::search::IdaStar;
///
/// let scramble = rkorf::moves_from_str("R U R' U R U2 R'").unwrap();
/// let state = CubieCube::default().apply_moves(&scramble);
/// let heuristic = Heuristic::load_or_build(Path::new("tables")).unwrap();
/// let mut solver = IdaStar::new(heuristic);
/// if let Some(solution) = solver.solve(&state, 50) {
///     println!("{}", rkorf::moves_to_str(&solution));
/// }
/// ```
pub struct IdaStar {
    heuristic: Heuristic,
    /// Nodes visited by the last `solve` call.
    pub nodes_expanded: u64,
    path: [Move; MAX_SOLUTION_LEN],
}

impl IdaStar {
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            nodes_expanded: 0,
            path: [Move::U; MAX_SOLUTION_LEN],
        }
    }

    /// Searches for a move sequence taking `initial` to the solved state.
    ///
    /// Returns `None` once `max_iterations` thresholds are exhausted. The
    /// move ordering is fixed, so equal inputs always produce the same
    /// solution.
    pub fn solve(&mut self, initial: &CubieCube, max_iterations: usize) -> Option<Vec<Move>> {
        self.nodes_expanded = 0;
        if initial.is_solved() {
            return Some(Vec::new());
        }

        let mut threshold = self.heuristic.h(initial);
        for iteration in 0..max_iterations {
            println!("Iteration {}: threshold = {}", iteration + 1, threshold);
            let mut state = *initial;
            match self.dfs(&mut state, 0, threshold, None) {
                Dfs::Found(depth) => return Some(self.path[..depth].to_vec()),
                Dfs::Overshoot(u8::MAX) => return None,
                Dfs::Overshoot(next) => threshold = next,
            }
        }
        None
    }

    fn dfs(&mut self, state: &mut CubieCube, g: u8, threshold: u8, last: Option<Move>) -> Dfs {
        self.nodes_expanded += 1;

        let f = g + self.heuristic.h(state);
        if f > threshold {
            return Dfs::Overshoot(f);
        }
        if state.is_solved() {
            return Dfs::Found(g as usize);
        }
        if g as usize == MAX_SOLUTION_LEN {
            return Dfs::Overshoot(u8::MAX);
        }

        let mut min_overshoot = u8::MAX;
        for m in ALL_MOVES {
            // The three turns of a face commute, and the inverse of the
            // previous move shares its face: one check prunes both the
            // redundant orderings and the immediate undo.
            if let Some(prev) = last {
                if m.same_face(prev) {
                    continue;
                }
            }

            MOVE_TABLE.generator(m).apply_in_place(state);
            self.path[g as usize] = m;
            match self.dfs(state, g + 1, threshold, Some(m)) {
                found @ Dfs::Found(_) => return found,
                Dfs::Overshoot(v) => min_overshoot = min_overshoot.min(v),
            }
            MOVE_TABLE.generator(m.inverse()).apply_in_place(state);
        }
        Dfs::Overshoot(min_overshoot)
    }
}
