use std::fmt;

use crate::cubie::{Corner, CubieCube, Edge, SOLVED_CUBIE_CUBE};
use crate::error::Error;

/// The six sticker colors: White, Yellow, Red, Orange, Blue, Green.
///
/// The integer codes are the external contract of the sticker grid.
#[rustfmt::skip]
#[derive(Debug, PartialEq, Eq, PartialOrd, Clone, Copy, Hash)]
pub enum Color {
    W, Y, R, O, B, G,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Color {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::W),
            1 => Ok(Color::Y),
            2 => Ok(Color::R),
            3 => Ok(Color::O),
            4 => Ok(Color::B),
            5 => Ok(Color::G),
            _ => Err(Error::InvalidColor),
        }
    }
}

/// Face indices of the sticker grid, in U, L, F, R, B, D order.
pub const FACE_U: usize = 0;
pub const FACE_L: usize = 1;
pub const FACE_F: usize = 2;
pub const FACE_R: usize = 3;
pub const FACE_B: usize = 4;
pub const FACE_D: usize = 5;

/// Center color of each face: U=W, L=O, F=G, R=R, B=B, D=Y.
pub const FACE_COLORS: [Color; 6] = [
    Color::W, Color::O, Color::G, Color::R, Color::B, Color::Y,
];

/// The raw external form: six faces of 3x3 color codes.
pub type StickerGrid = [[[u8; 3]; 3]; 6];

/// Cube on the facelet level: six 3x3 faces, each indexed (row, col) with
/// row 0 at the top as the face is drawn in the cross net.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FaceCube {
    pub f: [[[Color; 3]; 3]; 6],
}

/// Solved cube on the facelet level.
pub const SOLVED_FACE_CUBE: FaceCube = FaceCube {
    f: [
        [[Color::W; 3]; 3],
        [[Color::O; 3]; 3],
        [[Color::G; 3]; 3],
        [[Color::R; 3]; 3],
        [[Color::B; 3]; 3],
        [[Color::Y; 3]; 3],
    ],
};

impl Default for FaceCube {
    fn default() -> Self {
        SOLVED_FACE_CUBE
    }
}

/// Sticker triples per corner position, reference (U/D) facet first.
/// (face, row, col) in the cross net with U above F and D below F.
pub const CORNER_FACELETS: [[(usize, usize, usize); 3]; 8] = [
    [(FACE_U, 2, 2), (FACE_R, 0, 0), (FACE_F, 0, 2)], // URF
    [(FACE_U, 2, 0), (FACE_F, 0, 0), (FACE_L, 0, 2)], // UFL
    [(FACE_U, 0, 0), (FACE_L, 0, 0), (FACE_B, 0, 2)], // ULB
    [(FACE_U, 0, 2), (FACE_B, 0, 0), (FACE_R, 0, 2)], // UBR
    [(FACE_D, 0, 2), (FACE_F, 2, 2), (FACE_R, 2, 0)], // DFR
    [(FACE_D, 0, 0), (FACE_L, 2, 2), (FACE_F, 2, 0)], // DLF
    [(FACE_D, 2, 0), (FACE_B, 2, 2), (FACE_L, 2, 0)], // DBL
    [(FACE_D, 2, 2), (FACE_R, 2, 2), (FACE_B, 2, 0)], // DRB
];

/// Sticker pairs per edge position, reference face first: U/D for the top
/// and bottom layers, F/B for the equator.
pub const EDGE_FACELETS: [[(usize, usize, usize); 2]; 12] = [
    [(FACE_U, 2, 1), (FACE_F, 0, 1)], // UF
    [(FACE_U, 1, 2), (FACE_R, 0, 1)], // UR
    [(FACE_U, 0, 1), (FACE_B, 0, 1)], // UB
    [(FACE_U, 1, 0), (FACE_L, 0, 1)], // UL
    [(FACE_F, 1, 0), (FACE_L, 1, 2)], // FL
    [(FACE_F, 1, 2), (FACE_R, 1, 0)], // FR
    [(FACE_B, 1, 0), (FACE_R, 1, 2)], // BR
    [(FACE_B, 1, 2), (FACE_L, 1, 0)], // BL
    [(FACE_D, 0, 1), (FACE_F, 2, 1)], // DF
    [(FACE_D, 1, 2), (FACE_R, 2, 1)], // DR
    [(FACE_D, 2, 1), (FACE_B, 2, 1)], // DB
    [(FACE_D, 1, 0), (FACE_L, 2, 1)], // DL
];

/// Solved sticker colors per corner cubie, in the read order of its home
/// position (reference color first).
pub const CORNER_COLORS: [[Color; 3]; 8] = [
    [Color::W, Color::R, Color::G], // URF
    [Color::W, Color::G, Color::O], // UFL
    [Color::W, Color::O, Color::B], // ULB
    [Color::W, Color::B, Color::R], // UBR
    [Color::Y, Color::G, Color::R], // DFR
    [Color::Y, Color::O, Color::G], // DLF
    [Color::Y, Color::B, Color::O], // DBL
    [Color::Y, Color::R, Color::B], // DRB
];

/// Solved sticker colors per edge cubie (reference color first).
pub const EDGE_COLORS: [[Color; 2]; 12] = [
    [Color::W, Color::G], // UF
    [Color::W, Color::R], // UR
    [Color::W, Color::B], // UB
    [Color::W, Color::O], // UL
    [Color::G, Color::O], // FL
    [Color::G, Color::R], // FR
    [Color::B, Color::R], // BR
    [Color::B, Color::O], // BL
    [Color::Y, Color::G], // DF
    [Color::Y, Color::R], // DR
    [Color::Y, Color::B], // DB
    [Color::Y, Color::O], // DL
];

impl FaceCube {
    fn sticker(&self, spot: (usize, usize, usize)) -> Color {
        self.f[spot.0][spot.1][spot.2]
    }

    fn set_sticker(&mut self, spot: (usize, usize, usize), color: Color) {
        self.f[spot.0][spot.1][spot.2] = color;
    }
}

impl TryFrom<&StickerGrid> for FaceCube {
    type Error = Error;
    fn try_from(grid: &StickerGrid) -> Result<Self, Self::Error> {
        let mut face = FaceCube::default();
        for (fi, rows) in grid.iter().enumerate() {
            for (ri, row) in rows.iter().enumerate() {
                for (ci, &code) in row.iter().enumerate() {
                    face.f[fi][ri][ci] = Color::try_from(code)?;
                }
            }
        }
        Ok(face)
    }
}

impl From<&FaceCube> for StickerGrid {
    fn from(face: &FaceCube) -> Self {
        let mut grid = [[[0u8; 3]; 3]; 6];
        for fi in 0..6 {
            for ri in 0..3 {
                for ci in 0..3 {
                    grid[fi][ri][ci] = face.f[fi][ri][ci] as u8;
                }
            }
        }
        grid
    }
}

/// Gives the facelet representation of a cubie cube.
impl TryFrom<&CubieCube> for FaceCube {
    type Error = Error;
    fn try_from(state: &CubieCube) -> Result<Self, Self::Error> {
        if !state.is_valid() {
            return Err(Error::InvalidState);
        }

        let mut face = FaceCube::default();
        for (fi, &color) in FACE_COLORS.iter().enumerate() {
            face.f[fi][1][1] = color;
        }

        for (i, spots) in CORNER_FACELETS.iter().enumerate() {
            let cubie = state.cp[i] as usize;
            let twist = state.co[i] as usize;
            for (j, &spot) in spots.iter().enumerate() {
                face.set_sticker(spot, CORNER_COLORS[cubie][(j + 3 - twist) % 3]);
            }
        }

        for (i, spots) in EDGE_FACELETS.iter().enumerate() {
            let cubie = state.ep[i] as usize;
            let flip = state.eo[i] as usize;
            for (j, &spot) in spots.iter().enumerate() {
                face.set_sticker(spot, EDGE_COLORS[cubie][(j + flip) % 2]);
            }
        }

        Ok(face)
    }
}

/// Gives the cubie representation of a facelet cube.
impl TryFrom<&FaceCube> for CubieCube {
    type Error = Error;
    fn try_from(face: &FaceCube) -> Result<Self, Self::Error> {
        let mut state = SOLVED_CUBIE_CUBE;

        for (i, spots) in CORNER_FACELETS.iter().enumerate() {
            let read = [
                face.sticker(spots[0]),
                face.sticker(spots[1]),
                face.sticker(spots[2]),
            ];
            // the facet carrying W or Y determines the twist
            let twist = read
                .iter()
                .position(|&c| c == Color::W || c == Color::Y)
                .ok_or_else(|| {
                    Error::InvalidSticker(format!("corner position {i} has no U/D color"))
                })?;

            let col1 = read[(twist + 1) % 3];
            let col2 = read[(twist + 2) % 3];
            let cubie = CORNER_COLORS
                .iter()
                .position(|c| c[1] == col1 && c[2] == col2)
                .ok_or_else(|| {
                    Error::InvalidSticker(format!("corner position {i} matches no cubie"))
                })?;

            state.cp[i] = Corner::try_from(cubie as u8)?;
            state.co[i] = twist as u8;
        }

        for (i, spots) in EDGE_FACELETS.iter().enumerate() {
            let read = [face.sticker(spots[0]), face.sticker(spots[1])];
            let mut matched = false;
            for (j, colors) in EDGE_COLORS.iter().enumerate() {
                if read[0] == colors[0] && read[1] == colors[1] {
                    state.ep[i] = Edge::try_from(j as u8)?;
                    state.eo[i] = 0;
                    matched = true;
                    break;
                }
                if read[0] == colors[1] && read[1] == colors[0] {
                    state.ep[i] = Edge::try_from(j as u8)?;
                    state.eo[i] = 1;
                    matched = true;
                    break;
                }
            }
            if !matched {
                return Err(Error::InvalidSticker(format!(
                    "edge position {i} matches no cubie"
                )));
            }
        }

        if !state.is_valid() {
            return Err(Error::InvalidState);
        }
        Ok(state)
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in self.f {
            for row in face {
                for color in row {
                    write!(f, "{color}")?;
                }
            }
        }
        Ok(())
    }
}
