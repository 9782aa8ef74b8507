use crossterm::style::{Color as TermColor, SetBackgroundColor};

use crate::facelet::{Color, FaceCube, FACE_B, FACE_D, FACE_F, FACE_L, FACE_R, FACE_U};

fn color_to_termcolor(color: Color) -> TermColor {
    match color {
        Color::W => TermColor::White,
        Color::Y => TermColor::Yellow,
        Color::R => TermColor::Red,
        Color::O => TermColor::Magenta,
        Color::B => TermColor::Blue,
        Color::G => TermColor::Green,
    }
}

fn row_cells(face: &[[Color; 3]; 3], row: usize) -> String {
    let mut s = String::new();
    for col in 0..3 {
        s.push_str(&format!(
            "{}  ",
            SetBackgroundColor(color_to_termcolor(face[row][col]))
        ));
    }
    s.push_str(&format!("{}", SetBackgroundColor(TermColor::Reset)));
    s
}

/// Prints the cube as a colored cross net: U on top, then L F R B, D below.
pub fn print_facelet(facelet: &FaceCube) {
    let blank = "      ";
    println!();
    for row in 0..3 {
        println!("{blank}{}", row_cells(&facelet.f[FACE_U], row));
    }
    for row in 0..3 {
        println!(
            "{}{}{}{}",
            row_cells(&facelet.f[FACE_L], row),
            row_cells(&facelet.f[FACE_F], row),
            row_cells(&facelet.f[FACE_R], row),
            row_cells(&facelet.f[FACE_B], row),
        );
    }
    for row in 0..3 {
        println!("{blank}{}", row_cells(&facelet.f[FACE_D], row));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::CubieCube;
    use crate::moves::Move::*;

    #[test]
    fn test_printer() {
        let state = CubieCube::default().apply_moves(&[R, U, R3, U3, F2, D]);
        let face = FaceCube::try_from(&state).unwrap();
        print_facelet(&face);
    }
}
