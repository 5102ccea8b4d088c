//! Pad-array layout.
//!
//! Perimeter pads are numbered from 1 and the count continues across edges
//! (left, bottom, right, top; left and right only for dual-row packages).
//! Balls are named by JEDEC row letter and column number and emitted
//! column by column.

use crate::footprint::dimensions::{Dimensions, PadLayout};
use crate::footprint::geometry::rotate;
use crate::footprint::primitives::{Pad, PadShape};

/// Row letters of a ball grid; I, O, Q, S, X and Z are never used.
const JEDEC_ROW_LETTERS: &str = "ABCDEFGHJKLMNPRTUVWY";

/// Returns the JEDEC name of ball row `row` (0-based): `A`..`Y`, then
/// `AA`, `AB`, ... for larger grids.
#[must_use]
pub fn row_name(row: u32) -> String {
    let letters: Vec<char> = JEDEC_ROW_LETTERS.chars().collect();
    let base = letters.len();
    let mut index = row as usize;
    let mut name = String::new();
    loop {
        name.insert(0, letters[index % base]);
        if index < base {
            break;
        }
        index = index / base - 1;
    }
    name
}

fn degrees(dims: &Dimensions) -> f64 {
    f64::from(dims.rotation.degrees())
}

/// Signal pads: perimeter pads in number order or balls column by column.
#[must_use]
pub fn signal_pads(dims: &Dimensions, solder_mask_margin: f64) -> Vec<Pad> {
    let angle = degrees(dims);
    match &dims.layout {
        PadLayout::Perimeter(rows) => {
            let mut pads = Vec::new();
            let mut number = 1u32;
            for row in rows {
                for index in 0..row.count {
                    pads.push(Pad::smd(
                        number.to_string(),
                        PadShape::Rect,
                        rotate(row.pad_centre(dims.pitch, index), angle),
                        row.board_pad_size,
                        dims.corner_ratio,
                        solder_mask_margin,
                    ));
                    number += 1;
                }
            }
            pads
        }
        PadLayout::Grid(balls) => {
            let mut pads = Vec::with_capacity((balls.columns * balls.rows) as usize);
            for column in 0..balls.columns {
                for row in 0..balls.rows {
                    pads.push(Pad::smd(
                        format!("{}{}", row_name(row), column + 1),
                        PadShape::Circle,
                        rotate(balls.ball_centre(row, column), angle),
                        balls.board_pad_size,
                        dims.corner_ratio,
                        solder_mask_margin,
                    ));
                }
            }
            pads
        }
    }
}

/// The ground pad, if configured.
#[must_use]
pub fn ground_pad(dims: &Dimensions, solder_mask_margin: f64) -> Option<Pad> {
    dims.ground_pad.as_ref().map(|ground| {
        Pad::smd(
            ground.number.clone(),
            PadShape::Rect,
            rotate(ground.centre, degrees(dims)),
            ground.board_size,
            ground.corner_ratio,
            solder_mask_margin,
        )
    })
}

/// The four extension pads, numbered like the ground pad.
#[must_use]
pub fn extension_pads(dims: &Dimensions, solder_mask_margin: f64) -> Vec<Pad> {
    let (Some(ground), Some(extension)) = (&dims.ground_pad, &dims.extension_pads) else {
        return Vec::new();
    };
    extension
        .centres
        .iter()
        .map(|&centre| {
            Pad::smd(
                ground.number.clone(),
                PadShape::Rect,
                rotate(centre, degrees(dims)),
                extension.board_size,
                None,
                solder_mask_margin,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::presets;
    use crate::footprint::spec::{ExtensionPads, Rotation};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn jedec_row_names() {
        assert_eq!(row_name(0), "A");
        assert_eq!(row_name(7), "H");
        assert_eq!(row_name(8), "J");
        assert_eq!(row_name(19), "Y");
        assert_eq!(row_name(20), "AA");
        assert_eq!(row_name(21), "AB");
    }

    #[test]
    fn perimeter_numbers_are_sequential() {
        let spec = presets::st_lga14_l();
        let pads = signal_pads(&Dimensions::derive(&spec), spec.solder_mask_margin);
        let numbers: Vec<String> = pads.iter().map(|p| p.number.clone()).collect();
        let expected: Vec<String> = (1..=14).map(|n| n.to_string()).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn pin_one_is_top_of_left_row() {
        let mut spec = presets::maxim_tqfn_28();
        spec.rotation = Rotation::Deg0;
        let pads = signal_pads(&Dimensions::derive(&spec), 0.0);
        let first = &pads[0];
        assert!(approx_eq(first.center.x, -2.34));
        assert!(approx_eq(first.center.y, -1.5));
        // pad 8 opens the bottom row at the left
        assert!(approx_eq(pads[7].center.x, -1.5));
        assert!(approx_eq(pads[7].center.y, 2.34));
        assert!(approx_eq(pads[7].size.width, 0.3));
    }

    #[test]
    fn balls_go_column_by_column() {
        let spec = presets::fairchild_wlcsp_6();
        let pads = signal_pads(&Dimensions::derive(&spec), spec.solder_mask_margin);
        let names: Vec<&str> = pads.iter().map(|p| p.number.as_str()).collect();
        assert_eq!(names, ["A1", "B1", "C1", "A2", "B2", "C2"]);
        assert!(pads.iter().all(|p| p.shape == PadShape::Circle));
        assert!(approx_eq(pads[0].center.x, -0.2));
        assert!(approx_eq(pads[0].center.y, -0.4));
    }

    #[test]
    fn ground_pad_follows_rotation() {
        let mut spec = presets::kinetic_utdfn_8();
        if let Some(ground) = spec.ground_pad.as_mut() {
            ground.x_offset = 0.1;
        }
        let pad = ground_pad(&Dimensions::derive(&spec), 0.1).unwrap();
        assert_eq!(pad.number, "0");
        // 270 degrees sends +x to -y
        assert!(approx_eq(pad.center.x, 0.0));
        assert!(approx_eq(pad.center.y, -0.1));
    }

    #[test]
    fn extension_pads_flank_ground_pad() {
        let mut spec = presets::kinetic_utdfn_8();
        spec.rotation = Rotation::Deg0;
        spec.extension_pads = Some(ExtensionPads {
            spacing: 0.5,
            length: 0.2,
            width: 0.25,
        });
        let pads = extension_pads(&Dimensions::derive(&spec), 0.1);
        assert_eq!(pads.len(), 4);
        assert!(pads.iter().all(|p| p.number == "0"));
        assert!(approx_eq(pads[0].center.x, -0.25));
        assert!(approx_eq(pads[0].center.y, -(1.45 + 0.2) / 2.0));
        assert!(approx_eq(pads[0].size.width, 0.25));
    }

    #[test]
    fn no_extension_pads_by_default() {
        let spec = presets::kinetic_utdfn_8();
        assert!(extension_pads(&Dimensions::derive(&spec), 0.1).is_empty());
    }
}
