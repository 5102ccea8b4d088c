//! Built-in package descriptions.
//!
//! Pad geometry follows the land-pattern convention used in datasheets:
//! `Z` is the distance across the outer pad edges, `G` across the inner pad
//! edges, so the row span is `(Z + G) / 2` and the pad length `(Z - G) / 2`.

use crate::footprint::error::{FootprintError, FootprintResult};
use crate::footprint::spec::{
    BallGrid, EdgePins, GroundPad, Lead, Margins, PackageFamily, PackageSpec, Rotation,
    RowGeometry,
};

/// Names accepted by [`by_name`].
const PRESETS: [&str; 4] = [
    "maxim-tqfn-28",
    "kinetic-utdfn-8",
    "st-lga14-l",
    "fairchild-wlcsp-6",
];

/// Returns the names of all built-in presets.
#[must_use]
pub const fn names() -> &'static [&'static str] {
    &PRESETS
}

/// Looks up a preset by name (case-insensitive).
///
/// # Errors
///
/// Returns [`FootprintError::UnknownPreset`] if no preset has that name.
pub fn by_name(name: &str) -> FootprintResult<PackageSpec> {
    match name.to_lowercase().as_str() {
        "maxim-tqfn-28" => Ok(maxim_tqfn_28()),
        "kinetic-utdfn-8" => Ok(kinetic_utdfn_8()),
        "st-lga14-l" => Ok(st_lga14_l()),
        "fairchild-wlcsp-6" => Ok(fairchild_wlcsp_6()),
        _ => Err(FootprintError::unknown_preset(name)),
    }
}

/// Maxim TQFN-28, 5 x 5 mm, 0.5 mm pitch, exposed pad.
#[must_use]
pub fn maxim_tqfn_28() -> PackageSpec {
    let z = 4.68 + 0.95;
    let g = 4.68 - 0.95;
    PackageSpec {
        part_name: "Maxim_TQFN-28".to_string(),
        family: PackageFamily::Qfn,
        body_width: 5.0,
        body_height: 5.0,
        pin_count: 28,
        pitch: 0.5,
        pad_width: 0.3,
        pad_length: (z - g) / 2.0,
        pad_span: (z + g) / 2.0,
        vertical_rows: None,
        edge_pins: None,
        grid: None,
        lead: Some(Lead {
            width: 0.30,
            overhang: -0.4,
        }),
        margins: Margins::default(),
        rotation: Rotation::Deg270,
        pad_corner_radius: None,
        ground_pad: Some(GroundPad::centred(3.25, 3.25)),
        extension_pads: None,
        solder_mask_margin: 0.10,
        indicator_circle_diameter: Some(0.3),
        show_fab_leads: false,
    }
}

/// Kinetic UTDFN-8, 1.5 x 1.5 mm, 0.4 mm pitch, exposed pad.
#[must_use]
pub fn kinetic_utdfn_8() -> PackageSpec {
    let z = 2.0f64.mul_add(0.45, 1.05);
    let g = 1.05;
    PackageSpec {
        part_name: "Kinetic-UTDFN-8".to_string(),
        family: PackageFamily::DualRow,
        body_width: 1.50,
        body_height: 1.50,
        pin_count: 8,
        pitch: 0.40,
        pad_width: 0.25,
        pad_length: (z - g) / 2.0,
        pad_span: (z + g) / 2.0,
        vertical_rows: None,
        edge_pins: None,
        grid: None,
        lead: Some(Lead {
            width: 0.20,
            overhang: -0.175,
        }),
        margins: Margins::default(),
        rotation: Rotation::Deg270,
        pad_corner_radius: None,
        ground_pad: Some(GroundPad::centred(0.80, 1.45)),
        extension_pads: None,
        solder_mask_margin: 0.10,
        indicator_circle_diameter: Some(0.3),
        show_fab_leads: false,
    }
}

/// ST LGA-14L, 3.0 x 2.5 mm, four pads left/right and three top/bottom.
#[must_use]
pub fn st_lga14_l() -> PackageSpec {
    // top and bottom rows
    let z = 2.0f64.mul_add(0.05, 2.0f64.mul_add(-0.1, 2.50));
    let g = 2.50 - 2.0 * 0.1 - 2.0 * 0.475 - 2.0 * 0.05;
    // left and right rows
    let z2 = 2.0f64.mul_add(0.05, 2.0f64.mul_add(-0.1, 3.00));
    let g2 = g;
    let pad_length = (z - g) / 2.0;
    PackageSpec {
        part_name: "ST-LGA14-L".to_string(),
        family: PackageFamily::Lga,
        body_width: 3.0,
        body_height: 2.5,
        pin_count: 14,
        pitch: 0.5,
        pad_width: 0.25 + 0.05,
        pad_length,
        pad_span: (z2 + g2) / 2.0,
        vertical_rows: Some(RowGeometry {
            span: (z + g) / 2.0,
            pad_length,
        }),
        edge_pins: Some(EdgePins {
            left_right: 4,
            top_bottom: 3,
        }),
        grid: None,
        lead: Some(Lead {
            width: 0.25,
            overhang: -0.475,
        }),
        margins: Margins::default(),
        rotation: Rotation::Deg90,
        pad_corner_radius: None,
        ground_pad: None,
        extension_pads: None,
        solder_mask_margin: 0.10,
        indicator_circle_diameter: Some(0.3),
        show_fab_leads: false,
    }
}

/// Fairchild WLCSP-6, 2 x 3 balls at 0.4 mm pitch.
#[must_use]
pub fn fairchild_wlcsp_6() -> PackageSpec {
    PackageSpec {
        part_name: "Fairchild_WLCSP-6".to_string(),
        family: PackageFamily::Bga,
        body_width: 0.88,
        body_height: 1.23,
        pin_count: 6,
        pitch: 0.40,
        pad_width: 0.20,
        pad_length: 0.0,
        pad_span: 0.0,
        vertical_rows: None,
        edge_pins: None,
        grid: Some(BallGrid {
            columns: 2,
            row_pitch: 0.40,
        }),
        lead: None,
        margins: Margins::default(),
        rotation: Rotation::Deg0,
        pad_corner_radius: None,
        ground_pad: None,
        extension_pads: None,
        solder_mask_margin: 0.10,
        indicator_circle_diameter: Some(0.3),
        show_fab_leads: false,
    }
}
