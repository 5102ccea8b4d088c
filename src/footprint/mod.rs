//! Parametric SMD footprint engine.
//!
//! One engine covers the four package families ([`PackageFamily`]):
//!
//! ```text
//! PackageSpec ──validate──► Dimensions ──► outlines (silk, fab, courtyard)
//!                                      └─► pads (signal, ground, extension)
//!                                               │
//!                                  Footprint ◄──┘ ──► writer (KiCad module)
//! ```
//!
//! Everything is computed and validated before the writer sees the
//! [`Footprint`], so a failed run writes nothing.

pub mod dimensions;
pub mod error;
pub mod geometry;
pub mod outline;
pub mod pads;
pub mod presets;
pub mod primitives;
pub mod spec;
pub mod writer;

pub use dimensions::Dimensions;
pub use error::{FootprintError, FootprintResult};
pub use geometry::{rotate, rotate_segment, Outline, Point, Segment, Size};
pub use primitives::{Circle, Footprint, Graphic, Layer, Line, Pad, PadShape, Text, TextKind};
pub use spec::{PackageFamily, PackageSpec, Rotation};
pub use writer::{format_number, write_footprint};

use tracing::debug;

use crate::symbol::Pinout;

/// Builds the footprint described by `spec`.
///
/// # Errors
///
/// Returns an error if the description fails validation.
pub fn generate(spec: &PackageSpec) -> FootprintResult<Footprint> {
    build(spec, None)
}

/// Builds the footprint and checks every signal pad against a pin-out
/// table.
///
/// # Errors
///
/// Returns an error if the description fails validation or a signal pad
/// has no entry in `pinout`.
pub fn generate_checked(spec: &PackageSpec, pinout: &Pinout) -> FootprintResult<Footprint> {
    build(spec, Some(pinout))
}

fn build(spec: &PackageSpec, pinout: Option<&Pinout>) -> FootprintResult<Footprint> {
    spec.validate()?;
    let dims = Dimensions::derive(spec);
    debug!(
        part = %spec.part_name,
        family = %spec.family,
        rotation = %spec.rotation,
        "Derived footprint dimensions"
    );

    let signal_pads = pads::signal_pads(&dims, spec.solder_mask_margin);
    if let Some(pinout) = pinout {
        if let Some(pad) = signal_pads
            .iter()
            .find(|pad| !pinout.contains_key(pad.number.as_str()))
        {
            return Err(FootprintError::missing_pinout(&spec.part_name, &pad.number));
        }
    }

    let mut footprint = Footprint::new(&spec.part_name);
    footprint.add_outline(&outline::silkscreen(&dims), Layer::SilkscreenTop);
    if let Some(circle) = outline::indicator(spec, &dims) {
        footprint.add_circle(circle);
    }
    footprint.add_outline(&outline::fabrication(&dims), Layer::FabricationTop);
    footprint.add_outline(&outline::fab_leads(spec, &dims), Layer::FabricationTop);
    footprint.add_outline(&outline::courtyard(&dims), Layer::CourtyardTop);

    for pad in signal_pads {
        footprint.add_pad(pad);
    }
    if let Some(pad) = pads::ground_pad(&dims, spec.solder_mask_margin) {
        footprint.add_pad(pad);
    }
    for pad in pads::extension_pads(&dims, spec.solder_mask_margin) {
        footprint.add_pad(pad);
    }

    debug!(
        pads = footprint.pads.len(),
        graphics = footprint.graphics.len(),
        "Built footprint"
    );
    Ok(footprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{PinEntry, PinKind};

    #[test]
    fn qfn_pad_count() {
        let footprint = generate(&presets::maxim_tqfn_28()).unwrap();
        assert_eq!(footprint.pads.len(), 29);
        assert_eq!(footprint.pads.last().map(|p| p.number.as_str()), Some("0"));
    }

    #[test]
    fn invalid_spec_builds_nothing() {
        let mut spec = presets::maxim_tqfn_28();
        spec.pin_count = 27;
        assert!(generate(&spec).is_err());
    }

    #[test]
    fn pinout_check_reports_first_missing_pad() {
        let spec = presets::kinetic_utdfn_8();
        let mut pinout = Pinout::new();
        for number in ["1", "2", "3", "5", "6", "7", "8"] {
            pinout.insert(
                number.to_string(),
                PinEntry {
                    name: format!("P{number}"),
                    kind: PinKind::Bidirectional,
                },
            );
        }
        let err = generate_checked(&spec, &pinout).unwrap_err();
        assert!(matches!(err, FootprintError::MissingPinout { ref pad, .. } if pad == "4"));

        pinout.insert(
            "4".to_string(),
            PinEntry {
                name: "P4".to_string(),
                kind: PinKind::Passive,
            },
        );
        assert!(generate_checked(&spec, &pinout).is_ok());
    }
}
