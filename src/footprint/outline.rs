//! Outline builders for the silkscreen, fabrication and courtyard layers.
//!
//! Every builder draws in the package frame from [`Dimensions`] and returns
//! the outline already rotated into the board frame, so the pin-1 markings
//! stay on the same logical corner for every rotation.

use crate::footprint::dimensions::{
    CourtyardShape, Dimensions, HalfExtents, PadLayout, SilkscreenShape, FAB_CHAMFER,
};
use crate::footprint::geometry::{rotate, Outline, Point, Segment};
use crate::footprint::primitives::{Circle, Layer};
use crate::footprint::spec::PackageSpec;

fn degrees(dims: &Dimensions) -> f64 {
    f64::from(dims.rotation.degrees())
}

fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::from_coords(x1, y1, x2, y2)
}

/// Silkscreen outline.
#[must_use]
pub fn silkscreen(dims: &Dimensions) -> Outline {
    let local = match dims.silkscreen {
        SilkscreenShape::Brackets { outer, notch } => {
            let (x, y) = (outer.x, outer.y);
            let (nx, ny) = (notch.x, notch.y);
            Outline::from_segments(vec![
                segment(-x, -ny, -nx, -y),
                segment(-x, y, -x, ny),
                segment(-nx, y, -x, y),
                segment(nx, y, x, y),
                segment(x, y, x, ny),
                segment(x, -ny, x, -y),
                segment(x, -y, nx, -y),
            ])
        }
        SilkscreenShape::Sides { outer, notch } => {
            let (x, y) = (outer.x, outer.y);
            let bevel_end = -x + (y - notch);
            Outline::from_segments(vec![
                segment(-x, -notch, bevel_end, -y),
                segment(bevel_end, -y, x, -y),
                segment(x, -y, x, -notch),
                segment(x, notch, x, y),
                segment(x, y, -x, y),
                segment(-x, y, -x, notch),
            ])
        }
        SilkscreenShape::Bevelled { outer, bevel } => chamfered_rectangle(outer, bevel),
    };
    local.rotated(degrees(dims))
}

/// Pin-1 circle on the silkscreen, touching the outline from outside.
#[must_use]
pub fn indicator(spec: &PackageSpec, dims: &Dimensions) -> Option<Circle> {
    let diameter = spec.indicator_circle_diameter?;
    let radius = diameter / 2.0;
    let outer = dims.silkscreen.outer();
    let local = match dims.silkscreen {
        SilkscreenShape::Sides { .. } => Point::new(-spec.pad_span / 2.0, -outer.y - radius),
        SilkscreenShape::Brackets { .. } | SilkscreenShape::Bevelled { .. } => {
            Point::new(-outer.x - radius, -outer.y - radius)
        }
    };
    Some(Circle {
        center: rotate(local, degrees(dims)),
        radius,
        layer: Layer::SilkscreenTop,
    })
}

/// Fabrication outline: the body plus margin with the pin-1 corner clipped.
#[must_use]
pub fn fabrication(dims: &Dimensions) -> Outline {
    let chamfer = FAB_CHAMFER.min(dims.fab.x).min(dims.fab.y);
    chamfered_rectangle(dims.fab, chamfer).rotated(degrees(dims))
}

/// Physical leads drawn on the fabrication layer, three segments per pad.
///
/// Empty unless `show_fab_leads` is set on a perimeter package.
#[must_use]
pub fn fab_leads(spec: &PackageSpec, dims: &Dimensions) -> Outline {
    let PadLayout::Perimeter(rows) = &dims.layout else {
        return Outline::default();
    };
    if !spec.show_fab_leads {
        return Outline::default();
    }

    let lead = spec.lead_or_default();
    let half_width = lead.width / 2.0 + spec.margins.fab;
    let mut segments = Vec::new();
    for row in rows {
        let normal = row.edge.normal();
        let tangent = row.edge.tangent();
        let edge_offset = if row.edge.is_vertical() {
            dims.fab.x
        } else {
            dims.fab.y
        };
        for index in 0..row.count {
            let base = normal * edge_offset + tangent * row.position(dims.pitch, index);
            let a = base - tangent * half_width;
            let b = a + normal * lead.overhang;
            let d = base + tangent * half_width;
            let c = d + normal * lead.overhang;
            segments.push(Segment::new(a, b));
            segments.push(Segment::new(b, c));
            segments.push(Segment::new(c, d));
        }
    }
    Outline::from_segments(segments).rotated(degrees(dims))
}

/// Courtyard outline (4 or 12 vertices).
#[must_use]
pub fn courtyard(dims: &Dimensions) -> Outline {
    let points = match dims.courtyard {
        CourtyardShape::Rectangle { half } => vec![
            Point::new(-half.x, -half.y),
            Point::new(half.x, -half.y),
            Point::new(half.x, half.y),
            Point::new(-half.x, half.y),
        ],
        CourtyardShape::Cross { inner, outer } => vec![
            Point::new(-inner.x, -outer.y),
            Point::new(inner.x, -outer.y),
            Point::new(inner.x, -inner.y),
            Point::new(outer.x, -inner.y),
            Point::new(outer.x, inner.y),
            Point::new(inner.x, inner.y),
            Point::new(inner.x, outer.y),
            Point::new(-inner.x, outer.y),
            Point::new(-inner.x, inner.y),
            Point::new(-outer.x, inner.y),
            Point::new(-outer.x, -inner.y),
            Point::new(-inner.x, -inner.y),
        ],
    };
    Outline::closed(&points).rotated(degrees(dims))
}

fn chamfered_rectangle(half: HalfExtents, chamfer: f64) -> Outline {
    Outline::closed(&[
        Point::new(-half.x + chamfer, -half.y),
        Point::new(half.x, -half.y),
        Point::new(half.x, half.y),
        Point::new(-half.x, half.y),
        Point::new(-half.x, -half.y + chamfer),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::presets;
    use crate::footprint::spec::{Lead, Rotation};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn upright(mut spec: PackageSpec) -> PackageSpec {
        spec.rotation = Rotation::Deg0;
        spec
    }

    #[test]
    fn fab_outline_is_closed_with_chamfer() {
        let dims = Dimensions::derive(&upright(presets::maxim_tqfn_28()));
        let fab = fabrication(&dims);
        assert_eq!(fab.len(), 5);
        assert_eq!(fab.segments[0].start, fab.segments[4].end);
        // 5.1 x 5.1 minus the 0.3 x 0.3 corner triangle
        assert!(approx_eq(fab.area(), 5.1f64.mul_add(5.1, -0.045)));
        let corner = fab.segments[0].end;
        assert!(approx_eq(corner.x, -2.25));
        assert!(approx_eq(corner.y, -2.55));
    }

    #[test]
    fn fab_area_survives_rotation() {
        let mut spec = presets::st_lga14_l();
        let areas: Vec<f64> = Rotation::ALL
            .iter()
            .map(|&rotation| {
                spec.rotation = rotation;
                fabrication(&Dimensions::derive(&spec)).area()
            })
            .collect();
        for area in &areas {
            assert!(approx_eq(*area, areas[0]));
        }
    }

    #[test]
    fn qfn_silkscreen_has_seven_segments() {
        let dims = Dimensions::derive(&upright(presets::maxim_tqfn_28()));
        let silk = silkscreen(&dims);
        assert_eq!(silk.len(), 7);
        let bevel = silk.segments[0];
        assert!(approx_eq(bevel.start.x, -2.7));
        assert!(approx_eq(bevel.start.y, -1.85));
        assert!(approx_eq(bevel.end.x, -1.85));
        assert!(approx_eq(bevel.end.y, -2.7));
    }

    #[test]
    fn dual_row_silkscreen_bevel_is_diagonal() {
        let dims = Dimensions::derive(&upright(presets::kinetic_utdfn_8()));
        let silk = silkscreen(&dims);
        assert_eq!(silk.len(), 6);
        let bevel = silk.segments[0];
        assert!(approx_eq(
            (bevel.end.x - bevel.start.x).abs(),
            (bevel.end.y - bevel.start.y).abs()
        ));
    }

    #[test]
    fn bga_silkscreen_is_closed() {
        let dims = Dimensions::derive(&presets::fairchild_wlcsp_6());
        let silk = silkscreen(&dims);
        assert_eq!(silk.len(), 5);
        assert_eq!(silk.segments[0].start, silk.segments[4].end);
    }

    #[test]
    fn indicator_sits_outside_pin_one_corner() {
        let spec = upright(presets::maxim_tqfn_28());
        let dims = Dimensions::derive(&spec);
        let circle = indicator(&spec, &dims).unwrap();
        assert!(approx_eq(circle.radius, 0.15));
        assert!(approx_eq(circle.center.x, -2.85));
        assert!(approx_eq(circle.center.y, -2.85));

        let spec = upright(presets::kinetic_utdfn_8());
        let dims = Dimensions::derive(&spec);
        let circle = indicator(&spec, &dims).unwrap();
        assert!(approx_eq(circle.center.x, -spec.pad_span / 2.0));
        assert!(approx_eq(circle.center.y, -0.95 - 0.15));
    }

    #[test]
    fn no_indicator_without_diameter() {
        let mut spec = presets::maxim_tqfn_28();
        spec.indicator_circle_diameter = None;
        assert!(indicator(&spec, &Dimensions::derive(&spec)).is_none());
    }

    #[test]
    fn dual_row_courtyard_point_count() {
        let mut spec = presets::kinetic_utdfn_8();
        assert_eq!(courtyard(&Dimensions::derive(&spec)).len(), 4);
        spec.lead = Some(Lead {
            width: 0.2,
            overhang: 0.25,
        });
        assert_eq!(courtyard(&Dimensions::derive(&spec)).len(), 12);
    }

    #[test]
    fn cross_courtyard_is_union_of_bars() {
        let dims = Dimensions::derive(&upright(presets::maxim_tqfn_28()));
        let CourtyardShape::Cross { inner, outer } = dims.courtyard else {
            panic!("expected cross courtyard");
        };
        let expected = 4.0 * (inner.x * outer.y + outer.x * inner.y - inner.x * inner.y);
        assert!(approx_eq(courtyard(&dims).area(), expected));
    }

    #[test]
    fn fab_leads_only_when_enabled() {
        let mut spec = upright(presets::kinetic_utdfn_8());
        assert!(fab_leads(&spec, &Dimensions::derive(&spec)).is_empty());

        spec.show_fab_leads = true;
        let leads = fab_leads(&spec, &Dimensions::derive(&spec));
        assert_eq!(leads.len(), 3 * 8);
        // first lead starts on the left fab edge and points inwards
        let first = leads.segments[0];
        assert!(approx_eq(first.start.x, -0.8));
        assert!(approx_eq(first.end.x, -0.8 + 0.175));
    }

    #[test]
    fn no_fab_leads_for_ball_grid() {
        let mut spec = presets::fairchild_wlcsp_6();
        spec.show_fab_leads = true;
        assert!(fab_leads(&spec, &Dimensions::derive(&spec)).is_empty());
    }
}
