//! Dimension policy: derives every extent the outline builders and the pad
//! layout need from a validated [`PackageSpec`].
//!
//! All values are in the package frame except the `board_*` sizes, which
//! are the axis-aligned extents as they will appear on the board. Pads are
//! written without an angle of their own, so at 90 and 270 degrees their
//! width and height must be exchanged once here rather than by the point
//! rotation that moves their centres.

use crate::footprint::geometry::{Point, Size};
use crate::footprint::spec::{PackageFamily, PackageSpec, Rotation};

/// Chamfer length clipped off the pin-1 corner of the fab outline.
pub const FAB_CHAMFER: f64 = 0.3;

/// Half-widths of a rectangle centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfExtents {
    /// Half extent along x.
    pub x: f64,
    /// Half extent along y.
    pub y: f64,
}

impl HalfExtents {
    /// Creates new half extents.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Package edge carrying a pad row. Board frame has +y pointing down, so
/// `Bottom` is the edge at positive y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Negative x; pads numbered downwards.
    Left,
    /// Positive y; pads numbered left to right.
    Bottom,
    /// Positive x; pads numbered upwards.
    Right,
    /// Negative y; pads numbered right to left.
    Top,
}

impl Edge {
    /// Unit vector pointing away from the body.
    #[must_use]
    pub const fn normal(self) -> Point {
        match self {
            Self::Left => Point::new(-1.0, 0.0),
            Self::Bottom => Point::new(0.0, 1.0),
            Self::Right => Point::new(1.0, 0.0),
            Self::Top => Point::new(0.0, -1.0),
        }
    }

    /// Unit vector in pad numbering direction.
    #[must_use]
    pub const fn tangent(self) -> Point {
        match self {
            Self::Left => Point::new(0.0, 1.0),
            Self::Bottom => Point::new(1.0, 0.0),
            Self::Right => Point::new(0.0, -1.0),
            Self::Top => Point::new(-1.0, 0.0),
        }
    }

    /// True for the left and right edges, whose pads are long along x.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// One row of perimeter pads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadRow {
    /// Edge the row sits on.
    pub edge: Edge,
    /// Number of pads in the row.
    pub count: u32,
    /// Distance from the package centre to the pad centres.
    pub offset: f64,
    /// Pad size in the package frame.
    pub pad_size: Size,
    /// Pad size as written to the board.
    pub board_pad_size: Size,
}

impl PadRow {
    /// Position of pad `index` along the row, relative to the row centre.
    #[must_use]
    pub fn position(&self, pitch: f64, index: u32) -> f64 {
        pitch * (f64::from(index) - f64::from(self.count.saturating_sub(1)) / 2.0)
    }

    /// Centre of pad `index` in the package frame.
    #[must_use]
    pub fn pad_centre(&self, pitch: f64, index: u32) -> Point {
        self.edge.normal() * self.offset + self.edge.tangent() * self.position(pitch, index)
    }
}

/// Ball array of an area-array package.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallLayout {
    /// Ball columns (x).
    pub columns: u32,
    /// Ball rows (y).
    pub rows: u32,
    /// Horizontal pitch.
    pub column_pitch: f64,
    /// Vertical pitch.
    pub row_pitch: f64,
    /// Ball pad size as written to the board.
    pub board_pad_size: Size,
}

impl BallLayout {
    /// Centre of the ball at (`row`, `column`) in the package frame.
    #[must_use]
    pub fn ball_centre(&self, row: u32, column: u32) -> Point {
        Point::new(
            self.column_pitch * (f64::from(column) - f64::from(self.columns - 1) / 2.0),
            self.row_pitch * (f64::from(row) - f64::from(self.rows - 1) / 2.0),
        )
    }
}

/// Pad arrangement.
#[derive(Debug, Clone, PartialEq)]
pub enum PadLayout {
    /// Rows of pads along the package edges.
    Perimeter(Vec<PadRow>),
    /// Area array of balls.
    Grid(BallLayout),
}

/// Silkscreen outline shape in the package frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SilkscreenShape {
    /// Corner brackets clear of the pads, pin-1 corner bevelled.
    Brackets {
        /// Outline half extents.
        outer: HalfExtents,
        /// Half extents of the gaps left for the pad rows.
        notch: HalfExtents,
    },
    /// Top and bottom lines with short side stubs, pin-1 corner bevelled.
    Sides {
        /// Outline half extents.
        outer: HalfExtents,
        /// Half extent of the gap left for the pad rows.
        notch: f64,
    },
    /// Closed rectangle with the pin-1 corner bevelled.
    Bevelled {
        /// Outline half extents.
        outer: HalfExtents,
        /// Bevel length.
        bevel: f64,
    },
}

impl SilkscreenShape {
    /// Outline half extents.
    #[must_use]
    pub const fn outer(&self) -> HalfExtents {
        match *self {
            Self::Brackets { outer, .. } | Self::Sides { outer, .. } | Self::Bevelled { outer, .. } => {
                outer
            }
        }
    }
}

/// Courtyard shape in the package frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CourtyardShape {
    /// Plain rectangle.
    Rectangle {
        /// Half extents.
        half: HalfExtents,
    },
    /// Union of two crossing rectangles (12 vertices).
    Cross {
        /// Half extents of the body part.
        inner: HalfExtents,
        /// Half extents reached by the pad rows.
        outer: HalfExtents,
    },
}

/// Ground pad geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundPadGeometry {
    /// Pad number.
    pub number: String,
    /// Centre in the package frame.
    pub centre: Point,
    /// Size in the package frame.
    pub size: Size,
    /// Size as written to the board.
    pub board_size: Size,
    /// Corner radius relative to the shorter side.
    pub corner_ratio: Option<f64>,
}

/// Extension pads flanking the ground pad.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionGeometry {
    /// Pad centres in the package frame.
    pub centres: Vec<Point>,
    /// Pad size as written to the board.
    pub board_size: Size,
}

/// Everything the outline builders and the pad layout need.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    /// Footprint rotation.
    pub rotation: Rotation,
    /// Pad pitch.
    pub pitch: f64,
    /// Signal pad size in the package frame, mask growth included.
    pub pad: Size,
    /// Body size in the package frame.
    pub body: Size,
    /// Body size as it appears on the board.
    pub board_body: Size,
    /// Signal pad arrangement.
    pub layout: PadLayout,
    /// Signal pad corner radius relative to the shorter side.
    pub corner_ratio: Option<f64>,
    /// Silkscreen shape.
    pub silkscreen: SilkscreenShape,
    /// Fabrication outline half extents.
    pub fab: HalfExtents,
    /// Courtyard shape.
    pub courtyard: CourtyardShape,
    /// Ground pad, if any.
    pub ground_pad: Option<GroundPadGeometry>,
    /// Extension pads, if any.
    pub extension_pads: Option<ExtensionGeometry>,
}

/// Board-frame extents of `size`: transposed at 90 and 270 degrees.
#[must_use]
pub const fn orient(size: Size, rotation: Rotation) -> Size {
    match rotation {
        Rotation::Deg90 | Rotation::Deg270 => size.transposed(),
        Rotation::Deg0 | Rotation::Deg180 => size,
    }
}

/// Half length of a row of `count` pads at `pitch`, centre to last centre.
fn row_half_length(pitch: f64, count: u32) -> f64 {
    pitch * (f64::from(count) / 2.0 - 0.5)
}

impl Dimensions {
    /// Derives all dimensions from a validated spec.
    #[must_use]
    pub fn derive(spec: &PackageSpec) -> Self {
        let margins = spec.margins;
        let rotation = spec.rotation;

        // Solder-mask-defined pads: grow the copper by the (negative) margin.
        let mask_growth = if spec.solder_mask_margin < 0.0 {
            -2.0 * spec.solder_mask_margin
        } else {
            0.0
        };
        let pad = Size::new(spec.pad_width + mask_growth, spec.pad_length + mask_growth);

        let body = Size::new(spec.body_width, spec.body_height);
        let fab = HalfExtents::new(
            body.width / 2.0 + margins.fab,
            body.height / 2.0 + margins.fab,
        );

        let (layout, silkscreen, courtyard, corner_ratio) = match spec.family {
            PackageFamily::Bga => Self::area_array(spec, pad, body),
            PackageFamily::Qfn | PackageFamily::Lga => Self::quad(spec, pad, body, mask_growth),
            PackageFamily::DualRow => Self::dual_row(spec, pad, body),
        };

        let ground_pad = spec.ground_pad.as_ref().map(|ground| {
            let size = Size::new(ground.width + mask_growth, ground.height + mask_growth);
            GroundPadGeometry {
                number: ground.number.clone(),
                centre: Point::new(ground.x_offset, ground.y_offset),
                size,
                board_size: orient(size, rotation),
                corner_ratio: ground
                    .corner_radius
                    .map(|radius| radius / size.width.min(size.height)),
            }
        });

        let extension_pads = spec
            .extension_pads
            .zip(ground_pad.as_ref())
            .map(|(extension, ground)| {
                let mut centres = Vec::with_capacity(4);
                for i in [-1.0, 1.0] {
                    for j in [-1.0, 1.0] {
                        centres.push(
                            ground.centre
                                + Point::new(
                                    i * extension.spacing / 2.0,
                                    j * (ground.size.height + extension.length) / 2.0,
                                ),
                        );
                    }
                }
                ExtensionGeometry {
                    centres,
                    board_size: orient(Size::new(extension.width, extension.length), rotation),
                }
            });

        Self {
            rotation,
            pitch: spec.pitch,
            pad,
            body,
            board_body: orient(body, rotation),
            layout,
            corner_ratio,
            silkscreen,
            fab,
            courtyard,
            ground_pad,
            extension_pads,
        }
    }

    fn area_array(
        spec: &PackageSpec,
        pad: Size,
        body: Size,
    ) -> (PadLayout, SilkscreenShape, CourtyardShape, Option<f64>) {
        let margins = spec.margins;
        let diameter = pad.width;
        let (columns, row_pitch) = spec
            .grid
            .map_or((1, spec.pitch), |grid| (grid.columns.max(1), grid.row_pitch));
        let balls = BallLayout {
            columns,
            rows: spec.ball_rows().max(1),
            column_pitch: spec.pitch,
            row_pitch,
            board_pad_size: orient(Size::new(diameter, diameter), spec.rotation),
        };

        let outer = HalfExtents::new(
            row_half_length(balls.column_pitch, balls.columns)
                + diameter / 2.0
                + margins.silkscreen,
            row_half_length(balls.row_pitch, balls.rows) + diameter / 2.0 + margins.silkscreen,
        );
        let silkscreen = SilkscreenShape::Bevelled {
            outer,
            bevel: FAB_CHAMFER.min(outer.x).min(outer.y),
        };

        let courtyard = CourtyardShape::Rectangle {
            half: HalfExtents::new(
                body.width / 2.0 + margins.courtyard,
                body.height / 2.0 + margins.courtyard,
            ),
        };

        let corner_ratio = spec.pad_corner_radius.map(|radius| radius / diameter);
        (PadLayout::Grid(balls), silkscreen, courtyard, corner_ratio)
    }

    fn quad(
        spec: &PackageSpec,
        pad: Size,
        body: Size,
        mask_growth: f64,
    ) -> (PadLayout, SilkscreenShape, CourtyardShape, Option<f64>) {
        let margins = spec.margins;
        let (left_right, top_bottom) = spec.edge_counts();
        let (vertical_span, vertical_length) = spec.vertical_rows.map_or(
            (spec.pad_span, pad.height),
            |rows| (rows.span, rows.pad_length + mask_growth),
        );

        let side = Size::new(pad.height, pad.width);
        let end = Size::new(pad.width, vertical_length);
        let row = |edge: Edge, count: u32, span: f64, size: Size| PadRow {
            edge,
            count,
            offset: span / 2.0,
            pad_size: size,
            board_pad_size: orient(size, spec.rotation),
        };
        let rows = vec![
            row(Edge::Left, left_right, spec.pad_span, side),
            row(Edge::Bottom, top_bottom, vertical_span, end),
            row(Edge::Right, left_right, spec.pad_span, side),
            row(Edge::Top, top_bottom, vertical_span, end),
        ];

        let silkscreen = SilkscreenShape::Brackets {
            outer: HalfExtents::new(
                body.width / 2.0 + margins.silkscreen,
                body.height / 2.0 + margins.silkscreen,
            ),
            notch: HalfExtents::new(
                row_half_length(spec.pitch, top_bottom) + pad.width / 2.0 + margins.silkscreen,
                row_half_length(spec.pitch, left_right) + pad.width / 2.0 + margins.silkscreen,
            ),
        };

        let inner = HalfExtents::new(
            body.width / 2.0 + margins.courtyard,
            body.height / 2.0 + margins.courtyard,
        );
        let outer = HalfExtents::new(
            (spec.pad_span / 2.0 + pad.height / 2.0 + margins.courtyard / 2.0).max(inner.x),
            (vertical_span / 2.0 + vertical_length / 2.0 + margins.courtyard / 2.0).max(inner.y),
        );
        let courtyard = if outer.x > inner.x && outer.y > inner.y {
            CourtyardShape::Cross { inner, outer }
        } else {
            CourtyardShape::Rectangle { half: outer }
        };

        let corner_ratio = spec
            .pad_corner_radius
            .map(|radius| radius / pad.width.min(pad.height));
        (PadLayout::Perimeter(rows), silkscreen, courtyard, corner_ratio)
    }

    fn dual_row(
        spec: &PackageSpec,
        pad: Size,
        body: Size,
    ) -> (PadLayout, SilkscreenShape, CourtyardShape, Option<f64>) {
        let margins = spec.margins;
        let (per_side, _) = spec.edge_counts();
        let size = Size::new(pad.height, pad.width);
        let row = |edge: Edge| PadRow {
            edge,
            count: per_side,
            offset: spec.pad_span / 2.0,
            pad_size: size,
            board_pad_size: orient(size, spec.rotation),
        };
        let rows = vec![row(Edge::Left), row(Edge::Right)];

        let silkscreen = SilkscreenShape::Sides {
            outer: HalfExtents::new(
                body.width / 2.0 + margins.silkscreen,
                body.height / 2.0 + margins.silkscreen,
            ),
            notch: row_half_length(spec.pitch, per_side) + pad.width / 2.0 + margins.silkscreen,
        };

        // Leads that stop inside the body leave nothing to keep clear
        // beyond the pads, so a rectangle is enough.
        let lead = spec.lead_or_default();
        let inner = HalfExtents::new(
            body.width / 2.0 + margins.courtyard,
            row_half_length(spec.pitch, per_side) + lead.width / 2.0 + margins.courtyard / 2.0,
        );
        let outer = HalfExtents::new(
            spec.pad_span / 2.0 + pad.height / 2.0 + margins.courtyard / 2.0,
            body.height / 2.0 + margins.courtyard,
        );
        let courtyard = if lead.overhang > 0.0 {
            CourtyardShape::Cross { inner, outer }
        } else {
            CourtyardShape::Rectangle { half: outer }
        };

        let corner_ratio = spec
            .pad_corner_radius
            .map(|radius| radius / pad.width.min(pad.height));
        (PadLayout::Perimeter(rows), silkscreen, courtyard, corner_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::presets;
    use crate::footprint::spec::{BallGrid, Lead};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn qfn_silkscreen_notch() {
        let dims = Dimensions::derive(&presets::maxim_tqfn_28());
        let SilkscreenShape::Brackets { outer, notch } = dims.silkscreen else {
            panic!("expected bracket silkscreen");
        };
        assert!(approx_eq(outer.x, 2.7));
        // 0.5 * (7/2 - 0.5) + 0.3/2 + 0.2
        assert!(approx_eq(notch.x, 1.85));
        assert!(approx_eq(notch.y, 1.85));
    }

    #[test]
    fn qfn_courtyard_is_cross() {
        let dims = Dimensions::derive(&presets::maxim_tqfn_28());
        let CourtyardShape::Cross { inner, outer } = dims.courtyard else {
            panic!("expected cross courtyard");
        };
        assert!(approx_eq(inner.x, 2.8));
        assert!(approx_eq(outer.x, 2.965));
        assert!(approx_eq(outer.y, 2.965));
    }

    #[test]
    fn quad_courtyard_without_protrusion_is_rectangle() {
        let dims = Dimensions::derive(&presets::st_lga14_l());
        // 2.075/2 + 0.575/2 + 0.15 < 3.0/2 + 0.3
        assert!(matches!(dims.courtyard, CourtyardShape::Rectangle { .. }));
    }

    #[test]
    fn dual_row_courtyard_follows_overhang() {
        let mut spec = presets::kinetic_utdfn_8();
        let dims = Dimensions::derive(&spec);
        assert!(matches!(dims.courtyard, CourtyardShape::Rectangle { .. }));

        spec.lead = Some(Lead {
            width: 0.2,
            overhang: 0.1,
        });
        let dims = Dimensions::derive(&spec);
        assert!(matches!(dims.courtyard, CourtyardShape::Cross { .. }));
    }

    #[test]
    fn quarter_turn_swaps_board_sizes() {
        let spec = presets::kinetic_utdfn_8();
        let dims = Dimensions::derive(&spec);
        let PadLayout::Perimeter(rows) = &dims.layout else {
            panic!("expected perimeter layout");
        };
        assert!(approx_eq(rows[0].pad_size.width, 0.45));
        assert!(approx_eq(rows[0].pad_size.height, 0.25));
        assert_eq!(rows[0].board_pad_size, rows[0].pad_size.transposed());
        let ground = dims.ground_pad.unwrap();
        assert!(approx_eq(ground.board_size.width, 1.45));
        assert!(approx_eq(ground.board_size.height, 0.80));
    }

    #[test]
    fn negative_mask_margin_grows_pads() {
        let mut spec = presets::maxim_tqfn_28();
        spec.solder_mask_margin = -0.05;
        let dims = Dimensions::derive(&spec);
        assert!(approx_eq(dims.pad.width, 0.4));
        assert!(approx_eq(dims.pad.height, 1.05));
        assert!(approx_eq(dims.ground_pad.unwrap().size.width, 3.35));
    }

    #[test]
    fn row_positions_are_centred() {
        let row = PadRow {
            edge: Edge::Left,
            count: 4,
            offset: 1.0,
            pad_size: Size::new(0.5, 0.2),
            board_pad_size: Size::new(0.5, 0.2),
        };
        assert!(approx_eq(row.position(0.4, 0), -0.6));
        assert!(approx_eq(row.position(0.4, 3), 0.6));
        let centre = row.pad_centre(0.4, 0);
        assert!(approx_eq(centre.x, -1.0));
        assert!(approx_eq(centre.y, -0.6));
    }

    #[test]
    fn bga_silkscreen_follows_ball_array() {
        // 2 x 3 balls at 0.4 mm, 0.2 mm pads, 0.2 mm margin
        let dims = Dimensions::derive(&presets::fairchild_wlcsp_6());
        let outer = dims.silkscreen.outer();
        assert!(approx_eq(outer.x, 0.5));
        assert!(approx_eq(outer.y, 0.7));
    }

    #[test]
    fn bga_silkscreen_uses_row_pitch_vertically() {
        let mut spec = presets::fairchild_wlcsp_6();
        spec.grid = Some(BallGrid {
            columns: 2,
            row_pitch: 0.5,
        });
        let outer = Dimensions::derive(&spec).silkscreen.outer();
        assert!(approx_eq(outer.x, 0.5));
        assert!(approx_eq(outer.y, 0.8));
    }
}
