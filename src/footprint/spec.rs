//! Package description consumed by the footprint engine.
//!
//! A [`PackageSpec`] is built once (from JSON or a preset), validated, and
//! then only read. All lengths are in millimetres and in the package frame:
//! `body_width` runs along the pad rows of the left and right edges' normal,
//! i.e. along x before rotation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::footprint::error::{FootprintError, FootprintResult};

/// Package family, selecting the dimension and outline policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageFamily {
    /// Ball grid array / wafer-level chip-scale package.
    Bga,
    /// Quad flat no-lead (also QFP-style quad packages).
    Qfn,
    /// Land grid array with pads on all four edges.
    Lga,
    /// Dual-row leadless or gull-wing packages (DFN, VSSOP, TSSOP, SOIC).
    DualRow,
}

impl PackageFamily {
    /// Returns true for families with pads along the package edges.
    #[must_use]
    pub const fn is_perimeter(self) -> bool {
        !matches!(self, Self::Bga)
    }

    /// Number of populated edges for perimeter families.
    #[must_use]
    pub const fn edge_count(self) -> u32 {
        match self {
            Self::Bga => 0,
            Self::DualRow => 2,
            Self::Qfn | Self::Lga => 4,
        }
    }
}

impl fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bga => write!(f, "BGA"),
            Self::Qfn => write!(f, "QFN"),
            Self::Lga => write!(f, "LGA"),
            Self::DualRow => write!(f, "dual-row"),
        }
    }
}

/// Footprint rotation; only right angles are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// Quarter turn.
    Deg90,
    /// Half turn.
    Deg180,
    /// Three-quarter turn.
    Deg270,
}

impl Rotation {
    /// All supported rotations.
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Rotation angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Returns true when x and y extents trade places (90 and 270).
    #[must_use]
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = FootprintError;

    fn try_from(degrees: i32) -> FootprintResult<Self> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(FootprintError::UnsupportedRotation { degrees }),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Clearances between the body and each drawn outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Margins {
    /// Silkscreen margin (M1).
    #[serde(default = "default_silkscreen_margin")]
    pub silkscreen: f64,
    /// Fabrication outline margin (M2).
    #[serde(default = "default_fab_margin")]
    pub fab: f64,
    /// Courtyard margin (M3).
    #[serde(default = "default_courtyard_margin")]
    pub courtyard: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            silkscreen: default_silkscreen_margin(),
            fab: default_fab_margin(),
            courtyard: default_courtyard_margin(),
        }
    }
}

const fn default_silkscreen_margin() -> f64 {
    0.2
}

const fn default_fab_margin() -> f64 {
    0.05
}

const fn default_courtyard_margin() -> f64 {
    0.3
}

/// Geometry of the top and bottom pad rows when it differs from the left
/// and right rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowGeometry {
    /// Centre-to-centre distance between the two opposite rows.
    pub span: f64,
    /// Pad length along the row normal.
    pub pad_length: f64,
}

/// Explicit pad counts per edge for quad packages with uneven rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgePins {
    /// Pads on each of the left and right edges.
    pub left_right: u32,
    /// Pads on each of the top and bottom edges.
    pub top_bottom: u32,
}

/// Ball arrangement of an area-array package.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BallGrid {
    /// Number of ball columns; rows follow from the pin count.
    pub columns: u32,
    /// Vertical ball pitch (the horizontal pitch is `PackageSpec::pitch`).
    pub row_pitch: f64,
}

/// Physical lead of a perimeter package, as given in the datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lead {
    /// Lead width (b).
    pub width: f64,
    /// Distance the lead extends past the body (L1); negative when the
    /// lead ends inside the body outline.
    pub overhang: f64,
}

/// Exposed ground/thermal pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroundPad {
    /// Pad width (G1).
    pub width: f64,
    /// Pad height (H1).
    pub height: f64,
    /// Horizontal offset of the pad centre (I1).
    #[serde(default)]
    pub x_offset: f64,
    /// Vertical offset of the pad centre (J1).
    #[serde(default)]
    pub y_offset: f64,
    /// Corner radius; `None` gives a sharp rectangle.
    #[serde(default)]
    pub corner_radius: Option<f64>,
    /// Pad number.
    #[serde(default = "default_ground_pad_number")]
    pub number: String,
}

fn default_ground_pad_number() -> String {
    "0".to_string()
}

impl GroundPad {
    /// Creates a centred, sharp-cornered ground pad numbered `0`.
    #[must_use]
    pub fn centred(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            x_offset: 0.0,
            y_offset: 0.0,
            corner_radius: None,
            number: default_ground_pad_number(),
        }
    }
}

/// Auxiliary pads flanking the ground pad above and below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionPads {
    /// Horizontal centre-to-centre distance between the two columns.
    pub spacing: f64,
    /// Extension length along y.
    pub length: f64,
    /// Extension width along x.
    pub width: f64,
}

/// Immutable description of one footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSpec {
    /// Footprint name.
    pub part_name: String,

    /// Package family.
    pub family: PackageFamily,

    /// Package body extent along x (D1).
    pub body_width: f64,

    /// Package body extent along y (E1).
    pub body_height: f64,

    /// Total number of signal pads (ground and extension pads excluded).
    pub pin_count: u32,

    /// Pad pitch along an edge (C); horizontal ball pitch for BGA.
    pub pitch: f64,

    /// Pad width across the row direction (w); ball pad diameter for BGA.
    pub pad_width: f64,

    /// Pad length along the row normal (h). Unused for BGA.
    #[serde(default)]
    pub pad_length: f64,

    /// Centre-to-centre distance between the left and right rows (X).
    #[serde(default)]
    pub pad_span: f64,

    /// Top/bottom row geometry when it differs from the left/right rows.
    #[serde(default)]
    pub vertical_rows: Option<RowGeometry>,

    /// Uneven per-edge pad counts (quad families only).
    #[serde(default)]
    pub edge_pins: Option<EdgePins>,

    /// Ball grid (BGA only).
    #[serde(default)]
    pub grid: Option<BallGrid>,

    /// Physical lead dimensions.
    #[serde(default)]
    pub lead: Option<Lead>,

    /// Outline margins.
    #[serde(default)]
    pub margins: Margins,

    /// Footprint rotation.
    #[serde(default)]
    pub rotation: Rotation,

    /// Signal pad corner radius.
    #[serde(default)]
    pub pad_corner_radius: Option<f64>,

    /// Exposed ground pad.
    #[serde(default)]
    pub ground_pad: Option<GroundPad>,

    /// Auxiliary pads around the ground pad.
    #[serde(default)]
    pub extension_pads: Option<ExtensionPads>,

    /// Solder mask margin written on every pad; negative values make the
    /// pads solder-mask defined and grow the copper accordingly.
    #[serde(default)]
    pub solder_mask_margin: f64,

    /// Diameter of the pin-1 silkscreen circle.
    #[serde(default)]
    pub indicator_circle_diameter: Option<f64>,

    /// Draw the physical leads on the fabrication layer.
    #[serde(default)]
    pub show_fab_leads: bool,
}

impl PackageSpec {
    /// Pads per edge on (left/right, top/bottom) edges.
    ///
    /// Only meaningful after [`validate`](Self::validate) has succeeded.
    #[must_use]
    pub fn edge_counts(&self) -> (u32, u32) {
        match self.family {
            PackageFamily::Bga => (0, 0),
            PackageFamily::DualRow => (self.pin_count / 2, 0),
            PackageFamily::Qfn | PackageFamily::Lga => self.edge_pins.map_or_else(
                || (self.pin_count / 4, self.pin_count / 4),
                |pins| (pins.left_right, pins.top_bottom),
            ),
        }
    }

    /// Number of ball rows of an area-array package.
    #[must_use]
    pub fn ball_rows(&self) -> u32 {
        self.grid
            .filter(|grid| grid.columns > 0)
            .map_or(0, |grid| self.pin_count / grid.columns)
    }

    /// Physical lead, falling back to the pad width and a zero overhang.
    #[must_use]
    pub fn lead_or_default(&self) -> Lead {
        self.lead.unwrap_or(Lead {
            width: self.pad_width,
            overhang: 0.0,
        })
    }

    /// Checks the description for configuration errors.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A dimension is not a positive finite number
    /// - The pin count does not split evenly over the edges or columns
    /// - A family-specific section is missing
    /// - Extension pads are configured without a ground pad
    pub fn validate(&self) -> FootprintResult<()> {
        if self.part_name.trim().is_empty() {
            return Err(FootprintError::invalid_dimension(
                "part_name",
                "must not be empty",
            ));
        }
        if self.pin_count == 0 {
            return Err(FootprintError::invalid_dimension(
                "pin_count",
                "must be at least 1",
            ));
        }

        positive("body_width", self.body_width)?;
        positive("body_height", self.body_height)?;
        positive("pitch", self.pitch)?;
        positive("pad_width", self.pad_width)?;
        non_negative("margins.silkscreen", self.margins.silkscreen)?;
        non_negative("margins.fab", self.margins.fab)?;
        non_negative("margins.courtyard", self.margins.courtyard)?;
        finite("solder_mask_margin", self.solder_mask_margin)?;

        if let Some(radius) = self.pad_corner_radius {
            positive("pad_corner_radius", radius)?;
        }
        if let Some(diameter) = self.indicator_circle_diameter {
            positive("indicator_circle_diameter", diameter)?;
        }
        if let Some(lead) = self.lead {
            positive("lead.width", lead.width)?;
            finite("lead.overhang", lead.overhang)?;
        }

        match self.family {
            PackageFamily::Bga => self.validate_grid()?,
            PackageFamily::Qfn | PackageFamily::Lga | PackageFamily::DualRow => {
                self.validate_perimeter()?;
            }
        }

        if let Some(ground) = &self.ground_pad {
            positive("ground_pad.width", ground.width)?;
            positive("ground_pad.height", ground.height)?;
            finite("ground_pad.x_offset", ground.x_offset)?;
            finite("ground_pad.y_offset", ground.y_offset)?;
            if let Some(radius) = ground.corner_radius {
                positive("ground_pad.corner_radius", radius)?;
            }
        }
        if let Some(extension) = self.extension_pads {
            if self.ground_pad.is_none() {
                return Err(FootprintError::ExtensionWithoutGroundPad);
            }
            positive("extension_pads.spacing", extension.spacing)?;
            positive("extension_pads.length", extension.length)?;
            positive("extension_pads.width", extension.width)?;
        }

        Ok(())
    }

    fn validate_grid(&self) -> FootprintResult<()> {
        let grid = self.grid.ok_or(FootprintError::MissingFamilyField {
            family: self.family,
            field: "grid",
        })?;
        positive("grid.row_pitch", grid.row_pitch)?;
        if grid.columns == 0 || self.pin_count % grid.columns != 0 {
            return Err(FootprintError::PinCountMismatch {
                family: self.family,
                pin_count: self.pin_count,
                groups: grid.columns,
                unit: "ball columns",
            });
        }
        Ok(())
    }

    fn validate_perimeter(&self) -> FootprintResult<()> {
        positive("pad_length", self.pad_length)?;
        positive("pad_span", self.pad_span)?;
        if let Some(rows) = self.vertical_rows {
            positive("vertical_rows.span", rows.span)?;
            positive("vertical_rows.pad_length", rows.pad_length)?;
        }

        match (self.family, self.edge_pins) {
            (PackageFamily::DualRow, Some(_)) => {
                return Err(FootprintError::invalid_dimension(
                    "edge_pins",
                    "only applies to quad packages",
                ));
            }
            (_, Some(pins)) => {
                let total = pins
                    .left_right
                    .checked_add(pins.top_bottom)
                    .and_then(|sum| sum.checked_mul(2));
                if pins.left_right == 0 || pins.top_bottom == 0 || total != Some(self.pin_count) {
                    return Err(FootprintError::invalid_dimension(
                        "edge_pins",
                        format!(
                            "2 x ({} + {}) pads do not add up to {} pins",
                            pins.left_right, pins.top_bottom, self.pin_count
                        ),
                    ));
                }
            }
            (family, None) => {
                let edges = family.edge_count();
                if self.pin_count % edges != 0 {
                    return Err(FootprintError::PinCountMismatch {
                        family,
                        pin_count: self.pin_count,
                        groups: edges,
                        unit: "edges",
                    });
                }
            }
        }
        Ok(())
    }
}

fn finite(name: &str, value: f64) -> FootprintResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FootprintError::invalid_dimension(name, "must be a finite number"))
    }
}

fn positive(name: &str, value: f64) -> FootprintResult<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(FootprintError::invalid_dimension(
            name,
            format!("must be positive, got {value}"),
        ))
    }
}

fn non_negative(name: &str, value: f64) -> FootprintResult<()> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(FootprintError::invalid_dimension(
            name,
            format!("must not be negative, got {value}"),
        ))
    }
}
