//! Drawing primitives of a generated footprint.
//!
//! These types hold board-frame geometry ready for the writer: pads,
//! lines, circles and the text fields of the module header.

use serde::{Deserialize, Serialize};

use crate::footprint::geometry::{Outline, Point, Segment, Size};

/// Logical board layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Top copper.
    CopperTop,
    /// Top solder paste.
    PasteTop,
    /// Top solder mask.
    MaskTop,
    /// Top silkscreen.
    SilkscreenTop,
    /// Top fabrication (assembly documentation) layer.
    FabricationTop,
    /// Top courtyard.
    CourtyardTop,
}

impl Layer {
    /// Layers of a top-side SMD pad.
    pub const SMD: [Self; 3] = [Self::CopperTop, Self::PasteTop, Self::MaskTop];

    /// Returns the KiCad layer name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CopperTop => "F.Cu",
            Self::PasteTop => "F.Paste",
            Self::MaskTop => "F.Mask",
            Self::SilkscreenTop => "F.SilkS",
            Self::FabricationTop => "F.Fab",
            Self::CourtyardTop => "F.CrtYd",
        }
    }
}

/// Pad shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadShape {
    /// Sharp rectangle.
    Rect,
    /// Rectangle with rounded corners (see [`Pad::corner_ratio`]).
    RoundRect,
    /// Circle.
    Circle,
}

impl PadShape {
    /// Returns the KiCad shape keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::RoundRect => "roundrect",
            Self::Circle => "circle",
        }
    }
}

/// An SMD pad in board coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    /// Pad number (e.g., "1", "0", "A1").
    pub number: String,

    /// Pad shape.
    pub shape: PadShape,

    /// Centre position.
    pub center: Point,

    /// Size along board x and y.
    pub size: Size,

    /// Layers the pad is on.
    pub layers: Vec<Layer>,

    /// Corner radius over the smaller side; only for `RoundRect`.
    pub corner_ratio: Option<f64>,

    /// Solder mask margin (mm).
    pub solder_mask_margin: f64,
}

impl Pad {
    /// Creates a top-side SMD pad; a corner ratio turns `Rect` and `Circle`
    /// into `RoundRect`.
    #[must_use]
    pub fn smd(
        number: impl Into<String>,
        base_shape: PadShape,
        center: Point,
        size: Size,
        corner_ratio: Option<f64>,
        solder_mask_margin: f64,
    ) -> Self {
        let shape = if corner_ratio.is_some() {
            PadShape::RoundRect
        } else {
            base_shape
        };
        Self {
            number: number.into(),
            shape,
            center,
            size,
            layers: Layer::SMD.to_vec(),
            corner_ratio,
            solder_mask_margin,
        }
    }
}

/// A straight line on a drawing layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Segment in board coordinates.
    pub segment: Segment,
    /// Layer.
    pub layer: Layer,
}

/// A circle on a drawing layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Layer.
    pub layer: Layer,
}

/// A graphic item, kept in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Graphic {
    /// Line segment.
    Line(Line),
    /// Circle.
    Circle(Circle),
}

/// Kind of a header text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Reference designator.
    Reference,
    /// Free user text.
    User,
    /// Component value.
    Value,
}

impl TextKind {
    /// Returns the KiCad keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::User => "user",
            Self::Value => "value",
        }
    }
}

/// A text field of the module header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// Field kind.
    pub kind: TextKind,
    /// Text content.
    pub text: String,
    /// Anchor position.
    pub position: Point,
    /// Layer.
    pub layer: Layer,
    /// Hidden in the board view.
    pub hidden: bool,
}

impl Text {
    /// Reference (`REF**`) on the silkscreen, user `%R` on the fab layer and
    /// a hidden value `%V` on the fab layer.
    #[must_use]
    pub fn standard_fields() -> Vec<Self> {
        vec![
            Self {
                kind: TextKind::Reference,
                text: "REF**".to_string(),
                position: Point::new(0.0, 0.0),
                layer: Layer::SilkscreenTop,
                hidden: false,
            },
            Self {
                kind: TextKind::User,
                text: "%R".to_string(),
                position: Point::new(0.0, 0.0),
                layer: Layer::FabricationTop,
                hidden: false,
            },
            Self {
                kind: TextKind::Value,
                text: "%V".to_string(),
                position: Point::new(0.0, -0.5),
                layer: Layer::FabricationTop,
                hidden: true,
            },
        ]
    }
}

/// A complete generated footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Footprint name (e.g., "Maxim_TQFN-28").
    pub name: String,

    /// Header text fields.
    pub texts: Vec<Text>,

    /// Lines and circles in drawing order.
    pub graphics: Vec<Graphic>,

    /// Pads in emission order.
    pub pads: Vec<Pad>,
}

impl Footprint {
    /// Creates a footprint with the standard text fields and nothing else.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            texts: Text::standard_fields(),
            graphics: Vec::new(),
            pads: Vec::new(),
        }
    }

    /// Adds every segment of `outline` as a line on `layer`.
    pub fn add_outline(&mut self, outline: &Outline, layer: Layer) {
        self.graphics.extend(
            outline
                .segments
                .iter()
                .map(|&segment| Graphic::Line(Line { segment, layer })),
        );
    }

    /// Adds a circle.
    pub fn add_circle(&mut self, circle: Circle) {
        self.graphics.push(Graphic::Circle(circle));
    }

    /// Adds a pad.
    pub fn add_pad(&mut self, pad: Pad) {
        self.pads.push(pad);
    }

    /// Lines on `layer`, in drawing order.
    pub fn lines_on(&self, layer: Layer) -> impl Iterator<Item = &Line> {
        self.graphics.iter().filter_map(move |graphic| match graphic {
            Graphic::Line(line) if line.layer == layer => Some(line),
            _ => None,
        })
    }

    /// Circles on `layer`.
    pub fn circles_on(&self, layer: Layer) -> impl Iterator<Item = &Circle> {
        self.graphics.iter().filter_map(move |graphic| match graphic {
            Graphic::Circle(circle) if circle.layer == layer => Some(circle),
            _ => None,
        })
    }

    /// Finds pads by number.
    pub fn pads_numbered<'a>(&'a self, number: &'a str) -> impl Iterator<Item = &'a Pad> {
        self.pads.iter().filter(move |pad| pad.number == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kicad_layer_names() {
        let names: Vec<&str> = Layer::SMD.iter().map(Layer::as_str).collect();
        assert_eq!(names, ["F.Cu", "F.Paste", "F.Mask"]);
        assert_eq!(Layer::SilkscreenTop.as_str(), "F.SilkS");
        assert_eq!(Layer::FabricationTop.as_str(), "F.Fab");
        assert_eq!(Layer::CourtyardTop.as_str(), "F.CrtYd");
    }

    #[test]
    fn corner_ratio_makes_roundrect() {
        let pad = Pad::smd(
            "A1",
            PadShape::Circle,
            Point::new(0.0, 0.0),
            Size::new(0.2, 0.2),
            Some(0.25),
            0.1,
        );
        assert_eq!(pad.shape, PadShape::RoundRect);
        assert_eq!(pad.layers, Layer::SMD.to_vec());

        let pad = Pad::smd(
            "1",
            PadShape::Rect,
            Point::new(0.0, 0.0),
            Size::new(0.3, 0.9),
            None,
            0.1,
        );
        assert_eq!(pad.shape, PadShape::Rect);
    }

    #[test]
    fn outline_lines_keep_layer() {
        let mut footprint = Footprint::new("X");
        let outline = Outline::closed(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]);
        footprint.add_outline(&outline, Layer::CourtyardTop);
        assert_eq!(footprint.lines_on(Layer::CourtyardTop).count(), 3);
        assert_eq!(footprint.lines_on(Layer::SilkscreenTop).count(), 0);
        assert_eq!(footprint.texts.len(), 3);
    }
}
