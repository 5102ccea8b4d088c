//! KiCad legacy module writer.
//!
//! Output layout:
//!
//! ```text
//! (module NAME (layer F.Cu) (tedit HEX)   // NAME quoted if needed
//!   (fp_text reference|user|value ...)   // header texts
//!   (fp_line ...) / (fp_circle ...)      // silkscreen, fab, courtyard
//!   (pad N smd SHAPE ...)                // pads in emission order
//! )
//! ```
//!
//! Numbers are rounded to six decimals with trailing zeros dropped, so the
//! same footprint always produces the same bytes for a given timestamp.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::config::StyleConfig;
use crate::footprint::geometry::Point;
use crate::footprint::primitives::{Footprint, Graphic, Pad, PadShape, Text};

/// Formats a length in millimetres.
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded.abs() < 5e-7 {
        return "0".to_string();
    }
    let text = format!("{rounded:.6}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn format_point(point: Point) -> String {
    format!("{} {}", format_number(point.x), format_number(point.y))
}

/// Writes `footprint` as a KiCad module.
///
/// `tedit` is the edit timestamp (seconds since the epoch), written in
/// upper-case hex.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_footprint<W: Write>(
    out: &mut W,
    footprint: &Footprint,
    style: &StyleConfig,
    tedit: u64,
) -> io::Result<()> {
    writeln!(
        out,
        "(module {} (layer F.Cu) (tedit {tedit:X})",
        token(&footprint.name)
    )?;
    for text in &footprint.texts {
        write_text(out, text, style)?;
    }

    let width = format_number(style.line_width);
    for graphic in &footprint.graphics {
        match graphic {
            Graphic::Line(line) => writeln!(
                out,
                "  (fp_line (start {}) (end {}) (layer {}) (width {width}))",
                format_point(line.segment.start),
                format_point(line.segment.end),
                line.layer.as_str()
            )?,
            Graphic::Circle(circle) => writeln!(
                out,
                "  (fp_circle (center {}) (end {}) (layer {}) (width {width}))",
                format_point(circle.center),
                format_point(circle.center + Point::new(circle.radius, 0.0)),
                circle.layer.as_str()
            )?,
        }
    }

    for pad in &footprint.pads {
        write_pad(out, pad)?;
    }
    writeln!(out, ")")
}

/// Renders `value` as one s-expression atom, quoting it when it is empty or
/// contains whitespace, parentheses or quotes.
fn token(value: &str) -> Cow<'_, str> {
    let plain = !value.is_empty()
        && !value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\\'));
    if plain {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!(
            "\"{}\"",
            value.replace('\\', "\\\\").replace('"', "\\\"")
        ))
    }
}

fn write_text<W: Write>(out: &mut W, text: &Text, style: &StyleConfig) -> io::Result<()> {
    let hide = if text.hidden { " hide" } else { "" };
    writeln!(
        out,
        "  (fp_text {} {} (at {}) (layer {}){hide}",
        text.kind.as_str(),
        token(&text.text),
        format_point(text.position),
        text.layer.as_str()
    )?;
    let size = format_number(style.text_size);
    writeln!(
        out,
        "    (effects (font (size {size} {size}) (thickness {})))",
        format_number(style.text_thickness)
    )?;
    writeln!(out, "  )")
}

fn write_pad<W: Write>(out: &mut W, pad: &Pad) -> io::Result<()> {
    let layers: Vec<&str> = pad.layers.iter().map(|layer| layer.as_str()).collect();
    writeln!(
        out,
        "  (pad {} smd {} (at {}) (size {} {}) (layers {})",
        token(&pad.number),
        pad.shape.as_str(),
        format_point(pad.center),
        format_number(pad.size.width),
        format_number(pad.size.height),
        layers.join(" ")
    )?;
    let rratio = match (pad.shape, pad.corner_ratio) {
        (PadShape::RoundRect, Some(ratio)) => {
            format!("(roundrect_rratio {}) ", format_number(ratio))
        }
        _ => String::new(),
    };
    writeln!(
        out,
        "    {rratio}(solder_mask_margin {}))",
        format_number(pad.solder_mask_margin)
    )
}
