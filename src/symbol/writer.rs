//! KiCad legacy schematic library writer (`EESchema-LIBRARY Version 2.3`).

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::symbol::PinKind;

/// A placed symbol pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPin {
    /// Pin name.
    pub name: String,
    /// Pin designator.
    pub number: String,
    /// X position in mils.
    pub x: i32,
    /// Y position in mils.
    pub y: i32,
    /// Pin length in mils.
    pub length: i32,
    /// Unit the pin belongs to (1-based).
    pub unit: u32,
    /// Electrical type.
    pub kind: PinKind,
}

/// A complete multi-unit symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Symbol name.
    pub name: String,
    /// Number of units.
    pub units: u32,
    /// Pins in emission order.
    pub pins: Vec<SymbolPin>,
}

/// Writes `symbol` as a one-part KiCad library.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_symbol<W: Write>(out: &mut W, symbol: &Symbol) -> io::Result<()> {
    let name = &symbol.name;
    writeln!(out, "EESchema-LIBRARY Version 2.3")?;
    writeln!(out, "#encoding utf-8")?;
    writeln!(out, "#")?;
    writeln!(out, "# {name}")?;
    writeln!(out, "#")?;
    writeln!(out, "DEF {name} U 0 40 Y Y {} L N", symbol.units)?;
    writeln!(out, "F0 \"U\" 0 0 60 H V C CNN")?;
    writeln!(out, "F1 \"{name}\" 0 150 60 H V C CNN")?;
    writeln!(out, "F2 \"\" 0 0 60 H I C CNN")?;
    writeln!(out, "F3 \"\" 0 0 60 H I C CNN")?;
    writeln!(out, "DRAW")?;
    writeln!(out, "S 0 -50 600 -1450 0 1 0 N")?;
    for pin in &symbol.pins {
        // Names with spaces would split the record.
        let pin_name = if pin.name.is_empty() {
            "~".to_string()
        } else {
            pin.name.replace(char::is_whitespace, "_")
        };
        writeln!(
            out,
            "X {pin_name} {} {} {} {} R 50 50 {} 1 {}",
            pin.number,
            pin.x,
            pin.y,
            pin.length,
            pin.unit,
            pin.kind.code()
        )?;
    }
    writeln!(out, "ENDDRAW")?;
    writeln!(out, "ENDDEF")?;
    writeln!(out, "#")?;
    writeln!(out, "#End Library")
}
