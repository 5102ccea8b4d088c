//! Built-in symbol descriptions for iCE40 FPGA packages.

use crate::error::{TableError, TableResult};
use crate::symbol::{Designators, SymbolSpec};

/// Names accepted by [`by_name`].
const PRESETS: [&str; 3] = ["ice40hx1k-vq100", "ice40lp1k-cb81", "ice40up5k-sg48"];

/// Returns the names of all built-in presets.
#[must_use]
pub const fn names() -> &'static [&'static str] {
    &PRESETS
}

/// Looks up a preset by name (case-insensitive).
///
/// # Errors
///
/// Returns an error if no preset has that name.
pub fn by_name(name: &str) -> TableResult<SymbolSpec> {
    match name.to_lowercase().as_str() {
        "ice40hx1k-vq100" => Ok(ice40hx1k_vq100()),
        "ice40lp1k-cb81" => Ok(ice40lp1k_cb81()),
        "ice40up5k-sg48" => Ok(ice40up5k_sg48()),
        _ => Err(TableError::invalid_symbol(format!(
            "unknown symbol preset: {name}"
        ))),
    }
}

/// iCE40HX1K in the 100-pin VQFP, four units of 25 pins.
#[must_use]
pub fn ice40hx1k_vq100() -> SymbolSpec {
    SymbolSpec {
        name: "ICE40HX1K-VQ100".to_string(),
        package: "VQ100".to_string(),
        units: 4,
        designators: Designators::Numeric { count: 100 },
        paddle: true,
    }
}

/// iCE40LP1K in the 81-ball csBGA, one unit per ball row.
#[must_use]
pub fn ice40lp1k_cb81() -> SymbolSpec {
    SymbolSpec {
        name: "ICE40LP1K-CB81".to_string(),
        package: "CB81".to_string(),
        units: 9,
        designators: Designators::Ball { per_bank: 9 },
        paddle: true,
    }
}

/// iCE40UP5K in the 48-pin QFN, four units of 12 pins.
#[must_use]
pub fn ice40up5k_sg48() -> SymbolSpec {
    SymbolSpec {
        name: "ICE40UP5K-SG48".to_string(),
        package: "SG48".to_string(),
        units: 4,
        designators: Designators::Numeric { count: 48 },
        paddle: true,
    }
}
