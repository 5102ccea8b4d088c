//! Pin-out driven schematic symbol generator.
//!
//! A [`SymbolSpec`] names the part, the package column to read from the
//! pin-out table and how the pins are split into units. [`generate`]
//! resolves every designator against the [`Pinout`] and lays the pins out
//! as a single column per unit; [`write_symbol`] emits a KiCad legacy
//! library.

pub mod pinout;
pub mod presets;
pub mod writer;

pub use pinout::{read_pinout, read_pinout_file, PinEntry, PinKind, Pinout};
pub use writer::{write_symbol, Symbol, SymbolPin};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TableError, TableResult};

/// Bank letters of ball designators, one per unit.
const BANK_LETTERS: &str = "ABCDEFGHJKLMNOP";

/// Horizontal position of every pin.
const PIN_X: i32 = -200;
/// Pin length.
const PIN_LENGTH: i32 = 200;
/// Position of the first pin in each unit.
const FIRST_PIN_Y: i32 = -150;
/// Vertical spacing between pins.
const PIN_SPACING: i32 = 100;

/// How the pins of a symbol are designated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum Designators {
    /// Pins `1..=count`, split evenly over the units.
    Numeric {
        /// Total pin count.
        count: u32,
    },
    /// Ball grid: unit `n` holds bank letter `n` with balls `1..=per_bank`.
    Ball {
        /// Balls per bank.
        per_bank: u32,
    },
}

/// Description of one multi-unit symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolSpec {
    /// Symbol name (e.g., "ICE40UP5K-SG48").
    pub name: String,

    /// Text identifying the package column in the pin-out header row.
    pub package: String,

    /// Number of units.
    pub units: u32,

    /// Pin designators.
    pub designators: Designators,

    /// Add a `GND` pin `0` for the exposed paddle in unit 1.
    #[serde(default = "default_paddle")]
    pub paddle: bool,
}

const fn default_paddle() -> bool {
    true
}

impl SymbolSpec {
    /// Checks that the pins split evenly over the units.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit count is zero, the pins do not split
    /// evenly, or there are more units than bank letters.
    pub fn validate(&self) -> TableResult<()> {
        if self.name.trim().is_empty() {
            return Err(TableError::invalid_symbol("name must not be empty"));
        }
        if self.units == 0 {
            return Err(TableError::invalid_symbol("units must be at least 1"));
        }
        match self.designators {
            Designators::Numeric { count } => {
                if count == 0 || count % self.units != 0 {
                    return Err(TableError::invalid_symbol(format!(
                        "{count} pins cannot be split evenly over {} units",
                        self.units
                    )));
                }
            }
            Designators::Ball { per_bank } => {
                if per_bank == 0 {
                    return Err(TableError::invalid_symbol("per_bank must be at least 1"));
                }
                let banks = BANK_LETTERS.chars().count();
                if self.units as usize > banks {
                    return Err(TableError::invalid_symbol(format!(
                        "ball designators support at most {banks} units, got {}",
                        self.units
                    )));
                }
            }
        }
        Ok(())
    }

    /// Pins per unit.
    #[must_use]
    pub fn pins_per_unit(&self) -> u32 {
        match self.designators {
            Designators::Numeric { count } => count.checked_div(self.units).unwrap_or(0),
            Designators::Ball { per_bank } => per_bank,
        }
    }

    /// Designators of each unit, in drawing order.
    #[must_use]
    pub fn unit_designators(&self) -> Vec<Vec<String>> {
        let per_unit = self.pins_per_unit();
        match self.designators {
            Designators::Numeric { .. } => (0..self.units)
                .map(|unit| {
                    (per_unit * unit + 1..=per_unit * (unit + 1))
                        .map(|number| number.to_string())
                        .collect()
                })
                .collect(),
            Designators::Ball { .. } => BANK_LETTERS
                .chars()
                .take(self.units as usize)
                .map(|bank| (1..=per_unit).map(|ball| format!("{bank}{ball}")).collect())
                .collect(),
        }
    }
}

fn pin_y(index: u32) -> i32 {
    let index = i32::try_from(index).unwrap_or(i32::MAX / PIN_SPACING);
    FIRST_PIN_Y - PIN_SPACING * index
}

/// Builds the symbol described by `spec` from a pin-out table.
///
/// # Errors
///
/// Returns an error if the description is invalid or a designator has no entry
/// in `pinout`.
pub fn generate(spec: &SymbolSpec, pinout: &Pinout) -> TableResult<Symbol> {
    spec.validate()?;

    let mut pins = Vec::new();
    for (unit, designators) in (1..).zip(spec.unit_designators()) {
        for (index, designator) in (0..).zip(designators) {
            let entry = pinout
                .get(&designator)
                .ok_or_else(|| TableError::missing_pin(&spec.name, &designator))?;
            pins.push(SymbolPin {
                name: entry.name.clone(),
                number: designator,
                x: PIN_X,
                y: pin_y(index),
                length: PIN_LENGTH,
                unit,
                kind: entry.kind,
            });
        }
    }

    if spec.paddle {
        pins.push(SymbolPin {
            name: "GND".to_string(),
            number: "0".to_string(),
            x: PIN_X,
            y: pin_y(spec.pins_per_unit()),
            length: PIN_LENGTH,
            unit: 1,
            kind: PinKind::Passive,
        });
    }

    debug!(symbol = %spec.name, pins = pins.len(), units = spec.units, "Built symbol");
    Ok(Symbol {
        name: spec.name.clone(),
        units: spec.units,
        pins,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinout_for(designators: &[String]) -> Pinout {
        designators
            .iter()
            .map(|d| {
                (
                    d.clone(),
                    PinEntry {
                        name: format!("IO_{d}"),
                        kind: PinKind::Bidirectional,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn numeric_units_split_evenly() {
        let spec = presets::ice40up5k_sg48();
        let units = spec.unit_designators();
        assert_eq!(units.len(), 4);
        assert_eq!(units[0].first().map(String::as_str), Some("1"));
        assert_eq!(units[3].last().map(String::as_str), Some("48"));
        assert!(units.iter().all(|unit| unit.len() == 12));
    }

    #[test]
    fn ball_units_skip_letter_i() {
        let spec = presets::ice40lp1k_cb81();
        let units = spec.unit_designators();
        assert_eq!(units.len(), 9);
        assert_eq!(units[7][0], "H1");
        assert_eq!(units[8][8], "J9");
    }

    #[test]
    fn uneven_split_is_rejected() {
        let spec = SymbolSpec {
            name: "X".to_string(),
            package: "QN32".to_string(),
            units: 3,
            designators: Designators::Numeric { count: 32 },
            paddle: false,
        };
        assert!(matches!(
            spec.validate(),
            Err(TableError::InvalidSymbol { .. })
        ));
    }

    #[test]
    fn pins_placed_in_columns() {
        let spec = presets::ice40up5k_sg48();
        let all: Vec<String> = spec.unit_designators().concat();
        let symbol = generate(&spec, &pinout_for(&all)).unwrap();
        assert_eq!(symbol.pins.len(), 49);
        let thirteenth = &symbol.pins[12];
        assert_eq!(thirteenth.number, "13");
        assert_eq!(thirteenth.unit, 2);
        assert_eq!(thirteenth.y, -150);
        let paddle = symbol.pins.last().unwrap();
        assert_eq!(paddle.number, "0");
        assert_eq!(paddle.y, -150 - 100 * 12);
        assert_eq!(paddle.unit, 1);
    }

    #[test]
    fn missing_designator_is_an_error() {
        let spec = presets::ice40up5k_sg48();
        let mut all: Vec<String> = spec.unit_designators().concat();
        all.retain(|d| d != "17");
        let err = generate(&spec, &pinout_for(&all)).unwrap_err();
        assert!(matches!(err, TableError::MissingPin { ref designator, .. } if designator == "17"));
    }

    #[test]
    fn spec_from_json() {
        let json = r#"{
            "name": "ICE40HX1K-VQ100",
            "package": "VQ100",
            "units": 4,
            "designators": { "style": "numeric", "count": 100 }
        }"#;
        let spec: SymbolSpec = serde_json::from_str(json).unwrap();
        assert!(spec.paddle);
        assert_eq!(spec.pins_per_unit(), 25);
        assert_eq!(spec, presets::ice40hx1k_vq100());
    }
}
