//! Pin-out table reader.
//!
//! Vendor pin-out tables are CSV exports with a few title rows, a header
//! row naming each package column, and one row per pad function. Column 0
//! is the function name and column 1 its type (`GND`, `VCCIO_0`, `PIO`,
//! ...). Rows with an empty first cell separate sections.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{TableError, TableResult};

/// Designators that mark a function as not bonded out in a package.
const UNBONDED: [&str; 3] = ["", "-", "Paddle"];

/// Schematic electrical type of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinKind {
    /// Passive (ground).
    Passive,
    /// Power input (supplies).
    PowerInput,
    /// Power output (LED drivers).
    PowerOutput,
    /// Bidirectional (everything else).
    Bidirectional,
}

impl PinKind {
    /// Maps the type column of a pin-out table.
    #[must_use]
    pub fn from_type_label(label: &str) -> Self {
        match label {
            "GND" => Self::Passive,
            "LED" => Self::PowerOutput,
            _ if label.starts_with("VCC") => Self::PowerInput,
            _ => Self::Bidirectional,
        }
    }

    /// Returns the KiCad library type code.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Passive => 'P',
            Self::PowerInput => 'W',
            Self::PowerOutput => 'w',
            Self::Bidirectional => 'B',
        }
    }
}

/// Function bonded to one pad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinEntry {
    /// Function name.
    pub name: String,
    /// Electrical type.
    pub kind: PinKind,
}

/// Designator to function map, in table order.
pub type Pinout = IndexMap<String, PinEntry>;

/// Normalises numeric designators (`"07"` becomes `"7"`); ball names are
/// kept as written.
fn canonical_designator(designator: &str) -> String {
    designator
        .parse::<u32>()
        .map_or_else(|_| designator.to_string(), |number| number.to_string())
}

/// Reads a pin-out table for `package` from CSV data.
///
/// # Errors
///
/// Returns an error if the CSV cannot be read or no header row mentions
/// `package`.
pub fn read_pinout<R: Read>(input: R, package: &str) -> TableResult<Pinout> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut package_column = None;
    let mut pinout = Pinout::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TableError::csv("reading pin-out table", e))?;
        let line = index + 1;

        let Some(column) = package_column else {
            package_column = record.iter().position(|cell| cell.contains(package));
            if let Some(column) = package_column {
                debug!(line, column, package, "Found pin-out header row");
            }
            continue;
        };

        let name = record.get(0).unwrap_or_default().trim();
        if name.is_empty() {
            continue;
        }
        let Some(designator) = record.get(column).map(str::trim) else {
            warn!(line, name, "Pin-out row has no {package} column, skipping");
            continue;
        };
        if UNBONDED.contains(&designator) {
            trace!(line, name, "Not bonded in {package}");
            continue;
        }

        let kind = PinKind::from_type_label(record.get(1).unwrap_or_default().trim());
        let entry = PinEntry {
            name: name.to_string(),
            kind,
        };
        if let Some(previous) = pinout.insert(canonical_designator(designator), entry) {
            warn!(
                line,
                designator,
                previous = %previous.name,
                "Designator listed twice, keeping the later entry"
            );
        }
    }

    if package_column.is_none() {
        return Err(TableError::MissingHeader {
            marker: package.to_string(),
        });
    }
    debug!(pins = pinout.len(), package, "Read pin-out table");
    Ok(pinout)
}

/// Reads a pin-out table from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn read_pinout_file(path: &Path, package: &str) -> TableResult<Pinout> {
    let file = File::open(path).map_err(|e| TableError::io(path, e))?;
    read_pinout(file, package)
}
