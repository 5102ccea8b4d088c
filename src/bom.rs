//! Bill-of-materials translator.
//!
//! Reads a collated KiCad BOM export and writes a two-column distributor
//! order list (`Digikey,Quantity`) with every quantity multiplied by a
//! board count.
//!
//! The export starts with free-form summary rows. The row containing
//! `Collated` marks the start of the table and the row after it is the
//! header. The translator's own output is accepted as input too, so running
//! it twice with a multiplier of 1 changes nothing.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{TableError, TableResult};

/// Part-number column name.
pub const PART_COLUMN: &str = "Digikey";
/// Quantity column name in the output.
pub const QUANTITY_COLUMN: &str = "Quantity";
/// Placeholder part number for parts that are not ordered.
pub const NO_PART: &str = "NoPart";

const TABLE_MARKER: &str = "Collated";
const QUANTITY_ALIASES: [&str; 2] = ["Qty", QUANTITY_COLUMN];

/// One part to order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    /// Distributor part number.
    pub part: String,
    /// Quantity per board.
    pub quantity: u64,
}

/// Column indices of the BOM table.
#[derive(Debug, Clone, Copy)]
struct Columns {
    part: usize,
    quantity: usize,
}

impl Columns {
    fn from_header(record: &csv::StringRecord) -> TableResult<Self> {
        let part = record
            .iter()
            .position(|cell| cell.trim() == PART_COLUMN)
            .ok_or_else(|| TableError::missing_column(PART_COLUMN))?;
        let quantity = record
            .iter()
            .position(|cell| QUANTITY_ALIASES.contains(&cell.trim()))
            .ok_or_else(|| TableError::missing_column(QUANTITY_ALIASES[0]))?;
        Ok(Self { part, quantity })
    }

    const fn width(self) -> usize {
        if self.part > self.quantity {
            self.part + 1
        } else {
            self.quantity + 1
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    Start,
    Preamble,
    Header,
    Rows(Columns),
}

fn is_own_header(record: &csv::StringRecord) -> bool {
    record.len() == 2 && &record[0] == PART_COLUMN && &record[1] == QUANTITY_COLUMN
}

/// Reads the parts of a BOM.
///
/// # Errors
///
/// Returns an error if the CSV cannot be read, no `Collated` marker is
/// found, or the header lacks the part or quantity column.
pub fn read_bom<R: Read>(input: R) -> TableResult<Vec<BomLine>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut state = State::Start;
    let mut lines = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TableError::csv("reading BOM", e))?;
        let line = index + 1;

        let columns = match state {
            State::Start if is_own_header(&record) => {
                debug!("Input is already a translated BOM");
                state = State::Rows(Columns {
                    part: 0,
                    quantity: 1,
                });
                continue;
            }
            State::Start | State::Preamble => {
                state = if record.iter().any(|cell| cell.contains(TABLE_MARKER)) {
                    debug!(line, "Found collated table");
                    State::Header
                } else {
                    State::Preamble
                };
                continue;
            }
            State::Header => {
                let columns = Columns::from_header(&record)?;
                debug!(line, part = columns.part, quantity = columns.quantity, "Read BOM header");
                state = State::Rows(columns);
                continue;
            }
            State::Rows(columns) => columns,
        };

        if record.len() < columns.width() {
            warn!(line, "BOM row is missing fields, skipping");
            continue;
        }
        let part = record[columns.part].trim();
        if part.is_empty() {
            warn!(line, "BOM row has no part number, skipping");
            continue;
        }
        if part == NO_PART {
            continue;
        }
        let raw_quantity = record[columns.quantity].trim();
        let Ok(quantity) = raw_quantity.parse::<u64>() else {
            warn!(
                line,
                part,
                quantity = raw_quantity,
                "BOM row has an unreadable quantity, skipping"
            );
            continue;
        };
        if quantity == 0 {
            warn!(line, part, "BOM row has zero quantity");
        }
        lines.push(BomLine {
            part: part.to_string(),
            quantity,
        });
    }

    match state {
        State::Rows(_) => Ok(lines),
        State::Header => Err(TableError::missing_column(PART_COLUMN)),
        State::Start | State::Preamble => Err(TableError::MissingHeader {
            marker: TABLE_MARKER.to_string(),
        }),
    }
}

/// Writes the order list with every quantity multiplied by `multiplier`.
///
/// Part numbers are quoted; quantities are not.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_bom<W: Write>(mut out: W, lines: &[BomLine], multiplier: u64) -> TableResult<()> {
    // Written by hand so the header stays unquoted.
    writeln!(out, "{PART_COLUMN},{QUANTITY_COLUMN}")
        .map_err(|e| TableError::csv("writing BOM header", e.into()))?;

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(out);
    for line in lines {
        let quantity = line.quantity.saturating_mul(multiplier).to_string();
        writer
            .write_record([line.part.as_str(), quantity.as_str()])
            .map_err(|e| TableError::csv("writing BOM row", e))?;
    }
    writer
        .flush()
        .map_err(|e| TableError::csv("flushing BOM", e.into()))
}

/// Translates the BOM at `input` into an order list at `output`.
///
/// Returns the number of parts written.
///
/// # Errors
///
/// Returns an error if either file cannot be accessed or the input is not
/// a recognisable BOM. Nothing is written when the input is rejected.
pub fn translate_file(input: &Path, output: &Path, multiplier: u64) -> TableResult<usize> {
    info!(multiplier, input = %input.display(), "Translating BOM");
    let file = File::open(input).map_err(|e| TableError::io(input, e))?;
    let lines = read_bom(file)?;

    let file = File::create(output).map_err(|e| TableError::io(output, e))?;
    write_bom(file, &lines, multiplier)?;
    info!(parts = lines.len(), output = %output.display(), "Wrote order list");
    Ok(lines.len())
}
