//! Error types for eda-artifact-gen.
//!
//! Footprint configuration errors live in [`crate::footprint::error`];
//! this module covers settings/spec files and CSV tables.

use std::path::PathBuf;

use thiserror::Error;

use crate::footprint::FootprintError;

/// Errors loading the settings file or a package/symbol description.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read {path}")]
    ReadError {
        /// File that was being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected document.
    #[error("cannot parse {path}")]
    ParseError {
        /// File that was being parsed.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An explicitly named file does not exist.
    #[error("file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// A setting is out of range.
    #[error("invalid setting: {message}")]
    ValidationError {
        /// Which setting is wrong and why.
        message: String,
    },

    /// A package description was rejected by the footprint engine.
    #[error("invalid package description: {path}")]
    InvalidPackage {
        /// Path to the package description.
        path: PathBuf,
        /// The engine's configuration error.
        #[source]
        source: FootprintError,
    },

    /// A symbol description is inconsistent.
    #[error("invalid symbol description: {path}")]
    InvalidSymbol {
        /// Path to the symbol description.
        path: PathBuf,
        /// What the symbol generator rejected.
        #[source]
        source: TableError,
    },
}

/// Result type for CSV table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur while reading or writing CSV tables.
#[derive(Error, Debug)]
pub enum TableError {
    /// A table file could not be opened or created.
    #[error("failed to access table file: {path}")]
    Io {
        /// Path to the file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer failed to read or write a record.
    #[error("CSV error while {context}")]
    Csv {
        /// What was being done.
        context: String,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// No header row was found.
    #[error("no header row containing '{marker}'")]
    MissingHeader {
        /// Text the header row was expected to contain.
        marker: String,
    },

    /// The header row lacks a required column.
    #[error("header row has no '{column}' column")]
    MissingColumn {
        /// Column name.
        column: String,
    },

    /// A symbol pin has no pin-out entry.
    #[error("{symbol}: pin {designator} has no pin-out entry")]
    MissingPin {
        /// Symbol name.
        symbol: String,
        /// Pin designator.
        designator: String,
    },

    /// The symbol description is inconsistent.
    #[error("invalid symbol description: {message}")]
    InvalidSymbol {
        /// Description of the problem.
        message: String,
    },
}

impl TableError {
    /// Creates an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a CSV error with context.
    pub fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            context: context.into(),
            source,
        }
    }

    /// Creates a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Creates a missing pin error.
    pub fn missing_pin(symbol: impl Into<String>, designator: impl Into<String>) -> Self {
        Self::MissingPin {
            symbol: symbol.into(),
            designator: designator.into(),
        }
    }

    /// Creates an invalid symbol error.
    pub fn invalid_symbol(message: impl Into<String>) -> Self {
        Self::InvalidSymbol {
            message: message.into(),
        }
    }
}
