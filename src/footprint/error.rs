//! Error types for footprint generation.
//!
//! Every variant is a configuration error: the generator refuses the
//! package description before any output is written.

use thiserror::Error;

use crate::footprint::spec::PackageFamily;

/// Result type for footprint operations.
pub type FootprintResult<T> = Result<T, FootprintError>;

/// Errors that can occur while building a footprint.
#[derive(Debug, Error)]
pub enum FootprintError {
    /// Pin count does not split evenly over the populated edges or columns.
    #[error("{family} package with {pin_count} pins cannot be split evenly over {groups} {unit}")]
    PinCountMismatch {
        /// Package family.
        family: PackageFamily,
        /// Configured pin count.
        pin_count: u32,
        /// Number of edges (perimeter) or ball columns (area array).
        groups: u32,
        /// What `groups` counts.
        unit: &'static str,
    },

    /// Rotation is not one of the four right angles.
    #[error("Unsupported rotation: {degrees} degrees (expected 0, 90, 180 or 270)")]
    UnsupportedRotation {
        /// Requested rotation.
        degrees: i32,
    },

    /// A dimension is missing, zero, negative or not finite.
    #[error("Invalid dimension '{name}': {message}")]
    InvalidDimension {
        /// Field name.
        name: String,
        /// Description of what's wrong.
        message: String,
    },

    /// A family-specific section of the package description is missing.
    #[error("{family} packages require '{field}'")]
    MissingFamilyField {
        /// Package family.
        family: PackageFamily,
        /// Missing field.
        field: &'static str,
    },

    /// A pad has no entry in the supplied pin-out table.
    #[error("Pad {pad} of {part} has no pin-out entry")]
    MissingPinout {
        /// Part name.
        part: String,
        /// Pad number that could not be resolved.
        pad: String,
    },

    /// Extension pads were requested without a ground pad to flank.
    #[error("Extension pads require a ground pad")]
    ExtensionWithoutGroundPad,

    /// No preset exists with the given name.
    #[error("Unknown footprint preset: {name}")]
    UnknownPreset {
        /// Requested preset name.
        name: String,
    },
}

impl FootprintError {
    /// Creates an invalid dimension error.
    pub fn invalid_dimension(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDimension {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a missing pin-out error.
    pub fn missing_pinout(part: impl Into<String>, pad: impl Into<String>) -> Self {
        Self::MissingPinout {
            part: part.into(),
            pad: pad.into(),
        }
    }

    /// Creates an unknown preset error.
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        Self::UnknownPreset { name: name.into() }
    }
}
