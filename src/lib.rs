//! eda-artifact-gen: generators for PCB design artifacts
//!
//! This library turns fixed package parameters and CSV tables into the
//! text files an EDA flow consumes.
//!
//! # Architecture
//!
//! Every generator is a single-shot pipeline: read the input, build the
//! complete artifact in memory, then write it.
//!
//! - **Footprints**: one parametric engine for BGA/WLCSP, QFN, LGA and
//!   dual-row packages, emitting KiCad modules
//! - **Symbols**: multi-unit KiCad library symbols built from vendor
//!   pin-out tables
//! - **BOM**: collated KiCad BOM exports translated into distributor order
//!   lists
//!
//! # Modules
//!
//! - [`config`]: Settings and package/symbol description loading
//! - [`error`]: Error types
//! - [`footprint`]: Footprint geometry engine and KiCad module writer
//! - [`symbol`]: Pin-out reader and schematic symbol generator
//! - [`bom`]: BOM translator

pub mod bom;
pub mod config;
pub mod error;
pub mod footprint;
pub mod symbol;
