//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the beam parameter set with its defaults and bounds (`BeamParams`)
//! - the string contract with the external workbook template (input keys,
//!   output keys, sheet/column/file names)
//! - the evaluation result bundle (`ResultBundle`)

pub mod types;

pub use types::*;
