//! Shared domain types.
//!
//! Every name in this file that is a `&'static str` constant is part of a
//! string contract with the external workbook template
//! (`beam_calculation.xlsx`): input parameter names, output value names, and
//! the sheet/column the deflection series is read from. Renaming any of them
//! means treating the external file as replaced.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Template input parameter names, in the order they are sent to the engine.
pub const INPUT_LENGTH: &str = "L";
pub const INPUT_WIDTH: &str = "W";
pub const INPUT_HEIGHT: &str = "H";
pub const INPUT_MODULUS: &str = "E";
pub const INPUT_LOAD_START: &str = "aw";
pub const INPUT_LOAD_AMPLITUDE_A: &str = "wa";
pub const INPUT_LOAD_AMPLITUDE_L: &str = "wL";

/// Named outputs the template must define.
pub const OUTPUT_MAX_DEFLECTION: &str = "maximum_deflection";
pub const OUTPUT_MAX_BENDING_STRESS: &str = "maximum_bending_stress";

/// Tabular sheet of the filled workbook holding the deflection series.
pub const DATA_SHEET: &str = "Data";
/// Column of `DATA_SHEET` plotted by the curve view.
pub const DEFLECTION_COLUMN: &str = "Deflection (microns)";

/// Fixed name of the downloaded workbook, regardless of input values.
pub const DOWNLOAD_FILE_NAME: &str = "evaluated_beam.xlsx";

/// Default template location (next to the working directory).
pub const DEFAULT_TEMPLATE: &str = "beam_calculation.xlsx";

/// Documented maximum beam length accepted by the template.
pub const MAX_LENGTH_MM: f64 = 100.0;

/// The deflection series spans one row per millimetre of beam length plus
/// one extra row. The offset is an artifact of the external sheet's row
/// layout; keep it as a literal tied to that file.
pub const CURVE_ROW_OFFSET: usize = 1;

/// The seven named inputs of the beam template.
///
/// Units follow the template: millimetres for geometry, MPa for the modulus,
/// N/mm for the load amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamParams {
    /// Beam length (mm). Bounded above by `MAX_LENGTH_MM`.
    pub length: f64,
    /// Beam width (mm).
    pub width: f64,
    /// Beam height (mm).
    pub height: f64,
    /// Modulus of elasticity (MPa).
    pub elastic_modulus: f64,
    /// Starting point of the distributed load (mm).
    pub load_start: f64,
    /// Distributed load amplitude at the load start (N/mm).
    pub load_amplitude_a: f64,
    /// Distributed load amplitude at the beam end (N/mm).
    pub load_amplitude_l: f64,
}

impl Default for BeamParams {
    fn default() -> Self {
        Self {
            length: 100.0,
            width: 10.0,
            height: 10.0,
            elastic_modulus: 200_000.0,
            load_start: 9.0,
            load_amplitude_a: 5.0,
            load_amplitude_l: 5.0,
        }
    }
}

impl BeamParams {
    /// Per-field bound checks at the input edge.
    ///
    /// Cross-field validity (e.g. `load_start <= length`) is delegated to the
    /// external spreadsheet and not validated here.
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("elastic modulus", self.elastic_modulus),
            ("load start", self.load_start),
            ("load amplitude (wa)", self.load_amplitude_a),
            ("load amplitude (wL)", self.load_amplitude_l),
        ];
        for (label, value) in fields {
            if !value.is_finite() {
                return Err(AppError::input(format!("Beam {label} must be a finite number.")));
            }
        }
        if self.length < 0.0 {
            return Err(AppError::input("Beam length must be non-negative."));
        }
        if self.length > MAX_LENGTH_MM {
            return Err(AppError::input(format!(
                "Beam length {} exceeds the template maximum of {MAX_LENGTH_MM} mm.",
                self.length
            )));
        }
        Ok(())
    }

    /// Number of rows the curve view reads from the deflection series.
    pub fn curve_rows(&self) -> usize {
        self.length as usize + CURVE_ROW_OFFSET
    }
}

/// A single named input sent to the evaluation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineInput {
    pub name: String,
    pub value: f64,
}

impl EngineInput {
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// One evaluation's outputs: named scalars plus the regenerated workbook.
///
/// Created fresh on every view render or download request, read once, then
/// discarded; nothing is cached across entry points.
#[derive(Debug, Clone)]
pub struct ResultBundle {
    /// Named scalar outputs defined by the template.
    pub values: BTreeMap<String, f64>,
    /// The filled workbook serialized to bytes.
    pub workbook: Vec<u8>,
}

impl ResultBundle {
    /// Read a required named output.
    pub fn value(&self, name: &str) -> Result<f64, AppError> {
        self.values.get(name).copied().ok_or_else(|| {
            AppError::engine(format!("Evaluation result is missing the '{name}' output."))
        })
    }
}

/// The two scalar results shown by the results view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarResults {
    /// Maximum deflection (micron).
    pub max_deflection: f64,
    /// Maximum bending stress (MPa).
    pub max_bending_stress: f64,
}

impl ScalarResults {
    pub fn from_bundle(bundle: &ResultBundle) -> Result<Self, AppError> {
        Ok(Self {
            max_deflection: bundle.value(OUTPUT_MAX_DEFLECTION)?,
            max_bending_stress: bundle.value(OUTPUT_MAX_BENDING_STRESS)?,
        })
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub params: BeamParams,
    /// Path to the external workbook template.
    pub template_path: PathBuf,
}

impl RunConfig {
    pub fn new(params: BeamParams, template_path: PathBuf) -> Self {
        Self {
            params,
            template_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_template_defaults() {
        let p = BeamParams::default();
        assert_eq!(p.length, 100.0);
        assert_eq!(p.width, 10.0);
        assert_eq!(p.height, 10.0);
        assert_eq!(p.elastic_modulus, 200_000.0);
        assert_eq!(p.load_start, 9.0);
        assert_eq!(p.load_amplitude_a, 5.0);
        assert_eq!(p.load_amplitude_l, 5.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn length_at_documented_maximum_is_valid() {
        let p = BeamParams {
            length: MAX_LENGTH_MM,
            ..BeamParams::default()
        };
        assert!(p.validate().is_ok());
        assert_eq!(p.curve_rows(), 101);
    }

    #[test]
    fn length_beyond_maximum_is_rejected() {
        let p = BeamParams {
            length: MAX_LENGTH_MM + 1.0,
            ..BeamParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn non_finite_field_is_rejected() {
        let p = BeamParams {
            elastic_modulus: f64::NAN,
            ..BeamParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn curve_rows_track_length_only() {
        let short = BeamParams {
            length: 10.0,
            ..BeamParams::default()
        };
        assert_eq!(short.curve_rows(), 11);

        let loaded = BeamParams {
            load_amplitude_a: 50.0,
            load_amplitude_l: 0.5,
            load_start: 1.0,
            ..short
        };
        assert_eq!(loaded.curve_rows(), short.curve_rows());
    }

    #[test]
    fn missing_output_key_is_an_error() {
        let bundle = ResultBundle {
            values: BTreeMap::new(),
            workbook: Vec::new(),
        };
        assert!(bundle.value(OUTPUT_MAX_DEFLECTION).is_err());
    }
}
