//! External spreadsheet evaluation.
//!
//! The beam formulas live inside an opaque pre-authored workbook template;
//! this repository only feeds named parameters in and reads named outputs
//! back. The evaluation capability itself sits behind the
//! [`SpreadsheetEngine`] trait so the pipeline and views are testable without
//! a live service (`client` provides the HTTP implementation).

use crate::domain::{
    BeamParams, EngineInput, ResultBundle, INPUT_HEIGHT, INPUT_LENGTH, INPUT_LOAD_AMPLITUDE_A,
    INPUT_LOAD_AMPLITUDE_L, INPUT_LOAD_START, INPUT_MODULUS, INPUT_WIDTH, OUTPUT_MAX_BENDING_STRESS,
    OUTPUT_MAX_DEFLECTION,
};
use crate::error::AppError;

pub mod client;

/// Something that can evaluate a workbook template against named inputs.
///
/// Implementations return whatever named outputs the template defines plus
/// the filled workbook serialized to bytes. Failures are pass-through: there
/// is no retry or fallback at this seam.
pub trait SpreadsheetEngine {
    fn evaluate(&self, template: &[u8], inputs: &[EngineInput]) -> Result<ResultBundle, AppError>;
}

/// Map the beam parameters onto the template's named inputs.
///
/// The names and their order mirror the template's parameter bindings.
pub fn named_inputs(params: &BeamParams) -> Vec<EngineInput> {
    vec![
        EngineInput::new(INPUT_LENGTH, params.length),
        EngineInput::new(INPUT_WIDTH, params.width),
        EngineInput::new(INPUT_HEIGHT, params.height),
        EngineInput::new(INPUT_MODULUS, params.elastic_modulus),
        EngineInput::new(INPUT_LOAD_START, params.load_start),
        EngineInput::new(INPUT_LOAD_AMPLITUDE_A, params.load_amplitude_a),
        EngineInput::new(INPUT_LOAD_AMPLITUDE_L, params.load_amplitude_l),
    ]
}

/// Run one evaluation of the beam template.
///
/// Validates the per-field bounds, invokes the engine, and checks that the
/// two outputs every view depends on are present in the bundle.
pub fn evaluate_beam(
    engine: &dyn SpreadsheetEngine,
    template: &[u8],
    params: &BeamParams,
) -> Result<ResultBundle, AppError> {
    params.validate()?;
    let inputs = named_inputs(params);
    let bundle = engine.evaluate(template, &inputs)?;
    bundle.value(OUTPUT_MAX_DEFLECTION)?;
    bundle.value(OUTPUT_MAX_BENDING_STRESS)?;
    Ok(bundle)
}

#[cfg(test)]
pub(crate) mod testing {
    //! A canned engine for exercising the pipeline and views offline.

    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use super::SpreadsheetEngine;
    use crate::domain::{EngineInput, ResultBundle, OUTPUT_MAX_BENDING_STRESS, OUTPUT_MAX_DEFLECTION};
    use crate::error::AppError;

    /// Returns fixed outputs and a fixed workbook; records the inputs it saw.
    pub struct FixedEngine {
        pub values: BTreeMap<String, f64>,
        pub workbook: Vec<u8>,
        pub seen_inputs: RefCell<Vec<EngineInput>>,
    }

    impl FixedEngine {
        pub fn new(max_deflection: f64, max_bending_stress: f64, workbook: Vec<u8>) -> Self {
            let mut values = BTreeMap::new();
            values.insert(OUTPUT_MAX_DEFLECTION.to_string(), max_deflection);
            values.insert(OUTPUT_MAX_BENDING_STRESS.to_string(), max_bending_stress);
            Self {
                values,
                workbook,
                seen_inputs: RefCell::new(Vec::new()),
            }
        }
    }

    impl SpreadsheetEngine for FixedEngine {
        fn evaluate(
            &self,
            _template: &[u8],
            inputs: &[EngineInput],
        ) -> Result<ResultBundle, AppError> {
            *self.seen_inputs.borrow_mut() = inputs.to_vec();
            Ok(ResultBundle {
                values: self.values.clone(),
                workbook: self.workbook.clone(),
            })
        }
    }
}
