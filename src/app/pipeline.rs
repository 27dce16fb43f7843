//! Shared evaluation pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load template -> evaluate via engine -> extract named outputs
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! Every entry point re-runs the full evaluation; nothing is cached or
//! shared across requests.

use crate::domain::{BeamParams, ResultBundle, RunConfig, ScalarResults};
use crate::engine::SpreadsheetEngine;
use crate::error::AppError;

/// All computed outputs of a single evaluation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Named outputs plus the filled workbook bytes.
    pub bundle: ResultBundle,
    /// The two scalars every view reports.
    pub scalars: ScalarResults,
}

/// Execute one evaluation, loading the template from disk.
pub fn run_eval(engine: &dyn SpreadsheetEngine, config: &RunConfig) -> Result<RunOutput, AppError> {
    let template = crate::io::load_template(&config.template_path)?;
    run_eval_with_template(engine, &template, &config.params)
}

/// Execute one evaluation with pre-loaded template bytes.
///
/// This is useful for the TUI, which keeps the (static) template in memory
/// and re-evaluates on demand.
pub fn run_eval_with_template(
    engine: &dyn SpreadsheetEngine,
    template: &[u8],
    params: &BeamParams,
) -> Result<RunOutput, AppError> {
    let bundle = crate::engine::evaluate_beam(engine, template, params)?;
    let scalars = ScalarResults::from_bundle(&bundle)?;
    Ok(RunOutput { bundle, scalars })
}
