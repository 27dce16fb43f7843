//! Formatted terminal output for the results view.
//!
//! We keep formatting code in one place so:
//! - the glue code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{BeamParams, ScalarResults};

/// Display label/suffix pairs for the two scalar results.
///
/// Labels and suffixes mirror the template's output definitions.
const MAX_DEFLECTION_LABEL: &str = "Maximum deflection";
const MAX_DEFLECTION_SUFFIX: &str = "micron";
const MAX_BENDING_STRESS_LABEL: &str = "Maximum bending stress";
const MAX_BENDING_STRESS_SUFFIX: &str = "MPa";

/// Format the scalar results as labeled, unit-suffixed values (2 decimals).
pub fn format_results(results: &ScalarResults) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{MAX_DEFLECTION_LABEL:<24} {:>12.2} {MAX_DEFLECTION_SUFFIX}\n",
        results.max_deflection
    ));
    out.push_str(&format!(
        "{MAX_BENDING_STRESS_LABEL:<24} {:>12.2} {MAX_BENDING_STRESS_SUFFIX}\n",
        results.max_bending_stress
    ));
    out
}

/// One-line run header echoing the input parameters.
pub fn format_run_header(params: &BeamParams) -> String {
    format!(
        "Beam: L={} W={} H={} mm | E={} MPa | load: aw={} wa={} wL={} N/mm\n",
        params.length,
        params.width,
        params.height,
        params.elastic_modulus,
        params.load_start,
        params.load_amplitude_a,
        params.load_amplitude_l,
    )
}

/// Short results line for the TUI header.
pub fn format_results_line(results: &ScalarResults) -> String {
    format!(
        "deflection: {:.2} micron | bending stress: {:.2} MPa",
        results.max_deflection, results.max_bending_stress
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_are_rounded_to_two_decimals_with_suffixes() {
        let out = format_results(&ScalarResults {
            max_deflection: 12.3456,
            max_bending_stress: 78.9012,
        });
        assert!(out.contains("Maximum deflection"));
        assert!(out.contains("12.35 micron"));
        assert!(out.contains("Maximum bending stress"));
        assert!(out.contains("78.90 MPa"));
    }

    #[test]
    fn header_echoes_every_parameter() {
        let out = format_run_header(&BeamParams::default());
        for token in ["L=100", "W=10", "H=10", "E=200000", "aw=9", "wa=5", "wL=5"] {
            assert!(out.contains(token), "missing {token} in {out}");
        }
    }
}
