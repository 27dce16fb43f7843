//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)

use crate::domain::DEFLECTION_COLUMN;

/// Render the deflection series as a fixed-size ASCII line chart.
///
/// The x axis is the row index (one row per millimetre of beam length), the
/// y axis the deflection value. Axis labels are fixed.
pub fn render_ascii_curve(series: &[f64], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = pad_range(value_range(series));

    let mut grid = vec![vec![' '; width]; height];
    for (i, &v) in series.iter().enumerate() {
        let x = map_x(i, series.len(), width);
        let y = map_y(v, y_min, y_max, height);
        grid[y][x] = '*';
    }

    let mut out = String::new();
    out.push_str("Beam deflection\n");
    out.push_str(&format!(
        "x=[0, {}] mm | y=[{y_min:.2}, {y_max:.2}] microns\n",
        series.len().saturating_sub(1)
    ));
    for row in &grid {
        let line: String = row.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str(&format!("x: Length (mm), y: {DEFLECTION_COLUMN}\n"));
    out
}

fn value_range(series: &[f64]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in series {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !(lo.is_finite() && hi.is_finite()) || hi < lo {
        return (0.0, 1.0);
    }
    (lo, hi)
}

fn pad_range((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = ((hi - lo).abs() * 0.05).max(1e-12);
    (lo - pad, hi + pad)
}

fn map_x(index: usize, len: usize, width: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let u = index as f64 / (len as f64 - 1.0);
    ((width as f64 - 1.0) * u).round() as usize
}

fn map_y(value: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((value - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // Row 0 is the top of the grid.
    let inverted = 1.0 - u;
    ((height as f64 - 1.0) * inverted).round() as usize
}
