//! Loading of the external workbook template.

use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Read the template workbook bytes from disk.
///
/// The template's contents are opaque here; it is shipped to the evaluation
/// service unmodified.
pub fn load_template(path: &Path) -> Result<Vec<u8>, AppError> {
    fs::read(path).map_err(|e| {
        AppError::input(format!(
            "Failed to read template workbook '{}': {e}",
            path.display()
        ))
    })
}
