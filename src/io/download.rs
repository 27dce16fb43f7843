//! The download action: write the filled workbook bytes verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::DOWNLOAD_FILE_NAME;
use crate::error::AppError;

/// Write the workbook bytes under the fixed download name.
///
/// The name is `evaluated_beam.xlsx` regardless of input values; only the
/// directory is configurable. Returns the full path written.
pub fn write_workbook(dir: &Path, workbook: &[u8]) -> Result<PathBuf, AppError> {
    let path = dir.join(DOWNLOAD_FILE_NAME);
    fs::write(&path, workbook)
        .map_err(|e| AppError::input(format!("Failed to write '{}': {e}", path.display())))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("beam-sheet-test-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn writes_fixed_file_name() {
        let dir = scratch_dir("name");
        let path = write_workbook(&dir, b"workbook-bytes").unwrap();
        assert_eq!(path.file_name().unwrap(), "evaluated_beam.xlsx");
        assert_eq!(fs::read(&path).unwrap(), b"workbook-bytes");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bytes_are_written_verbatim() {
        let dir = scratch_dir("verbatim");
        let bytes: Vec<u8> = (0..=255).collect();
        let path = write_workbook(&dir, &bytes).unwrap();
        assert_eq!(fs::read(&path).unwrap(), bytes);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_input_error() {
        let dir = scratch_dir("missing").join("does-not-exist");
        let err = write_workbook(&dir, b"x").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
