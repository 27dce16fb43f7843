//! Input/output helpers.
//!
//! - workbook template loading (`template`)
//! - filled-workbook download (`download`)

pub mod download;
pub mod template;

pub use download::*;
pub use template::*;
