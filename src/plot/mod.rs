//! Terminal plotting for the curve view.

pub mod ascii;

pub use ascii::*;
