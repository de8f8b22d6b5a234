//! Text export module
//!
//! This module writes grids and axis arrays as plain-text files.

mod text;

pub use text::TextExporter;
