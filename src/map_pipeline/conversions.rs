//! Pipeline conversions module
//!
//! This module contains the orchestration logic turning a directory of
//! spectrum files into map files and a bitmap.

mod spectra_to_map;
pub mod types;


pub use spectra_to_map::SpectrumMapPipeline;
pub use types::{IntensityMode, MapConfig, OutputFormat};
