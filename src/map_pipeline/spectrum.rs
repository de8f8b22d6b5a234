//! Spectrum reading module
//!
//! This module parses per-site measurement files into energy/intensity pairs
//! and exposes the per-spectrum intensity extraction modes.

mod reader;
mod text_reader;
pub mod types;

pub use reader::SpectrumReader;
pub use text_reader::TextSpectrumReader;
pub use types::Spectrum;
