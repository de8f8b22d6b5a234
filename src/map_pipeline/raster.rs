//! Raster encoding module
//!
//! This module encodes a formatted grid of normalized intensities into a
//! minimal uncompressed 24-bit bitmap.

mod bmp_encoder;
mod encoder;
pub mod types;

pub use bmp_encoder::BmpEncoder;
pub use encoder::RasterEncoder;
pub use types::{BmpFileHeader, BmpInfoHeader};
