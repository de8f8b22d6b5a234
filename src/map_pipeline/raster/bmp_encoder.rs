//! Minimal uncompressed 24-bit bitmap encoder.
//!
//! Rows are written in the formatted grid's own top-down order, not the
//! conventional bottom-up bitmap storage; viewers that honor the positive
//! height field will show the map vertically flipped. Callers account for
//! this when comparing output against bottom-up-aware tools.

use std::io::Write;

use tracing::debug;

use crate::map_pipeline::common::error::{MapError, Result};
use crate::map_pipeline::grid::FormattedGrid;
use crate::map_pipeline::raster::encoder::RasterEncoder;
use crate::map_pipeline::raster::types::{BmpFileHeader, BmpInfoHeader};

pub struct BmpEncoder;

impl RasterEncoder for BmpEncoder {
    /// Encodes a grid of intensities normalized to [0, 1] as BGR triples
    /// behind the two bitmap headers.
    ///
    /// Intensities above 1 are rejected, never clamped down; normalization is
    /// the caller's responsibility. Channel arithmetic that overflows a byte
    /// saturates to 255 on the cast.
    fn encode(&self, grid: &FormattedGrid, output: &mut dyn Write) -> Result<()> {
        debug!(width = grid.width, height = grid.height, "Encoding bitmap");
        self.validate(grid)?;

        let mut buffer = Vec::with_capacity(54 + 3 * grid.data.len());
        buffer.extend_from_slice(&BmpFileHeader::new(grid.width, grid.height).to_bytes());
        buffer.extend_from_slice(&BmpInfoHeader::new(grid.width, grid.height).to_bytes());

        for &v in &grid.data {
            if v > 1.0 {
                return Err(MapError::IntensityAboveOne(v));
            }
            buffer.push((75.0 * v / 0.8) as u8);
            buffer.push((145.0 * v / 0.3) as u8);
            buffer.push((250.0 * v / 0.2) as u8);
        }

        output.write_all(&buffer)?;
        debug!(bytes = buffer.len(), "Bitmap encoding complete");
        Ok(())
    }
}

impl BmpEncoder {
    fn validate(&self, grid: &FormattedGrid) -> Result<()> {
        if grid.width > i32::MAX as u32 || grid.height > i32::MAX as u32 {
            return Err(MapError::InvalidDimensions(grid.width, grid.height));
        }
        if grid.width % 4 != 0 || grid.height % 4 != 0 {
            return Err(MapError::UnalignedDimensions(grid.width, grid.height));
        }
        let cells = grid.width as usize * grid.height as usize;
        if cells != grid.data.len() {
            return Err(MapError::DimensionMismatch {
                size: grid.data.len(),
                width: u64::from(grid.width),
                height: u64::from(grid.height),
            });
        }
        Ok(())
    }
}
