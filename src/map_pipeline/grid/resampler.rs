//! Nearest-neighbor resampling of the raw grid onto uniform pixels.
//!
//! The axis with the smallest inferred physical step sets the pixel
//! granularity, so the most finely sampled direction keeps its resolution and
//! coarser rows or columns are replicated. Both output dimensions are padded
//! up to a multiple of 4 to satisfy the raster row-stride convention.

use tracing::{debug, warn};

use crate::map_pipeline::common::error::{MapError, Result};
use crate::map_pipeline::grid::types::{AxisSet, FormattedGrid, RawGrid, StepSequence};

pub struct GridResampler;

impl GridResampler {
    /// Resamples `raw` into a uniformly-pixeled, alignment-padded grid.
    ///
    /// Resampling assumes the coordinate origin is the minimum-coordinate
    /// corner at (0, 0); any other origin gets a diagnostic and proceeds,
    /// with no correctness guarantee for the output.
    pub fn resample(axes: &AxisSet, steps: &StepSequence, raw: &RawGrid) -> Result<FormattedGrid> {
        if axes.xs.is_empty() || axes.ys.is_empty() || raw.data.is_empty() {
            return Err(MapError::EmptyMap);
        }
        if axes.xs[0] != 0.0 || axes.ys[0] != 0.0 {
            warn!(
                origin_x = axes.xs[0],
                origin_y = axes.ys[0],
                "Coordinate origin is not (0, 0); formatted grid and raster may mis-align"
            );
        }

        let width = pad_to_stride(pixel_dimension(&axes.xs, &steps.x, "x")?);
        let height = pad_to_stride(pixel_dimension(&axes.ys, &steps.y, "y")?);
        debug!(width, height, "Formatted grid dimensions");

        let col_boundaries = pixel_boundaries(&steps.x, width, axis_extent(&axes.xs));
        let row_boundaries = pixel_boundaries(&steps.y, height, axis_extent(&axes.ys));
        let col_lut = index_lookup(&col_boundaries, width, raw.width);
        let row_lut = index_lookup(&row_boundaries, height, raw.height);

        let mut data = Vec::with_capacity(width as usize * height as usize);
        for &row in &row_lut {
            for &col in &col_lut {
                data.push(raw.at(row, col));
            }
        }

        Ok(FormattedGrid {
            width,
            height,
            data,
        })
    }
}

/// Physical extent of a sorted axis under the truncating integer arithmetic
/// the dimension math uses throughout.
fn axis_extent(axis: &[f64]) -> u32 {
    axis[axis.len() - 1] as u32 - axis[0] as u32
}

/// Unpadded pixel count for one axis: extent over the smallest step, plus one.
///
/// A single-sample axis has no steps and degenerates to one pixel. A rounded
/// step of zero or a zero truncated extent would divide the grid away and is
/// rejected as a geometry error.
fn pixel_dimension(axis: &[f64], steps: &[u32], name: &'static str) -> Result<u32> {
    let Some(&min_step) = steps.iter().min() else {
        return Ok(1);
    };
    if min_step == 0 {
        return Err(MapError::DegenerateSteps {
            axis: name,
            reason: "adjacent axis values closer than 0.5 round to a zero step".to_string(),
        });
    }
    let extent = axis_extent(axis);
    if extent == 0 {
        return Err(MapError::DegenerateSteps {
            axis: name,
            reason: "axis spans a zero truncated extent".to_string(),
        });
    }
    Ok(extent / min_step + 1)
}

/// Pads a pixel dimension up to the next multiple of 4.
fn pad_to_stride(dim: u32) -> u32 {
    match dim % 4 {
        0 => dim,
        r => dim + 4 - r,
    }
}

/// Accumulated pixel-step boundaries: for every raw-grid gap, the output
/// pixel index at which the next raw index becomes active.
fn pixel_boundaries(steps: &[u32], padded_dim: u32, extent: u32) -> Vec<u32> {
    let mut boundaries = Vec::with_capacity(steps.len());
    let mut accumulated = 0u32;
    for &step in steps {
        accumulated += step * padded_dim / extent;
        boundaries.push(accumulated);
    }
    boundaries
}

/// Expands the boundary array into a monotonic map from output pixel index to
/// raw grid index: between two boundaries every pixel holds the last raw value.
fn index_lookup(boundaries: &[u32], padded_dim: u32, raw_len: usize) -> Vec<usize> {
    let mut lut = Vec::with_capacity(padded_dim as usize);
    let mut raw = 0usize;
    let mut next = 0usize;
    for pixel in 0..padded_dim {
        while next < boundaries.len() && boundaries[next] <= pixel {
            raw += 1;
            next += 1;
        }
        lut.push(raw.min(raw_len - 1));
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_map(xs: Vec<f64>, ys: Vec<f64>) -> (AxisSet, StepSequence, RawGrid) {
        let steps = StepSequence {
            x: xs.windows(2).map(|w| (w[1] - w[0]).round() as u32).collect(),
            y: ys.windows(2).map(|w| (w[1] - w[0]).round() as u32).collect(),
        };
        let data: Vec<f64> = (0..xs.len() * ys.len()).map(|i| i as f64).collect();
        let raw = RawGrid {
            width: xs.len(),
            height: ys.len(),
            data,
        };
        (AxisSet { xs, ys }, steps, raw)
    }

    #[test]
    fn three_by_two_pads_to_four_by_four() {
        let (axes, steps, raw) = uniform_map(vec![0.0, 1.0, 2.0], vec![0.0, 1.0]);
        let formatted = GridResampler::resample(&axes, &steps, &raw).unwrap();
        assert_eq!(formatted.width, 4);
        assert_eq!(formatted.height, 4);
        assert_eq!(formatted.data.len(), 16);
        // x boundaries accumulate to [2, 4]: columns hold raw 0, 0, 1, 1
        assert_eq!(&formatted.data[0..4], &[0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn corner_value_is_preserved() {
        let (axes, steps, raw) = uniform_map(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0]);
        let formatted = GridResampler::resample(&axes, &steps, &raw).unwrap();
        assert_eq!(formatted.data[0], raw.at(0, 0));
    }

    #[test]
    fn single_site_fills_padded_grid() {
        let (axes, steps, raw) = uniform_map(vec![0.0], vec![0.0]);
        let formatted = GridResampler::resample(&axes, &steps, &raw).unwrap();
        assert_eq!(formatted.width, 4);
        assert_eq!(formatted.height, 4);
        assert!(formatted.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn smallest_step_sets_resolution() {
        let (axes, steps, raw) = uniform_map(vec![0.0, 1.0, 3.0], vec![0.0, 1.0]);
        let formatted = GridResampler::resample(&axes, &steps, &raw).unwrap();
        // extent 3, min step 1: 4 pixels, boundaries [1, 3]
        assert_eq!(formatted.width, 4);
        assert_eq!(&formatted.data[0..4], &[0.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn zero_rounded_step_is_a_geometry_error() {
        let (axes, steps, raw) = uniform_map(vec![0.0, 0.2, 2.0], vec![0.0, 1.0]);
        let result = GridResampler::resample(&axes, &steps, &raw);
        assert!(matches!(
            result.unwrap_err(),
            MapError::DegenerateSteps { axis: "x", .. }
        ));
    }

    #[test]
    fn zero_truncated_extent_is_a_geometry_error() {
        let (axes, steps, raw) = uniform_map(vec![0.0, 0.6], vec![0.0, 1.0]);
        let result = GridResampler::resample(&axes, &steps, &raw);
        assert!(matches!(
            result.unwrap_err(),
            MapError::DegenerateSteps { axis: "x", .. }
        ));
    }

    #[test]
    fn non_zero_origin_proceeds_with_diagnostic() {
        let (axes, steps, raw) = uniform_map(vec![5.0, 6.0, 7.0], vec![5.0, 6.0]);
        // known limitation: output alignment is unguaranteed here, the call
        // still succeeds and keeps the padded dimensions
        let formatted = GridResampler::resample(&axes, &steps, &raw).unwrap();
        assert_eq!(formatted.width, 4);
        assert_eq!(formatted.height, 4);
    }
}
