//! Grid assembly and resampling module
//!
//! This module reduces irregular acquisition coordinates into a dense raw
//! grid and resamples it into the uniformly-pixeled formatted grid the
//! raster encoder consumes.

mod assembler;
mod resampler;
pub mod types;

pub use assembler::GridAssembler;
pub use resampler::GridResampler;
pub use types::{AssembledMap, AxisSet, Coordinate, FormattedGrid, RawGrid, StepSequence};
