//! Spectrum map pipeline module
//!
//! This module turns a directory of per-position spectral measurement files
//! into a 2-D spatial intensity map, with separate modules for spectrum
//! reading, grid assembly and resampling, raster encoding, text export, and
//! conversion orchestration.

pub mod common;
pub mod conversions;
pub mod export;
pub mod grid;
pub mod raster;
pub mod spectrum;

pub use common::{MapError, Result};

pub use spectrum::{Spectrum, SpectrumReader, TextSpectrumReader};

pub use grid::{
    AssembledMap, AxisSet, Coordinate, FormattedGrid, GridAssembler, GridResampler, RawGrid,
    StepSequence,
};

pub use raster::{BmpEncoder, RasterEncoder};

pub use export::TextExporter;

pub use conversions::{IntensityMode, MapConfig, OutputFormat, SpectrumMapPipeline};
