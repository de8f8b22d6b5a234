use std::path::Path;

use crate::map_pipeline::common::error::Result;
use crate::map_pipeline::spectrum::types::Spectrum;

pub trait SpectrumReader {
    fn read_spectrum(&self, path: &Path) -> Result<Spectrum>;
}
