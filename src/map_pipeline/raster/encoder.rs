use std::io::Write;

use crate::map_pipeline::common::error::Result;
use crate::map_pipeline::grid::FormattedGrid;

pub trait RasterEncoder {
    fn encode(&self, grid: &FormattedGrid, output: &mut dyn Write) -> Result<()>;
}
