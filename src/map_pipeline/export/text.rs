//! Whitespace-delimited text export for grids and axis handles, intended for
//! plotting the map in external software.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::map_pipeline::common::error::{MapError, Result};

pub struct TextExporter;

impl TextExporter {
    /// Writes a row-major matrix as one space-separated line per row, cells
    /// right-aligned to width 10 with 6 decimal places.
    pub fn write_matrix(
        values: &[f64],
        width: usize,
        height: usize,
        path: &Path,
    ) -> Result<()> {
        if width * height != values.len() {
            return Err(MapError::DimensionMismatch {
                size: values.len(),
                width: width as u64,
                height: height as u64,
            });
        }

        let mut output = BufWriter::new(create(path)?);
        for row in values.chunks(width) {
            let mut cells = row.iter();
            if let Some(first) = cells.next() {
                write!(output, "{first:>10.6}")?;
            }
            for cell in cells {
                write!(output, " {cell:>10.6}")?;
            }
            writeln!(output)?;
        }
        output.flush()?;

        info!(file = %path.display(), width, height, "Wrote matrix file");
        Ok(())
    }

    /// Writes the sorted unique axis values, one per line per axis, to
    /// `<stem>-x-axis-handles.txt` and `<stem>-y-axis-handles.txt`.
    pub fn write_axis_handles(xs: &[f64], ys: &[f64], stem: &str) -> Result<()> {
        for (axis, name) in [(xs, "x"), (ys, "y")] {
            let path = std::path::PathBuf::from(format!("{stem}-{name}-axis-handles.txt"));
            let mut output = BufWriter::new(create(&path)?);
            for value in axis {
                writeln!(output, "{value}")?;
            }
            output.flush()?;
            info!(file = %path.display(), "Wrote axis handles");
        }
        Ok(())
    }
}

fn create(path: &Path) -> Result<File> {
    File::create(path)
        .map_err(|e| MapError::OutputWriteError(format!("{}: {}", path.display(), e)))
}
