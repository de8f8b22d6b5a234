use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::map_pipeline::{
    common::error::{MapError, Result},
    conversions::types::{IntensityMode, MapConfig},
    export::TextExporter,
    grid::{Coordinate, FormattedGrid, GridAssembler, GridResampler},
    raster::{BmpEncoder, RasterEncoder},
    spectrum::{Spectrum, SpectrumReader, TextSpectrumReader},
};

pub struct SpectrumMapPipeline<R: SpectrumReader, E: RasterEncoder> {
    reader: R,
    encoder: E,
    config: MapConfig,
}

impl SpectrumMapPipeline<TextSpectrumReader, BmpEncoder> {
    pub fn new(config: MapConfig) -> Self {
        Self {
            reader: TextSpectrumReader,
            encoder: BmpEncoder,
            config,
        }
    }
}

impl<R: SpectrumReader, E: RasterEncoder> SpectrumMapPipeline<R, E> {
    pub fn with_custom(reader: R, encoder: E, config: MapConfig) -> Self {
        Self {
            reader,
            encoder,
            config,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Runs the whole batch pipeline for one directory of measurement files:
    /// scan, extract, assemble, resample, export. Any failure aborts the run
    /// and surfaces as a typed error; exit policy is the caller's concern.
    #[instrument(skip(self, input_dir, output_stem))]
    pub fn run<P: AsRef<Path>>(&self, input_dir: P, output_stem: &str) -> Result<()> {
        let input_dir = input_dir.as_ref();
        info!(input = %input_dir.display(), "Building spectrum map");

        let paths = {
            let _span = tracing::info_span!("scan_directory").entered();
            list_files(input_dir)?
        };

        let (coords, values) = {
            let _span = tracing::info_span!("extract_intensities", files = paths.len()).entered();
            self.collect_intensities(&paths)?
        };

        let map = {
            let _span = tracing::info_span!("assemble_grid").entered();
            GridAssembler::assemble(&coords, &values)?
        };
        info!(
            raw_width = map.axes.true_width(),
            raw_length = map.axes.true_length(),
            "Raw grid assembled"
        );

        if self.config.format.wants_raw() {
            let stem = format!("{output_stem}raw");
            TextExporter::write_matrix(
                &map.raw.data,
                map.raw.width,
                map.raw.height,
                &PathBuf::from(format!("{stem}.txt")),
            )?;
            TextExporter::write_axis_handles(&map.axes.xs, &map.axes.ys, &stem)?;
        }

        if self.config.format.wants_formatted() {
            let formatted = {
                let _span = tracing::info_span!("resample_grid").entered();
                GridResampler::resample(&map.axes, &map.steps, &map.raw)?
            };
            info!(
                formatted_width = formatted.width,
                formatted_height = formatted.height,
                "Formatted grid resampled"
            );

            if self.config.format.wants_grid() {
                TextExporter::write_matrix(
                    &formatted.data,
                    formatted.width as usize,
                    formatted.height as usize,
                    &PathBuf::from(format!("{output_stem}grid.txt")),
                )?;
            }

            if self.config.format.wants_bmp() {
                let _span = tracing::info_span!("encode_bitmap").entered();
                let grid = if self.config.normalize {
                    normalized(formatted)
                } else {
                    formatted
                };
                let path = PathBuf::from(format!("{output_stem}.bmp"));
                let mut output = fs::File::create(&path).map_err(|e| {
                    MapError::OutputWriteError(format!("{}: {}", path.display(), e))
                })?;
                self.encoder.encode(&grid, &mut output)?;
                info!(file = %path.display(), "Wrote bitmap");
            }
        }

        Ok(())
    }

    fn collect_intensities(
        &self,
        paths: &[PathBuf],
    ) -> Result<(BTreeSet<Coordinate>, BTreeMap<Coordinate, f64>)> {
        let mut coords = BTreeSet::new();
        let mut values = BTreeMap::new();
        for path in paths {
            let spectrum = self.reader.read_spectrum(path)?;
            let intensity = self.extract_intensity(&spectrum)?;
            let position = spectrum.position;
            if values.insert(position, intensity).is_some() {
                return Err(MapError::DuplicateCoordinate {
                    x: position.x,
                    y: position.y,
                });
            }
            coords.insert(position);
        }
        Ok((coords, values))
    }

    fn extract_intensity(&self, spectrum: &Spectrum) -> Result<f64> {
        match self.config.mode {
            IntensityMode::Interpolated { energy } => spectrum.interpolated_intensity(energy),
            IntensityMode::Integrated { energy, channels } => {
                spectrum.integrated_intensity(energy, channels)
            }
        }
    }
}

/// Regular files of the input directory, sorted for a deterministic scan
/// order. Subdirectories and other non-file entries are skipped.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| MapError::InputReadError(format!("{}: {}", dir.display(), e)))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| MapError::InputReadError(format!("{}: {}", dir.display(), e)))?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        } else {
            debug!(entry = %path.display(), "Skipping non-file directory entry");
        }
    }
    paths.sort();
    Ok(paths)
}

/// Scales the grid so its maximum value becomes 1. An all-zero or negative
/// grid is left untouched.
fn normalized(mut grid: FormattedGrid) -> FormattedGrid {
    let max = grid.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > 0.0 {
        for v in &mut grid.data {
            *v /= max;
        }
    }
    grid
}
