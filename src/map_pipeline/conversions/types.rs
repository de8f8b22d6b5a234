//! Map conversion configuration types

/// Per-run intensity extraction mode, applied to every spectrum.
#[derive(Debug, Clone, Copy)]
pub enum IntensityMode {
    /// Linear interpolation at an exact energy between two measured samples
    Interpolated { energy: f64 },
    /// Sum over a symmetric window of `channels` samples per side around the
    /// nearest sample at or above the energy
    Integrated { energy: f64, channels: usize },
}

/// Which output files one run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw matrix plus the axis-handle files
    Raw,
    /// Formatted (resampled, padded) matrix
    Grid,
    /// Binary bitmap of the formatted grid
    Bmp,
    /// Everything
    All,
}

impl OutputFormat {
    pub fn wants_raw(self) -> bool {
        matches!(self, Self::Raw | Self::All)
    }

    pub fn wants_grid(self) -> bool {
        matches!(self, Self::Grid | Self::All)
    }

    pub fn wants_bmp(self) -> bool {
        matches!(self, Self::Bmp | Self::All)
    }

    /// Whether the run needs the resampling stage at all.
    pub fn wants_formatted(self) -> bool {
        self.wants_grid() || self.wants_bmp()
    }
}

/// Configuration for one spectrum-map run.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Intensity extraction mode
    pub mode: IntensityMode,
    /// Output files to produce
    pub format: OutputFormat,
    /// Divide the formatted grid by its maximum before encoding the bitmap.
    /// Off by default; the encoder rejects intensities above 1 either way.
    pub normalize: bool,
}

impl MapConfig {
    pub fn new(mode: IntensityMode) -> Self {
        Self {
            mode,
            format: OutputFormat::All,
            normalize: false,
        }
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn normalize(mut self, enable: bool) -> Self {
        self.normalize = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_selection() {
        assert!(OutputFormat::All.wants_raw());
        assert!(OutputFormat::All.wants_bmp());
        assert!(OutputFormat::Raw.wants_raw());
        assert!(!OutputFormat::Raw.wants_formatted());
        assert!(OutputFormat::Bmp.wants_formatted());
        assert!(!OutputFormat::Bmp.wants_grid());
    }

    #[test]
    fn config_defaults() {
        let config = MapConfig::new(IntensityMode::Interpolated { energy: 1.0 })
            .format(OutputFormat::Grid)
            .normalize(true);
        assert_eq!(config.format, OutputFormat::Grid);
        assert!(config.normalize);
    }
}
