use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Malformed spectrum file {file}: {reason}")]
    MalformedSpectrum { file: String, reason: String },

    #[error("Invalid coordinate in file name {file}: {reason}")]
    CoordinateSyntax { file: String, reason: String },

    #[error("Requested energy {energy} is outside the measured axis [{min}, {max}]")]
    EnergyOutOfRange { energy: f64, min: f64, max: f64 },

    #[error("Coordinate set or intensity map is empty, no spectra to assemble")]
    EmptyMap,

    #[error("Two files found for the same position ({x}, {y})")]
    DuplicateCoordinate { x: f64, y: f64 },

    #[error("Degenerate step sequence on the {axis} axis: {reason}")]
    DegenerateSteps { axis: &'static str, reason: String },

    #[error("Invalid raster dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Raster dimensions not aligned to 4: width={0}, height={1}")]
    UnalignedDimensions(u32, u32),

    #[error("Intensity {0} exceeds 1.0, grid must be normalized before encoding")]
    IntensityAboveOne(f64),

    #[error("Grid of {size} cells does not match dimensions {width}x{height}")]
    DimensionMismatch {
        size: usize,
        width: u64,
        height: u64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
