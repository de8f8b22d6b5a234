//! Line-oriented spectrum file reader.
//!
//! Input files hold one `energy intensity` pair per line with exactly one
//! separating space; values are digits with an optional leading minus and at
//! most one decimal point. Anything else fails fast with file context. The
//! acquisition site comes from the file name: the last two hyphen-delimited
//! stem segments are the x and y coordinates, with a literal `p` standing in
//! for the decimal point (`sample-2p5-10.txt` sits at x = 2.5, y = 10).

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::map_pipeline::common::error::{MapError, Result};
use crate::map_pipeline::grid::Coordinate;
use crate::map_pipeline::spectrum::reader::SpectrumReader;
use crate::map_pipeline::spectrum::types::Spectrum;

pub struct TextSpectrumReader;

impl SpectrumReader for TextSpectrumReader {
    fn read_spectrum(&self, path: &Path) -> Result<Spectrum> {
        debug!(file = %path.display(), "Reading spectrum file");

        let body = fs::read_to_string(path)
            .map_err(|e| MapError::InputReadError(format!("{}: {}", path.display(), e)))?;
        let (energy, intensity) = parse_body(&body, path)?;
        let position = parse_position(path)?;

        debug!(
            file = %path.display(),
            samples = energy.len(),
            x = position.x,
            y = position.y,
            "Spectrum decoded"
        );
        Ok(Spectrum {
            energy,
            intensity,
            position,
        })
    }
}

fn malformed(path: &Path, reason: String) -> MapError {
    MapError::MalformedSpectrum {
        file: path.display().to_string(),
        reason,
    }
}

fn parse_body(body: &str, path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut energy = Vec::new();
    let mut intensity = Vec::new();

    for (index, line) in body.lines().enumerate() {
        let line_no = index + 1;
        let Some((energy_tok, intensity_tok)) = line.split_once(' ') else {
            return Err(malformed(
                path,
                format!("line {line_no} is missing one or more values in a column"),
            ));
        };
        if intensity_tok.contains(' ') {
            return Err(malformed(
                path,
                format!(
                    "line {line_no} has more than two values or spaces at the end of the line"
                ),
            ));
        }
        if energy_tok.is_empty() || intensity_tok.is_empty() {
            return Err(malformed(
                path,
                format!("line {line_no} is missing one or more values in a column"),
            ));
        }
        energy.push(parse_value(energy_tok, path, line_no)?);
        intensity.push(parse_value(intensity_tok, path, line_no)?);
    }

    if energy.is_empty() {
        return Err(malformed(path, "file holds no samples".to_string()));
    }
    if !energy.windows(2).all(|w| w[0] < w[1]) {
        return Err(malformed(
            path,
            "energy axis must be strictly increasing".to_string(),
        ));
    }
    Ok((energy, intensity))
}

/// Strict numeric token: digits, at most one leading `-`, at most one `.`.
fn parse_value(token: &str, path: &Path, line_no: usize) -> Result<f64> {
    let mut seen_point = false;
    for (index, c) in token.char_indices() {
        match c {
            '0'..='9' => {}
            '-' if index == 0 => {}
            '.' if !seen_point => seen_point = true,
            c if c.is_alphabetic() => {
                return Err(malformed(
                    path,
                    format!("line {line_no}: alphabetic character {c:?} in a value"),
                ));
            }
            _ => {
                return Err(malformed(
                    path,
                    format!(
                        "line {line_no}: only a leading '-' and a single '.' are allowed, found {c:?}"
                    ),
                ));
            }
        }
    }
    token.parse().map_err(|_| {
        malformed(
            path,
            format!("line {line_no}: {token:?} is not a number"),
        )
    })
}

fn parse_position(path: &Path) -> Result<Coordinate> {
    let syntax = |reason: String| MapError::CoordinateSyntax {
        file: path.display().to_string(),
        reason,
    };

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| syntax("file name is not valid UTF-8".to_string()))?;

    let mut segments = stem.rsplitn(3, '-');
    let y_token = segments.next().unwrap_or_default();
    let x_token = segments
        .next()
        .ok_or_else(|| syntax("file stem must end in two hyphen-delimited coordinates".to_string()))?;

    Ok(Coordinate::new(
        decode_coordinate(x_token, path, "x")?,
        decode_coordinate(y_token, path, "y")?,
    ))
}

/// Decodes one coordinate segment: digits pass through, `p` becomes the
/// decimal point, stray letters are dropped, punctuation is fatal.
fn decode_coordinate(token: &str, path: &Path, which: &'static str) -> Result<f64> {
    let syntax = |reason: String| MapError::CoordinateSyntax {
        file: path.display().to_string(),
        reason,
    };

    let mut cleaned = String::with_capacity(token.len());
    for c in token.chars() {
        match c {
            '0'..='9' => cleaned.push(c),
            'p' => cleaned.push('.'),
            c if c.is_alphabetic() => {}
            c => {
                return Err(syntax(format!(
                    "unrecognized character {c:?} for the {which} position"
                )));
            }
        }
    }
    if cleaned.is_empty() {
        return Err(syntax(format!("no value specified for the {which} position")));
    }
    cleaned
        .parse()
        .map_err(|_| syntax(format!("{token:?} does not encode a {which} position")))
}
