//! Measured spectrum data types

use crate::map_pipeline::common::error::{MapError, Result};
use crate::map_pipeline::grid::Coordinate;

/// One measurement: the energy axis, the intensity per channel, and the
/// acquisition site it was taken at. The energy axis is strictly increasing
/// (enforced by the reader).
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub energy: Vec<f64>,
    pub intensity: Vec<f64>,
    pub position: Coordinate,
}

impl Spectrum {
    /// Intensity at an exact energy, linearly interpolated between the two
    /// axis samples bracketing it. An energy matching an axis sample returns
    /// the measured value; an energy outside the axis range is fatal.
    pub fn interpolated_intensity(&self, energy: f64) -> Result<f64> {
        let upper = self.bracket_index(energy)?;
        if self.energy[upper] == energy {
            return Ok(self.intensity[upper]);
        }
        let lower = upper - 1;
        let (e_lo, e_hi) = (self.energy[lower], self.energy[upper]);
        let (v_lo, v_hi) = (self.intensity[lower], self.intensity[upper]);
        Ok(v_lo + (energy - e_lo) * (v_hi - v_lo) / (e_hi - e_lo))
    }

    /// Sum of intensities over a symmetric window of `channels` samples per
    /// side around the nearest axis sample at or above `energy`, clipped at
    /// the axis boundaries when the window would overrun.
    pub fn integrated_intensity(&self, energy: f64, channels: usize) -> Result<f64> {
        let pos = self.bracket_index(energy)?;
        let lower = pos.saturating_sub(channels);
        let upper = (pos + channels).min(self.energy.len() - 1);
        Ok(self.intensity[lower..=upper].iter().sum())
    }

    /// First axis index with a value at or above `energy`, or
    /// `EnergyOutOfRange` when the axis does not cover it.
    fn bracket_index(&self, energy: f64) -> Result<usize> {
        let (min, max) = (self.energy[0], self.energy[self.energy.len() - 1]);
        // negated comparison also rejects a NaN energy
        if !(energy >= min && energy <= max) {
            return Err(MapError::EnergyOutOfRange { energy, min, max });
        }
        Ok(self.energy.partition_point(|&e| e < energy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Spectrum {
        Spectrum {
            energy: vec![0.0, 1.0, 2.0, 3.0],
            intensity: vec![10.0, 20.0, 30.0, 40.0],
            position: Coordinate::new(0.0, 0.0),
        }
    }

    #[test]
    fn interpolates_between_bracketing_samples() {
        assert_eq!(sample().interpolated_intensity(1.5).unwrap(), 25.0);
    }

    #[test]
    fn exact_axis_hit_returns_measured_value() {
        assert_eq!(sample().interpolated_intensity(2.0).unwrap(), 30.0);
        assert_eq!(sample().interpolated_intensity(0.0).unwrap(), 10.0);
        assert_eq!(sample().interpolated_intensity(3.0).unwrap(), 40.0);
    }

    #[test]
    fn out_of_range_energy_is_fatal() {
        let result = sample().interpolated_intensity(3.5);
        assert!(matches!(
            result.unwrap_err(),
            MapError::EnergyOutOfRange { .. }
        ));
        let result = sample().integrated_intensity(-0.5, 1);
        assert!(matches!(
            result.unwrap_err(),
            MapError::EnergyOutOfRange { .. }
        ));
    }

    #[test]
    fn integration_window_clips_at_lower_boundary() {
        // pos = 1, window [0, 2]
        assert_eq!(sample().integrated_intensity(1.0, 1).unwrap(), 60.0);
        // pos = 0, window [0, 2]
        assert_eq!(sample().integrated_intensity(0.0, 2).unwrap(), 60.0);
    }

    #[test]
    fn integration_window_clips_at_upper_boundary() {
        // pos = 3, window [1, 3]
        assert_eq!(sample().integrated_intensity(3.0, 2).unwrap(), 90.0);
    }

    #[test]
    fn zero_channels_integrates_a_single_sample() {
        assert_eq!(sample().integrated_intensity(2.0, 0).unwrap(), 30.0);
    }
}
