//! Raw grid assembly from irregular acquisition coordinates.
//!
//! The assembler works from the *unique sorted* axis projections of the
//! observed coordinates rather than assuming a rectangular scan order, so
//! files may arrive in any order and grid positions may be missing. The cost
//! is that every observed x is assumed to pair with every observed y; sites
//! never acquired are synthesized as zero.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::map_pipeline::common::error::{MapError, Result};
use crate::map_pipeline::grid::types::{AssembledMap, AxisSet, Coordinate, RawGrid, StepSequence};

pub struct GridAssembler;

impl GridAssembler {
    /// Reduces a set of acquisition coordinates and their extracted
    /// intensities into a dense row-major grid plus axis metadata.
    ///
    /// Rows iterate sorted unique y ascending, columns sorted unique x
    /// ascending. A coordinate absent from `values` fills its cell with zero;
    /// that is the documented behavior for missing sites, not an error.
    pub fn assemble(
        coords: &BTreeSet<Coordinate>,
        values: &BTreeMap<Coordinate, f64>,
    ) -> Result<AssembledMap> {
        if coords.is_empty() || values.is_empty() {
            return Err(MapError::EmptyMap);
        }

        let xs = unique_sorted(coords.iter().map(|c| c.x));
        let ys = unique_sorted(coords.iter().map(|c| c.y));
        debug!(
            true_width = xs.len(),
            true_length = ys.len(),
            "Axis projections extracted"
        );

        let steps = StepSequence {
            x: step_sequence(&xs),
            y: step_sequence(&ys),
        };

        let mut data = Vec::with_capacity(xs.len() * ys.len());
        for &y in &ys {
            for &x in &xs {
                data.push(
                    values
                        .get(&Coordinate::new(x, y))
                        .copied()
                        .unwrap_or_default(),
                );
            }
        }

        let raw = RawGrid {
            width: xs.len(),
            height: ys.len(),
            data,
        };
        Ok(AssembledMap {
            axes: AxisSet { xs, ys },
            steps,
            raw,
        })
    }
}

/// Sorts one axis projection ascending and removes adjacent duplicates.
/// Deduplication happens after sorting so equal values anywhere in the
/// original order collapse.
fn unique_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut axis: Vec<f64> = values.collect();
    axis.sort_by(f64::total_cmp);
    axis.dedup();
    axis
}

/// Gaps between adjacent unique axis values, rounded half away from zero.
fn step_sequence(axis: &[f64]) -> Vec<u32> {
    axis.windows(2).map(|w| (w[1] - w[0]).round() as u32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(
        sites: &[(f64, f64, f64)],
    ) -> (BTreeSet<Coordinate>, BTreeMap<Coordinate, f64>) {
        let mut coords = BTreeSet::new();
        let mut values = BTreeMap::new();
        for &(x, y, v) in sites {
            let c = Coordinate::new(x, y);
            coords.insert(c);
            values.insert(c, v);
        }
        (coords, values)
    }

    #[test]
    fn empty_inputs_are_fatal() {
        let (coords, values) = inputs(&[]);
        let result = GridAssembler::assemble(&coords, &values);
        assert!(matches!(result.unwrap_err(), MapError::EmptyMap));
    }

    #[test]
    fn dimensions_follow_unique_axis_values() {
        let (coords, values) = inputs(&[
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 2.0),
            (2.0, 0.0, 3.0),
            (0.0, 1.0, 4.0),
            (1.0, 1.0, 5.0),
            (2.0, 1.0, 6.0),
        ]);
        let map = GridAssembler::assemble(&coords, &values).unwrap();
        assert_eq!(map.axes.true_width(), 3);
        assert_eq!(map.axes.true_length(), 2);
        assert_eq!(map.raw.data.len(), 6);
        assert_eq!(map.raw.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(map.steps.x, vec![1, 1]);
        assert_eq!(map.steps.y, vec![1]);
    }

    #[test]
    fn missing_sites_fill_with_zero() {
        let (coords, values) = inputs(&[
            (0.0, 0.0, 1.0),
            (1.0, 1.0, 5.0),
        ]);
        let map = GridAssembler::assemble(&coords, &values).unwrap();
        // (1,0) and (0,1) were never acquired
        assert_eq!(map.raw.data, vec![1.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let shuffled = [
            (2.0, 1.0, 6.0),
            (0.0, 0.0, 1.0),
            (1.0, 1.0, 5.0),
            (2.0, 0.0, 3.0),
            (0.0, 1.0, 4.0),
            (1.0, 0.0, 2.0),
        ];
        let (coords, values) = inputs(&shuffled);
        let map = GridAssembler::assemble(&coords, &values).unwrap();
        assert_eq!(map.raw.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn assembly_is_idempotent() {
        let (coords, values) = inputs(&[
            (0.0, 0.0, 0.25),
            (3.0, 0.0, 0.5),
            (0.0, 2.0, 0.75),
        ]);
        let first = GridAssembler::assemble(&coords, &values).unwrap();
        let second = GridAssembler::assemble(&coords, &values).unwrap();
        assert_eq!(first.raw, second.raw);
    }

    #[test]
    fn non_uniform_steps_are_rounded_gaps() {
        let (coords, values) = inputs(&[
            (0.0, 0.0, 1.0),
            (2.5, 0.0, 2.0),
            (10.0, 0.0, 3.0),
        ]);
        let map = GridAssembler::assemble(&coords, &values).unwrap();
        // 2.5 rounds half away from zero to 3, 7.5 to 8
        assert_eq!(map.steps.x, vec![3, 8]);
    }
}
