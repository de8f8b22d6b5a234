//! Spatial grid data types

use std::cmp::Ordering;

/// One acquisition site, identified by its (x, y) stage position.
///
/// Carries a total order (lexicographic on x then y, via `f64::total_cmp`) so
/// coordinates can key the ordered containers the map is built from.
#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coordinate {}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

/// Sorted, deduplicated axis projections of every observed coordinate.
#[derive(Debug, Clone)]
pub struct AxisSet {
    /// Distinct x values, ascending
    pub xs: Vec<f64>,
    /// Distinct y values, ascending
    pub ys: Vec<f64>,
}

impl AxisSet {
    /// Number of distinct x positions (raw grid width in data points)
    pub fn true_width(&self) -> usize {
        self.xs.len()
    }

    /// Number of distinct y positions (raw grid length in data points)
    pub fn true_length(&self) -> usize {
        self.ys.len()
    }
}

/// Rounded gaps between adjacent unique axis values, one sequence per axis.
///
/// Gaps are rounded half away from zero (`f64::round`); length is one less
/// than the axis, so a single-sample axis has an empty sequence.
#[derive(Debug, Clone)]
pub struct StepSequence {
    pub x: Vec<u32>,
    pub y: Vec<u32>,
}

/// Dense row-major intensity matrix, one cell per (unique y, unique x) pair.
/// Sites never acquired hold zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGrid {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
}

impl RawGrid {
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }
}

/// Raw grid resampled to uniform pixel spacing and padded so both dimensions
/// are multiples of 4 (raster row-stride requirement).
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedGrid {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f64>,
}

/// Everything the assembler derives from one directory scan: the axis
/// projections, the inferred physical steps, and the dense raw grid.
#[derive(Debug, Clone)]
pub struct AssembledMap {
    pub axes: AxisSet,
    pub steps: StepSequence,
    pub raw: RawGrid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn coordinate_order_is_lexicographic() {
        let a = Coordinate::new(0.0, 5.0);
        let b = Coordinate::new(1.0, 0.0);
        let c = Coordinate::new(1.0, 2.0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn coordinate_set_collapses_duplicates() {
        let mut set = BTreeSet::new();
        set.insert(Coordinate::new(2.5, 10.0));
        set.insert(Coordinate::new(2.5, 10.0));
        set.insert(Coordinate::new(2.5, 10.5));
        assert_eq!(set.len(), 2);
    }
}
