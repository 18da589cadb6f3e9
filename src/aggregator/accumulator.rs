//! Stack per-step field profiles into `[point, step]` arrays.
//!
//! The accumulator is sized once from the probe results and filled one
//! column per dump, in step order.

use super::reduction::SliceReduction;
use crate::input::{SpatialExtent, TimeSlice};
use crate::utils::error::AccumulateError;
use hdf5::File;
use log::debug;
use ndarray::{Array2, ArrayView1};

/// Raw and peak-normalised stacks, indexed `[point, step]`
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedField {
    pub raw: Array2<f64>,
    pub normalized: Array2<f64>,
}

/// Per-step scalars
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedSeries {
    /// Spatial integral of each slice
    pub energy: Vec<f64>,
    /// Maximum of each slice
    pub peak_power: Vec<f64>,
}

/// Column-by-column builder for `AggregatedField` and `DerivedSeries`
#[derive(Debug)]
pub struct Accumulator {
    dx: f64,
    next: usize,
    field: AggregatedField,
    series: DerivedSeries,
}

impl Accumulator {
    pub fn new(point_count: usize, file_count: usize, dx: f64) -> Self {
        Self {
            dx,
            next: 0,
            field: AggregatedField {
                raw: Array2::zeros((point_count, file_count)),
                normalized: Array2::zeros((point_count, file_count)),
            },
            series: DerivedSeries {
                energy: Vec::with_capacity(file_count),
                peak_power: Vec::with_capacity(file_count),
            },
        }
    }

    pub fn point_count(&self) -> usize {
        self.field.raw.nrows()
    }

    pub fn file_count(&self) -> usize {
        self.field.raw.ncols()
    }

    /// Reduce one slice and store it in the next column
    ///
    /// # Errors
    /// * `AccumulateError::ShapeMismatch` - slice length differs from the probe
    /// * `AccumulateError::Overflow` - more slices than probed files
    pub fn push(&mut self, values: &[f64]) -> Result<(), AccumulateError> {
        if self.next >= self.file_count() {
            return Err(AccumulateError::Overflow(self.file_count()));
        }
        if values.len() != self.point_count() {
            return Err(AccumulateError::ShapeMismatch {
                index: self.next,
                expected: self.point_count(),
                found: values.len(),
            });
        }

        let reduction = SliceReduction::from_values(values, self.dx);

        self.field
            .raw
            .column_mut(self.next)
            .assign(&ArrayView1::from(values));
        self.field
            .normalized
            .column_mut(self.next)
            .assign(&ArrayView1::from(reduction.normalized.as_slice()));
        self.series.energy.push(reduction.energy);
        self.series.peak_power.push(reduction.peak);

        self.next += 1;
        Ok(())
    }

    /// # Errors
    /// * `AccumulateError::Incomplete` - fewer slices pushed than probed
    pub fn finish(self) -> Result<(AggregatedField, DerivedSeries), AccumulateError> {
        if self.next != self.file_count() {
            return Err(AccumulateError::Incomplete {
                expected: self.file_count(),
                received: self.next,
            });
        }
        Ok((self.field, self.series))
    }
}

/// Read `field` from every slice, in order, and stack it
///
/// Each dump is opened, read and closed before the next one.
pub fn aggregate_time_slices(
    slices: &[TimeSlice],
    field: &str,
    extent: &SpatialExtent,
) -> Result<(AggregatedField, DerivedSeries), AccumulateError> {
    let mut acc = Accumulator::new(extent.point_count, slices.len(), extent.step_size());

    for slice in slices {
        let file = File::open(&slice.path)?;
        let values = file.dataset(field)?.read_raw::<f64>()?;
        drop(file);

        debug!("Read {} points from {}", values.len(), slice.file_name());
        acc.push(&values)?;
    }

    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_accumulate_columns() {
        let mut acc = Accumulator::new(3, 3, 1.0);
        acc.push(&[0.0, 2.0, 0.0]).unwrap();
        acc.push(&[0.0, 4.0, 0.0]).unwrap();
        acc.push(&[0.0, 0.0, 0.0]).unwrap();

        let (field, series) = acc.finish().unwrap();

        assert_eq!(
            field.raw,
            array![[0.0, 0.0, 0.0], [2.0, 4.0, 0.0], [0.0, 0.0, 0.0]]
        );
        assert_eq!(
            field.normalized,
            array![[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 0.0, 0.0]]
        );
        assert_eq!(series.energy, vec![2.0, 4.0, 0.0]);
        assert_eq!(series.peak_power, vec![2.0, 4.0, 0.0]);
    }

    #[test]
    fn test_zero_slice_normalized_equals_raw() {
        let mut acc = Accumulator::new(2, 1, 1.0);
        acc.push(&[0.0, 0.0]).unwrap();
        let (field, _) = acc.finish().unwrap();

        assert_eq!(field.raw.column(0), field.normalized.column(0));
    }

    #[test]
    fn test_shape_mismatch() {
        let mut acc = Accumulator::new(3, 2, 1.0);
        acc.push(&[1.0, 2.0, 3.0]).unwrap();

        let err = acc.push(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            AccumulateError::ShapeMismatch { index: 1, expected: 3, found: 2 }
        ));
    }

    #[test]
    fn test_overflow_and_incomplete() {
        let mut acc = Accumulator::new(1, 1, 1.0);
        acc.push(&[1.0]).unwrap();
        assert!(matches!(acc.push(&[1.0]), Err(AccumulateError::Overflow(1))));

        let short = Accumulator::new(1, 2, 1.0);
        assert!(matches!(
            short.finish(),
            Err(AccumulateError::Incomplete { expected: 2, received: 0 })
        ));
    }
}
