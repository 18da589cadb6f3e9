//! Probe the first and last dumps for series-wide metadata.
//!
//! Only two files are opened here. Time is required; zbar is optional and
//! its absence is carried as `None` all the way to the writer.

use super::discovery::TimeSlice;
use crate::utils::config::{
    GLOBAL_LIMITS_GROUP, LOWER_BOUNDS_ATTR, TIME_ATTR, TIME_GROUP, UPPER_BOUNDS_ATTR, ZBAR_ATTR,
};
use crate::utils::error::ProbeError;
use hdf5::{File, Location};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Summary scalars taken from the first and last dump
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSliceInfo {
    pub file_count: usize,
    pub min_time: f64,
    pub max_time: f64,
    pub min_zbar: Option<f64>,
    pub max_zbar: Option<f64>,
}

impl TimeSliceInfo {
    /// Zbar range, only when both ends were recorded
    pub fn zbar_bounds(&self) -> Option<(f64, f64)> {
        self.min_zbar.zip(self.max_zbar)
    }
}

/// Longitudinal sampling of the field, taken from the first dump
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialExtent {
    pub point_count: usize,
    pub lower: f64,
    pub upper: f64,
}

impl SpatialExtent {
    /// Integration step: `(upper - lower) / point_count`
    pub fn step_size(&self) -> f64 {
        (self.upper - self.lower) / self.point_count as f64
    }
}

/// Read time (required) and zbar (optional) from the first and last dump
///
/// A zbar attribute that exists but cannot be read as a number counts as
/// absent.
///
/// # Errors
/// * `ProbeError::NoSlices` - empty input list
/// * `ProbeError::MissingAttribute` - no `vsTime` on the `time` group
/// * `ProbeError::Hdf5` - file cannot be opened or read
pub fn probe_time_slices(slices: &[TimeSlice], field: &str) -> Result<TimeSliceInfo, ProbeError> {
    let (first, last) = match (slices.first(), slices.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ProbeError::NoSlices),
    };

    let (min_time, min_zbar) = probe_one(&first.path, field)?;
    let (max_time, max_zbar) = probe_one(&last.path, field)?;

    Ok(TimeSliceInfo {
        file_count: slices.len(),
        min_time,
        max_time,
        min_zbar,
        max_zbar,
    })
}

/// Read the field length and the global limits from `first`
///
/// # Errors
/// * `ProbeError::EmptyField` - the field has no points
/// * `ProbeError::MissingAttribute` - bounds missing on `globalLimits`
pub fn probe_spatial_extent(first: &TimeSlice, field: &str) -> Result<SpatialExtent, ProbeError> {
    let file = File::open(&first.path)?;

    let point_count = file.dataset(field)?.shape().first().copied().unwrap_or(0);
    if point_count == 0 {
        return Err(ProbeError::EmptyField {
            file: first.path.clone(),
            field: field.to_string(),
        });
    }

    let limits = file.group(GLOBAL_LIMITS_GROUP)?;
    let lower = required_f64(&first.path, GLOBAL_LIMITS_GROUP, &limits, LOWER_BOUNDS_ATTR)?;
    let upper = required_f64(&first.path, GLOBAL_LIMITS_GROUP, &limits, UPPER_BOUNDS_ATTR)?;

    info!("length: {}", point_count);

    Ok(SpatialExtent {
        point_count,
        lower,
        upper,
    })
}

fn probe_one(path: &Path, field: &str) -> Result<(f64, Option<f64>), ProbeError> {
    info!("Checking {}", path.display());
    let file = File::open(path)?;

    let time_group = file.group(TIME_GROUP)?;
    let time = required_f64(path, TIME_GROUP, &time_group, TIME_ATTR)?;

    let dataset = file.dataset(field)?;
    let zbar = match optional_f64(&dataset, ZBAR_ATTR) {
        Ok(zbar) => zbar,
        Err(e) => {
            info!("unreadable {} in {}: {}", ZBAR_ATTR, path.display(), e);
            None
        }
    };
    if zbar.is_none() {
        info!("no {} data present in {}", ZBAR_ATTR, path.display());
    }

    Ok((time, zbar))
}

fn required_f64(path: &Path, node: &str, obj: &Location, attr: &str) -> Result<f64, ProbeError> {
    optional_f64(obj, attr)?.ok_or_else(|| ProbeError::MissingAttribute {
        file: path.to_path_buf(),
        node: node.to_string(),
        attr: attr.to_string(),
    })
}

/// First element of a numeric attribute; scalars and arrays both accepted
fn optional_f64(obj: &Location, attr: &str) -> Result<Option<f64>, ProbeError> {
    if !obj.attr_names()?.iter().any(|name| name == attr) {
        return Ok(None);
    }

    let values = obj.attr(attr)?.read_raw::<f64>()?;
    Ok(values.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zbar_bounds_requires_both_ends() {
        let mut info = TimeSliceInfo {
            file_count: 3,
            min_time: 0.0,
            max_time: 2.0,
            min_zbar: Some(1.0),
            max_zbar: Some(5.0),
        };
        assert_eq!(info.zbar_bounds(), Some((1.0, 5.0)));

        info.max_zbar = None;
        assert_eq!(info.zbar_bounds(), None);

        info.max_zbar = Some(5.0);
        info.min_zbar = None;
        assert_eq!(info.zbar_bounds(), None);
    }

    #[test]
    fn test_step_size_divides_by_point_count() {
        let extent = SpatialExtent {
            point_count: 3,
            lower: 0.0,
            upper: 3.0,
        };
        assert_eq!(extent.step_size(), 1.0);
    }

    #[test]
    fn test_probe_empty_list() {
        let err = probe_time_slices(&[], "power").unwrap_err();
        assert!(matches!(err, ProbeError::NoSlices));
    }
}
