//! Locate and order the per-step dumps of one series.
//!
//! A dump is named `<base>_<step>.h5`. The step is the token between the
//! last `_` and the extension and decides processing order.

use crate::utils::config::INPUT_EXTENSION;
use crate::utils::error::DiscoveryError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// One input dump and its step index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlice {
    pub step: i64,
    pub path: PathBuf,
}

impl TimeSlice {
    /// File name for logging
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// List every `<base_name>_*.h5` in `dir`, ascending by step
///
/// # Errors
/// * `DiscoveryError::NoFiles` - nothing matched
/// * `DiscoveryError::InvalidStep` - a matching name has a non-integer step
/// * `DiscoveryError::DuplicateStep` - two files share a step
pub fn discover_time_slices(dir: &Path, base_name: &str) -> Result<Vec<TimeSlice>, DiscoveryError> {
    debug!("Scanning {} for '{}_*.{}'", dir.display(), base_name, INPUT_EXTENSION);

    let mut slices = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !matches_series(&name, base_name) {
            continue;
        }

        // Follows symlinks; a dangling link to a dump is an error
        if !fs::metadata(entry.path())?.is_file() {
            continue;
        }

        let step = parse_step_index(&name).ok_or_else(|| DiscoveryError::InvalidStep(name.clone()))?;
        slices.push(TimeSlice {
            step,
            path: entry.path(),
        });
    }

    if slices.is_empty() {
        return Err(DiscoveryError::NoFiles {
            base_name: base_name.to_string(),
            dir: dir.to_path_buf(),
        });
    }

    order_time_slices(slices)
}

/// Sort by step and reject repeated steps
pub fn order_time_slices(mut slices: Vec<TimeSlice>) -> Result<Vec<TimeSlice>, DiscoveryError> {
    slices.sort_by_key(|s| s.step);

    if let Some(pair) = slices.windows(2).find(|w| w[0].step == w[1].step) {
        return Err(DiscoveryError::DuplicateStep {
            step: pair[0].step,
            first: pair[0].file_name(),
            second: pair[1].file_name(),
        });
    }

    Ok(slices)
}

/// Step index of `<anything>_<step>.h5`; negative steps are allowed
pub fn parse_step_index(file_name: &str) -> Option<i64> {
    let stem = file_name.strip_suffix(&format!(".{INPUT_EXTENSION}"))?;
    let (_, token) = stem.rsplit_once('_')?;
    token.parse().ok()
}

/// Same shape as the glob `<base>_*.h5`
fn matches_series(file_name: &str, base_name: &str) -> bool {
    file_name
        .strip_prefix(base_name)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(&format!(".{INPUT_EXTENSION}")))
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step_index() {
        assert_eq!(parse_step_index("a_b_c_tag_42.h5"), Some(42));
        assert_eq!(parse_step_index("a_b_c_tag_0.h5"), Some(0));
        assert_eq!(parse_step_index("a_b_c_tag_x.h5"), None);
        assert_eq!(parse_step_index("a_b_c_tag_42.vsh5"), None);
        assert_eq!(parse_step_index("nounderscore.h5"), None);
        assert_eq!(parse_step_index("a_b_c_tag_-1.h5"), Some(-1));
    }

    #[test]
    fn test_matches_series() {
        assert!(matches_series("run_power_0_int_7.h5", "run_power_0_int"));
        assert!(!matches_series("run_power_0_int_all.vsh5", "run_power_0_int"));
        assert!(!matches_series("other_power_0_int_7.h5", "run_power_0_int"));
        assert!(!matches_series("run_power_0_int.h5", "run_power_0_int"));
    }

    #[test]
    fn test_order_rejects_duplicates() {
        let slices = vec![
            TimeSlice { step: 3, path: PathBuf::from("a_3.h5") },
            TimeSlice { step: 3, path: PathBuf::from("a_03.h5") },
        ];

        let err = order_time_slices(slices).unwrap_err();
        assert!(matches!(err, DiscoveryError::DuplicateStep { step: 3, .. }));
    }
}
