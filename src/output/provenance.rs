//! Copy the `runInfo` provenance group into the combined file.

use crate::utils::config::RUN_INFO_GROUP;
use crate::utils::error::OutputError;
use crate::utils::hdf5_values::{leaf_name, read_typed, write_attr, write_dataset};
use hdf5::{File, Group, Location};
use log::{debug, info, warn};
use std::path::Path;

/// Recursively copy `/runInfo` from `source` into `dest_root`
///
/// Returns the number of attributes and datasets copied.
///
/// # Errors
/// * `OutputError::MissingNode` - `source` has no `runInfo` group
/// * `OutputError::Hdf5` - read or write failure
pub fn copy_run_info(source: &Path, dest_root: &Group) -> Result<usize, OutputError> {
    let file = File::open(source)?;

    if !file.member_names()?.iter().any(|name| name == RUN_INFO_GROUP) {
        return Err(OutputError::MissingNode {
            file: source.to_path_buf(),
            node: RUN_INFO_GROUP.to_string(),
        });
    }

    let src = file.group(RUN_INFO_GROUP)?;
    let dst = dest_root.create_group(RUN_INFO_GROUP)?;
    let copied = copy_group(&src, &dst)?;

    info!("Copied {} runInfo entries from {}", copied, source.display());
    Ok(copied)
}

fn copy_group(src: &Group, dst: &Group) -> Result<usize, OutputError> {
    let mut copied = copy_attrs(src, dst)?;

    for dataset in src.datasets()? {
        let full_name = dataset.name();
        let name = leaf_name(&full_name);
        match read_typed(&dataset)? {
            Some(buffer) => {
                write_dataset(dst, name, &buffer)?;
                copied += 1 + copy_attrs(&dataset, &dst.dataset(name)?)?;
            }
            None => warn!("Skipping runInfo dataset {} (unsupported type)", full_name),
        }
    }

    for child in src.groups()? {
        let full_name = child.name();
        debug!("Descending into {}", full_name);
        let target = dst.create_group(leaf_name(&full_name))?;
        copied += copy_group(&child, &target)?;
    }

    Ok(copied)
}

fn copy_attrs(src: &Location, dst: &Location) -> Result<usize, OutputError> {
    let mut copied = 0;
    for name in src.attr_names()? {
        match read_typed(&src.attr(&name)?)? {
            Some(buffer) => {
                write_attr(dst, &name, &buffer)?;
                copied += 1;
            }
            None => warn!("Skipping attribute {} on {} (unsupported type)", name, src.name()),
        }
    }
    Ok(copied)
}
