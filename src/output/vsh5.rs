//! Combined VizSchema (`.vsh5`) writer.
//!
//! `OutputDocument::layout` decides which nodes exist and what they carry;
//! `Vsh5Writer` only turns that layout into HDF5 objects. The output file
//! is owned by the writer; `close` flushes it, and an early return drops
//! the handle.

use super::provenance::copy_run_info;
use super::schema::{time_marker, variable, vs_vars, zonal_cells, AttrSet, UniformMesh};
use crate::aggregator::{AggregatedField, DerivedSeries};
use crate::input::{SpatialExtent, TimeSliceInfo};
use crate::utils::config::{
    ENERGY_DATASET, ENERGY_LABELS, GRID_SCALED, GRID_SCALED_LABELS, GRID_SI, GRID_SI_LABELS,
    PEAK_POWER_DATASET, SERIES_LABEL, TIME_GROUP, TIME_SERIES_MESH, Z_SERIES_MESH,
};
use crate::utils::error::OutputError;
use crate::utils::hdf5_values::{write_attr, write_dataset, TypedBuffer, Values};
use hdf5::{File, Location};
use log::{debug, info};
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// What a node holds besides its attributes
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Dataset(TypedBuffer),
}

/// One root-level node of the combined file
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub attrs: AttrSet,
}

impl Node {
    fn group(name: impl Into<String>, attrs: AttrSet) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Group,
            attrs,
        }
    }

    fn dataset(name: impl Into<String>, data: TypedBuffer, attrs: AttrSet) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Dataset(data),
            attrs,
        }
    }
}

/// Everything the combined file is built from
#[derive(Debug, Clone)]
pub struct OutputDocument {
    pub field_name: String,
    pub info: TimeSliceInfo,
    pub extent: SpatialExtent,
    pub field: AggregatedField,
    pub series: DerivedSeries,
}

impl OutputDocument {
    /// Root-level nodes in write order
    ///
    /// `gridZScaled` and the `<field>ZZ2` alias that depends on it only
    /// appear when zbar was found on both the first and last dump.
    pub fn layout(&self) -> Vec<Node> {
        let field = &self.field_name;
        let time_cells = zonal_cells(self.info.file_count);
        let grid_cells = [zonal_cells(self.extent.point_count), time_cells];
        let zbar = self.info.zbar_bounds();

        let mut nodes = vec![Node::group(
            GRID_SI,
            UniformMesh::grid_2d(
                [self.extent.lower, self.info.min_time],
                [self.extent.upper, self.info.max_time],
                grid_cells,
                GRID_SI_LABELS,
            )
            .attributes(),
        )];

        if let Some((min_zbar, max_zbar)) = zbar {
            nodes.push(Node::group(
                GRID_SCALED,
                UniformMesh::grid_2d(
                    [self.extent.lower, min_zbar],
                    [self.extent.upper, max_zbar],
                    grid_cells,
                    GRID_SCALED_LABELS,
                )
                .attributes(),
            ));
        }

        for (suffix, data) in [("_SI", &self.field.raw), ("_SI_Norm", &self.field.normalized)] {
            nodes.push(Node::dataset(
                format!("{field}{suffix}"),
                stack_buffer(data),
                variable(GRID_SI, Some(TIME_GROUP), None),
            ));
        }

        nodes.push(Node::group(TIME_GROUP, time_marker()));

        nodes.push(Node::dataset(
            ENERGY_DATASET,
            TypedBuffer::vector(Values::Float(self.series.energy.clone())),
            variable(TIME_SERIES_MESH, None, Some(ENERGY_LABELS)),
        ));
        nodes.push(Node::dataset(
            PEAK_POWER_DATASET,
            TypedBuffer::vector(Values::Float(self.series.peak_power.clone())),
            variable(Z_SERIES_MESH, None, None),
        ));

        let integral_alias = format!("{field}_integralz");
        let peak_alias = format!("{field}_peakz");
        nodes.push(Node::group(
            integral_alias.as_str(),
            vs_vars(Z_SERIES_MESH, &[(integral_alias.as_str(), ENERGY_DATASET)]),
        ));
        nodes.push(Node::group(
            peak_alias.as_str(),
            vs_vars(Z_SERIES_MESH, &[(peak_alias.as_str(), PEAK_POWER_DATASET)]),
        ));

        nodes.push(Node::group(
            TIME_SERIES_MESH,
            UniformMesh::series(
                Some((self.info.min_time, self.info.max_time)),
                time_cells,
                SERIES_LABEL,
            )
            .attributes(),
        ));
        nodes.push(Node::group(
            Z_SERIES_MESH,
            UniformMesh::series(zbar, time_cells, SERIES_LABEL).attributes(),
        ));

        if zbar.is_some() {
            let scaled_alias = format!("{field}Scaled");
            let scaled_target = format!("{field}_SI");
            nodes.push(Node::group(
                format!("{field}ZZ2"),
                vs_vars(GRID_SCALED, &[(scaled_alias.as_str(), scaled_target.as_str())]),
            ));
        }

        nodes
    }
}

/// Row-major `[point, step]` buffer for a stacked field
fn stack_buffer(data: &Array2<f64>) -> TypedBuffer {
    TypedBuffer {
        shape: data.shape().to_vec(),
        values: Values::Float(data.iter().copied().collect()),
    }
}

/// Owner of the output file handle
pub struct Vsh5Writer {
    file: File,
    path: PathBuf,
}

impl Vsh5Writer {
    /// Create (truncate) the combined file
    ///
    /// # Errors
    /// * `OutputError::InvalidPath` - empty path, a directory, or parent cannot be created
    /// * `OutputError::Hdf5` - HDF5 cannot create the file
    pub fn create(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let path = path.as_ref();

        info!("Writing combined file to: {}", path.display());
        super::json::validate_output_path(path)?;
        super::json::ensure_parent_dir(path)?;

        let file = File::create(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every node of `document`
    pub fn write_document(&self, document: &OutputDocument) -> Result<(), OutputError> {
        for node in document.layout() {
            self.write_node(&node)?;
        }
        Ok(())
    }

    pub fn write_node(&self, node: &Node) -> Result<(), OutputError> {
        debug!("Creating node /{}", node.name);
        match &node.kind {
            NodeKind::Group => {
                let group = self.file.create_group(&node.name)?;
                write_attr_set(&group, &node.attrs)?;
            }
            NodeKind::Dataset(data) => {
                write_dataset(&self.file, &node.name, data)?;
                let dataset = self.file.dataset(&node.name)?;
                write_attr_set(&dataset, &node.attrs)?;
            }
        }
        Ok(())
    }

    /// Copy `runInfo` from `source` into the output root
    pub fn copy_run_info(&self, source: &Path) -> Result<usize, OutputError> {
        copy_run_info(source, &self.file)
    }

    /// Flush and close the file
    pub fn close(self) -> Result<PathBuf, OutputError> {
        self.file.close()?;
        Ok(self.path)
    }
}

fn write_attr_set(loc: &Location, attrs: &AttrSet) -> Result<(), OutputError> {
    for (name, value) in attrs {
        write_attr(loc, name, &value.to_buffer())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn document(min_zbar: Option<f64>, max_zbar: Option<f64>) -> OutputDocument {
        OutputDocument {
            field_name: "power".to_string(),
            info: TimeSliceInfo {
                file_count: 2,
                min_time: 0.0,
                max_time: 1.0,
                min_zbar,
                max_zbar,
            },
            extent: SpatialExtent {
                point_count: 2,
                lower: 0.0,
                upper: 2.0,
            },
            field: AggregatedField {
                raw: array![[1.0, 2.0], [3.0, 4.0]],
                normalized: array![[1.0 / 3.0, 0.5], [1.0, 1.0]],
            },
            series: DerivedSeries {
                energy: vec![2.0, 3.0],
                peak_power: vec![3.0, 4.0],
            },
        }
    }

    fn names(doc: &OutputDocument) -> Vec<String> {
        doc.layout().into_iter().map(|n| n.name).collect()
    }

    #[test]
    fn test_layout_with_zbar() {
        let names = names(&document(Some(0.5), Some(1.5)));

        assert_eq!(
            names,
            vec![
                "gridZ_SI",
                "gridZScaled",
                "power_SI",
                "power_SI_Norm",
                "time",
                "Energy",
                "PeakPower",
                "power_integralz",
                "power_peakz",
                "timeSeries",
                "zSeries",
                "powerZZ2",
            ]
        );
    }

    #[test]
    fn test_layout_without_zbar_skips_scaled_grid() {
        let names = names(&document(Some(0.5), None));

        assert!(!names.iter().any(|n| n == "gridZScaled"));
        assert!(!names.iter().any(|n| n == "powerZZ2"));
        assert!(names.iter().any(|n| n == "zSeries"));
    }

    #[test]
    fn test_stack_buffer_is_row_major() {
        let buffer = stack_buffer(&array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(buffer.shape, vec![2, 2]);
        assert_eq!(buffer.values, Values::Float(vec![1.0, 2.0, 3.0, 4.0]));
    }
}
