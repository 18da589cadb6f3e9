//! VizSchema descriptor definitions.
//!
//! Every group and dataset in the combined file carries a small attribute
//! set that tells VizSchema readers what it is (`vsType`), which mesh it
//! lives on (`vsMesh`) and, for meshes, the bounds and zonal cell counts.
//! The builders here are pure so the exact attribute sets can be tested
//! without touching HDF5.
//!
//! Text attributes are stored as variable-length UTF-8 strings. VisIt's
//! VizSchema plugin and h5py read these; readers that only accept
//! fixed-length strings will not see the descriptors.

use crate::utils::hdf5_values::{TypedBuffer, Values};

pub const VS_TYPE: &str = "vsType";
pub const VS_KIND: &str = "vsKind";
pub const VS_MESH: &str = "vsMesh";
pub const VS_CENTERING: &str = "vsCentering";
pub const VS_START_CELL: &str = "vsStartCell";
pub const VS_NUM_CELLS: &str = "vsNumCells";
pub const VS_LOWER_BOUNDS: &str = "vsLowerBounds";
pub const VS_UPPER_BOUNDS: &str = "vsUpperBounds";
pub const VS_AXIS_LABELS: &str = "vsAxisLabels";
pub const VS_TIME_GROUP: &str = "vsTimeGroup";
pub const VS_TIME: &str = "vsTime";
pub const VS_STEP: &str = "vsStep";

/// A single VizSchema attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum VsAttr {
    Text(String),
    Float(f64),
    Floats(Vec<f64>),
    Int(i64),
    Ints(Vec<i64>),
}

impl VsAttr {
    pub fn to_buffer(&self) -> TypedBuffer {
        match self {
            VsAttr::Text(s) => TypedBuffer::scalar(Values::Text(vec![s.clone()])),
            VsAttr::Float(v) => TypedBuffer::scalar(Values::Float(vec![*v])),
            VsAttr::Floats(v) => TypedBuffer::vector(Values::Float(v.clone())),
            VsAttr::Int(v) => TypedBuffer::scalar(Values::Int(vec![*v])),
            VsAttr::Ints(v) => TypedBuffer::vector(Values::Int(v.clone())),
        }
    }
}

impl From<&str> for VsAttr {
    fn from(s: &str) -> Self {
        VsAttr::Text(s.to_string())
    }
}

/// Ordered attribute list for one node
pub type AttrSet = Vec<(String, VsAttr)>;

/// Look up an attribute by name
pub fn find_attr<'a>(attrs: &'a AttrSet, name: &str) -> Option<&'a VsAttr> {
    attrs.iter().find(|(key, _)| key == name).map(|(_, value)| value)
}

/// Zonal convention: N points span N-1 cells
pub fn zonal_cells(points: usize) -> i64 {
    points.saturating_sub(1) as i64
}

/// Uniform structured mesh
///
/// One-dimensional meshes are written with scalar attributes, higher ranks
/// with arrays, matching what VizSchema readers accept for each.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformMesh {
    /// `(lower, upper)`; `None` leaves the bounds attributes off
    pub bounds: Option<(Vec<f64>, Vec<f64>)>,
    pub num_cells: Vec<i64>,
    pub axis_labels: String,
    pub centering: Option<String>,
}

impl UniformMesh {
    /// Nodal 2D grid
    pub fn grid_2d(lower: [f64; 2], upper: [f64; 2], num_cells: [i64; 2], axis_labels: &str) -> Self {
        Self {
            bounds: Some((lower.to_vec(), upper.to_vec())),
            num_cells: num_cells.to_vec(),
            axis_labels: axis_labels.to_string(),
            centering: Some("nodal".to_string()),
        }
    }

    /// 1D series mesh
    pub fn series(bounds: Option<(f64, f64)>, num_cells: i64, axis_label: &str) -> Self {
        Self {
            bounds: bounds.map(|(lo, hi)| (vec![lo], vec![hi])),
            num_cells: vec![num_cells],
            axis_labels: axis_label.to_string(),
            centering: None,
        }
    }

    pub fn rank(&self) -> usize {
        self.num_cells.len()
    }

    pub fn attributes(&self) -> AttrSet {
        let scalar = self.rank() == 1;
        let floats = |v: &[f64]| {
            if scalar {
                VsAttr::Float(v[0])
            } else {
                VsAttr::Floats(v.to_vec())
            }
        };
        let ints = |v: &[i64]| {
            if scalar {
                VsAttr::Int(v[0])
            } else {
                VsAttr::Ints(v.to_vec())
            }
        };

        let mut attrs: AttrSet = vec![
            (VS_KIND.into(), "uniform".into()),
            (VS_TYPE.into(), "mesh".into()),
        ];
        if let Some(centering) = &self.centering {
            attrs.push((VS_CENTERING.into(), VsAttr::Text(centering.clone())));
        }
        attrs.push((VS_START_CELL.into(), ints(vec![0; self.rank()].as_slice())));
        attrs.push((VS_NUM_CELLS.into(), ints(self.num_cells.as_slice())));
        if let Some((lower, upper)) = &self.bounds {
            attrs.push((VS_LOWER_BOUNDS.into(), floats(lower.as_slice())));
            attrs.push((VS_UPPER_BOUNDS.into(), floats(upper.as_slice())));
        }
        attrs.push((VS_AXIS_LABELS.into(), VsAttr::Text(self.axis_labels.clone())));
        attrs
    }
}

/// Dataset living on `mesh`
pub fn variable(mesh: &str, time_group: Option<&str>, axis_labels: Option<&str>) -> AttrSet {
    let mut attrs: AttrSet = vec![
        (VS_TYPE.into(), "variable".into()),
        (VS_MESH.into(), mesh.into()),
    ];
    if let Some(group) = time_group {
        attrs.push((VS_TIME_GROUP.into(), group.into()));
    }
    if let Some(labels) = axis_labels {
        attrs.push((VS_AXIS_LABELS.into(), labels.into()));
    }
    attrs
}

/// Time marker group. The values are fixed at zero.
pub fn time_marker() -> AttrSet {
    vec![
        (VS_TYPE.into(), "time".into()),
        (VS_TIME.into(), VsAttr::Float(0.0)),
        (VS_STEP.into(), VsAttr::Int(0)),
    ]
}

/// `vsVars` group: named aliases onto existing datasets, on `mesh`
pub fn vs_vars(mesh: &str, aliases: &[(&str, &str)]) -> AttrSet {
    let mut attrs: AttrSet = vec![
        (VS_TYPE.into(), "vsVars".into()),
        (VS_MESH.into(), mesh.into()),
    ];
    attrs.extend(
        aliases
            .iter()
            .map(|(alias, target)| (alias.to_string(), VsAttr::from(*target))),
    );
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zonal_cells() {
        assert_eq!(zonal_cells(3), 2);
        assert_eq!(zonal_cells(1), 0);
        assert_eq!(zonal_cells(0), 0);
    }

    #[test]
    fn test_grid_2d_attributes() {
        let mesh = UniformMesh::grid_2d([0.0, 1.0], [3.0, 2.0], [2, 4], "ct-z,z");
        let attrs = mesh.attributes();

        assert_eq!(find_attr(&attrs, VS_TYPE), Some(&VsAttr::from("mesh")));
        assert_eq!(find_attr(&attrs, VS_KIND), Some(&VsAttr::from("uniform")));
        assert_eq!(find_attr(&attrs, VS_CENTERING), Some(&VsAttr::from("nodal")));
        assert_eq!(find_attr(&attrs, VS_START_CELL), Some(&VsAttr::Ints(vec![0, 0])));
        assert_eq!(find_attr(&attrs, VS_NUM_CELLS), Some(&VsAttr::Ints(vec![2, 4])));
        assert_eq!(find_attr(&attrs, VS_LOWER_BOUNDS), Some(&VsAttr::Floats(vec![0.0, 1.0])));
        assert_eq!(find_attr(&attrs, VS_UPPER_BOUNDS), Some(&VsAttr::Floats(vec![3.0, 2.0])));
        assert_eq!(find_attr(&attrs, VS_AXIS_LABELS), Some(&VsAttr::from("ct-z,z")));
    }

    #[test]
    fn test_series_uses_scalars() {
        let attrs = UniformMesh::series(Some((0.0, 2.0)), 2, "zbar").attributes();

        assert_eq!(find_attr(&attrs, VS_NUM_CELLS), Some(&VsAttr::Int(2)));
        assert_eq!(find_attr(&attrs, VS_START_CELL), Some(&VsAttr::Int(0)));
        assert_eq!(find_attr(&attrs, VS_LOWER_BOUNDS), Some(&VsAttr::Float(0.0)));
        assert_eq!(find_attr(&attrs, VS_UPPER_BOUNDS), Some(&VsAttr::Float(2.0)));
        assert!(find_attr(&attrs, VS_CENTERING).is_none());
    }

    #[test]
    fn test_series_without_bounds() {
        let attrs = UniformMesh::series(None, 5, "zbar").attributes();

        assert_eq!(find_attr(&attrs, VS_NUM_CELLS), Some(&VsAttr::Int(5)));
        assert!(find_attr(&attrs, VS_LOWER_BOUNDS).is_none());
        assert!(find_attr(&attrs, VS_UPPER_BOUNDS).is_none());
    }

    #[test]
    fn test_vs_vars_aliases() {
        let attrs = vs_vars("zSeries", &[("power_integralz", "Energy")]);

        assert_eq!(
            attrs,
            vec![
                (VS_TYPE.to_string(), VsAttr::from("vsVars")),
                (VS_MESH.to_string(), VsAttr::from("zSeries")),
                ("power_integralz".to_string(), VsAttr::from("Energy")),
            ]
        );
    }

    #[test]
    fn test_time_marker_is_placeholder() {
        let attrs = time_marker();
        assert_eq!(find_attr(&attrs, VS_TIME), Some(&VsAttr::Float(0.0)));
        assert_eq!(find_attr(&attrs, VS_STEP), Some(&VsAttr::Int(0)));
    }
}
