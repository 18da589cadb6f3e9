//! Type-erased HDF5 values.
//!
//! VizSchema attributes are written by many tools with many storage types
//! (fixed or variable strings, 32/64-bit numbers, scalars or short arrays).
//! `TypedBuffer` widens whatever is on disk into one of four Rust shapes so it
//! can be inspected or copied without knowing the source type up front.

use crate::utils::error::OutputError;
use hdf5::types::{FixedAscii, FixedUnicode, H5Type, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Container, Group, Location};
use log::debug;
use std::str::FromStr;

/// Upper bound on fixed-length strings read back from disk
const MAX_FIXED_TEXT: usize = 4096;

/// Widened values of an attribute or dataset
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Float(Vec<f64>),
    Int(Vec<i64>),
    UInt(Vec<u64>),
    Text(Vec<String>),
}

impl Values {
    pub fn len(&self) -> usize {
        match self {
            Values::Float(v) => v.len(),
            Values::Int(v) => v.len(),
            Values::UInt(v) => v.len(),
            Values::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Values plus the dataspace they came from. An empty shape means scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedBuffer {
    pub shape: Vec<usize>,
    pub values: Values,
}

impl TypedBuffer {
    pub fn scalar(values: Values) -> Self {
        Self {
            shape: Vec::new(),
            values,
        }
    }

    pub fn vector(values: Values) -> Self {
        Self {
            shape: vec![values.len()],
            values,
        }
    }
}

/// Read any attribute or dataset into a `TypedBuffer`
///
/// Returns `Ok(None)` for storage types with no widened form
/// (compound, enum, references, nested arrays).
pub fn read_typed(container: &Container) -> hdf5::Result<Option<TypedBuffer>> {
    let shape = container.shape();
    let values = match container.dtype()?.to_descriptor()? {
        TypeDescriptor::Float(_) => Values::Float(container.read_raw::<f64>()?),
        TypeDescriptor::Integer(_) => Values::Int(container.read_raw::<i64>()?),
        TypeDescriptor::Unsigned(_) => Values::UInt(container.read_raw::<u64>()?),
        TypeDescriptor::VarLenUnicode => Values::Text(
            container
                .read_raw::<VarLenUnicode>()?
                .iter()
                .map(|s| s.as_str().to_owned())
                .collect(),
        ),
        TypeDescriptor::VarLenAscii => Values::Text(
            container
                .read_raw::<VarLenAscii>()?
                .iter()
                .map(|s| s.as_str().to_owned())
                .collect(),
        ),
        TypeDescriptor::FixedAscii(_) => Values::Text(
            container
                .read_raw::<FixedAscii<MAX_FIXED_TEXT>>()?
                .iter()
                .map(|s| s.as_str().to_owned())
                .collect(),
        ),
        TypeDescriptor::FixedUnicode(_) => Values::Text(
            container
                .read_raw::<FixedUnicode<MAX_FIXED_TEXT>>()?
                .iter()
                .map(|s| s.as_str().to_owned())
                .collect(),
        ),
        other => {
            debug!("No widened form for HDF5 type {:?}", other);
            return Ok(None);
        }
    };

    Ok(Some(TypedBuffer { shape, values }))
}

/// Write a buffer as an attribute on any HDF5 object
pub fn write_attr(loc: &Location, name: &str, buffer: &TypedBuffer) -> Result<(), OutputError> {
    match &buffer.values {
        Values::Float(v) => create_attr(loc, name, &buffer.shape, v)?,
        Values::Int(v) => create_attr(loc, name, &buffer.shape, v)?,
        Values::UInt(v) => create_attr(loc, name, &buffer.shape, v)?,
        Values::Text(v) => create_attr(loc, name, &buffer.shape, &to_unicode(v)?)?,
    }
    Ok(())
}

/// Write a buffer as a dataset inside `group`
pub fn write_dataset(group: &Group, name: &str, buffer: &TypedBuffer) -> Result<(), OutputError> {
    match &buffer.values {
        Values::Float(v) => create_dataset(group, name, &buffer.shape, v)?,
        Values::Int(v) => create_dataset(group, name, &buffer.shape, v)?,
        Values::UInt(v) => create_dataset(group, name, &buffer.shape, v)?,
        Values::Text(v) => create_dataset(group, name, &buffer.shape, &to_unicode(v)?)?,
    }
    Ok(())
}

/// Last path component of an HDF5 object name (`/runInfo/foo` -> `foo`)
pub fn leaf_name(full_name: &str) -> &str {
    full_name.rsplit('/').next().unwrap_or(full_name)
}

fn create_attr<T: H5Type>(loc: &Location, name: &str, shape: &[usize], data: &[T]) -> hdf5::Result<()> {
    if shape.is_empty() {
        if let Some(value) = data.first() {
            loc.new_attr::<T>().create(name)?.write_scalar(value)?;
        }
    } else {
        let attr = loc.new_attr::<T>().shape(shape.to_vec()).create(name)?;
        attr.write_raw(data)?;
    }
    Ok(())
}

fn create_dataset<T: H5Type>(group: &Group, name: &str, shape: &[usize], data: &[T]) -> hdf5::Result<()> {
    if shape.is_empty() {
        if let Some(value) = data.first() {
            group.new_dataset::<T>().shape(()).create(name)?.write_scalar(value)?;
        }
    } else {
        let dataset = group.new_dataset::<T>().shape(shape.to_vec()).create(name)?;
        dataset.write_raw(data)?;
    }
    Ok(())
}

/// Text is always written variable-length, whatever it was read as
fn to_unicode(values: &[String]) -> Result<Vec<VarLenUnicode>, OutputError> {
    values
        .iter()
        .map(|s| VarLenUnicode::from_str(s).map_err(|e| OutputError::InvalidText(format!("{s:?}: {e}"))))
        .collect()
}
