//! Stored value payloads.
//!
//! Validation only ever reads small control values (indices, shapes,
//! permutations, method strings), so payloads are kept as plain vectors.
//! Large data fields are modelled with an empty payload; reading from one
//! is an error rather than a silent default.

use serde::{Deserialize, Serialize};

use crate::datatype::{DataType, TypeClass};
use crate::error::StoreError;

/// Values held by a dataset or attribute, matching its datatype class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValues {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Str(Vec<String>),
}

impl DataValues {
    /// Number of stored values.
    pub fn len(&self) -> usize {
        match self {
            DataValues::Int(v) => v.len(),
            DataValues::Float(v) => v.len(),
            DataValues::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An empty payload of the variant matching `datatype`.
    pub fn empty_for(datatype: &DataType) -> Self {
        match datatype.class() {
            TypeClass::Integer => DataValues::Int(Vec::new()),
            TypeClass::Float => DataValues::Float(Vec::new()),
            TypeClass::String => DataValues::Str(Vec::new()),
        }
    }
}

// Shared read logic for datasets and attributes. `name` is the field name
// used in error messages.

pub(crate) fn require_scalar(shape: &[u64], name: &str) -> Result<(), StoreError> {
    if shape.is_empty() {
        Ok(())
    } else {
        Err(StoreError::NotScalar(name.to_string()))
    }
}

pub(crate) fn require_1d(shape: &[u64], name: &str) -> Result<u64, StoreError> {
    if shape.len() == 1 {
        Ok(shape[0])
    } else {
        Err(StoreError::Not1Dimensional(name.to_string()))
    }
}

pub(crate) fn string_values<'a>(
    datatype: &DataType,
    values: &'a DataValues,
    name: &str,
) -> Result<&'a [String], StoreError> {
    if !datatype.is_string() {
        return Err(StoreError::NotString(name.to_string()));
    }
    match values {
        DataValues::Str(v) => Ok(v),
        _ => Err(StoreError::MissingValues(name.to_string())),
    }
}

pub(crate) fn int_values<'a>(
    datatype: &DataType,
    values: &'a DataValues,
    name: &str,
) -> Result<&'a [i64], StoreError> {
    if datatype.class() != TypeClass::Integer {
        return Err(StoreError::NotInteger(name.to_string()));
    }
    match values {
        DataValues::Int(v) => Ok(v),
        _ => Err(StoreError::MissingValues(name.to_string())),
    }
}

pub(crate) fn float_values<'a>(
    datatype: &DataType,
    values: &'a DataValues,
    name: &str,
) -> Result<&'a [f64], StoreError> {
    match (datatype.class(), values) {
        (TypeClass::Float, DataValues::Float(v)) => Ok(v),
        (TypeClass::Float, _) => Err(StoreError::MissingValues(name.to_string())),
        _ => Err(StoreError::NotFloat(name.to_string())),
    }
}

pub(crate) fn scalar_string(
    datatype: &DataType,
    shape: &[u64],
    values: &DataValues,
    name: &str,
) -> Result<String, StoreError> {
    require_scalar(shape, name)?;
    let strings = string_values(datatype, values, name)?;
    strings
        .first()
        .cloned()
        .ok_or_else(|| StoreError::MissingValues(name.to_string()))
}

pub(crate) fn scalar_i64(
    datatype: &DataType,
    shape: &[u64],
    values: &DataValues,
    name: &str,
) -> Result<i64, StoreError> {
    require_scalar(shape, name)?;
    let ints = int_values(datatype, values, name)?;
    ints.first()
        .copied()
        .ok_or_else(|| StoreError::MissingValues(name.to_string()))
}

pub(crate) fn scalar_u64(
    datatype: &DataType,
    shape: &[u64],
    values: &DataValues,
    name: &str,
) -> Result<u64, StoreError> {
    let raw = scalar_i64(datatype, shape, values, name)?;
    u64::try_from(raw).map_err(|_| StoreError::NegativeValue(name.to_string()))
}

pub(crate) fn scalar_f64(
    datatype: &DataType,
    shape: &[u64],
    values: &DataValues,
    name: &str,
) -> Result<f64, StoreError> {
    require_scalar(shape, name)?;
    let floats = float_values(datatype, values, name)?;
    floats
        .first()
        .copied()
        .ok_or_else(|| StoreError::MissingValues(name.to_string()))
}
