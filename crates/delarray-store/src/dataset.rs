//! Typed, shaped data fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::datatype::DataType;
use crate::error::StoreError;
use crate::values::{self, DataValues};

/// A dataset: a typed, multidimensional field inside a group.
///
/// Validation never materializes bulk data, so payloads may legitimately be
/// empty (see [`Dataset::empty`]) as long as only the shape and datatype are
/// consulted. Control fields (indices, shapes, permutations) carry their
/// actual values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub datatype: DataType,
    pub shape: Vec<u64>,
    pub values: DataValues,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, Attribute>,
}

impl Dataset {
    pub fn new(datatype: DataType, shape: Vec<u64>, values: DataValues) -> Self {
        Self {
            datatype,
            shape,
            values,
            attributes: IndexMap::new(),
        }
    }

    /// A dataset whose contents are never read, only its shape and datatype.
    pub fn empty(datatype: DataType, shape: Vec<u64>) -> Self {
        let values = DataValues::empty_for(&datatype);
        Self::new(datatype, shape, values)
    }

    /// A scalar string dataset.
    pub fn scalar_string(value: impl Into<String>) -> Self {
        Self::new(
            DataType::String,
            Vec::new(),
            DataValues::Str(vec![value.into()]),
        )
    }

    /// A scalar integer dataset with the given stored datatype.
    pub fn scalar_int(value: i64, datatype: DataType) -> Self {
        Self::new(datatype, Vec::new(), DataValues::Int(vec![value]))
    }

    /// A scalar float dataset with the given stored datatype.
    pub fn scalar_float(value: f64, datatype: DataType) -> Self {
        Self::new(datatype, Vec::new(), DataValues::Float(vec![value]))
    }

    /// A 1-dimensional integer dataset.
    pub fn vector_int(values: Vec<i64>, datatype: DataType) -> Self {
        let shape = vec![values.len() as u64];
        Self::new(datatype, shape, DataValues::Int(values))
    }

    /// A 1-dimensional float dataset.
    pub fn vector_float(values: Vec<f64>, datatype: DataType) -> Self {
        let shape = vec![values.len() as u64];
        Self::new(datatype, shape, DataValues::Float(values))
    }

    /// A 1-dimensional string dataset.
    pub fn vector_string(values: Vec<String>) -> Self {
        let shape = vec![values.len() as u64];
        Self::new(DataType::String, shape, DataValues::Str(values))
    }

    /// Builder-style attribute attachment.
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Extent of a 1-dimensional dataset; `name` is used in error messages.
    pub fn len_1d(&self, name: &str) -> Result<u64, StoreError> {
        values::require_1d(&self.shape, name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Result<&Attribute, StoreError> {
        self.attributes
            .get(name)
            .ok_or_else(|| StoreError::ExpectedAttribute(name.to_string()))
    }

    /// Reads a scalar string value; `name` is used in error messages.
    pub fn read_scalar_string(&self, name: &str) -> Result<String, StoreError> {
        values::scalar_string(&self.datatype, &self.shape, &self.values, name)
    }

    /// Reads a scalar integer value.
    pub fn read_scalar_i64(&self, name: &str) -> Result<i64, StoreError> {
        values::scalar_i64(&self.datatype, &self.shape, &self.values, name)
    }

    /// Reads a scalar integer value, rejecting negatives.
    pub fn read_scalar_u64(&self, name: &str) -> Result<u64, StoreError> {
        values::scalar_u64(&self.datatype, &self.shape, &self.values, name)
    }

    /// Reads a scalar float value.
    pub fn read_scalar_f64(&self, name: &str) -> Result<f64, StoreError> {
        values::scalar_f64(&self.datatype, &self.shape, &self.values, name)
    }

    /// Borrows the integer payload of a 1-dimensional dataset.
    pub fn read_i64_vec(&self, name: &str) -> Result<&[i64], StoreError> {
        let extent = values::require_1d(&self.shape, name)?;
        let ints = values::int_values(&self.datatype, &self.values, name)?;
        if (ints.len() as u64) < extent {
            return Err(StoreError::MissingValues(name.to_string()));
        }
        Ok(ints)
    }

    /// Borrows the string payload of a 1-dimensional dataset.
    pub fn read_string_vec(&self, name: &str) -> Result<&[String], StoreError> {
        let extent = values::require_1d(&self.shape, name)?;
        let strings = values::string_values(&self.datatype, &self.values, name)?;
        if (strings.len() as u64) < extent {
            return Err(StoreError::MissingValues(name.to_string()));
        }
        Ok(strings)
    }
}
