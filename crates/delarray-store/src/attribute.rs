//! Named metadata attached to groups and datasets.

use serde::{Deserialize, Serialize};

use crate::datatype::DataType;
use crate::error::StoreError;
use crate::values::{self, DataValues};

/// An attribute: a small typed value hanging off a group or dataset.
///
/// An empty `shape` means the attribute is scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub datatype: DataType,
    pub shape: Vec<u64>,
    pub values: DataValues,
}

impl Attribute {
    pub fn new(datatype: DataType, shape: Vec<u64>, values: DataValues) -> Self {
        Self {
            datatype,
            shape,
            values,
        }
    }

    /// A scalar string attribute.
    pub fn scalar_string(value: impl Into<String>) -> Self {
        Self {
            datatype: DataType::String,
            shape: Vec::new(),
            values: DataValues::Str(vec![value.into()]),
        }
    }

    /// A scalar integer attribute with the given stored datatype.
    pub fn scalar_int(value: i64, datatype: DataType) -> Self {
        Self {
            datatype,
            shape: Vec::new(),
            values: DataValues::Int(vec![value]),
        }
    }

    /// A scalar float attribute with the given stored datatype.
    pub fn scalar_float(value: f64, datatype: DataType) -> Self {
        Self {
            datatype,
            shape: Vec::new(),
            values: DataValues::Float(vec![value]),
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_reads() {
        let attr = Attribute::scalar_string("dense array");
        assert!(attr.is_scalar());
        assert_eq!(attr.read_scalar_string("delayed_array").unwrap(), "dense array");

        let attr = Attribute::scalar_int(5, DataType::U32);
        assert_eq!(attr.read_scalar_i64("delayed_length").unwrap(), 5);
        assert_eq!(attr.read_scalar_u64("delayed_length").unwrap(), 5);
    }

    #[test]
    fn wrong_class_is_an_error() {
        let attr = Attribute::scalar_int(1, DataType::I32);
        let err = attr.read_scalar_string("delayed_type").unwrap_err();
        assert_eq!(err, StoreError::NotString("delayed_type".to_string()));
    }

    #[test]
    fn negative_rejected_by_unsigned_read() {
        let attr = Attribute::scalar_int(-1, DataType::I32);
        let err = attr.read_scalar_u64("delayed_length").unwrap_err();
        assert_eq!(err, StoreError::NegativeValue("delayed_length".to_string()));
    }
}
