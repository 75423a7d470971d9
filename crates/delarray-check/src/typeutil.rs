//! Element-type derivation for value-bearing datasets.
//!
//! Pre-1.1 schemas infer the element type from the stored datatype class,
//! with an `is_boolean` escape hatch for integer datasets. From 1.1 the
//! writer declares the type in a `type` attribute, and the stored datatype
//! must fit the declared type's bit-width ceiling.

use delarray_core::ArrayType;
use delarray_store::{Dataset, TypeClass};

use crate::error::ValidationError;

/// Reads the `is_boolean` attribute flag of an integer dataset.
pub fn is_boolean(dataset: &Dataset) -> Result<bool, ValidationError> {
    if !dataset.has_attribute("is_boolean") {
        return Ok(false);
    }
    if dataset.datatype.class() != TypeClass::Integer {
        return Err(ValidationError::contract(
            "'is_boolean' attribute should only exist for integer datasets",
        ));
    }
    let attr = dataset.attribute("is_boolean")?;
    if !attr.is_scalar() || attr.datatype.class() != TypeClass::Integer {
        return Err(ValidationError::contract(
            "'is_boolean' attribute should be an integer scalar",
        ));
    }
    Ok(attr.read_scalar_i64("is_boolean")? != 0)
}

/// Reads the declared `type` attribute of a 1.1+ dataset.
pub fn fetch_data_type(dataset: &Dataset) -> Result<String, ValidationError> {
    let attr = dataset.attribute("type")?;
    if !attr.is_scalar() {
        return Err(ValidationError::contract("'type' should be a scalar"));
    }
    if !attr.datatype.is_string() {
        return Err(ValidationError::contract(
            "'type' should have a datatype that can be represented by a UTF-8 encoded string",
        ));
    }
    Ok(attr.read_scalar_string("type")?)
}

/// Maps a declared 1.1+ type name to an element type. Unknown names fall
/// through to `String`; [`check_type_1_1`] then rejects any datatype that
/// cannot back a string.
pub fn translate_type_1_1(type_name: &str) -> ArrayType {
    match type_name {
        "INTEGER" => ArrayType::Integer,
        "BOOLEAN" => ArrayType::Boolean,
        "FLOAT" => ArrayType::Float,
        _ => ArrayType::String,
    }
}

/// Checks a 1.1+ dataset's stored datatype against its declared element
/// type's bit-width ceiling.
pub fn check_type_1_1(dataset: &Dataset, array_type: ArrayType) -> Result<(), ValidationError> {
    match array_type {
        ArrayType::Integer => {
            if !dataset.datatype.fits_integer(32, true) {
                return Err(ValidationError::contract(
                    "integer dataset should have a datatype that fits into a 32-bit signed integer",
                ));
            }
        }
        ArrayType::Boolean => {
            if !dataset.datatype.fits_integer(8, true) {
                return Err(ValidationError::contract(
                    "boolean dataset should have a datatype that fits into a 8-bit signed integer",
                ));
            }
        }
        ArrayType::Float => {
            if !dataset.datatype.fits_float(64) {
                return Err(ValidationError::contract(
                    "float dataset should have a datatype that fits into a 64-bit float",
                ));
            }
        }
        ArrayType::String => {
            if !dataset.datatype.is_string() {
                return Err(ValidationError::contract(
                    "string dataset should have a datatype that can be represented by a UTF-8 encoded string",
                ));
            }
        }
    }
    Ok(())
}

/// Maps a pre-1.1 datatype class to an element type.
pub fn translate_type_0_0(class: TypeClass) -> ArrayType {
    match class {
        TypeClass::Float => ArrayType::Float,
        TypeClass::String => ArrayType::String,
        TypeClass::Integer => ArrayType::Integer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delarray_store::{Attribute, DataType};

    #[test]
    fn boolean_flag_requires_integer_dataset() {
        let ds = Dataset::empty(DataType::I8, vec![5])
            .with_attribute("is_boolean", Attribute::scalar_int(1, DataType::I8));
        assert!(is_boolean(&ds).unwrap());

        let ds = Dataset::empty(DataType::I8, vec![5])
            .with_attribute("is_boolean", Attribute::scalar_int(0, DataType::I8));
        assert!(!is_boolean(&ds).unwrap());

        let ds = Dataset::empty(DataType::F64, vec![5])
            .with_attribute("is_boolean", Attribute::scalar_int(1, DataType::I8));
        let err = is_boolean(&ds).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'is_boolean' attribute should only exist for integer datasets"
        );

        let ds = Dataset::empty(DataType::I32, vec![5])
            .with_attribute("is_boolean", Attribute::scalar_string("yes"));
        let err = is_boolean(&ds).unwrap_err();
        assert_eq!(err.to_string(), "'is_boolean' attribute should be an integer scalar");
    }

    #[test]
    fn declared_type_translation() {
        assert_eq!(translate_type_1_1("INTEGER"), ArrayType::Integer);
        assert_eq!(translate_type_1_1("BOOLEAN"), ArrayType::Boolean);
        assert_eq!(translate_type_1_1("FLOAT"), ArrayType::Float);
        assert_eq!(translate_type_1_1("STRING"), ArrayType::String);
        assert_eq!(translate_type_1_1("WHEE"), ArrayType::String);
    }

    #[test]
    fn declared_type_ceilings() {
        let ds = Dataset::empty(DataType::I32, vec![5]);
        assert!(check_type_1_1(&ds, ArrayType::Integer).is_ok());

        let ds = Dataset::empty(DataType::I64, vec![5]);
        let err = check_type_1_1(&ds, ArrayType::Integer).unwrap_err();
        assert_eq!(
            err.to_string(),
            "integer dataset should have a datatype that fits into a 32-bit signed integer"
        );

        let ds = Dataset::empty(DataType::I16, vec![5]);
        let err = check_type_1_1(&ds, ArrayType::Boolean).unwrap_err();
        assert_eq!(
            err.to_string(),
            "boolean dataset should have a datatype that fits into a 8-bit signed integer"
        );

        let ds = Dataset::empty(DataType::F64, vec![5]);
        assert!(check_type_1_1(&ds, ArrayType::Float).is_ok());

        let ds = Dataset::empty(DataType::I32, vec![5]);
        let err = check_type_1_1(&ds, ArrayType::String).unwrap_err();
        assert_eq!(
            err.to_string(),
            "string dataset should have a datatype that can be represented by a UTF-8 encoded string"
        );
    }

    #[test]
    fn class_translation() {
        assert_eq!(translate_type_0_0(TypeClass::Integer), ArrayType::Integer);
        assert_eq!(translate_type_0_0(TypeClass::Float), ArrayType::Float);
        assert_eq!(translate_type_0_0(TypeClass::String), ArrayType::String);
    }
}
