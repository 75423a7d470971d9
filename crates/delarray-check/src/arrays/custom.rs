//! Custom arrays: application-defined leaves validated only for their
//! declared type and dimensions.

use delarray_core::{ArrayDetails, ArrayType, Version};
use delarray_store::Group;

use crate::error::ValidationError;
use crate::gated::load_dimensions_vector;

/// Reads and translates the scalar `type` dataset of a custom or external
/// array.
pub(crate) fn load_type_dataset(group: &Group) -> Result<ArrayType, ValidationError> {
    let dataset = group.open_dataset("type")?;
    if !dataset.is_scalar() {
        return Err(ValidationError::contract("'type' should be scalar"));
    }
    if !dataset.datatype.is_string() {
        return Err(ValidationError::contract(
            "'type' should have a datatype that can be represented by a UTF-8 encoded string",
        ));
    }
    let name = dataset.read_scalar_string("type")?;
    match name.as_str() {
        "BOOLEAN" => Ok(ArrayType::Boolean),
        "INTEGER" => Ok(ArrayType::Integer),
        "FLOAT" => Ok(ArrayType::Float),
        "STRING" => Ok(ArrayType::String),
        other => Err(ValidationError::contract(format!(
            "unrecognized 'type' ({other})"
        ))),
    }
}

/// Validates a custom array. The `type` dataset is mandatory from 1.1;
/// older schemas may omit it, in which case the array is assumed to hold
/// floats.
pub fn validate_custom_array(
    group: &Group,
    version: &Version,
) -> Result<ArrayDetails, ValidationError> {
    let dimensions = load_dimensions_vector(group, "dimensions", version)?;
    if dimensions.is_empty() {
        return Err(ValidationError::contract(
            "'dimensions' should have non-zero length for a custom array",
        ));
    }

    let array_type = if version.lt(1, 1) && !group.exists("type") {
        ArrayType::Float
    } else {
        load_type_dataset(group)?
    };

    Ok(ArrayDetails::new(array_type, dimensions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use delarray_store::{DataType, Dataset};

    fn custom(type_name: Option<&str>) -> Group {
        let mut group = Group::new()
            .with_dataset("dimensions", Dataset::vector_int(vec![50], DataType::I32));
        if let Some(name) = type_name {
            group.insert_dataset("type", Dataset::scalar_string(name));
        }
        group
    }

    #[test]
    fn declared_type_is_translated() {
        let details = validate_custom_array(&custom(Some("INTEGER")), &Version::OLDEST).unwrap();
        assert_eq!(details.array_type, ArrayType::Integer);
        assert_eq!(details.dimensions.as_slice(), &[50]);
    }

    #[test]
    fn missing_type_defaults_to_float_only_before_1_1() {
        let details = validate_custom_array(&custom(None), &Version::OLDEST).unwrap();
        assert_eq!(details.array_type, ArrayType::Float);

        let group = Group::new()
            .with_dataset("dimensions", Dataset::vector_int(vec![50], DataType::U32));
        let err = validate_custom_array(&group, &Version::new(1, 1, 0)).unwrap_err();
        assert_eq!(err.to_string(), "expected a dataset at 'type'");
    }

    #[test]
    fn unrecognized_type_names_are_rejected() {
        let err = validate_custom_array(&custom(Some("foo")), &Version::OLDEST).unwrap_err();
        assert_eq!(err.to_string(), "unrecognized 'type' (foo)");
    }
}
