//! External arrays: opaque references to data living outside the container.
//!
//! Both variants are only recognized before 1.1; newer schemas are expected
//! to register their own custom array subtypes instead.

use delarray_core::{ArrayDetails, ArrayType, Version};
use delarray_store::Group;

use crate::arrays::custom::load_type_dataset;
use crate::error::ValidationError;
use crate::gated::load_dimensions_vector;

fn load_reference_string(group: &Group, name: &str) -> Result<(), ValidationError> {
    let dataset = group.open_dataset(name)?;
    if !dataset.is_scalar() || !dataset.datatype.is_string() {
        return Err(ValidationError::contract(format!(
            "'{name}' should be a string scalar"
        )));
    }
    // The reference is deliberately not resolved; only its presence and
    // type are checked.
    dataset.read_scalar_string(name)?;
    Ok(())
}

/// Validates an `external hdf5` array: a typed, dimensioned reference to a
/// dataset in another file, located by `file` and `name`.
pub fn validate_external_hdf5_array(
    group: &Group,
    version: &Version,
) -> Result<ArrayDetails, ValidationError> {
    let dimensions = load_dimensions_vector(group, "dimensions", version)?;
    let array_type = load_type_dataset(group)?;
    load_reference_string(group, "file")?;
    load_reference_string(group, "name")?;
    Ok(ArrayDetails::new(array_type, dimensions))
}

/// Validates a plain `external` array: dimensions only, with no type
/// information available. The reported float type is a convention, not an
/// inference.
pub fn validate_external_array(
    group: &Group,
    version: &Version,
) -> Result<ArrayDetails, ValidationError> {
    let dimensions = load_dimensions_vector(group, "dimensions", version)?;
    Ok(ArrayDetails::new(ArrayType::Float, dimensions))
}
