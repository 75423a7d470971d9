//! The constant array leaf: one scalar value broadcast over a shape.

use delarray_core::{ArrayDetails, Version};
use delarray_store::Group;

use crate::arrays::derive_dataset_type;
use crate::error::ValidationError;
use crate::gated::{load_dimensions_vector, validate_missing_placeholder};
use crate::validate::Context;

pub fn validate_constant_array(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let dimensions = load_dimensions_vector(group, "dimensions", version)?;
    if dimensions.is_empty() {
        return Err(ValidationError::contract(
            "'dimensions' should have non-zero length for a constant array",
        ));
    }

    let value = group.open_dataset("value")?;
    if !value.is_scalar() {
        return Err(ValidationError::contract("'value' should be a scalar"));
    }
    let array_type = derive_dataset_type(value, version)?;
    if !context.details_only() {
        validate_missing_placeholder(value, version)?;
    }

    Ok(ArrayDetails::new(array_type, dimensions))
}
