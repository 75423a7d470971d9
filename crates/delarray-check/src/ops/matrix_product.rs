//! The matrix product operation.

use delarray_core::{ArrayDetails, Version};
use delarray_store::Group;

use crate::error::ValidationError;
use crate::ops::{fetch_seed, require_numeric};
use crate::promote::arithmetic_output_type;
use crate::validate::Context;

// Outer and inner extents of an operand after applying its orientation.
fn oriented_extents(
    group: &Group,
    seed_name: &str,
    orientation_name: &str,
    details: &ArrayDetails,
) -> Result<(u64, u64), ValidationError> {
    if details.rank() != 2 {
        return Err(ValidationError::contract(format!(
            "'{seed_name}' should be a 2-dimensional array for a matrix product"
        )));
    }

    let dataset = group.open_dataset(orientation_name)?;
    if !dataset.is_scalar() {
        return Err(ValidationError::contract(format!(
            "'{orientation_name}' should be a scalar"
        )));
    }
    if !dataset.datatype.is_string() {
        return Err(ValidationError::contract(format!(
            "'{orientation_name}' should have a datatype that can be represented by a UTF-8 encoded string"
        )));
    }
    match dataset.read_scalar_string(orientation_name)?.as_str() {
        "N" => Ok((details.dimensions[0], details.dimensions[1])),
        "T" => Ok((details.dimensions[1], details.dimensions[0])),
        _ => Err(ValidationError::contract(format!(
            "'{orientation_name}' should be either 'N' or 'T'"
        ))),
    }
}

pub fn validate_matrix_product(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let left = fetch_seed(group, "left_seed", version, context)?;
    require_numeric(&left, "left_seed")?;
    let right = fetch_seed(group, "right_seed", version, context)?;
    require_numeric(&right, "right_seed")?;

    let (left_outer, left_inner) = oriented_extents(group, "left_seed", "left_orientation", &left)?;
    let (right_outer, right_inner) =
        oriented_extents(group, "right_seed", "right_orientation", &right)?;

    if left_inner != right_inner {
        return Err(ValidationError::contract(
            "inconsistent common dimensions in the matrix product",
        ));
    }

    Ok(ArrayDetails::new(
        arithmetic_output_type(left.array_type, right.array_type, "*"),
        [left_outer, right_outer],
    ))
}
