//! Operation validators.
//!
//! Every operation recursively validates its seed group(s) through the
//! dispatcher, then applies its own shape and type contract on top of the
//! seeds' details.

pub mod binary;
pub mod combine;
pub mod dimnames;
pub mod matrix_product;
pub mod subset;
pub mod subset_assignment;
pub mod transpose;
pub mod unary;
pub mod unary_math;

use delarray_core::{ArrayDetails, ArrayType, Version};
use delarray_store::Group;

use crate::error::ValidationError;
use crate::validate::Context;

/// Recursively validates the child group `name` as a delayed object.
pub(crate) fn fetch_seed(
    group: &Group,
    name: &str,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let seed = group.open_group(name)?;
    context
        .validate(seed, version)
        .map_err(|e| ValidationError::child(name, e))
}

/// Rejects string-typed operands in arithmetic-like contexts.
pub(crate) fn require_numeric(
    details: &ArrayDetails,
    name: &str,
) -> Result<(), ValidationError> {
    if details.array_type == ArrayType::String {
        return Err(ValidationError::contract(format!(
            "type of '{name}' should be integer, float or boolean"
        )));
    }
    Ok(())
}
