//! The dense array leaf.

use delarray_core::{ArrayDetails, Version};
use delarray_store::{Group, TypeClass};

use crate::arrays::derive_dataset_type;
use crate::dimnames::validate_dimnames;
use crate::error::ValidationError;
use crate::gated::validate_missing_placeholder;
use crate::validate::Context;

/// Validates a dense array: a `data` dataset holding every element, plus a
/// `native` flag declaring whether the stored dimension order is native
/// (fastest-varying last) or reversed.
pub fn validate_dense_array(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let data = group.open_dataset("data")?;
    if data.rank() == 0 {
        return Err(ValidationError::contract(
            "'data' should have non-zero dimensions for a dense array",
        ));
    }

    let array_type = derive_dataset_type(data, version)?;
    if !context.details_only() {
        validate_missing_placeholder(data, version)?;
    }

    let native = group.open_dataset("native")?;
    if !native.is_scalar() {
        return Err(ValidationError::contract("'native' should be a scalar"));
    }
    if version.lt(1, 1) {
        if native.datatype.class() != TypeClass::Integer {
            return Err(ValidationError::contract(
                "'native' should have an integer datatype",
            ));
        }
    } else if !native.datatype.fits_integer(8, true) {
        return Err(ValidationError::contract(
            "'native' should have a datatype that fits into an 8-bit signed integer",
        ));
    }
    let is_native = native.read_scalar_i64("native")? != 0;

    let mut dimensions = data.shape.clone();
    if !is_native {
        dimensions.reverse();
    }

    if !context.details_only() && group.exists("dimnames") {
        validate_dimnames(group, &dimensions, version)?;
    }

    Ok(ArrayDetails::new(array_type, dimensions))
}
