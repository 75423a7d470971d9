//! The transpose operation: a permutation of the seed's dimensions.

use delarray_core::{ArrayDetails, Dimensions, Version};
use delarray_store::{Group, TypeClass};

use crate::error::ValidationError;
use crate::ops::fetch_seed;
use crate::validate::Context;

pub fn validate_transpose(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let seed = fetch_seed(group, "seed", version, context)?;

    let permutation = group.open_dataset("permutation")?;
    if permutation.rank() != 1 || permutation.datatype.class() != TypeClass::Integer {
        return Err(ValidationError::contract(
            "'permutation' should be a 1-dimensional integer dataset",
        ));
    }
    if !version.lt(1, 1) && !permutation.datatype.fits_integer(64, false) {
        return Err(ValidationError::Exceeds64BitUnsigned(
            "permutation".to_string(),
        ));
    }
    if permutation.shape[0] != seed.rank() as u64 {
        return Err(ValidationError::contract(
            "length of 'permutation' should be equal to the seed dimensionality",
        ));
    }

    let rank = seed.rank();
    let mut seen = vec![false; rank];
    let mut dimensions = Dimensions::new();
    for &raw in permutation.read_i64_vec("permutation")? {
        let axis = usize::try_from(raw)
            .ok()
            .filter(|&axis| axis < rank)
            .ok_or_else(|| {
                ValidationError::contract("'permutation' contains out-of-bounds values")
            })?;
        if seen[axis] {
            return Err(ValidationError::contract(
                "'permutation' should contain unique values",
            ));
        }
        seen[axis] = true;
        dimensions.push(seed.dimensions[axis]);
    }

    Ok(ArrayDetails {
        array_type: seed.array_type,
        dimensions,
    })
}
