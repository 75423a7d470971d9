//! The subset-assignment operation: overwriting an indexed region of the
//! seed with a value array.

use delarray_core::{ArrayDetails, ArrayType, Version};
use delarray_store::Group;

use crate::error::ValidationError;
use crate::ops::fetch_seed;
use crate::ops::subset::load_index_list;
use crate::validate::Context;

pub fn validate_subset_assignment(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let seed = fetch_seed(group, "seed", version, context)?;
    let value = fetch_seed(group, "value", version, context)?;

    if (seed.array_type == ArrayType::String) != (value.array_type == ArrayType::String) {
        return Err(ValidationError::contract(
            "both or none of 'seed' and 'value' should contain strings",
        ));
    }

    let selected = load_index_list(group, &seed.dimensions, version, context)?;
    if value.rank() != seed.rank() {
        return Err(ValidationError::contract(
            "dimension extents are not consistent between 'value' and 'index'",
        ));
    }
    for (axis, (&extent, count)) in seed.dimensions.iter().zip(&selected).enumerate() {
        let expected = count.unwrap_or(extent);
        if value.dimensions[axis] != expected {
            return Err(ValidationError::contract(
                "dimension extents are not consistent between 'value' and 'index'",
            ));
        }
    }

    // Assignment can widen the seed's type.
    Ok(ArrayDetails {
        array_type: seed.array_type.max(value.array_type),
        dimensions: seed.dimensions,
    })
}
