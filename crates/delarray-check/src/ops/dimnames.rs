//! The dimnames-assignment operation: attaching names to the seed's axes.

use delarray_core::{ArrayDetails, Version};
use delarray_store::Group;

use crate::dimnames::validate_dimnames;
use crate::error::ValidationError;
use crate::ops::fetch_seed;
use crate::validate::Context;

/// Validates a dimnames assignment. The seed's type and dimensions pass
/// through unchanged.
pub fn validate_dimnames_assignment(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let seed = fetch_seed(group, "seed", version, context)?;
    if !context.details_only() {
        validate_dimnames(group, &seed.dimensions, version)?;
    }
    Ok(seed)
}
