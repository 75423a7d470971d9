//! The combine operation: concatenation of seeds along one axis.

use delarray_core::{ArrayDetails, Version};
use delarray_store::Group;

use crate::error::ValidationError;
use crate::gated::load_along;
use crate::list::validate_list;
use crate::validate::Context;

pub fn validate_combine(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let along = load_along(group, version)?;

    let seeds = group.open_group("seeds")?;
    let list = validate_list(seeds, version).map_err(|e| ValidationError::list("seeds", e))?;
    if !list.is_complete() {
        return Err(ValidationError::contract(
            "missing elements in the 'seeds' list",
        ));
    }

    let mut combined: Option<ArrayDetails> = None;
    for name in list.present.values() {
        let seed = seeds.open_group(name)?;
        let current = context
            .validate(seed, version)
            .map_err(|e| ValidationError::child(format!("seeds/{name}"), e))?;

        match combined.as_mut() {
            None => {
                if along >= current.rank() as u64 {
                    return Err(ValidationError::AlongTooLarge);
                }
                combined = Some(current);
            }
            Some(total) => {
                // Mixed seed types promote to the lattice maximum; strings
                // absorb everything.
                total.array_type = total.array_type.max(current.array_type);
                if total.rank() != current.rank() {
                    return Err(ValidationError::DimensionalityMismatch);
                }
                for (axis, extent) in total.dimensions.iter_mut().enumerate() {
                    if axis as u64 == along {
                        *extent += current.dimensions[axis];
                    } else if *extent != current.dimensions[axis] {
                        return Err(ValidationError::InconsistentExtents);
                    }
                }
            }
        }
    }

    combined.ok_or_else(|| ValidationError::contract("missing elements in the 'seeds' list"))
}
