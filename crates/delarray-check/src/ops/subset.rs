//! The subset operation: per-axis fancy indexing of the seed.

use delarray_core::{ArrayDetails, Dimensions, Version};
use delarray_store::{Group, TypeClass};

use crate::error::ValidationError;
use crate::list::validate_list;
use crate::ops::fetch_seed;
use crate::validate::Context;

/// Loads the `index` list: one optional index vector per seed axis.
/// Returns, per axis, the number of selected positions, or `None` when the
/// axis keeps its full extent.
pub(crate) fn load_index_list(
    group: &Group,
    seed_dimensions: &[u64],
    version: &Version,
    context: &Context<'_>,
) -> Result<Vec<Option<u64>>, ValidationError> {
    let index = group.open_group("index")?;
    let details = validate_list(index, version).map_err(|e| ValidationError::list("index", e))?;
    if details.length != seed_dimensions.len() as u64 {
        return Err(ValidationError::contract(
            "length of 'index' list should be equal to the seed dimensionality",
        ));
    }

    let mut selected = vec![None; seed_dimensions.len()];
    for (&axis, name) in &details.present {
        let dataset = index.open_dataset(name)?;
        if dataset.rank() != 1 || dataset.datatype.class() != TypeClass::Integer {
            return Err(ValidationError::contract(
                "each child of 'index' should be a 1-dimensional integer dataset",
            ));
        }
        if !version.lt(1, 1) && !dataset.datatype.fits_integer(64, false) {
            return Err(ValidationError::Exceeds64BitUnsigned(name.clone()));
        }

        if !context.details_only() {
            let extent = seed_dimensions[axis as usize];
            for &value in dataset.read_i64_vec(name)? {
                // Indices need not be sorted or unique; repeated selection
                // is legal.
                if value < 0 || value as u64 >= extent {
                    return Err(ValidationError::contract(format!(
                        "indices out of range for element '{name}' in 'index'"
                    )));
                }
            }
        }

        selected[axis as usize] = Some(dataset.shape[0]);
    }
    Ok(selected)
}

pub fn validate_subset(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let seed = fetch_seed(group, "seed", version, context)?;
    let selected = load_index_list(group, &seed.dimensions, version, context)?;

    let dimensions: Dimensions = seed
        .dimensions
        .iter()
        .zip(&selected)
        .map(|(&extent, count)| count.unwrap_or(extent))
        .collect();

    Ok(ArrayDetails {
        array_type: seed.array_type,
        dimensions,
    })
}
