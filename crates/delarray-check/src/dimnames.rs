//! The shared dimnames contract.
//!
//! Both the dimnames-assignment operation and the leaf arrays accept an
//! optional `dimnames` child: a list (one entry per dimension) of
//! 1-dimensional string datasets naming the positions along each axis.

use delarray_core::Version;
use delarray_store::Group;

use crate::error::ValidationError;
use crate::list::validate_list;

/// Validates the `dimnames` child of `group` against the dimensions of the
/// array it annotates.
pub fn validate_dimnames(
    group: &Group,
    dimensions: &[u64],
    version: &Version,
) -> Result<(), ValidationError> {
    let dimnames = group
        .open_group("dimnames")
        .map_err(|_| ValidationError::contract("expected a 'dimnames' group"))?;

    let details =
        validate_list(dimnames, version).map_err(|e| ValidationError::list("dimnames", e))?;
    if details.length != dimensions.len() as u64 {
        return Err(ValidationError::contract(
            "length of 'dimnames' list should be equal to seed dimensionality",
        ));
    }

    for (&index, name) in &details.present {
        let dataset = dimnames.open_dataset(name)?;
        if dataset.rank() != 1 || !dataset.datatype.is_string() {
            return Err(ValidationError::contract(
                "each entry of 'dimnames' should be a 1-dimensional string dataset",
            ));
        }
        if dataset.shape[0] != dimensions[index as usize] {
            return Err(ValidationError::contract(
                "each entry of 'dimnames' should have length equal to the extent of its corresponding dimension",
            ));
        }
    }

    Ok(())
}
