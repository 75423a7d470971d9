//! Leaf array validators.
//!
//! Leaves terminate the recursion: each checks its own structural contract
//! and reports the type and dimensions of the array it describes.

pub mod constant;
pub mod custom;
pub mod dense;
pub mod external;
pub mod sparse;

use delarray_core::{ArrayType, Version};
use delarray_store::Dataset;

use crate::error::ValidationError;
use crate::typeutil;

/// Element type of a value-bearing dataset, under the version's typing
/// rules.
pub(crate) fn derive_dataset_type(
    dataset: &Dataset,
    version: &Version,
) -> Result<ArrayType, ValidationError> {
    if version.lt(1, 1) {
        let mut array_type = typeutil::translate_type_0_0(dataset.datatype.class());
        if array_type == ArrayType::Integer && typeutil::is_boolean(dataset)? {
            array_type = ArrayType::Boolean;
        }
        Ok(array_type)
    } else {
        let declared = typeutil::fetch_data_type(dataset)?;
        let array_type = typeutil::translate_type_1_1(&declared);
        typeutil::check_type_1_1(dataset, array_type)?;
        Ok(array_type)
    }
}
