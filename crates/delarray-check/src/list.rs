//! The list contract: a positionally-indexed, possibly-sparse collection.
//!
//! Lists back `dimnames`, the `seeds` of a combine and the `index` of a
//! subset. A list group declares its logical length in a `delayed_length`
//! attribute and names each present element by its canonical decimal index;
//! absent indices are legal and their meaning is up to the consumer.

use std::collections::BTreeMap;

use delarray_core::Version;
use delarray_store::{Group, TypeClass};

use crate::error::ValidationError;

/// Declared length and present elements of a validated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDetails {
    /// Declared logical length; indices run over `0..length`.
    pub length: u64,
    /// Present elements, keyed by index; values are the child names used to
    /// re-open each element.
    pub present: BTreeMap<u64, String>,
}

impl ListDetails {
    /// `true` if every index in `0..length` has a present element.
    pub fn is_complete(&self) -> bool {
        self.present.len() as u64 == self.length
    }
}

// A canonical index is a run of decimal digits without leading zeros, the
// literal "0" aside.
fn parse_index(name: &str) -> Option<u64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if name.len() > 1 && name.starts_with('0') {
        return None;
    }
    name.parse().ok()
}

/// Validates the list contract on `group` and enumerates its elements.
pub fn validate_list(group: &Group, version: &Version) -> Result<ListDetails, ValidationError> {
    // Old schemas tag lists explicitly; newer ones are recognized purely
    // by structure.
    if version.lt(1, 1) {
        let attr = group.attribute("delayed_type")?;
        if attr.read_scalar_string("delayed_type")? != "list" {
            return Err(ValidationError::contract(
                "expected 'delayed_type = \"list\"' for a list",
            ));
        }
    }

    let length_attr = group.attribute("delayed_length")?;
    if !length_attr.is_scalar() {
        return Err(ValidationError::contract(
            "'delayed_length' should be a scalar",
        ));
    }
    let length = if version.lt(1, 1) {
        if length_attr.datatype.class() != TypeClass::Integer {
            return Err(ValidationError::contract(
                "'delayed_length' should be an integer",
            ));
        }
        let raw = length_attr.read_scalar_i64("delayed_length")?;
        u64::try_from(raw)
            .map_err(|_| ValidationError::Negative("delayed_length".to_string()))?
    } else {
        if !length_attr.datatype.fits_integer(64, false) {
            return Err(ValidationError::Exceeds64BitUnsigned(
                "delayed_length".to_string(),
            ));
        }
        length_attr.read_scalar_u64("delayed_length")?
    };

    let mut present = BTreeMap::new();
    for name in group.child_names() {
        let index = parse_index(name).ok_or_else(|| {
            ValidationError::contract(format!("'{name}' is not a valid index for a list"))
        })?;
        if index >= length {
            return Err(ValidationError::contract(format!(
                "index {index} is out of range for a list of length {length}"
            )));
        }
        present.insert(index, name.to_string());
    }

    if present.len() as u64 > length {
        return Err(ValidationError::contract(
            "more objects in the list than are specified by 'delayed_length'",
        ));
    }

    Ok(ListDetails { length, present })
}
