//! Version-gated readers for common control fields.
//!
//! Pre-1.1 schemas store indices and lengths as plain signed integers, so
//! readers check the stored values for negatives. From 1.1 onward the
//! writer must pick an unsigned datatype that fits in 64 bits, so the gate
//! moves from the values to the datatype itself.

use delarray_core::Version;
use delarray_store::{Dataset, Group, TypeClass};

use crate::error::ValidationError;

/// Reads a scalar non-negative index or length from the dataset `name`.
pub fn load_scalar_index(
    group: &Group,
    name: &str,
    version: &Version,
) -> Result<u64, ValidationError> {
    let dataset = group.open_dataset(name)?;
    if !dataset.is_scalar() {
        return Err(ValidationError::contract(format!(
            "'{name}' should be a scalar dataset"
        )));
    }

    if version.lt(1, 1) {
        if dataset.datatype.class() != TypeClass::Integer {
            return Err(ValidationError::contract(format!(
                "'{name}' should be an integer dataset"
            )));
        }
        let raw = dataset.read_scalar_i64(name)?;
        u64::try_from(raw).map_err(|_| ValidationError::Negative(name.to_string()))
    } else {
        if !dataset.datatype.fits_integer(64, false) {
            return Err(ValidationError::Exceeds64BitUnsigned(name.to_string()));
        }
        Ok(dataset.read_scalar_u64(name)?)
    }
}

/// Reads the `along` axis selector.
pub fn load_along(group: &Group, version: &Version) -> Result<u64, ValidationError> {
    load_scalar_index(group, "along", version)
}

/// Reads `along`, checks it against the seed rank, and checks that `extent`
/// matches the seed extent on that axis. Returns the axis.
pub fn check_along(
    group: &Group,
    version: &Version,
    seed_dimensions: &[u64],
    extent: u64,
) -> Result<u64, ValidationError> {
    let along = load_along(group, version)?;
    if along >= seed_dimensions.len() as u64 {
        return Err(ValidationError::AlongTooLarge);
    }
    if seed_dimensions[along as usize] != extent {
        return Err(ValidationError::contract(
            "length of 'value' dataset should be equal to the dimension specified in 'along'",
        ));
    }
    Ok(along)
}

/// Reads a 1-dimensional vector of non-negative extents from the dataset
/// `name`.
pub fn load_dimensions_vector(
    group: &Group,
    name: &str,
    version: &Version,
) -> Result<Vec<u64>, ValidationError> {
    let dataset = group.open_dataset(name)?;
    if dataset.rank() != 1 || dataset.datatype.class() != TypeClass::Integer {
        return Err(ValidationError::contract(format!(
            "'{name}' should be a 1-dimensional integer dataset"
        )));
    }

    if !version.lt(1, 1) && !dataset.datatype.fits_integer(64, false) {
        return Err(ValidationError::Exceeds64BitUnsigned(name.to_string()));
    }

    let raw = dataset.read_i64_vec(name)?;
    raw.iter()
        .map(|&value| u64::try_from(value).map_err(|_| ValidationError::Negative(name.to_string())))
        .collect()
}

/// Checks the optional `missing_placeholder` attribute on a value dataset.
///
/// Placeholders only exist from 1.0 onward. Under 1.0 exactly, the
/// placeholder needs only the same type class as its dataset; later
/// versions require the exact same datatype.
pub fn validate_missing_placeholder(
    dataset: &Dataset,
    version: &Version,
) -> Result<(), ValidationError> {
    if version.major == 0 || !dataset.has_attribute("missing_placeholder") {
        return Ok(());
    }
    let attr = dataset.attribute("missing_placeholder")?;
    if !attr.is_scalar() {
        return Err(ValidationError::contract(
            "'missing_placeholder' should be a scalar",
        ));
    }

    if version.major == 1 && version.minor == 0 {
        if attr.datatype.class() != dataset.datatype.class() {
            return Err(ValidationError::contract(
                "'missing_placeholder' should have the same type class as its dataset",
            ));
        }
    } else if attr.datatype != dataset.datatype {
        return Err(ValidationError::contract(
            "'missing_placeholder' should have the same type as its dataset",
        ));
    }
    Ok(())
}

/// Reads a scalar string field such as `method` or `side`.
pub fn load_scalar_string(group: &Group, name: &str) -> Result<String, ValidationError> {
    let dataset = group.open_dataset(name)?;
    if !dataset.is_scalar() || !dataset.datatype.is_string() {
        return Err(ValidationError::contract(format!(
            "'{name}' should be a scalar string"
        )));
    }
    Ok(dataset.read_scalar_string(name)?)
}

/// Reads the `method` operator token.
pub fn load_method(group: &Group) -> Result<String, ValidationError> {
    load_scalar_string(group, "method")
}

/// Reads the `side` placement token.
pub fn load_side(group: &Group) -> Result<String, ValidationError> {
    load_scalar_string(group, "side")
}

#[cfg(test)]
mod tests {
    use super::*;
    use delarray_store::{Attribute, DataType};

    fn v(major: u32, minor: u32) -> Version {
        Version::new(major, minor, 0)
    }

    #[test]
    fn scalar_index_pre_1_1_checks_values() {
        let group = Group::new().with_dataset("along", Dataset::scalar_int(2, DataType::I32));
        assert_eq!(load_along(&group, &Version::OLDEST).unwrap(), 2);

        let group = Group::new().with_dataset("along", Dataset::scalar_int(-1, DataType::I32));
        let err = load_along(&group, &Version::OLDEST).unwrap_err();
        assert_eq!(err.to_string(), "'along' should be non-negative");
    }

    #[test]
    fn scalar_index_1_1_checks_datatype() {
        let group = Group::new().with_dataset("along", Dataset::scalar_int(2, DataType::U16));
        assert_eq!(load_along(&group, &v(1, 1)).unwrap(), 2);

        let group = Group::new().with_dataset("along", Dataset::scalar_int(2, DataType::I32));
        let err = load_along(&group, &v(1, 1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'along' should have a datatype that fits in a 64-bit unsigned integer"
        );
    }

    #[test]
    fn scalar_index_rejects_non_scalars() {
        let group =
            Group::new().with_dataset("along", Dataset::vector_int(vec![1], DataType::I32));
        let err = load_along(&group, &Version::OLDEST).unwrap_err();
        assert_eq!(err.to_string(), "'along' should be a scalar dataset");
    }

    #[test]
    fn dimensions_vector_round_trips() {
        let group = Group::new()
            .with_dataset("dimensions", Dataset::vector_int(vec![13, 19], DataType::I32));
        let dims = load_dimensions_vector(&group, "dimensions", &Version::OLDEST).unwrap();
        assert_eq!(dims, vec![13, 19]);

        let group = Group::new()
            .with_dataset("dimensions", Dataset::vector_int(vec![13, -1], DataType::I32));
        let err = load_dimensions_vector(&group, "dimensions", &Version::OLDEST).unwrap_err();
        assert_eq!(err.to_string(), "'dimensions' should be non-negative");
    }

    #[test]
    fn placeholder_class_versus_exact_type() {
        let ds = Dataset::empty(DataType::I32, vec![5])
            .with_attribute("missing_placeholder", Attribute::scalar_int(-1, DataType::I16));

        // 1.0 only cares about the class.
        assert!(validate_missing_placeholder(&ds, &v(1, 0)).is_ok());

        // 1.1 wants the exact datatype.
        let err = validate_missing_placeholder(&ds, &v(1, 1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'missing_placeholder' should have the same type as its dataset"
        );

        // Pre-1.0 placeholders do not exist, so nothing is checked.
        assert!(validate_missing_placeholder(&ds, &Version::OLDEST).is_ok());
    }

    #[test]
    fn method_must_be_a_scalar_string() {
        let group = Group::new().with_dataset("method", Dataset::scalar_string("+"));
        assert_eq!(load_method(&group).unwrap(), "+");

        let group = Group::new().with_dataset("method", Dataset::scalar_int(1, DataType::I32));
        let err = load_method(&group).unwrap_err();
        assert_eq!(err.to_string(), "'method' should be a scalar string");
    }
}
