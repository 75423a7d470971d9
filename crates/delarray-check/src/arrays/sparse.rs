//! The compressed sparse matrix leaf.
//!
//! The layout is CSC by default. From 1.1, an optional `by_column` flag can
//! flip the major axis to rows (CSR); this swaps which shape dimension
//! bounds the `indices` values and which dimension sizes `indptr`.

use delarray_core::{ArrayDetails, Version};
use delarray_store::{Group, TypeClass};

use crate::arrays::derive_dataset_type;
use crate::dimnames::validate_dimnames;
use crate::error::ValidationError;
use crate::gated::validate_missing_placeholder;
use crate::validate::Context;

fn load_shape(group: &Group, version: &Version) -> Result<(u64, u64), ValidationError> {
    let shape = group.open_dataset("shape")?;
    if shape.rank() != 1 || shape.shape[0] != 2 {
        return Err(ValidationError::contract("'shape' should have length 2"));
    }
    if shape.datatype.class() != TypeClass::Integer {
        return Err(ValidationError::contract(
            "'shape' should be an integer dataset",
        ));
    }
    if !version.lt(1, 1) && !shape.datatype.fits_integer(64, false) {
        return Err(ValidationError::Exceeds64BitUnsigned("shape".to_string()));
    }
    let raw = shape.read_i64_vec("shape")?;
    let rows = u64::try_from(raw[0])
        .map_err(|_| ValidationError::contract("'shape' should contain non-negative values"))?;
    let cols = u64::try_from(raw[1])
        .map_err(|_| ValidationError::contract("'shape' should contain non-negative values"))?;
    Ok((rows, cols))
}

fn load_by_column(group: &Group, version: &Version) -> Result<bool, ValidationError> {
    if version.lt(1, 1) || !group.exists("by_column") {
        return Ok(true);
    }
    let flag = group.open_dataset("by_column")?;
    if !flag.is_scalar() {
        return Err(ValidationError::contract("'by_column' should be a scalar"));
    }
    if !flag.datatype.fits_integer(8, true) {
        return Err(ValidationError::contract(
            "'by_column' should have a datatype that fits into an 8-bit signed integer",
        ));
    }
    Ok(flag.read_scalar_i64("by_column")? != 0)
}

/// Validates a sparse matrix and reports its type and `(rows, cols)`.
pub fn validate_sparse_matrix(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let (rows, cols) = load_shape(group, version)?;

    let data = group.open_dataset("data")?;
    if data.rank() != 1 {
        return Err(ValidationError::contract(
            "'data' should be a 1-dimensional dataset",
        ));
    }
    let array_type = derive_dataset_type(data, version)?;

    if context.details_only() {
        return Ok(ArrayDetails::new(array_type, [rows, cols]));
    }
    validate_missing_placeholder(data, version)?;

    let indices = group.open_dataset("indices")?;
    if indices.rank() != 1 || indices.datatype.class() != TypeClass::Integer {
        return Err(ValidationError::contract(
            "'indices' should be a 1-dimensional integer dataset",
        ));
    }
    if !version.lt(1, 1) && !indices.datatype.fits_integer(64, false) {
        return Err(ValidationError::Exceeds64BitUnsigned("indices".to_string()));
    }
    if indices.shape[0] != data.shape[0] {
        return Err(ValidationError::contract(
            "'data' and 'indices' should have the same length",
        ));
    }

    let by_column = load_by_column(group, version)?;
    let (major, minor, major_name, minor_name) = if by_column {
        (cols, rows, "columns", "rows")
    } else {
        (rows, cols, "rows", "columns")
    };

    let indptr = group.open_dataset("indptr")?;
    if indptr.rank() != 1 || indptr.datatype.class() != TypeClass::Integer {
        return Err(ValidationError::contract(
            "'indptr' should be a 1-dimensional integer dataset",
        ));
    }
    if !version.lt(1, 1) && !indptr.datatype.fits_integer(64, false) {
        return Err(ValidationError::Exceeds64BitUnsigned("indptr".to_string()));
    }
    if indptr.shape[0] != major + 1 {
        return Err(ValidationError::contract(format!(
            "'indptr' should have length equal to the number of {major_name} plus 1"
        )));
    }
    let pointers = indptr.read_i64_vec("indptr")?;
    if pointers.first() != Some(&0) {
        return Err(ValidationError::contract(
            "first entry of 'indptr' should be zero",
        ));
    }
    if *pointers.last().unwrap_or(&0) != data.shape[0] as i64 {
        return Err(ValidationError::contract(
            "last entry of 'indptr' should be equal to the length of 'indices'",
        ));
    }
    if pointers.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(ValidationError::contract(
            "'indptr' should be sorted in a non-decreasing manner",
        ));
    }

    let index_values = indices.read_i64_vec("indices")?;
    for slice in pointers.windows(2) {
        let (start, end) = (slice[0] as usize, slice[1] as usize);
        let mut last: Option<i64> = None;
        for &value in &index_values[start..end] {
            if value < 0 {
                return Err(ValidationError::contract(
                    "'indices' should contain non-negative values",
                ));
            }
            if value as u64 >= minor {
                return Err(ValidationError::contract(format!(
                    "'indices' should be less than the number of {minor_name}"
                )));
            }
            if let Some(previous) = last {
                if value <= previous {
                    return Err(ValidationError::contract(format!(
                        "'indices' should be strictly increasing within each {}",
                        if by_column { "column" } else { "row" }
                    )));
                }
            }
            last = Some(value);
        }
    }

    if group.exists("dimnames") {
        validate_dimnames(group, &[rows, cols], version)?;
    }

    Ok(ArrayDetails::new(array_type, [rows, cols]))
}
