//! Unary math operations: elementwise transcendental and rounding methods.

use delarray_core::{ArrayDetails, ArrayType, Version};
use delarray_store::{Group, TypeClass};

use crate::error::ValidationError;
use crate::gated::load_method;
use crate::ops::{fetch_seed, require_numeric};
use crate::validate::Context;

const FLOAT_METHODS: &[&str] = &[
    "sqrt", "exp", "expm1", "log1p", "log2", "log10", "cos", "sin", "tan", "cospi", "sinpi",
    "tanpi", "acos", "asin", "atan", "cosh", "sinh", "tanh", "acosh", "asinh", "atanh", "gamma",
    "lgamma", "digamma", "trigamma", "ceiling", "floor", "trunc",
];

fn check_base(group: &Group, version: &Version) -> Result<(), ValidationError> {
    // 'base' is optional; natural log when absent.
    if !group.exists("base") {
        return Ok(());
    }
    let base = group.open_dataset("base")?;
    let well_typed = if version.lt(1, 1) {
        base.datatype.class() == TypeClass::Float
    } else {
        base.datatype.fits_float(64)
    };
    if !base.is_scalar() || !well_typed {
        return Err(ValidationError::contract("'base' should be a scalar float"));
    }
    base.read_scalar_f64("base")?;
    Ok(())
}

fn check_digits(group: &Group, version: &Version) -> Result<(), ValidationError> {
    let digits = group.open_dataset("digits")?;
    let well_typed = if version.lt(1, 1) {
        digits.datatype.class() == TypeClass::Integer
    } else {
        digits.datatype.fits_integer(32, true)
    };
    if !digits.is_scalar() || !well_typed {
        return Err(ValidationError::contract(
            "'digits' should be a scalar integer",
        ));
    }
    digits.read_scalar_i64("digits")?;
    Ok(())
}

pub fn validate_unary_math(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let seed = fetch_seed(group, "seed", version, context)?;
    require_numeric(&seed, "seed")?;

    let method = load_method(group)?;
    let array_type = match method.as_str() {
        "sign" => ArrayType::Integer,
        "abs" => seed.array_type.max(ArrayType::Integer),
        "log" => {
            check_base(group, version)?;
            ArrayType::Float
        }
        "round" | "signif" => {
            check_digits(group, version)?;
            ArrayType::Float
        }
        m if FLOAT_METHODS.contains(&m) => ArrayType::Float,
        _ => return Err(ValidationError::UnrecognizedMethod(method)),
    };

    Ok(ArrayDetails {
        array_type,
        dimensions: seed.dimensions,
    })
}
