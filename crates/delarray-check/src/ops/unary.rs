//! Unary operations combining a seed with an optional scalar or vector
//! `value` operand: arithmetic, comparison, logic and special value checks.

use delarray_core::{ArrayDetails, ArrayType, Version};
use delarray_store::Group;

use crate::error::ValidationError;
use crate::gated::{check_along, load_method, load_side, validate_missing_placeholder};
use crate::ops::{fetch_seed, require_numeric};
use crate::promote::{
    arithmetic_output_type, is_arithmetic_method, is_comparison_method,
    is_special_check_method,
};
use crate::typeutil;
use crate::validate::Context;

// Loads the `value` operand: a scalar, or a 1-dimensional vector broadcast
// against the seed axis named by `along`. Returns the operand's element
// type. `operation` names the calling operation in error messages.
fn load_value_operand(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
    seed_dimensions: &[u64],
    operation: &str,
    allow_string: bool,
) -> Result<ArrayType, ValidationError> {
    let value = group.open_dataset("value")?;

    let value_type = if version.lt(1, 1) {
        typeutil::translate_type_0_0(value.datatype.class())
    } else {
        let declared = typeutil::fetch_data_type(value)?;
        let value_type = typeutil::translate_type_1_1(&declared);
        typeutil::check_type_1_1(value, value_type)?;
        value_type
    };
    if !allow_string && value_type == ArrayType::String {
        return Err(ValidationError::contract(format!(
            "'value' should contain numeric or boolean values for an {operation}"
        )));
    }

    if !context.details_only() {
        validate_missing_placeholder(value, version)?;
    }

    match value.rank() {
        0 => {}
        1 => {
            check_along(group, version, seed_dimensions, value.shape[0])?;
        }
        _ => {
            return Err(ValidationError::contract(format!(
                "'value' dataset should be scalar or 1-dimensional for an {operation}"
            )));
        }
    }

    Ok(value_type)
}

fn load_two_sided(group: &Group) -> Result<(), ValidationError> {
    let side = load_side(group)?;
    if side != "left" && side != "right" {
        return Err(ValidationError::UnrecognizedSide(side));
    }
    Ok(())
}

pub fn validate_unary_arithmetic(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let seed = fetch_seed(group, "seed", version, context)?;
    require_numeric(&seed, "seed")?;

    let method = load_method(group)?;
    if !is_arithmetic_method(&method) {
        return Err(ValidationError::UnrecognizedMethod(method));
    }

    let side = load_side(group)?;
    // Without an operand, only identity and negation make sense; booleans
    // still promote to integer, as an implicit multiplication by one.
    let mut operand_type = ArrayType::Integer;
    if side == "none" {
        if method != "+" && method != "-" {
            return Err(ValidationError::contract(format!(
                "'side' cannot be 'none' for method '{method}'"
            )));
        }
    } else if side == "left" || side == "right" {
        operand_type = load_value_operand(
            group,
            version,
            context,
            &seed.dimensions,
            "unary arithmetic operation",
            false,
        )?;
    } else {
        return Err(ValidationError::UnrecognizedSide(side));
    }

    Ok(ArrayDetails {
        array_type: arithmetic_output_type(operand_type, seed.array_type, &method),
        dimensions: seed.dimensions,
    })
}

pub fn validate_unary_comparison(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let seed = fetch_seed(group, "seed", version, context)?;

    let method = load_method(group)?;
    if !is_comparison_method(&method) {
        return Err(ValidationError::UnrecognizedMethod(method));
    }
    load_two_sided(group)?;

    let value_type = load_value_operand(
        group,
        version,
        context,
        &seed.dimensions,
        "unary comparison operation",
        true,
    )?;
    if (seed.array_type == ArrayType::String) != (value_type == ArrayType::String) {
        return Err(ValidationError::contract(
            "both or none of 'seed' and 'value' should contain strings",
        ));
    }

    Ok(ArrayDetails {
        array_type: ArrayType::Boolean,
        dimensions: seed.dimensions,
    })
}

pub fn validate_unary_logic(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let seed = fetch_seed(group, "seed", version, context)?;
    require_numeric(&seed, "seed")?;

    let method = load_method(group)?;
    if method != "!" && method != "&&" && method != "||" {
        return Err(ValidationError::UnrecognizedMethod(method));
    }

    // Negation takes no operand; the binary connectives need one.
    if method != "!" {
        load_two_sided(group)?;
        load_value_operand(
            group,
            version,
            context,
            &seed.dimensions,
            "unary logic operation",
            false,
        )?;
    }

    Ok(ArrayDetails {
        array_type: ArrayType::Boolean,
        dimensions: seed.dimensions,
    })
}

pub fn validate_unary_special_check(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let seed = fetch_seed(group, "seed", version, context)?;
    require_numeric(&seed, "seed")?;

    let method = load_method(group)?;
    if !is_special_check_method(&method) {
        return Err(ValidationError::UnrecognizedMethod(method));
    }

    Ok(ArrayDetails {
        array_type: ArrayType::Boolean,
        dimensions: seed.dimensions,
    })
}
