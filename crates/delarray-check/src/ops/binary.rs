//! Binary operations between two independently validated operands.

use delarray_core::{ArrayDetails, ArrayType, Version};
use delarray_store::Group;

use crate::error::ValidationError;
use crate::gated::load_method;
use crate::ops::{fetch_seed, require_numeric};
use crate::promote::{
    arithmetic_output_type, is_arithmetic_method, is_comparison_method, is_logic_method,
};
use crate::validate::Context;

fn fetch_operands(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<(ArrayDetails, ArrayDetails), ValidationError> {
    let left = fetch_seed(group, "left", version, context)?;
    let right = fetch_seed(group, "right", version, context)?;
    if left.dimensions != right.dimensions {
        return Err(ValidationError::SameDimensions {
            left: "left",
            right: "right",
        });
    }
    Ok((left, right))
}

pub fn validate_binary_arithmetic(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let (left, right) = fetch_operands(group, version, context)?;
    require_numeric(&left, "left")?;
    require_numeric(&right, "right")?;

    let method = load_method(group)?;
    if !is_arithmetic_method(&method) {
        return Err(ValidationError::UnrecognizedMethod(method));
    }

    Ok(ArrayDetails {
        array_type: arithmetic_output_type(left.array_type, right.array_type, &method),
        dimensions: left.dimensions,
    })
}

pub fn validate_binary_comparison(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let (left, right) = fetch_operands(group, version, context)?;
    if (left.array_type == ArrayType::String) != (right.array_type == ArrayType::String) {
        return Err(ValidationError::contract(
            "both or none of 'left' and 'right' should contain strings",
        ));
    }

    let method = load_method(group)?;
    if !is_comparison_method(&method) {
        return Err(ValidationError::UnrecognizedMethod(method));
    }

    Ok(ArrayDetails {
        array_type: ArrayType::Boolean,
        dimensions: left.dimensions,
    })
}

pub fn validate_binary_logic(
    group: &Group,
    version: &Version,
    context: &Context<'_>,
) -> Result<ArrayDetails, ValidationError> {
    let (left, right) = fetch_operands(group, version, context)?;
    require_numeric(&left, "left")?;
    require_numeric(&right, "right")?;

    let method = load_method(group)?;
    if !is_logic_method(&method) {
        return Err(ValidationError::UnrecognizedMethod(method));
    }

    Ok(ArrayDetails {
        array_type: ArrayType::Boolean,
        dimensions: left.dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Options;
    use delarray_store::{Attribute, DataType, Dataset};

    fn dense_seed(datatype: DataType, shape: Vec<u64>) -> Group {
        Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("array"))
            .with_attribute("delayed_array", Attribute::scalar_string("dense array"))
            .with_dataset("data", Dataset::empty(datatype, shape))
            .with_dataset("native", Dataset::scalar_int(1, DataType::I8))
    }

    fn binary(method: &str, left: DataType, right: DataType) -> Group {
        Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("operation"))
            .with_group("left", dense_seed(left, vec![13, 19]))
            .with_group("right", dense_seed(right, vec![13, 19]))
            .with_dataset("method", Dataset::scalar_string(method))
    }

    fn check<F>(group: &Group, f: F) -> Result<ArrayDetails, ValidationError>
    where
        F: Fn(&Group, &Version, &Context<'_>) -> Result<ArrayDetails, ValidationError>,
    {
        let options = Options::default();
        let context = Context::new(&options);
        f(group, &Version::OLDEST, &context)
    }

    #[test]
    fn arithmetic_promotes_across_operands() {
        let details = check(
            &binary("+", DataType::I32, DataType::F64),
            validate_binary_arithmetic,
        )
        .unwrap();
        assert_eq!(details.array_type, ArrayType::Float);
        assert_eq!(details.dimensions.as_slice(), &[13, 19]);

        let details = check(
            &binary("%/%", DataType::F64, DataType::F64),
            validate_binary_arithmetic,
        )
        .unwrap();
        assert_eq!(details.array_type, ArrayType::Integer);
    }

    #[test]
    fn shapes_must_agree() {
        let mut group = binary("+", DataType::I32, DataType::I32);
        group.insert_group("right", dense_seed(DataType::I32, vec![13, 18]));
        let err = check(&group, validate_binary_arithmetic).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'left' and 'right' should have the same dimensions"
        );
    }

    #[test]
    fn comparison_requires_string_agreement() {
        let details = check(
            &binary("==", DataType::STRING, DataType::STRING),
            validate_binary_comparison,
        )
        .unwrap();
        assert_eq!(details.array_type, ArrayType::Boolean);

        let err = check(
            &binary("==", DataType::STRING, DataType::I32),
            validate_binary_comparison,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both or none"));
    }

    #[test]
    fn logic_rejects_strings_and_yields_boolean() {
        let details = check(
            &binary("&&", DataType::I8, DataType::F64),
            validate_binary_logic,
        )
        .unwrap();
        assert_eq!(details.array_type, ArrayType::Boolean);

        let err = check(
            &binary("||", DataType::STRING, DataType::STRING),
            validate_binary_logic,
        )
        .unwrap_err();
        assert!(err.to_string().contains("integer, float or boolean"));
    }

    #[test]
    fn methods_are_validated_per_family() {
        let err = check(&binary("==", DataType::I32, DataType::I32), validate_binary_arithmetic)
            .unwrap_err();
        assert_eq!(err.to_string(), "unrecognized 'method' (==)");

        let err = check(&binary("+", DataType::I32, DataType::I32), validate_binary_logic)
            .unwrap_err();
        assert_eq!(err.to_string(), "unrecognized 'method' (+)");
    }
}
