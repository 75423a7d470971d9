//! Method sets and type promotion for arithmetic-like operations.
//!
//! The promotion lattice is `Boolean < Integer < Float < String`, encoded
//! directly in the ordering of [`ArrayType`]. Most binary rules reduce to
//! `max` over that lattice, with three carve-outs for division and the
//! modulo pair.

use delarray_core::ArrayType;

/// `true` if `method` is a recognized arithmetic operator token.
pub fn is_arithmetic_method(method: &str) -> bool {
    matches!(method, "+" | "-" | "/" | "*" | "%/%" | "^" | "%%")
}

/// `true` if `method` is a recognized comparison operator token.
pub fn is_comparison_method(method: &str) -> bool {
    matches!(method, "==" | "!=" | ">" | "<" | ">=" | "<=")
}

/// `true` if `method` is a recognized binary logic operator token.
pub fn is_logic_method(method: &str) -> bool {
    matches!(method, "&&" | "||")
}

/// `true` if `method` is a recognized special value check.
pub fn is_special_check_method(method: &str) -> bool {
    matches!(method, "is_nan" | "is_finite" | "is_infinite" | "is_missing")
}

/// Output type of an arithmetic operation between `first` and `second`.
///
/// `method` must already have passed [`is_arithmetic_method`]. The rules:
/// division always yields `Float`; integer division always yields
/// `Integer`; modulo yields `Integer` when both operands are at most
/// `Integer` and `Float` otherwise; two `Boolean` operands promote to
/// `Integer` under any other operator; everything else takes the lattice
/// maximum.
pub fn arithmetic_output_type(first: ArrayType, second: ArrayType, method: &str) -> ArrayType {
    match method {
        "/" => ArrayType::Float,
        "%/%" => ArrayType::Integer,
        "%%" => {
            if first <= ArrayType::Integer && second <= ArrayType::Integer {
                ArrayType::Integer
            } else {
                ArrayType::Float
            }
        }
        _ => {
            if first == ArrayType::Boolean && second == ArrayType::Boolean {
                ArrayType::Integer
            } else {
                first.max(second)
            }
        }
    }
}
