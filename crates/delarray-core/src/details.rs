//! The validation result vocabulary.
//!
//! Every validated node in a delayed-operation tree reduces to an
//! [`ArrayDetails`]: the element type of the array plus its dimension
//! extents. No data values are ever materialized; validation only
//! propagates these two facts up the tree.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Element type of an array.
///
/// The declaration order doubles as the promotion lattice: operations on
/// mixed types generally promote to the larger of the two, e.g. an
/// `Integer` and `Float` addition produces a `Float`. `String` is
/// deliberately the top element and is excluded from arithmetic contexts.
/// Same-type operations are not guaranteed to preserve type, e.g.
/// `Integer` division produces a `Float`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ArrayType {
    Boolean,
    Integer,
    Float,
    String,
}

/// Dimension extents of an array. Most delayed trees describe matrices, so
/// four inline slots cover the common case without allocating.
pub type Dimensions = SmallVec<[u64; 4]>;

/// Type and dimensionality of an array after applying all delayed
/// operations beneath it.
///
/// The exact storage representation of the array is left to the embedding
/// application; no guarantees are made about precision, width or
/// signedness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayDetails {
    /// Element type of the array.
    pub array_type: ArrayType,
    /// Dimensions of the array. Extents are non-negative by construction.
    pub dimensions: Dimensions,
}

impl ArrayDetails {
    /// Creates details from a type and an iterable of extents.
    pub fn new<I>(array_type: ArrayType, dimensions: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        Self {
            array_type,
            dimensions: dimensions.into_iter().collect(),
        }
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_type_ordering_is_the_promotion_lattice() {
        assert!(ArrayType::Boolean < ArrayType::Integer);
        assert!(ArrayType::Integer < ArrayType::Float);
        assert!(ArrayType::Float < ArrayType::String);
        assert_eq!(
            ArrayType::Integer.max(ArrayType::Float),
            ArrayType::Float
        );
    }

    #[test]
    fn details_constructor_collects_dimensions() {
        let details = ArrayDetails::new(ArrayType::Integer, [13, 19]);
        assert_eq!(details.rank(), 2);
        assert_eq!(details.dimensions.as_slice(), &[13, 19]);
    }

    #[test]
    fn serde_roundtrip() {
        let details = ArrayDetails::new(ArrayType::Float, [20, 17, 5]);
        let json = serde_json::to_string(&details).unwrap();
        let back: ArrayDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(details, back);
    }
}
