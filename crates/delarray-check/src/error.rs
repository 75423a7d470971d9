//! Validation errors.
//!
//! Every failure is a hard rejection of the input tree; nothing is retried
//! or coerced. Child failures are wrapped rather than replaced, so the
//! `Display` output of the root error is a breadcrumb trail from the root
//! node down to the precise failing field, e.g.
//! `failed to validate delayed operation of type 'combine'; failed to
//! validate 'seeds/1'; expected a dataset at 'data'`.

use delarray_core::VersionError;
use delarray_store::StoreError;
use thiserror::Error;

/// An error raised while validating a delayed-operation tree.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The `delayed_type` discriminator is not `"array"` or `"operation"`.
    #[error("unknown delayed type '{0}'")]
    UnknownDelayedType(String),

    /// No validator is registered for the `delayed_array` subtype.
    #[error("unknown array type")]
    UnknownArrayType,

    /// No validator is registered for the `delayed_operation` subtype.
    #[error("unknown operation type")]
    UnknownOperationType,

    /// An array node's validator failed.
    #[error("failed to validate delayed array of type '{name}'; {source}")]
    Array {
        name: String,
        #[source]
        source: Box<ValidationError>,
    },

    /// An operation node's validator failed.
    #[error("failed to validate delayed operation of type '{name}'; {source}")]
    Operation {
        name: String,
        #[source]
        source: Box<ValidationError>,
    },

    /// A named child node failed to validate.
    #[error("failed to validate '{name}'; {source}")]
    Child {
        name: String,
        #[source]
        source: Box<ValidationError>,
    },

    /// A list-typed child group failed its list contract.
    #[error("failed to load '{name}' list; {source}")]
    List {
        name: String,
        #[source]
        source: Box<ValidationError>,
    },

    /// Two operands that must agree in shape do not.
    #[error("'{left}' and '{right}' should have the same dimensions")]
    SameDimensions {
        left: &'static str,
        right: &'static str,
    },

    /// An operator token is not part of the operation's method set.
    #[error("unrecognized 'method' ({0})")]
    UnrecognizedMethod(String),

    /// A side token is not part of the accepted set.
    #[error("unrecognized 'side' ({0})")]
    UnrecognizedSide(String),

    /// A pre-1.1 integer field holds a negative value.
    #[error("'{0}' should be non-negative")]
    Negative(String),

    /// A 1.1+ integer field's datatype exceeds the unsigned 64-bit ceiling.
    #[error("'{0}' should have a datatype that fits in a 64-bit unsigned integer")]
    Exceeds64BitUnsigned(String),

    /// An `along` axis selector is not below the seed rank.
    #[error("'along' should be less than the seed dimensionality")]
    AlongTooLarge,

    /// Combined seeds disagree on a non-concatenation extent.
    #[error("inconsistent dimension extents between seeds")]
    InconsistentExtents,

    /// Combined seeds disagree on rank.
    #[error("dimensionality mismatch between seeds")]
    DimensionalityMismatch,

    /// Container access failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A version string failed to parse.
    #[error(transparent)]
    Version(#[from] VersionError),

    /// A one-off structural, type or value contract was violated.
    #[error("{0}")]
    Contract(String),
}

impl ValidationError {
    pub(crate) fn contract(message: impl Into<String>) -> Self {
        ValidationError::Contract(message.into())
    }

    pub(crate) fn child(name: impl Into<String>, source: ValidationError) -> Self {
        ValidationError::Child {
            name: name.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn list(name: impl Into<String>, source: ValidationError) -> Self {
        ValidationError::List {
            name: name.into(),
            source: Box::new(source),
        }
    }
}
