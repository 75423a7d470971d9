//! Access errors for the container model.
//!
//! Uses `thiserror` for structured, matchable variants. Messages embed the
//! name of the offending child or field so validation errors read as a
//! breadcrumb trail.

use thiserror::Error;

/// Errors produced while navigating or reading a container tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A named child was expected to be a group but is missing or a dataset.
    #[error("expected a group at '{0}'")]
    ExpectedGroup(String),

    /// A named child was expected to be a dataset but is missing or a group.
    #[error("expected a dataset at '{0}'")]
    ExpectedDataset(String),

    /// A named attribute is missing.
    #[error("expected an attribute at '{0}'")]
    ExpectedAttribute(String),

    /// A field expected to be scalar has one or more dimensions.
    #[error("'{0}' should be a scalar")]
    NotScalar(String),

    /// A field expected to be a vector is scalar or multi-dimensional.
    #[error("'{0}' should be 1-dimensional")]
    Not1Dimensional(String),

    /// A field's datatype is not representable as a UTF-8 encoded string.
    #[error("'{0}' should have a datatype that can be represented by a UTF-8 encoded string")]
    NotString(String),

    /// A field's datatype is not of integer class.
    #[error("'{0}' should have an integer datatype")]
    NotInteger(String),

    /// A field's datatype is not of float class.
    #[error("'{0}' should have a float datatype")]
    NotFloat(String),

    /// An unsigned read encountered a negative stored value.
    #[error("'{0}' should not contain negative values")]
    NegativeValue(String),

    /// A read requested values that were not loaded into the model.
    #[error("values of '{0}' are not available")]
    MissingValues(String),
}
