//! Validation of delayed-operation trees.
//!
//! A delayed-operation tree stores a recipe of array transforms (subsetting,
//! combining, arithmetic, ...) without materializing any data. This crate
//! walks such a tree inside a [`delarray_store::Group`], checks every node's
//! structural and type contract against the schema version it declares, and
//! computes the [`ArrayDetails`] (element type plus dimensions) of the root.
//!
//! The engine is a recursive descent dispatched on each node's discriminator
//! tags, with two open registries mapping array and operation subtype names
//! to validator functions. Applications can extend validation with their own
//! subtypes through [`Options`], and observe every visited node through
//! [`Callbacks`].
//!
//! Entry points:
//! - [`validate`]: version read from the root's `delayed_version` attribute.
//! - [`validate_with_version`]: explicit version override.
//! - [`validate_with_callbacks`] / [`validate_with_options`]: instrumented
//!   or reconfigured runs.
//!
//! Validation is synchronous and purely recursive; depth is bounded only by
//! the call stack, so pathologically deep trees can overflow it. Callers
//! handling untrusted input should impose their own depth limit.

pub mod arrays;
pub mod dimnames;
pub mod error;
pub mod gated;
pub mod list;
pub mod ops;
pub mod promote;
pub mod typeutil;
pub mod validate;

pub use delarray_core::{ArrayDetails, ArrayType, Dimensions, Version};

pub use error::ValidationError;
pub use list::{validate_list, ListDetails};
pub use validate::{
    default_array_registry, default_operation_registry, extract_version, validate,
    validate_with_callbacks, validate_with_options, validate_with_version, Callbacks, Context,
    Options, Registry, ValidatorFn,
};
