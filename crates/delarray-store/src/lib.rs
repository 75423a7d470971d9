//! In-memory model of the hierarchical container holding delayed-operation
//! trees.
//!
//! A tree is a [`Group`] whose children are further groups or [`Dataset`]s,
//! both optionally carrying named [`Attribute`]s -- the same shape as an
//! HDF5-style container. The validation engine consumes this purely through
//! the small access capability defined here: open a named child, test its
//! kind, introspect a datatype's class/width/signedness, and read scalar or
//! 1-dimensional control values.
//!
//! The whole model derives serde, so trees can be serialized to and loaded
//! from JSON; readers for other container formats only need to produce a
//! [`Group`] to plug into validation.
//!
//! # Modules
//!
//! - [`error`]: [`StoreError`] enum with all access failure modes
//! - [`datatype`]: [`DataType`] introspection (class, width, signedness)
//! - [`values`]: [`DataValues`] payload storage
//! - [`attribute`]: named metadata attached to groups and datasets
//! - [`dataset`]: typed, shaped data fields
//! - [`group`]: tree nodes and child access

pub mod attribute;
pub mod dataset;
pub mod datatype;
pub mod error;
pub mod group;
pub mod values;

// Re-export key types for ergonomic use.
pub use attribute::Attribute;
pub use dataset::Dataset;
pub use datatype::{DataType, TypeClass};
pub use error::StoreError;
pub use group::{ChildKind, Group, Node};
pub use values::DataValues;
