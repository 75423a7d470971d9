//! Shared vocabulary for delayed-operation trees: the [`ArrayDetails`]
//! produced by validation, and the schema [`Version`] that gates it.

pub mod details;
pub mod version;

// Re-export commonly used types
pub use details::{ArrayDetails, ArrayType, Dimensions};
pub use version::{parse_version_string, Version, VersionError};
