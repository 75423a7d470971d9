//! Datatype introspection for stored fields.
//!
//! Mirrors the subset of HDF5 datatype queries that validation needs:
//! the broad class (integer/float/string) for pre-1.1 schemas, and exact
//! width/signedness for the bit-width ceilings of 1.1+ schemas.

use serde::{Deserialize, Serialize};

/// Broad datatype class, the only type information pre-1.1 schemas carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeClass {
    Integer,
    Float,
    String,
}

/// Stored datatype of a dataset or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// Integer with a bit width and signedness.
    Integer { width: u8, signed: bool },
    /// IEEE float with a bit width.
    Float { width: u8 },
    /// String, fixed or variable length; always UTF-8 representable here.
    String,
}

impl DataType {
    pub const I8: DataType = DataType::Integer {
        width: 8,
        signed: true,
    };
    pub const I16: DataType = DataType::Integer {
        width: 16,
        signed: true,
    };
    pub const I32: DataType = DataType::Integer {
        width: 32,
        signed: true,
    };
    pub const I64: DataType = DataType::Integer {
        width: 64,
        signed: true,
    };
    pub const U8: DataType = DataType::Integer {
        width: 8,
        signed: false,
    };
    pub const U16: DataType = DataType::Integer {
        width: 16,
        signed: false,
    };
    pub const U32: DataType = DataType::Integer {
        width: 32,
        signed: false,
    };
    pub const U64: DataType = DataType::Integer {
        width: 64,
        signed: false,
    };
    pub const F32: DataType = DataType::Float { width: 32 };
    pub const F64: DataType = DataType::Float { width: 64 };
    pub const STRING: DataType = DataType::String;

    /// The broad class of this datatype.
    pub fn class(&self) -> TypeClass {
        match self {
            DataType::Integer { .. } => TypeClass::Integer,
            DataType::Float { .. } => TypeClass::Float,
            DataType::String => TypeClass::String,
        }
    }

    /// `true` if every value of this datatype fits into an integer of
    /// `target_width` bits with the given signedness.
    ///
    /// A signed target admits narrower-or-equal signed types and strictly
    /// narrower unsigned types; an unsigned target admits only
    /// narrower-or-equal unsigned types, since any signed type may hold
    /// negative values.
    pub fn fits_integer(&self, target_width: u8, target_signed: bool) -> bool {
        match *self {
            DataType::Integer { width, signed } => {
                if target_signed {
                    if signed {
                        width <= target_width
                    } else {
                        width < target_width
                    }
                } else {
                    !signed && width <= target_width
                }
            }
            _ => false,
        }
    }

    /// `true` if every value of this datatype is exactly representable by a
    /// float of `target_width` bits. Integer types narrow enough to sit in
    /// the mantissa also qualify.
    pub fn fits_float(&self, target_width: u8) -> bool {
        match *self {
            DataType::Float { width } => width <= target_width,
            DataType::Integer { width, .. } => match target_width {
                64 => width <= 32,
                32 => width <= 16,
                _ => false,
            },
            DataType::String => false,
        }
    }

    /// `true` if this datatype is representable as a UTF-8 encoded string.
    pub fn is_string(&self) -> bool {
        matches!(self, DataType::String)
    }
}
