//! Error types for shape definition and bit field access.

use std::fmt;

/// Errors produced when defining a [crate::shape::Shape]. These are configuration errors: no
/// shape exists after one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefineError {
    /// The shape slot already holds a definition.
    AlreadyDefined,
    /// The same bit name appears more than once.
    DuplicateName(String),
    /// A bit name is empty or only whitespace.
    EmptyName,
    /// More names than bits in the integer width.
    TooManyNames { count: usize, width: u32 },
    /// Width is 0 or greater than 64 bits.
    InvalidWidth(u32),
}

impl fmt::Display for DefineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefineError::AlreadyDefined => {
                write!(f, "bits already defined, define all bits in a single statement")
            }
            DefineError::DuplicateName(name) => write!(f, "bit names are not unique: {}", name),
            DefineError::EmptyName => write!(f, "bit name is empty"),
            DefineError::TooManyNames { count, width } => {
                write!(f, "too many bit names ({}) for {}-bit integer", count, width)
            }
            DefineError::InvalidWidth(width) => write!(f, "invalid integer width: {}", width),
        }
    }
}

impl std::error::Error for DefineError {}

/// Errors produced by a [crate::bit_field::BitField] at access time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// Name is not part of the shape.
    UnknownBit(String),
    /// Raw value has bits set beyond the defined names (strict shapes only).
    OutOfRange(i64),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::UnknownBit(name) => write!(f, "unknown bit name: {}", name),
            ViewError::OutOfRange(raw) => {
                write!(f, "raw value {:#x} has bits outside the defined names", raw)
            }
        }
    }
}

impl std::error::Error for ViewError {}
