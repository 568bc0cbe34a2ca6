#![forbid(unsafe_code)]

//! Error taxonomy shared by property values and collections.
//!
//! # Failure Modes
//!
//! | Failure | Raised by | Caller sees |
//! |---------|-----------|-------------|
//! | Accessor tag differs from stored tag | `PropertyValue::get_*` | [`RtError::TypeMismatch`] |
//! | Boundary input outside native range | `PropertyValue::create_integer`, `create_float`, `TimeSpan::from_std` | [`RtError::Range`] |
//! | Absent key | `lookup`, `remove` | [`RtError::KeyNotFound`] |
//! | Mutation from inside a change callback | `insert`, `remove`, `clear` | [`RtError::Reentrancy`] |
//!
//! Every error is returned synchronously to the caller of the failing
//! operation and leaves the receiver unchanged.

use std::fmt;

use crate::property_type::PropertyType;

/// Errors from property value and collection operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtError {
    /// An accessor was invoked on a value carrying a different tag.
    TypeMismatch {
        expected: PropertyType,
        actual: PropertyType,
    },
    /// A boundary input does not fit the target type's native range.
    Range { target: PropertyType, value: String },
    /// The key is not present in the collection.
    KeyNotFound { key: String },
    /// A collection was mutated while it was delivering a change notification.
    Reentrancy,
}

impl RtError {
    /// Build a [`RtError::KeyNotFound`] from any debuggable key.
    pub fn key_not_found(key: &impl fmt::Debug) -> Self {
        Self::KeyNotFound {
            key: format!("{key:?}"),
        }
    }

    /// Build a [`RtError::Range`] from any displayable input.
    pub fn range(target: PropertyType, value: impl fmt::Display) -> Self {
        Self::Range {
            target,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for RtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {expected}, value is {actual}")
            }
            Self::Range { target, value } => {
                write!(f, "value {value} is out of range for {target}")
            }
            Self::KeyNotFound { key } => write!(f, "key not found: {key}"),
            Self::Reentrancy => {
                f.write_str("collection mutated from inside its own change notification")
            }
        }
    }
}

impl std::error::Error for RtError {}

/// Result alias used throughout the workspace.
pub type RtResult<T> = Result<T, RtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = RtError::TypeMismatch {
            expected: PropertyType::Double,
            actual: PropertyType::String,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: expected DOUBLE, value is STRING"
        );
        assert_eq!(
            RtError::range(PropertyType::UInt8, 256).to_string(),
            "value 256 is out of range for UINT8"
        );
        assert_eq!(
            RtError::key_not_found(&"world").to_string(),
            "key not found: \"world\""
        );
    }

    #[test]
    fn is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&RtError::Reentrancy);
    }
}
