//! Error types for property access.
//!
//! ```text
//! PropertyError (what a property access reports)
//! ├── NoSuchProperty       - no accessor satisfies the request
//! ├── MismatchedProperties - getter/setter arities don't pair up
//! ├── InvalidProperty      - lone accessor with an unsupported arity
//! └── Native(NativeError)  - the accessor was found but invoking it failed
//!     └── Conversion(ConversionError)
//! ```

use std::fmt;

use thiserror::Error;

use crate::method::{MethodCandidate, MethodPrefix};

// ============================================================================
// Conversion Errors
// ============================================================================

/// Errors that can occur when converting between Rust values and [`Dynamic`](crate::Dynamic).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Type mismatch during conversion
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Integer overflow during conversion
    #[error("integer overflow: value {value} does not fit in {target_type}")]
    IntegerOverflow { value: i64, target_type: &'static str },

    /// Float conversion error
    #[error("float conversion error: value {value} cannot be represented as {target_type}")]
    FloatConversion {
        value: f64,
        target_type: &'static str,
    },
}

// ============================================================================
// Native Errors
// ============================================================================

/// Errors raised while invoking an accessor method.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NativeError {
    /// Error converting arguments or return values
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Wrong number of arguments for the method
    #[error("method '{method}' expects {expected} arguments, got {actual}")]
    ArgumentCount {
        method: String,
        expected: usize,
        actual: usize,
    },

    /// A generated invoker ran out of arguments
    #[error("missing argument at position {index}")]
    MissingArgument { index: usize },

    /// An iterator method returned something that is not a key/value sequence
    #[error("iterator method '{method}' returned {actual}, expected a key/value sequence")]
    NotIterable { method: String, actual: &'static str },

    /// Generic native error
    #[error("native error: {message}")]
    Other { message: String },
}

impl NativeError {
    /// Create a generic native error.
    pub fn other(message: impl Into<String>) -> Self {
        NativeError::Other {
            message: message.into(),
        }
    }
}

// ============================================================================
// Property Errors
// ============================================================================

/// Type-erased description of a method carried by build errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// Name of the type declaring the method.
    pub type_name: &'static str,
    /// Method name as declared.
    pub name: String,
    /// Recognised prefix.
    pub prefix: MethodPrefix,
    /// Number of parameters, excluding the receiver.
    pub arity: usize,
}

impl<T> From<&MethodCandidate<T>> for MethodRef {
    fn from(candidate: &MethodCandidate<T>) -> Self {
        Self {
            type_name: candidate.info.type_name(),
            name: candidate.info.name().to_owned(),
            prefix: candidate.prefix,
            arity: candidate.info.arity(),
        }
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}/{}", self.type_name, self.name, self.arity)
    }
}

/// Failure of a single property access.
///
/// Build errors (`MismatchedProperties`, `InvalidProperty`) are reported by
/// every access to the offending type until its declaration is fixed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// No accessor satisfies the requested capability.
    #[error("Property [{property}] does not exist.")]
    NoSuchProperty { property: String },

    /// Both accessors exist but their arities don't form a scalar or array pair.
    #[error("Declaration of property [{}] is inconsistent.", .getter.name)]
    MismatchedProperties { getter: MethodRef, setter: MethodRef },

    /// A lone accessor has an arity outside the supported range.
    #[error("Property [{}] has an invalid number of arguments.", .method.name)]
    InvalidProperty { method: MethodRef },

    /// The accessor was found but invoking it failed.
    #[error(transparent)]
    Native(#[from] NativeError),
}

impl PropertyError {
    /// Create a "no such property" error.
    pub fn no_such_property(property: impl Into<String>) -> Self {
        PropertyError::NoSuchProperty {
            property: property.into(),
        }
    }

    /// Check whether this error was raised while building a type's property map.
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            PropertyError::MismatchedProperties { .. } | PropertyError::InvalidProperty { .. }
        )
    }
}

impl From<ConversionError> for PropertyError {
    fn from(err: ConversionError) -> Self {
        PropertyError::Native(NativeError::Conversion(err))
    }
}
