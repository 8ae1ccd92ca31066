//! Conversion traits for accessor argument extraction and return values.
//!
//! - [`FromDynamic`]: Extract a Rust value from a [`Dynamic`]
//! - [`IntoDynamic`]: Convert a Rust value into a [`Dynamic`]
//!
//! ## Supported Types
//!
//! - Integers: `i8`, `i16`, `i32`, `i64`, `isize`, `u8`, `u16`, `u32`, `u64`, `usize`
//!
//! Integers travel as `i64`. A `usize` above `i64::MAX` wraps negative on the
//! way in and fails with `IntegerOverflow` on the way back out; `u64` is the
//! only type whose full range round-trips.
//! - Floats: `f32`, `f64`
//! - Boolean: `bool`
//! - Strings: `String` (and `&str` / `char` into)
//! - Unit: `()` (void)
//! - `Option<T>` (None is [`Dynamic::Null`])
//! - `Dynamic` itself, passed through untouched

use crate::error::{ConversionError, NativeError};
use crate::runtime::Dynamic;

/// Extract a value from a [`Dynamic`].
pub trait FromDynamic: Sized {
    /// Extract a value, consuming the dynamic.
    ///
    /// Returns a `ConversionError` if the value has an incompatible type.
    fn from_dynamic(value: Dynamic) -> Result<Self, ConversionError>;
}

/// Convert a value into a [`Dynamic`].
pub trait IntoDynamic {
    /// Convert this value into a Dynamic.
    fn into_dynamic(self) -> Dynamic;
}

/// Pull the next positional argument and convert it.
///
/// Used by generated invokers; `index` is only used for the error message.
pub fn take_arg<A: FromDynamic>(
    args: &mut std::vec::IntoIter<Dynamic>,
    index: usize,
) -> Result<A, NativeError> {
    let value = args.next().ok_or(NativeError::MissingArgument { index })?;
    Ok(A::from_dynamic(value)?)
}

fn mismatch(expected: &'static str, actual: &Dynamic) -> ConversionError {
    ConversionError::TypeMismatch {
        expected,
        actual: actual.type_name(),
    }
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_dynamic_int {
    ($($ty:ty),*) => {
        $(
            impl FromDynamic for $ty {
                fn from_dynamic(value: Dynamic) -> Result<Self, ConversionError> {
                    match value {
                        Dynamic::Int(v) => <$ty>::try_from(v).map_err(|_| {
                            ConversionError::IntegerOverflow {
                                value: v,
                                target_type: stringify!($ty),
                            }
                        }),
                        other => Err(mismatch("int", &other)),
                    }
                }
            }

            impl IntoDynamic for $ty {
                fn into_dynamic(self) -> Dynamic {
                    Dynamic::Int(self as i64)
                }
            }
        )*
    };
}

// usize wraps above i64::MAX; from_dynamic then rejects the negative value
impl_dynamic_int!(i8, i16, i32, i64, isize, u8, u16, u32, usize);

// u64 reinterprets the bits so the full range survives a round trip
impl FromDynamic for u64 {
    fn from_dynamic(value: Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Int(v) => Ok(v as u64),
            other => Err(mismatch("int", &other)),
        }
    }
}

impl IntoDynamic for u64 {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Int(self as i64)
    }
}

// ============================================================================
// Float implementations
// ============================================================================

impl FromDynamic for f32 {
    fn from_dynamic(value: Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Float(v) => {
                if !v.is_finite() || (v <= f32::MAX as f64 && v >= f32::MIN as f64) {
                    Ok(v as f32)
                } else {
                    Err(ConversionError::FloatConversion {
                        value: v,
                        target_type: "f32",
                    })
                }
            }
            Dynamic::Int(v) => Ok(v as f32),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl IntoDynamic for f32 {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Float(self as f64)
    }
}

impl FromDynamic for f64 {
    fn from_dynamic(value: Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Float(v) => Ok(v),
            Dynamic::Int(v) => Ok(v as f64),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl IntoDynamic for f64 {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Float(self)
    }
}

// ============================================================================
// Bool, string and unit
// ============================================================================

impl FromDynamic for bool {
    fn from_dynamic(value: Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Bool(v) => Ok(v),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl IntoDynamic for bool {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Bool(self)
    }
}

impl FromDynamic for String {
    fn from_dynamic(value: Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::String(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl IntoDynamic for String {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self)
    }
}

impl IntoDynamic for &str {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self.to_owned())
    }
}

impl IntoDynamic for char {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self.to_string())
    }
}

impl FromDynamic for () {
    fn from_dynamic(value: Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Void => Ok(()),
            other => Err(mismatch("void", &other)),
        }
    }
}

impl IntoDynamic for () {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Void
    }
}

// ============================================================================
// Option and passthrough
// ============================================================================

impl<T: FromDynamic> FromDynamic for Option<T> {
    fn from_dynamic(value: Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Null => Ok(None),
            other => T::from_dynamic(other).map(Some),
        }
    }
}

impl<T: IntoDynamic> IntoDynamic for Option<T> {
    fn into_dynamic(self) -> Dynamic {
        match self {
            Some(value) => value.into_dynamic(),
            None => Dynamic::Null,
        }
    }
}

impl FromDynamic for Dynamic {
    fn from_dynamic(value: Dynamic) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl IntoDynamic for Dynamic {
    fn into_dynamic(self) -> Dynamic {
        self
    }
}
