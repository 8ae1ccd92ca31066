//! Runtime value type for accessor arguments and results.

use std::any::Any;
use std::fmt;

use crate::convert::IntoDynamic;

/// A dynamic value passed into or returned from an accessor method.
///
/// Every argument an accessor receives and every value it returns travels
/// through this enum, so the registry can store methods of different
/// signatures uniformly.
///
/// Note: Dynamic does not implement Clone because Native values and iterators
/// may not be cloneable. Use `Dynamic::clone_if_possible()` instead.
pub enum Dynamic {
    /// Void/empty (the result of a setter)
    Void,
    /// Absent value (`None` on the Rust side)
    Null,
    /// Integer value (all integer widths stored as i64)
    Int(i64),
    /// Floating point value (f32, f64 both stored as f64)
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value (owned)
    String(String),
    /// Key/value sequence produced by an iterator method
    Pairs(DynamicIter),
    /// Any other owned Rust value
    Native(Box<dyn Any + Send + Sync>),
}

impl Dynamic {
    /// Wrap an arbitrary Rust value.
    pub fn native<T: Any + Send + Sync>(value: T) -> Self {
        Dynamic::Native(Box::new(value))
    }

    /// Adapt an owned key/value sequence into a lazy [`Dynamic::Pairs`].
    ///
    /// The iterator is consumed on demand; keys and values are converted as
    /// they are yielded.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: Send + 'static,
        K: IntoDynamic,
        V: IntoDynamic,
    {
        Dynamic::Pairs(DynamicIter::new(pairs))
    }

    /// Get a human-readable name for this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Void => "void",
            Dynamic::Null => "null",
            Dynamic::Int(_) => "int",
            Dynamic::Float(_) => "float",
            Dynamic::Bool(_) => "bool",
            Dynamic::String(_) => "string",
            Dynamic::Pairs(_) => "pairs",
            Dynamic::Native(_) => "native",
        }
    }

    /// Check if this value is void.
    pub fn is_void(&self) -> bool {
        matches!(self, Dynamic::Void)
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    /// Borrow the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow a native payload as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Dynamic::Native(boxed) => boxed.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Clone the value if it holds neither a Native payload nor an iterator.
    pub fn clone_if_possible(&self) -> Option<Self> {
        match self {
            Dynamic::Void => Some(Dynamic::Void),
            Dynamic::Null => Some(Dynamic::Null),
            Dynamic::Int(v) => Some(Dynamic::Int(*v)),
            Dynamic::Float(v) => Some(Dynamic::Float(*v)),
            Dynamic::Bool(v) => Some(Dynamic::Bool(*v)),
            Dynamic::String(s) => Some(Dynamic::String(s.clone())),
            Dynamic::Pairs(_) | Dynamic::Native(_) => None,
        }
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Void => write!(f, "Void"),
            Dynamic::Null => write!(f, "Null"),
            Dynamic::Int(v) => write!(f, "Int({})", v),
            Dynamic::Float(v) => write!(f, "Float({})", v),
            Dynamic::Bool(v) => write!(f, "Bool({})", v),
            Dynamic::String(s) => write!(f, "String({:?})", s),
            Dynamic::Pairs(_) => write!(f, "Pairs(...)"),
            Dynamic::Native(_) => write!(f, "Native(...)"),
        }
    }
}

impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Dynamic::Void, Dynamic::Void) => true,
            (Dynamic::Null, Dynamic::Null) => true,
            (Dynamic::Int(a), Dynamic::Int(b)) => a == b,
            (Dynamic::Float(a), Dynamic::Float(b)) => a == b,
            (Dynamic::Bool(a), Dynamic::Bool(b)) => a == b,
            (Dynamic::String(a), Dynamic::String(b)) => a == b,
            // Native values and iterators can't be compared for equality
            _ => false,
        }
    }
}

/// Lazy sequence of `(key, value)` pairs returned by an iterator method.
pub struct DynamicIter {
    inner: Box<dyn Iterator<Item = (Dynamic, Dynamic)> + Send>,
}

impl DynamicIter {
    /// Wrap an owned key/value sequence, converting items as they are yielded.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: Send + 'static,
        K: IntoDynamic,
        V: IntoDynamic,
    {
        Self {
            inner: Box::new(
                pairs
                    .into_iter()
                    .map(|(key, value)| (key.into_dynamic(), value.into_dynamic())),
            ),
        }
    }
}

impl Iterator for DynamicIter {
    type Item = (Dynamic, Dynamic);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl fmt::Debug for DynamicIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicIter").finish_non_exhaustive()
    }
}
