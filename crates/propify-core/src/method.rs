//! Introspected methods and the capability that lists them.

use std::fmt;
use std::sync::Arc;

use crate::error::NativeError;
use crate::runtime::Dynamic;
use crate::visibility::Visibility;

/// Type-erased invoker for a method of `T`.
type Invoker<T> = dyn Fn(&mut T, Vec<Dynamic>) -> Result<Dynamic, NativeError> + Send + Sync;

/// Lists the methods of a type so its properties can be discovered.
///
/// Normally generated by `#[propify::methods]` on an inherent `impl` block.
/// Hand-written implementations must report every method with its declared
/// visibility and parameter count (excluding the receiver).
///
/// `methods()` is called at most once per registry, under the registry's
/// build lock. It must not access properties of `Self` through the same
/// registry.
///
/// Diagnostics name the type with [`std::any::type_name`].
pub trait Introspect: Sized + 'static {
    /// All methods of the type.
    fn methods() -> Vec<MethodInfo<Self>>;
}

/// One method of `T`: name, visibility, arity and an invoker.
///
/// The invoker is shared, so cloning a `MethodInfo` is cheap.
pub struct MethodInfo<T> {
    type_name: &'static str,
    name: String,
    visibility: Visibility,
    arity: usize,
    invoker: Arc<Invoker<T>>,
}

impl<T> MethodInfo<T> {
    /// Describe a method.
    ///
    /// `invoker` receives exactly `arity` arguments; [`MethodInfo::invoke`]
    /// rejects any other count before calling it.
    pub fn new<F>(name: impl Into<String>, visibility: Visibility, arity: usize, invoker: F) -> Self
    where
        F: Fn(&mut T, Vec<Dynamic>) -> Result<Dynamic, NativeError> + Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let name = name.into();
        Self {
            type_name,
            name,
            visibility,
            arity,
            invoker: Arc::new(invoker),
        }
    }

    /// Name of the declaring type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Declared method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Number of parameters, excluding the receiver.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invoke the method on `this`.
    pub fn invoke(&self, this: &mut T, args: Vec<Dynamic>) -> Result<Dynamic, NativeError> {
        if args.len() != self.arity {
            return Err(NativeError::ArgumentCount {
                method: self.name.clone(),
                expected: self.arity,
                actual: args.len(),
            });
        }
        (self.invoker)(this, args)
    }
}

impl<T> Clone for MethodInfo<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            name: self.name.clone(),
            visibility: self.visibility,
            arity: self.arity,
            invoker: Arc::clone(&self.invoker),
        }
    }
}

impl<T> fmt::Debug for MethodInfo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Naming-convention prefix that marks a method as a property source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodPrefix {
    /// Accessor (`get...`)
    Get,
    /// Mutator (`set...`)
    Set,
    /// Iterator (`itr...`)
    Itr,
}

impl MethodPrefix {
    /// Length in bytes of every recognised prefix.
    pub const LEN: usize = 3;

    pub const ALL: [MethodPrefix; 3] = [MethodPrefix::Get, MethodPrefix::Set, MethodPrefix::Itr];

    pub fn as_str(self) -> &'static str {
        match self {
            MethodPrefix::Get => "get",
            MethodPrefix::Set => "set",
            MethodPrefix::Itr => "itr",
        }
    }

    /// Match the prefix of a method name.
    ///
    /// Names no longer than the prefix itself never match.
    pub fn of(name: &str) -> Option<Self> {
        if name.len() <= Self::LEN {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|prefix| name.starts_with(prefix.as_str()))
    }
}

impl fmt::Display for MethodPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method whose name carries a recognised prefix.
pub struct MethodCandidate<T> {
    pub info: MethodInfo<T>,
    pub prefix: MethodPrefix,
}

impl<T> MethodCandidate<T> {
    /// The method name with its prefix removed.
    pub fn suffix(&self) -> &str {
        &self.info.name()[MethodPrefix::LEN..]
    }

    pub fn arity(&self) -> usize {
        self.info.arity()
    }
}

impl<T> Clone for MethodCandidate<T> {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            prefix: self.prefix,
        }
    }
}

impl<T> fmt::Debug for MethodCandidate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodCandidate")
            .field("name", &self.info.name())
            .field("prefix", &self.prefix)
            .field("arity", &self.info.arity())
            .finish()
    }
}
