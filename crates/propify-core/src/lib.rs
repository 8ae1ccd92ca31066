//! Core types shared by the propify crates.
//!
//! ## Key Types
//!
//! - [`Dynamic`]: Runtime value passed to and returned from accessor methods
//! - [`MethodInfo`]: One introspected method with its type-erased invoker
//! - [`Introspect`]: Capability that lists a type's methods
//! - [`NameTransformer`]: Turns a method-name fragment into a property name
//! - [`PropertyError`]: Failures surfaced by property access

mod convert;
mod error;
mod inflector;
mod method;
mod runtime;
mod visibility;

pub use convert::{FromDynamic, IntoDynamic, take_arg};
pub use error::{ConversionError, MethodRef, NativeError, PropertyError};
pub use inflector::{NameTransformer, Underscore};
pub use method::{Introspect, MethodCandidate, MethodInfo, MethodPrefix};
pub use runtime::{Dynamic, DynamicIter};
pub use visibility::Visibility;
