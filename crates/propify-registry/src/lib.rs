//! Property discovery and the per-type descriptor cache.
//!
//! A type's property map is built in three steps the first time any instance
//! of the type is accessed:
//!
//! 1. [`classify`] keeps the restricted methods named `get…`, `set…` or `itr…`.
//! 2. [`pair_properties`] groups them by transformed name and validates arity.
//! 3. [`TypeRegistry`] stores the resulting [`PropertyMap`] for the rest of the
//!    process lifetime.
//!
//! Indexed properties are accessed through an [`ArrayProperty`] bound to one
//! instance per access.

mod array;
mod classifier;
mod descriptor;
mod pairing;
mod registry;

pub use array::{ArrayBinding, ArrayProperty};
pub use classifier::classify;
pub use descriptor::{Accessor, PropertyDescriptor, PropertyKind, PropertyMap};
pub use pairing::{PropertyMethods, group_by_name, pair_properties, validate};
pub use registry::TypeRegistry;

#[cfg(test)]
mod test_support;
