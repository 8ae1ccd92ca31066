//! Accessor-method driven properties for Rust types.
//!
//! A type opts in by listing its methods through [`Introspect`], usually with
//! the [`methods`] attribute. Restricted methods named `get…`, `set…` and
//! `itr…` then become properties that can be read and written by name:
//!
//! ```
//! use propify::Propified;
//!
//! #[derive(Default)]
//! struct Settings { theme: String }
//!
//! #[propify::methods]
//! impl Settings {
//!     fn get_theme(&self) -> String { self.theme.clone() }
//!     fn set_theme(&mut self, theme: String) { self.theme = theme; }
//! }
//!
//! let mut settings = Settings::default();
//! settings.set_property("theme", "dark").unwrap();
//! assert_eq!(settings.get_property("theme").unwrap().convert::<String>().unwrap(), "dark");
//! ```
//!
//! ## Crates
//!
//! - `propify-core`: values, method introspection and errors
//! - `propify-registry`: pairing, validation and the per-type cache
//! - `propify-macros`: the `#[propify::methods]` attribute
//!
//! ## Features
//!
//! - `macros` (default): re-export [`methods`]
//! - `profiling`: instrument builds and dispatch with the `profiling` crate

extern crate self as propify;

mod dispatch;

pub use dispatch::{PropertyValue, Propified, get_property, has_property, set_property};

pub use propify_core::{
    ConversionError, Dynamic, DynamicIter, FromDynamic, Introspect, IntoDynamic, MethodCandidate,
    MethodInfo, MethodPrefix, MethodRef, NameTransformer, NativeError, PropertyError, Underscore,
    Visibility, take_arg,
};
pub use propify_registry::{
    Accessor, ArrayBinding, ArrayProperty, PropertyDescriptor, PropertyKind, PropertyMap,
    TypeRegistry,
};

#[cfg(feature = "macros")]
pub use propify_macros::methods;
