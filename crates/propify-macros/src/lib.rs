//! Propify Proc Macros
//!
//! - `#[propify::methods]` - Generate an `Introspect` implementation from an
//!   inherent `impl` block
//!
//! # Example
//!
//! ```ignore
//! struct Dummy {
//!     something: String,
//!     array: Vec<i64>,
//! }
//!
//! #[propify::methods]
//! impl Dummy {
//!     fn get_something(&self) -> String { self.something.clone() }
//!     fn set_something(&mut self, value: String) { self.something = value; }
//!
//!     fn get_array(&self, index: usize) -> i64 { self.array[index] }
//!     fn set_array(&mut self, index: usize, value: i64) { self.array[index] = value; }
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod methods;

/// Generate `propify::Introspect` for the annotated inherent `impl` block.
///
/// Every method taking `&self` or `&mut self` is reported with its name, its
/// visibility and its number of parameters. Parameters are converted with
/// `FromDynamic` and results with `IntoDynamic`; methods whose name starts
/// with `itr` must return an owned `IntoIterator<Item = (K, V)>`.
///
/// Public methods and methods without a `get`/`set`/`itr` prefix are listed
/// with an invoker that only returns an error, so their signatures may use
/// any types.
///
/// Not reported: associated functions without a receiver, methods taking
/// `self` by value, generic, `async` or `unsafe` methods, and methods marked
/// `#[propify(skip)]`.
///
/// Visibility mapping: `pub` is public, `pub(crate)` / `pub(super)` /
/// `pub(in path)` is protected, no modifier is private. Only non-public
/// methods can back a property.
#[proc_macro_attribute]
pub fn methods(attr: TokenStream, item: TokenStream) -> TokenStream {
    methods::methods_impl(attr, item)
}
