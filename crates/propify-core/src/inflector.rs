//! Method-name fragment to property-name transformation.

use heck::ToSnakeCase;

/// Turns the part of a method name after its prefix into a property name.
///
/// Implementations must be pure: the same fragment always yields the same
/// name. Closures `Fn(&str) -> String` implement this trait.
pub trait NameTransformer: Send + Sync {
    fn transform(&self, fragment: &str) -> String;
}

impl<F> NameTransformer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transform(&self, fragment: &str) -> String {
        (self)(fragment)
    }
}

/// Lowercase, underscore-separated names.
///
/// `Something` → `something`, `SomethingElse` → `something_else`,
/// `_raw_bytes` → `raw_bytes`, `HTMLParser` → `html_parser`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Underscore;

impl NameTransformer for Underscore {
    fn transform(&self, fragment: &str) -> String {
        fragment.to_snake_case()
    }
}
