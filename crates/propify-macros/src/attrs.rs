//! Helper attribute parsing.

use syn::{Attribute, Ident};

/// Parsed `#[propify(...)]` attributes on a method.
#[derive(Debug, Default)]
pub struct MethodAttrs {
    /// Leave the method out of the introspection table
    pub skip: bool,
}

impl MethodAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs.iter().filter(|attr| is_helper(attr)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown propify attribute, expected `skip`"))
                }
            })?;
        }

        Ok(result)
    }
}

/// Check whether an attribute is `#[propify(...)]`.
pub fn is_helper(attr: &Attribute) -> bool {
    attr.path().is_ident("propify")
}

/// Fresh identifier for the generated argument at `index`.
pub fn arg_ident(index: usize) -> Ident {
    Ident::new(&format!("__arg{}", index), proc_macro2::Span::call_site())
}
