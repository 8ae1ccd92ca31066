//! Implementation of the `#[propify::methods]` attribute macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, Type, parse_macro_input};

use crate::attrs::{MethodAttrs, arg_ident, is_helper};

pub fn methods_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let err = syn::Error::new(
            proc_macro2::TokenStream::from(attr).into_iter().next().map_or_else(
                proc_macro2::Span::call_site,
                |token| token.span(),
            ),
            "#[propify::methods] takes no arguments",
        );
        return err.to_compile_error().into();
    }

    let input = parse_macro_input!(item as ItemImpl);

    match methods_inner(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn methods_inner(mut input: ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[propify::methods] must be placed on an inherent impl block",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[propify::methods] does not support generic impl blocks",
        ));
    }

    let mut entries = Vec::new();
    for item in &mut input.items {
        if let ImplItem::Fn(method) = item {
            let attrs = MethodAttrs::from_attrs(&method.attrs)?;
            method.attrs.retain(|attr| !is_helper(attr));

            if !attrs.skip {
                if let Some(entry) = method_entry(method) {
                    entries.push(entry);
                }
            }
        }
    }

    let self_ty = &input.self_ty;

    Ok(quote! {
        #input

        impl ::propify::Introspect for #self_ty {
            fn methods() -> ::std::vec::Vec<::propify::MethodInfo<Self>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}

/// Build the `MethodInfo` expression for one method, if it can be invoked.
fn method_entry(method: &ImplItemFn) -> Option<TokenStream2> {
    let sig = &method.sig;

    if !sig.generics.params.is_empty() || sig.asyncness.is_some() || sig.unsafety.is_some() {
        return None;
    }

    match sig.inputs.first() {
        Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() => {}
        _ => return None,
    }

    let param_types: Vec<&Type> = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat_type) => Some(&*pat_type.ty),
            FnArg::Receiver(_) => None,
        })
        .collect();

    let ident = &sig.ident;
    let name = ident.unraw().to_string();
    let arity = param_types.len();
    let visibility = visibility_tokens(&method.vis);

    if !is_accessor(&name, &method.vis) {
        // Never dispatched, so its parameter and return types need no conversions.
        let message = format!("`{}` is not a property accessor", name);
        return Some(quote! {
            ::propify::MethodInfo::<Self>::new(
                #name,
                #visibility,
                #arity,
                |_: &mut Self, _: ::std::vec::Vec<::propify::Dynamic>| {
                    ::std::result::Result::Err(::propify::NativeError::other(#message))
                },
            )
        });
    }

    let arg_idents: Vec<_> = (0..arity).map(arg_ident).collect();
    let indices: Vec<_> = (0..arity).collect();

    let result = if name.starts_with("itr") {
        quote! { ::propify::Dynamic::from_pairs(__ret) }
    } else {
        quote! { ::propify::IntoDynamic::into_dynamic(__ret) }
    };

    let args_binding = if arity == 0 {
        quote! { _: ::std::vec::Vec<::propify::Dynamic> }
    } else {
        quote! { __args: ::std::vec::Vec<::propify::Dynamic> }
    };

    let unpack = if arity == 0 {
        quote! {}
    } else {
        quote! {
            let mut __args = __args.into_iter();
            #(let #arg_idents: #param_types = ::propify::take_arg(&mut __args, #indices)?;)*
        }
    };

    Some(quote! {
        ::propify::MethodInfo::<Self>::new(
            #name,
            #visibility,
            #arity,
            |__this: &mut Self, #args_binding| {
                #unpack
                let __ret = __this.#ident(#(#arg_idents),*);
                ::std::result::Result::Ok(#result)
            },
        )
    })
}

fn visibility_tokens(vis: &syn::Visibility) -> TokenStream2 {
    match vis {
        syn::Visibility::Public(_) => quote! { ::propify::Visibility::Public },
        syn::Visibility::Restricted(_) => quote! { ::propify::Visibility::Protected },
        syn::Visibility::Inherited => quote! { ::propify::Visibility::Private },
    }
}

/// Whether the classifier can keep this method: restricted, with a `get`,
/// `set` or `itr` prefix followed by at least one character.
fn is_accessor(name: &str, vis: &syn::Visibility) -> bool {
    !matches!(vis, syn::Visibility::Public(_))
        && name.len() > 3
        && ["get", "set", "itr"].iter().any(|prefix| name.starts_with(prefix))
}
