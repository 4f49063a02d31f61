//! Derive macros for `pii-veil`.
//!
//! This crate generates the declared-schema code behind
//! `#[derive(FieldSource)]`. It:
//! - reads `#[pii(...)]` field attributes and `#[field_source(...)]` container
//!   attributes
//! - emits a `FieldSource` implementation listing the supplied fields and
//!   converting each one through `FieldValue`
//!
//! It does **not** decide what is sensitive. The policy table lives in the main
//! `pii-veil` crate and is applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, LitStr, Result};

mod container;
mod derive_struct;
mod generics;
mod strategy;
use container::{parse_container_options, ContainerOptions};
use derive_struct::{derive_struct, StructDeriveOutput};
use generics::add_field_value_bounds;

/// Derives `pii_veil::FieldSource` for structs.
///
/// # Container Attributes
///
/// - `#[field_source(kind = "Name")]` - The structure kind reported by
///   `FieldSource::kind`, matched against the policy's intercepted kinds.
///   Defaults to the type's own name.
///
/// # Field Attributes
///
/// - **No annotation**: The field is not supplied. A sensitive key backed by
///   such a field is dropped from redacted output.
///
/// - `#[pii]`: The field is the authoritative value for the sensitive key of
///   the same name. The field type must implement `FieldValue`.
///
/// - `#[pii(rename = "name")]`: As `#[pii]`, under a different key. Required
///   for tuple struct fields.
///
/// Enums and unions are rejected at compile time, as are two fields supplying
/// the same name.
#[proc_macro_derive(FieldSource, attributes(pii, field_source))]
pub fn derive_field_source(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the pii-veil crate root.
///
/// Handles crate renaming (e.g., `veil = { package = "pii-veil", ... }`).
/// Inside `pii-veil` itself the crate is reachable as `::pii_veil` through its
/// `extern crate self` alias, which also keeps doctests working.
fn crate_root() -> TokenStream {
    match crate_name("pii-veil") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::pii_veil },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = format_ident!("{}", item);
    quote! { #root::#item_ident }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { kind } = parse_container_options(&attrs)?;
    let kind = kind.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));

    let StructDeriveOutput {
        supplied,
        lookup_arms,
        used_generics,
    } = match data {
        Data::Struct(data) => derive_struct(data, &generics)?,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "`FieldSource` can only be derived for structs",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`FieldSource` cannot be derived for unions",
            ));
        }
    };

    let crate_root = crate_root();
    let bounded_generics = add_field_value_bounds(generics, &used_generics);
    let (impl_generics, ty_generics, where_clause) = bounded_generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #crate_root::FieldSource for #ident #ty_generics #where_clause {
            fn kind(&self) -> &str {
                #kind
            }

            fn supplied_fields(&self) -> &[&'static str] {
                &[#(#supplied),*]
            }

            fn field(&self, name: &str) -> ::core::option::Option<#crate_root::Value> {
                match name {
                    #(#lookup_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::expand;

    #[test]
    fn enums_are_rejected() {
        let input = syn::parse2(quote! {
            enum Card { A }
        })
        .unwrap();
        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn unions_are_rejected() {
        let input = syn::parse2(quote! {
            union Bits { a: u32, b: f32 }
        })
        .unwrap();
        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("cannot be derived for unions"));
    }

    #[test]
    fn kind_defaults_to_type_name() {
        let input = syn::parse2(quote! {
            struct UserCard { #[pii] email: String }
        })
        .unwrap();
        let tokens = expand(input).unwrap().to_string();
        assert!(tokens.contains("\"UserCard\""), "{tokens}");
        assert!(tokens.contains("\"email\""), "{tokens}");
    }

    #[test]
    fn explicit_kind_is_used() {
        let input = syn::parse2(quote! {
            #[field_source(kind = "UserCardSerializer")]
            struct Card { #[pii] email: String }
        })
        .unwrap();
        let tokens = expand(input).unwrap().to_string();
        assert!(tokens.contains("\"UserCardSerializer\""), "{tokens}");
        assert!(!tokens.contains("\"Card\""), "{tokens}");
    }
}
