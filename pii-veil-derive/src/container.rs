//! Container-level attribute parsing for `#[derive(FieldSource)]`.
//!
//! This module handles attributes on the struct itself, not on fields.

use syn::{Attribute, LitStr, Meta, Result};

/// Options parsed from container-level `#[field_source(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Structure kind reported by `FieldSource::kind`; defaults to the type name.
    pub(crate) kind: Option<LitStr>,
}

/// Parses container-level `#[field_source(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("field_source") {
            continue;
        }

        match &attr.meta {
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected options, e.g. #[field_source(kind = \"UserCardSerializer\")]",
                ));
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("kind") {
                        if options.kind.is_some() {
                            return Err(meta.error("duplicate `kind` option"));
                        }
                        options.kind = Some(meta.value()?.parse()?);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `kind`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for #[field_source]",
                ));
            }
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_defaults() {
        let attrs = parse_attrs(quote! {});
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.kind.is_none());
    }

    #[test]
    fn kind_is_parsed() {
        let attrs = parse_attrs(quote! { #[field_source(kind = "UserCardSerializer")] });
        let options = parse_container_options(&attrs).unwrap();
        assert_eq!(options.kind.unwrap().value(), "UserCardSerializer");
    }

    #[test]
    fn duplicate_kind_errors() {
        let attrs = parse_attrs(quote! {
            #[field_source(kind = "A")]
            #[field_source(kind = "B")]
        });
        let err = parse_container_options(&attrs).unwrap_err();
        assert!(err.to_string().contains("duplicate `kind` option"));
    }

    #[test]
    fn unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[field_source(skip_debug)] });
        let err = parse_container_options(&attrs).unwrap_err();
        assert!(err.to_string().contains("unknown container option"));
    }

    #[test]
    fn bare_attribute_errors() {
        let attrs = parse_attrs(quote! { #[field_source] });
        assert!(parse_container_options(&attrs).is_err());
    }

    #[test]
    fn non_string_kind_errors() {
        let attrs = parse_attrs(quote! { #[field_source(kind = UserCard)] });
        assert!(parse_container_options(&attrs).is_err());
    }
}
