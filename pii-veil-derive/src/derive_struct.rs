//! Struct-specific `FieldSource` derivation.
//!
//! This module turns `#[pii]` fields into the supplied-field list and the
//! lookup arms of `FieldSource::field`, and collects generic parameters that
//! require trait bounds.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;
use syn::{spanned::Spanned, DataStruct, Fields, Index, LitStr, Member, Result};

use crate::{
    crate_path,
    generics::collect_generics_from_type,
    strategy::{parse_field_strategy, Strategy},
};

pub(crate) struct StructDeriveOutput {
    /// Exposed field names, in declaration order.
    pub(crate) supplied: Vec<LitStr>,
    /// One `"name" => Some(...)` arm per exposed field.
    pub(crate) lookup_arms: Vec<TokenStream>,
    pub(crate) used_generics: Vec<Ident>,
}

fn exposed_name(member: &Member, rename: Option<LitStr>, span: Span) -> Result<LitStr> {
    if let Some(name) = rename {
        return Ok(name);
    }
    match member {
        Member::Named(ident) => {
            let name = ident.to_string();
            let name = name.strip_prefix("r#").unwrap_or(&name);
            Ok(LitStr::new(name, ident.span()))
        }
        Member::Unnamed(_) => Err(syn::Error::new(
            span,
            "tuple struct fields need an explicit name: #[pii(rename = \"...\")]",
        )),
    }
}

pub(crate) fn derive_struct(
    data: DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let field_value_path = crate_path("FieldValue");
    let mut output = StructDeriveOutput {
        supplied: Vec::new(),
        lookup_arms: Vec::new(),
        used_generics: Vec::new(),
    };

    let fields = match data.fields {
        Fields::Named(fields) => fields.named,
        Fields::Unnamed(fields) => fields.unnamed,
        Fields::Unit => return Ok(output),
    };

    for (index, field) in fields.into_iter().enumerate() {
        let Strategy::Expose(rename) = parse_field_strategy(&field.attrs)? else {
            continue;
        };

        let span = field.span();
        let member = field.ident.clone().map_or_else(
            || {
                Member::Unnamed(Index {
                    index: u32::try_from(index).unwrap_or(u32::MAX),
                    span,
                })
            },
            Member::Named,
        );
        let name = exposed_name(&member, rename, span)?;

        if output
            .supplied
            .iter()
            .any(|seen| seen.value() == name.value())
        {
            return Err(syn::Error::new(
                name.span(),
                format!("field name `{}` is supplied more than once", name.value()),
            ));
        }

        collect_generics_from_type(&field.ty, generics, &mut output.used_generics);

        let ty = &field.ty;
        output.lookup_arms.push(quote_spanned! { ty.span() =>
            #name => ::core::option::Option::Some(
                <#ty as #field_value_path>::to_field_value(&self.#member)
            ),
        });
        output.supplied.push(name);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::{Data, DeriveInput};

    use super::*;

    fn derive(tokens: TokenStream) -> Result<StructDeriveOutput> {
        let input: DeriveInput = syn::parse2(tokens).expect("should parse as DeriveInput");
        match input.data {
            Data::Struct(data) => derive_struct(data, &input.generics),
            _ => panic!("expected a struct"),
        }
    }

    fn names(output: &StructDeriveOutput) -> Vec<String> {
        output.supplied.iter().map(LitStr::value).collect()
    }

    #[test]
    fn named_fields_are_supplied_in_order() {
        let output = derive(quote! {
            struct Card {
                #[pii] email: String,
                username: String,
                #[pii(rename = "ip_address")] last_ip: String,
            }
        })
        .unwrap();
        assert_eq!(names(&output), ["email", "ip_address"]);
        assert_eq!(output.lookup_arms.len(), 2);
    }

    #[test]
    fn raw_identifiers_are_unprefixed() {
        let output = derive(quote! {
            struct Card {
                #[pii] r#type: String,
            }
        })
        .unwrap();
        assert_eq!(names(&output), ["type"]);
    }

    #[test]
    fn tuple_fields_require_rename() {
        let err = derive(quote! { struct Card(#[pii] String); })
            .err()
            .unwrap();
        assert!(err.to_string().contains("need an explicit name"));

        let output = derive(quote! { struct Card(u8, #[pii(rename = "email")] String); }).unwrap();
        assert_eq!(names(&output), ["email"]);
    }

    #[test]
    fn duplicate_names_error() {
        let err = derive(quote! {
            struct Card {
                #[pii] email: String,
                #[pii(rename = "email")] backup: String,
            }
        })
        .err()
        .unwrap();
        assert!(err.to_string().contains("supplied more than once"));
    }

    #[test]
    fn unit_struct_supplies_nothing() {
        let output = derive(quote! { struct Nothing; }).unwrap();
        assert!(output.supplied.is_empty());
    }

    #[test]
    fn generics_of_exposed_fields_are_collected() {
        let output = derive(quote! {
            struct Card<T, U> {
                #[pii] email: Option<T>,
                extra: U,
            }
        })
        .unwrap();
        let used: Vec<String> = output
            .used_generics
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(used, ["T"]);
    }
}
