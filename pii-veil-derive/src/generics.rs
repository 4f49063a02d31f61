//! Generic type parameter handling and trait bound management.
//!
//! Only generics that appear in `#[pii]` fields receive a `FieldValue` bound;
//! parameters used solely by pass-through fields stay unconstrained.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` is skipped when collecting generics, so a marker such as
//! `Option<PhantomData<T>>` inside an exposed field does not force `T` to be a
//! field value.

use syn::{parse_quote, Ident};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            if let Some(segment) = path.path.segments.last() {
                if segment.ident == "PhantomData" {
                    return;
                }

                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner_ty) = arg {
                            collect_generics_from_type(inner_ty, generics, result);
                        }
                    }
                }

                for param in generics.type_params() {
                    if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                        result.push(param.ident.clone());
                    }
                }
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Slice(slice) => {
            collect_generics_from_type(&slice.elem, generics, result);
        }
        syn::Type::Paren(paren) => {
            collect_generics_from_type(&paren.elem, generics, result);
        }
        _ => {}
    }
}

/// Adds `FieldValue` bounds to generic parameters used in exposed fields.
pub(crate) fn add_field_value_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            let field_value_path = crate_path("FieldValue");
            param.bounds.push(parse_quote!(#field_value_path));
        }
    }
    generics
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;
    use syn::{parse_quote, Generics, Type};

    use super::*;

    fn collect(ty: Type, generics: &Generics) -> Vec<String> {
        let mut result = Vec::new();
        collect_generics_from_type(&ty, generics, &mut result);
        result.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn finds_nested_and_referenced_generics() {
        let generics: Generics = parse_quote!(<'a, T, U, V>);
        assert_eq!(collect(parse_quote!(Option<T>), &generics), ["T"]);
        assert_eq!(collect(parse_quote!(&'a [U]), &generics), ["U"]);
        assert_eq!(collect(parse_quote!(Vec<Option<T>>), &generics), ["T"]);
        assert!(collect(parse_quote!(String), &generics).is_empty());
    }

    #[test]
    fn skips_phantom_data() {
        let generics: Generics = parse_quote!(<T>);
        assert!(collect(parse_quote!(PhantomData<T>), &generics).is_empty());
        assert!(collect(parse_quote!(std::marker::PhantomData<T>), &generics).is_empty());
    }

    #[test]
    fn bounds_only_used_parameters() {
        let generics: Generics = parse_quote!(<T, U>);
        let used = vec![Ident::new("T", proc_macro2::Span::call_site())];
        let bounded = add_field_value_bounds(generics, &used);
        let bounds: Vec<(String, usize)> = bounded
            .type_params()
            .map(|param| (param.ident.to_string(), param.bounds.len()))
            .collect();
        assert_eq!(bounds, [("T".to_string(), 1), ("U".to_string(), 0)]);

        let rendered = bounded
            .type_params()
            .next()
            .unwrap()
            .bounds
            .to_token_stream();
        assert!(rendered.to_string().ends_with("FieldValue"));
    }
}
