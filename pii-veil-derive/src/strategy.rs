//! Parsing of `#[pii(...)]` field attributes.
//!
//! This module maps attribute syntax to exposure decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// How a field takes part in the generated `FieldSource` impl.
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `PassThrough` | Not supplied to the redactor |
/// | `#[pii]` | `Expose(None)` | Supplied under the field's own name |
/// | `#[pii(rename = "name")]` | `Expose(Some(name))` | Supplied under `name` |
#[derive(Clone, Debug)]
pub(crate) enum Strategy {
    /// No annotation: the field is invisible to the redactor.
    PassThrough,
    /// The field is an authoritative sensitive value.
    Expose(Option<LitStr>),
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[pii] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if !attr.path().is_ident("pii") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                set_strategy(&mut strategy, Strategy::Expose(None), attr.span())?;
            }
            Meta::List(list) => {
                let mut rename: Option<LitStr> = None;
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        if rename.is_some() {
                            return Err(meta.error("duplicate `rename` option"));
                        }
                        let name: LitStr = meta.value()?.parse()?;
                        if name.value().is_empty() {
                            return Err(syn::Error::new(name.span(), "`rename` must not be empty"));
                        }
                        rename = Some(name);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `rename`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
                set_strategy(&mut strategy, Strategy::Expose(rename), attr.span())?;
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[pii]; use #[pii(rename = \"...\")]",
                ));
            }
        }
    }

    Ok(strategy.unwrap_or(Strategy::PassThrough))
}
