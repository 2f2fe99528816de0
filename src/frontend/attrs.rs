//! Marker attribute parsing.
//!
//! Only the helper attributes registered by `#[derive(FieldAccessors)]` are read; every other attribute is ignored.
//! Arguments are validated here so that later stages can treat annotations as well-formed.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprArray, Lit, LitStr};

use crate::model::markers::{
    ARG_EXCLUDE, ARG_INCLUDE, ARG_NAME, ARG_VIS, AllAccessors, FieldGetters, FieldSetters, GetterMarker, Marker,
    Parent, SetterMarker,
};
use crate::model::{AccessLevel, Annotation, AnnotationValue};

/// Where an attribute was found; markers are only meaningful in some places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Type,
    Field,
}

/// Parse the markers among `attrs`.
pub fn parse_markers(attrs: &[Attribute], placement: Placement) -> syn::Result<Vec<Annotation>> {
    let mut annotations = Vec::new();
    for attr in attrs {
        let Some(ident) = attr.path().get_ident() else {
            continue;
        };
        let name = ident.to_string();
        let annotation = if name == FieldGetters::NAME || name == FieldSetters::NAME {
            expect_placement(attr, &name, placement, Placement::Type)?;
            parse_selection(attr, &name)?
        } else if name == GetterMarker::NAME || name == SetterMarker::NAME {
            parse_accessor(attr, &name)?
        } else if name == AllAccessors::NAME {
            expect_placement(attr, &name, placement, Placement::Type)?;
            parse_flag(attr, &name)?
        } else if name == Parent::NAME {
            expect_placement(attr, &name, placement, Placement::Field)?;
            parse_flag(attr, &name)?
        } else {
            continue;
        };
        if annotations.iter().any(|a: &Annotation| a.name() == annotation.name()) {
            return Err(syn::Error::new_spanned(attr, format!("duplicate `#[{name}]` attribute")));
        }
        annotations.push(annotation);
    }
    Ok(annotations)
}

fn expect_placement(attr: &Attribute, name: &str, found: Placement, expected: Placement) -> syn::Result<()> {
    if found == expected {
        return Ok(());
    }
    let place = match expected {
        Placement::Type => "a struct",
        Placement::Field => "a field",
    };
    Err(syn::Error::new_spanned(attr, format!("`#[{name}]` is only allowed on {place}")))
}

/// `#[accessors]`, `#[parent]`
fn parse_flag(attr: &Attribute, name: &str) -> syn::Result<Annotation> {
    attr.meta.require_path_only()?;
    Ok(Annotation::new(name))
}

/// `#[getter]`, `#[getter(vis = "crate")]`
fn parse_accessor(attr: &Attribute, name: &str) -> syn::Result<Annotation> {
    let mut level: Option<String> = None;
    if !matches!(attr.meta, syn::Meta::Path(_)) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident(ARG_VIS) {
                return Err(meta.error(format!("unknown `#[{name}]` argument, expected `vis`")));
            }
            let value: LitStr = meta.value()?.parse()?;
            let spelling = value.value();
            if AccessLevel::parse(&spelling).is_none() {
                return Err(syn::Error::new(
                    value.span(),
                    format!(
                        "unknown visibility `{spelling}`, expected one of {}",
                        AccessLevel::SPELLINGS.join(", ")
                    ),
                ));
            }
            level = Some(spelling);
            Ok(())
        })?;
    }
    let annotation = Annotation::new(name);
    Ok(match level {
        Some(level) => annotation.with_arg(ARG_VIS, AnnotationValue::Str(level)),
        None => annotation,
    })
}

/// `#[field_getters]`, `#[field_getters(name = "..", include = [..], exclude = [..])]`
fn parse_selection(attr: &Attribute, name: &str) -> syn::Result<Annotation> {
    let mut args: Vec<(&'static str, AnnotationValue)> = Vec::new();
    if !matches!(attr.meta, syn::Meta::Path(_)) {
        attr.parse_nested_meta(|meta| {
            let key = if meta.path.is_ident(ARG_NAME) {
                let value: LitStr = meta.value()?.parse()?;
                args.push((ARG_NAME, AnnotationValue::Str(value.value())));
                ARG_NAME
            } else if meta.path.is_ident(ARG_INCLUDE) {
                args.push((ARG_INCLUDE, AnnotationValue::List(string_list(&meta)?)));
                ARG_INCLUDE
            } else if meta.path.is_ident(ARG_EXCLUDE) {
                args.push((ARG_EXCLUDE, AnnotationValue::List(string_list(&meta)?)));
                ARG_EXCLUDE
            } else {
                return Err(meta.error(format!(
                    "unknown `#[{name}]` argument, expected `name`, `include` or `exclude`"
                )));
            };
            if args.iter().filter(|(k, _)| *k == key).count() > 1 {
                return Err(meta.error(format!("duplicate `{key}` argument")));
            }
            Ok(())
        })?;
    }
    Ok(args
        .into_iter()
        .fold(Annotation::new(name), |annotation, (key, value)| annotation.with_arg(key, value)))
}

/// `["a", "b"]`
fn string_list(meta: &ParseNestedMeta<'_>) -> syn::Result<Vec<String>> {
    let array: ExprArray = meta.value()?.parse()?;
    array
        .elems
        .iter()
        .map(|elem| match elem {
            Expr::Lit(lit) => match &lit.lit {
                Lit::Str(s) => Ok(s.value()),
                other => Err(syn::Error::new_spanned(other, "expected a string literal")),
            },
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        })
        .collect()
}
