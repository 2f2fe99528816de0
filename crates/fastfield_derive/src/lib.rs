//! Derive macro for fastfield markers.
//!
//! `#[derive(FieldAccessors)]` registers the marker attributes read by the `fastfield` generator, so they are
//! accepted by the compiler on the struct and its fields:
//!
//! - `#[field_getters(..)]` / `#[field_setters(..)]` on the struct
//! - `#[getter(..)]` / `#[setter(..)]` on the struct or a field
//! - `#[accessors]` on the struct
//! - `#[parent]` on the field embedding the parent type
//!
//! The derive itself generates no items. It rejects input the generator cannot process: anything but a struct with
//! named fields, and more than one `#[parent]` field.
//!
//! # Example
//! ```ignore
//! #[derive(FieldAccessors)]
//! #[field_getters(include = ["x"])]
//! #[accessors]
//! pub struct Point {
//!     pub x: i32,
//!     pub y: i32,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::Span;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_derive(
    FieldAccessors,
    attributes(field_getters, field_setters, getter, setter, accessors, parent)
)]
pub fn derive_field_accessors(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match check(&input) {
        Ok(()) => TokenStream::new(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn check(input: &DeriveInput) -> syn::Result<()> {
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "FieldAccessors can only be derived for structs with named fields",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "FieldAccessors can only be derived for structs with named fields",
            ));
        }
    };

    let fields = match &data.fields {
        Fields::Named(named) => &named.named,
        Fields::Unit => return Ok(()),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new(
                Span::call_site(),
                "FieldAccessors can only be derived for structs with named fields",
            ));
        }
    };

    let mut parents = fields
        .iter()
        .filter(|field| field.attrs.iter().any(|attr| attr.path().is_ident("parent")));
    if let (Some(_), Some(second)) = (parents.next(), parents.next()) {
        return Err(syn::Error::new_spanned(second, "only one field may be marked `#[parent]`"));
    }
    Ok(())
}
