//! Token rendering of accessor fragments.
//!
//! Every entry becomes a non-capturing closure so it coerces to the runtime's `fn` pointer aliases:
//!
//! - getter: `|instance: &T| -> Box<dyn Any>`, boxing a clone of the field or the result of the getter method;
//! - setter: `|instance: &mut T, value: Box<dyn Any>| -> Result<(), AccessError>`, downcasting `value` before
//!   assigning it or passing it to the setter method.
//!
//! Field types are never written out. The cast target is inferred from the field slot or the method parameter, so
//! type names that only resolve in the declaring module stay valid in the artifact's module.

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::errors::EmitError;
use crate::model::AccessorKind;
use crate::resolve::{AccessorEntry, Fragment};

/// Parse a field or method name into an identifier, falling back to a raw identifier for keywords.
pub fn ident(name: &str) -> Result<Ident, EmitError> {
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .map_err(|err| EmitError::InvalidSyntax {
            what: "identifier",
            text: name.to_string(),
            message: err.to_string(),
        })
}

/// `crate::<qualified>` as a path.
pub fn crate_path(qualified: &str) -> Result<syn::Path, EmitError> {
    let text = format!("crate::{qualified}");
    syn::parse_str::<syn::Path>(&text).map_err(|err| EmitError::InvalidSyntax {
        what: "path",
        text,
        message: err.to_string(),
    })
}

/// `instance.a.b`: the target instance followed by the embedding path.
fn receiver(path: &[String]) -> Result<TokenStream, EmitError> {
    let segments = path.iter().map(|s| ident(s)).collect::<Result<Vec<_>, _>>()?;
    Ok(quote! { instance #(. #segments)* })
}

/// Receiver argument of a bound method: `instance` itself, or a borrow of the embedded parent.
fn method_argument(path: &[String], mutable: bool) -> Result<TokenStream, EmitError> {
    if path.is_empty() {
        return Ok(quote!(instance));
    }
    let receiver = receiver(path)?;
    Ok(if mutable {
        quote!(&mut #receiver)
    } else {
        quote!(&#receiver)
    })
}

/// Closure expression for one entry, typed for the artifact's target.
pub fn closure_tokens(entry: &AccessorEntry, target: &syn::Path) -> Result<TokenStream, EmitError> {
    let path = entry.fragment.path();
    let receiver = receiver(path)?;
    let key = &entry.field;

    let tokens = match (entry.kind, &entry.fragment) {
        (AccessorKind::Getter, Fragment::Method { owner, method, .. }) => {
            let owner = crate_path(owner)?;
            let method = ident(method)?;
            let argument = method_argument(path, false)?;
            quote! {
                |instance: &#target| -> ::std::boxed::Box<dyn ::std::any::Any> {
                    ::std::boxed::Box::new(#owner::#method(#argument))
                }
            }
        }
        (AccessorKind::Getter, Fragment::Closure { field, .. }) => {
            let field = ident(field)?;
            quote! {
                |instance: &#target| -> ::std::boxed::Box<dyn ::std::any::Any> {
                    ::std::boxed::Box::new(::core::clone::Clone::clone(&#receiver.#field))
                }
            }
        }
        (AccessorKind::Setter, Fragment::Method { owner, method, .. }) => {
            let owner = crate_path(owner)?;
            let method = ident(method)?;
            let argument = method_argument(path, true)?;
            quote! {
                |instance: &mut #target, value: ::std::boxed::Box<dyn ::std::any::Any>|
                 -> ::core::result::Result<(), ::fastfield_runtime::AccessError> {
                    let value = ::fastfield_runtime::downcast(#key, value)?;
                    #owner::#method(#argument, value);
                    ::core::result::Result::Ok(())
                }
            }
        }
        (AccessorKind::Setter, Fragment::Closure { field, .. }) => {
            let field = ident(field)?;
            quote! {
                |instance: &mut #target, value: ::std::boxed::Box<dyn ::std::any::Any>|
                 -> ::core::result::Result<(), ::fastfield_runtime::AccessError> {
                    ::fastfield_runtime::assign(&mut #receiver.#field, #key, value)?;
                    ::core::result::Result::Ok(())
                }
            }
        }
    };
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: AccessorKind, fragment: Fragment) -> AccessorEntry {
        AccessorEntry {
            kind,
            field: "x".into(),
            value_type: "i32".into(),
            fragment,
        }
    }

    fn render(entry: &AccessorEntry) -> String {
        let target = crate_path("geometry::Point").unwrap();
        closure_tokens(entry, &target).unwrap().to_string()
    }

    #[test]
    fn test_keyword_names_become_raw_identifiers() {
        assert_eq!(ident("type").unwrap().to_string(), "r#type");
        assert_eq!(ident("x").unwrap().to_string(), "x");
        assert!(ident("self").is_err());
        assert!(ident("not valid").is_err());
    }

    #[test]
    fn test_getter_method_calls_owner_through_path() {
        let rendered = render(&entry(
            AccessorKind::Getter,
            Fragment::Method {
                owner: "geometry::Base".into(),
                method: "get_x".into(),
                path: vec!["base".into()],
            },
        ));
        assert!(rendered.contains("crate :: geometry :: Base :: get_x (& instance . base)"));
    }

    #[test]
    fn test_getter_closure_clones_field() {
        let rendered = render(&entry(
            AccessorKind::Getter,
            Fragment::Closure {
                field: "x".into(),
                path: vec![],
            },
        ));
        assert!(rendered.contains("Clone :: clone (& instance . x)"));
    }

    #[test]
    fn test_setter_closure_assigns_through_the_slot() {
        let rendered = render(&entry(
            AccessorKind::Setter,
            Fragment::Closure {
                field: "x".into(),
                path: vec!["inner".into()],
            },
        ));
        let expected = ":: fastfield_runtime :: assign (& mut instance . inner . x , \"x\" , value) ?";
        assert!(rendered.contains(expected), "{rendered}");
    }

    #[test]
    fn test_setter_method_receives_downcast_value() {
        let rendered = render(&entry(
            AccessorKind::Setter,
            Fragment::Method {
                owner: "geometry::Point".into(),
                method: "set_x".into(),
                path: vec![],
            },
        ));
        assert!(rendered.contains("let value = :: fastfield_runtime :: downcast (\"x\" , value) ?"));
        assert!(rendered.contains("crate :: geometry :: Point :: set_x (instance , value)"));
    }

    #[test]
    fn test_field_type_text_is_not_emitted() {
        let mut local = entry(
            AccessorKind::Setter,
            Fragment::Closure {
                field: "x".into(),
                path: vec![],
            },
        );
        // Names that only resolve in the declaring module, or do not parse at all.
        for text in ["Id", "Self", "Vec<"] {
            local.value_type = text.into();
            let rendered = render(&local);
            assert!(!rendered.contains(&format!("< {text}")), "{rendered}");
            assert!(!rendered.contains("downcast ::"), "{rendered}");
        }
    }
}
