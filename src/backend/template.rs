//! The artifact template.
//!
//! One skeleton serves both accessor kinds; a [`Specialization`] supplies the accessor alias and the doc wording.
//! Output is deterministic for a given input unless the header timestamp is enabled.

use chrono::{SecondsFormat, Utc};
use proc_macro2::TokenStream;
use quote::quote;

use super::fragment::{closure_tokens, crate_path, ident};
use super::naming::ArtifactName;
use crate::config::GeneratorConfig;
use crate::errors::EmitError;
use crate::model::AccessorKind;
use crate::resolve::AccessorEntry;

/// Kind-specific pieces of the template.
struct Specialization {
    alias: TokenStream,
    verb: &'static str,
}

impl Specialization {
    fn for_kind(kind: AccessorKind) -> Self {
        match kind {
            AccessorKind::Getter => Self {
                alias: quote!(::fastfield_runtime::Getter),
                verb: "Reads",
            },
            AccessorKind::Setter => Self {
                alias: quote!(::fastfield_runtime::Setter),
                verb: "Writes",
            },
        }
    }
}

/// Rendered source of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub name: ArtifactName,
    pub kind: AccessorKind,
    /// Qualified name of the type the accessors operate on.
    pub target: String,
    /// Field names in insertion order.
    pub keys: Vec<String>,
    pub source: String,
}

/// Renders artifacts under one generator configuration.
#[derive(Debug, Clone)]
pub struct SourceGenerator<'c> {
    config: &'c GeneratorConfig,
}

impl<'c> SourceGenerator<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render the complete artifact: header comment followed by the formatted items.
    pub fn generate(
        &self,
        name: &ArtifactName,
        target: &str,
        kind: AccessorKind,
        entries: &[AccessorEntry],
    ) -> Result<GeneratedArtifact, EmitError> {
        let tokens = self.tokens(name, target, kind, entries)?;
        let file = syn::parse2::<syn::File>(tokens).map_err(|err| EmitError::SynParse {
            artifact: name.qualified_name(),
            message: err.to_string(),
        })?;
        let source = format!("{}\n{}", self.header(name, target, kind), prettyplease::unparse(&file));

        Ok(GeneratedArtifact {
            name: name.clone(),
            kind,
            target: target.to_string(),
            keys: entries.iter().map(|e| e.field.clone()).collect(),
            source,
        })
    }

    /// Generation marker, target and namespace lines.
    pub fn header(&self, name: &ArtifactName, target: &str, kind: AccessorKind) -> String {
        let mut header = format!(
            "// @generated by {}. Do not edit.\n// {} for `{target}`.\n",
            self.config.tool_identity(),
            kind.artifact_suffix()
        );
        if let Some(namespace) = name.namespace() {
            header.push_str(&format!("// Namespace: {namespace}\n"));
        }
        if self.config.emit_timestamp {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
            header.push_str(&format!("// Generated at: {now}\n"));
        }
        header
    }

    /// Items of the artifact, unformatted.
    pub fn tokens(
        &self,
        name: &ArtifactName,
        target: &str,
        kind: AccessorKind,
        entries: &[AccessorEntry],
    ) -> Result<TokenStream, EmitError> {
        let Specialization { alias, verb } = Specialization::for_kind(kind);
        let provider = ident(name.simple_name())?;
        let target_path = crate_path(target)?;
        let map = quote!(::fastfield_runtime::AccessorMap<#alias<#target_path>>);

        let inserts = entries
            .iter()
            .map(|entry| {
                let key = &entry.field;
                let closure = closure_tokens(entry, &target_path)?;
                Ok(quote! {
                    accessors.insert(#key, {
                        let accessor: #alias<#target_path> = #closure;
                        accessor
                    });
                })
            })
            .collect::<Result<Vec<_>, EmitError>>()?;
        let capacity = inserts.len();
        let binding = if inserts.is_empty() {
            quote!(accessors)
        } else {
            quote!(mut accessors)
        };

        let allow = if self.config.lint_allows {
            quote!(#[allow(dead_code, unused_imports, clippy::all)])
        } else {
            quote!()
        };
        let doc = format!(" {verb} fields of [`{target}`](crate::{target}) by name.");

        Ok(quote! {
            #[doc = #doc]
            #allow
            pub struct #provider {
                accessors: #map,
            }

            #allow
            impl #provider {
                pub fn new() -> Self {
                    Self {
                        accessors: Self::build(),
                    }
                }

                fn build() -> #map {
                    let #binding: #map = ::std::collections::HashMap::with_capacity(#capacity);
                    #(#inserts)*
                    accessors
                }
            }

            #allow
            impl ::fastfield_runtime::AccessorProvider<#target_path> for #provider {
                type Accessor = #alias<#target_path>;

                fn accessors(&self) -> &::fastfield_runtime::AccessorMap<Self::Accessor> {
                    &self.accessors
                }
            }

            #allow
            impl ::core::default::Default for #provider {
                fn default() -> Self {
                    Self::new()
                }
            }
        })
    }
}
