//! Per-namespace bundles: one file per module that `include!`s every artifact generated into that module.
//!
//! A user crate includes the bundle inside the module the artifacts belong to, which keeps fields private to that
//! module reachable from the generated closures.

use std::path::Path;

use quote::quote;

use crate::config::GeneratorConfig;
use crate::errors::EmitError;

/// File name of a namespace bundle inside the namespace's output directory.
pub const BUNDLE_FILE: &str = "accessors.rs";

/// Render the bundle for `namespace`, including `artifacts` by absolute path.
pub fn render_bundle(
    config: &GeneratorConfig,
    namespace: Option<&str>,
    artifacts: &[&Path],
) -> Result<String, EmitError> {
    let includes = artifacts.iter().map(|path| {
        let literal = path.to_string_lossy().into_owned();
        quote! { include!(#literal); }
    });
    let tokens = quote! { #(#includes)* };
    let label = namespace.unwrap_or("crate");
    let file = syn::parse2::<syn::File>(tokens).map_err(|err| EmitError::SynParse {
        artifact: format!("{label} bundle"),
        message: err.to_string(),
    })?;
    Ok(format!(
        "// @generated by {}. Do not edit.\n// Accessor tables of `{label}`.\n\n{}",
        config.tool_identity(),
        prettyplease::unparse(&file)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_includes_each_artifact() {
        let config = GeneratorConfig::default();
        let a = Path::new("/out/geometry/point_field_getters.rs");
        let b = Path::new("/out/geometry/point_field_setters.rs");
        let bundle = render_bundle(&config, Some("geometry"), &[a, b]).unwrap();
        assert!(bundle.contains("// Accessor tables of `geometry`."));
        assert!(bundle.contains("include!(\"/out/geometry/point_field_getters.rs\");"));
        assert!(bundle.contains("include!(\"/out/geometry/point_field_setters.rs\");"));
    }

    #[test]
    fn test_root_bundle_is_labelled_crate() {
        let bundle = render_bundle(&GeneratorConfig::default(), None, &[]).unwrap();
        assert!(bundle.contains("`crate`"));
    }
}
