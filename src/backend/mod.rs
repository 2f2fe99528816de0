//! Source generator
//!
//! Turns the resolved entries of one type into the source of one artifact: a provider type holding a name-keyed
//! table of accessor closures for the target.
//!
//! ## Module Organization
//!
//! - `naming` - artifact names, keyword checks, output paths
//! - `fragment` - token rendering of method references and synthesized closures
//! - `template` - the shared artifact template and its two kind specializations
//! - `bundle` - per-namespace include bundles for build scripts
//!
//! Emission is codegen-only: it does not read or write files.

pub mod bundle;
pub mod fragment;
pub mod naming;
pub mod template;

pub use bundle::{BUNDLE_FILE, render_bundle};
pub use naming::{ArtifactName, check_identifier, is_keyword};
pub use template::{GeneratedArtifact, SourceGenerator};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::model::AccessorKind;
    use crate::resolve::{AccessorEntry, Fragment};

    fn method_entry(field: &str) -> AccessorEntry {
        AccessorEntry {
            kind: AccessorKind::Getter,
            field: field.to_string(),
            value_type: "i32".to_string(),
            fragment: Fragment::Method {
                owner: "geometry::Point".to_string(),
                method: format!("get_{field}"),
                path: vec![],
            },
        }
    }

    fn point_getters() -> ArtifactName {
        ArtifactName::new(Some("geometry".into()), "PointFieldGetters")
    }

    #[test]
    fn test_generation_is_byte_identical_without_timestamp() {
        let config = GeneratorConfig::default();
        let generator = SourceGenerator::new(&config);
        let entries = [method_entry("x"), method_entry("y")];
        let first = generator
            .generate(&point_getters(), "geometry::Point", AccessorKind::Getter, &entries)
            .unwrap();
        let second = generator
            .generate(&point_getters(), "geometry::Point", AccessorKind::Getter, &entries)
            .unwrap();
        assert_eq!(first.source, second.source);
        assert_eq!(first.keys, vec!["x", "y"]);
    }

    #[test]
    fn test_artifact_contains_skeleton() {
        let config = GeneratorConfig::default();
        let artifact = SourceGenerator::new(&config)
            .generate(&point_getters(), "geometry::Point", AccessorKind::Getter, &[method_entry("x")])
            .unwrap();
        let source = &artifact.source;
        assert!(source.starts_with("// @generated by fastfield "));
        assert!(source.contains("// FieldGetters for `geometry::Point`."));
        assert!(source.contains("// Namespace: geometry"));
        assert!(!source.contains("Generated at"));
        assert!(source.contains("pub struct PointFieldGetters"));
        assert!(source.contains("fn build()"));
        assert!(
            source.contains("impl ::fastfield_runtime::AccessorProvider<crate::geometry::Point> for PointFieldGetters")
        );
        assert!(source.contains("accessors.insert("));
        assert!(source.contains("crate::geometry::Point::get_x(instance)"));
        assert!(source.contains("#[allow(dead_code, unused_imports, clippy::all)]"));
        syn::parse_file(source).unwrap();
    }

    #[test]
    fn test_kinds_share_one_skeleton() {
        let config = GeneratorConfig::default().with_lint_allows(false);
        let generator = SourceGenerator::new(&config);
        let name = ArtifactName::new(None, "Empty");
        let getters = generator.tokens(&name, "Point", AccessorKind::Getter, &[]).unwrap().to_string();
        let setters = generator.tokens(&name, "Point", AccessorKind::Setter, &[]).unwrap().to_string();
        let normalized = setters.replace("Setter", "Getter").replace("Writes", "Reads");
        assert_eq!(getters, normalized);
    }

    #[test]
    fn test_timestamp_is_opt_in() {
        let config = GeneratorConfig::default().with_timestamp(true);
        let artifact = SourceGenerator::new(&config)
            .generate(&point_getters(), "geometry::Point", AccessorKind::Getter, &[])
            .unwrap();
        assert!(artifact.source.contains("// Generated at: "));
    }

    #[test]
    fn test_empty_table_has_no_mutable_binding() {
        let config = GeneratorConfig::default();
        let artifact = SourceGenerator::new(&config)
            .generate(&ArtifactName::new(None, "PlainFieldSetters"), "Plain", AccessorKind::Setter, &[])
            .unwrap();
        assert!(!artifact.source.contains("let mut accessors"));
        assert!(artifact.keys.is_empty());
    }

    #[test]
    fn test_invalid_target_path_is_an_error() {
        let config = GeneratorConfig::default();
        let result = SourceGenerator::new(&config).generate(
            &ArtifactName::new(None, "BadFieldGetters"),
            "not a path",
            AccessorKind::Getter,
            &[],
        );
        assert!(result.is_err());
    }
}
