//! Artifact naming: the generated type's name, the module it belongs to, and the file it is written to.

use std::fmt;
use std::path::PathBuf;

use convert_case::{Case, Casing};

use crate::errors::ConfigurationError;
use crate::model::{AccessorKind, TypeDescriptor};

/// Strict, reserved and weak-but-unusable keywords in Rust.
pub const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
    "trait", "true", "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "abstract", "become", "box",
    "do", "final", "gen", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "_",
];

/// Check whether an identifier is a Rust keyword.
pub fn is_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Check that `name` can name a generated type.
///
/// Returns the reason it cannot.
pub fn check_identifier(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty name");
    }
    if is_keyword(name) {
        return Err("reserved word");
    }
    if name.starts_with("r#") || syn::parse_str::<syn::Ident>(name).is_err() {
        return Err("not an identifier");
    }
    Ok(())
}

/// Name and module of one generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactName {
    namespace: Option<String>,
    simple: String,
}

impl ArtifactName {
    pub fn new(namespace: Option<String>, simple: impl Into<String>) -> Self {
        Self {
            namespace,
            simple: simple.into(),
        }
    }

    /// Name of the artifact generating `kind` accessors for `target`.
    ///
    /// A custom name replaces the default `<Type><MarkerName>` and must be a plain, non-reserved identifier other
    /// than the target's own name. Both live in the target's module, so the artifact can reach fields private to
    /// that module.
    pub fn resolve(
        target: &TypeDescriptor,
        kind: AccessorKind,
        custom: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        let simple = match custom {
            Some(name) => {
                check_identifier(name)
                    .and_then(|()| {
                        if name == target.simple_name() {
                            Err("same name as the target type")
                        } else {
                            Ok(())
                        }
                    })
                    .map_err(|reason| ConfigurationError::InvalidArtifactName {
                        name: name.to_string(),
                        target: target.qualified_name().to_string(),
                        reason,
                    })?;
                name.to_string()
            }
            None => format!("{}{}", target.simple_name(), kind.artifact_suffix()),
        };
        Ok(Self::new(target.namespace().map(str::to_string), simple))
    }

    pub fn simple_name(&self) -> &str {
        &self.simple
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}::{}", self.simple),
            None => self.simple.clone(),
        }
    }

    /// `point_field_getters`
    pub fn file_stem(&self) -> String {
        self.simple.to_case(Case::Snake)
    }

    /// Directory of the artifact relative to the output root: one level per namespace segment.
    pub fn directory(&self) -> PathBuf {
        namespace_dir(self.namespace())
    }

    /// `geometry/shapes/point_field_getters.rs`
    pub fn relative_path(&self) -> PathBuf {
        self.directory().join(format!("{}.rs", self.file_stem()))
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// Output directory for a namespace, relative to the output root.
pub fn namespace_dir(namespace: Option<&str>) -> PathBuf {
    namespace
        .map(|ns| ns.split("::").collect::<PathBuf>())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::model::StaticType;

    fn point() -> std::rc::Rc<TypeDescriptor> {
        TypeDescriptor::new(StaticType::new("Point").in_namespace("geometry::shapes").into_element())
    }

    #[test]
    fn test_default_name_uses_marker_suffix_and_namespace() {
        let name = ArtifactName::resolve(&point(), AccessorKind::Getter, None).unwrap();
        assert_eq!(name.simple_name(), "PointFieldGetters");
        assert_eq!(name.qualified_name(), "geometry::shapes::PointFieldGetters");

        let name = ArtifactName::resolve(&point(), AccessorKind::Setter, None).unwrap();
        assert_eq!(name.simple_name(), "PointFieldSetters");
    }

    #[test]
    fn test_root_type_has_no_namespace() {
        let target = TypeDescriptor::new(StaticType::new("Config").into_element());
        let name = ArtifactName::resolve(&target, AccessorKind::Getter, None).unwrap();
        assert_eq!(name.namespace(), None);
        assert_eq!(name.relative_path(), Path::new("config_field_getters.rs"));
    }

    #[test]
    fn test_custom_name_is_used_verbatim() {
        let name = ArtifactName::resolve(&point(), AccessorKind::Getter, Some("PointReaders")).unwrap();
        assert_eq!(name.qualified_name(), "geometry::shapes::PointReaders");
        assert_eq!(name.relative_path(), Path::new("geometry/shapes/point_readers.rs"));
    }

    #[test]
    fn test_reserved_custom_name_is_rejected_with_name() {
        let err = ArtifactName::resolve(&point(), AccessorKind::Getter, Some("match")).unwrap_err();
        assert_eq!(err.name(), "match");
        assert_eq!(
            err,
            ConfigurationError::InvalidArtifactName {
                name: "match".into(),
                target: "geometry::shapes::Point".into(),
                reason: "reserved word",
            }
        );
    }

    #[test]
    fn test_non_identifier_custom_names_are_rejected() {
        for bad in ["", "1Point", "Point Getters", "a-b", "r#type", "geometry::Point"] {
            let err = ArtifactName::resolve(&point(), AccessorKind::Setter, Some(bad));
            assert!(err.is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_custom_name_may_not_shadow_the_target() {
        let err = ArtifactName::resolve(&point(), AccessorKind::Getter, Some("Point")).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidArtifactName {
                name: "Point".into(),
                target: "geometry::shapes::Point".into(),
                reason: "same name as the target type",
            }
        );
        assert!(ArtifactName::resolve(&point(), AccessorKind::Getter, Some("Points")).is_ok());
    }

    #[test]
    fn test_check_identifier() {
        assert!(check_identifier("Readers").is_ok());
        assert!(check_identifier("_private").is_ok());
        assert_eq!(check_identifier("Self"), Err("reserved word"));
        assert_eq!(check_identifier("gen"), Err("reserved word"));
        assert_eq!(check_identifier("9lives"), Err("not an identifier"));
    }
}
