//! Accessor kinds: the read/write axis every later stage is parameterized over.

use std::fmt;

use convert_case::{Case, Casing};

use super::annotation::AnnotationSet;
use super::markers::{FieldGetters, FieldSetters, GetterMarker, Marker, SelectionConfig, SetterMarker};
use super::visibility::AccessLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessorKind {
    Getter,
    Setter,
}

impl AccessorKind {
    pub const ALL: [AccessorKind; 2] = [AccessorKind::Getter, AccessorKind::Setter];

    /// Name of the type-level configuration marker that requests an artifact of this kind.
    pub fn config_marker(self) -> &'static str {
        match self {
            AccessorKind::Getter => FieldGetters::NAME,
            AccessorKind::Setter => FieldSetters::NAME,
        }
    }

    /// Name of the per-field / per-type "has accessor" marker of this kind.
    pub fn accessor_marker(self) -> &'static str {
        match self {
            AccessorKind::Getter => GetterMarker::NAME,
            AccessorKind::Setter => SetterMarker::NAME,
        }
    }

    /// Selection configuration, if the configuration marker of this kind is present.
    pub fn selection_config(self, annotations: &AnnotationSet) -> Option<SelectionConfig> {
        match self {
            AccessorKind::Getter => annotations.marker::<FieldGetters>().map(|m| m.0),
            AccessorKind::Setter => annotations.marker::<FieldSetters>().map(|m| m.0),
        }
    }

    /// Access level of the "has accessor" marker of this kind, if present.
    pub fn accessor_level(self, annotations: &AnnotationSet) -> Option<AccessLevel> {
        match self {
            AccessorKind::Getter => annotations.marker::<GetterMarker>().map(|m| m.level),
            AccessorKind::Setter => annotations.marker::<SetterMarker>().map(|m| m.level),
        }
    }

    /// Default artifact name suffix: the configuration marker's own name (`FieldGetters`).
    pub fn artifact_suffix(self) -> String {
        self.config_marker().to_case(Case::Pascal)
    }

    pub fn label(self) -> &'static str {
        match self {
            AccessorKind::Getter => "getter",
            AccessorKind::Setter => "setter",
        }
    }

    /// Parse a user-facing spelling (`getters`, `getter`, `get`, ...).
    pub fn parse(spelling: &str) -> Option<Self> {
        match spelling {
            "getters" | "getter" | "get" | "read" => Some(AccessorKind::Getter),
            "setters" | "setter" | "set" | "write" => Some(AccessorKind::Setter),
            _ => None,
        }
    }
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::annotation::{Annotation, AnnotationValue};

    #[test]
    fn test_artifact_suffix_is_marker_name() {
        assert_eq!(AccessorKind::Getter.artifact_suffix(), "FieldGetters");
        assert_eq!(AccessorKind::Setter.artifact_suffix(), "FieldSetters");
    }

    #[test]
    fn test_kind_selects_its_own_markers() {
        let set: AnnotationSet = vec![
            Annotation::new("field_getters"),
            Annotation::new("setter").with_arg("vis", AnnotationValue::Str("none".into())),
        ]
        .into_iter()
        .collect();
        assert!(AccessorKind::Getter.selection_config(&set).is_some());
        assert!(AccessorKind::Setter.selection_config(&set).is_none());
        assert_eq!(AccessorKind::Getter.accessor_level(&set), None);
        assert_eq!(AccessorKind::Setter.accessor_level(&set), Some(AccessLevel::None));
    }

    #[test]
    fn test_parse_spellings() {
        assert_eq!(AccessorKind::parse("getters"), Some(AccessorKind::Getter));
        assert_eq!(AccessorKind::parse("set"), Some(AccessorKind::Setter));
        assert_eq!(AccessorKind::parse("both"), None);
    }
}
