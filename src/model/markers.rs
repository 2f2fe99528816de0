//! Marker vocabulary: the helper attributes the generator understands.
//!
//! | marker | placement | meaning |
//! |---|---|---|
//! | `#[field_getters(..)]` | type | generate a getter table for this type |
//! | `#[field_setters(..)]` | type | generate a setter table for this type |
//! | `#[getter(vis = "..")]` | field or type | the field(s) have a getter |
//! | `#[setter(vis = "..")]` | field or type | the field(s) have a setter |
//! | `#[accessors]` | type | every field has a getter and a setter |
//! | `#[parent]` | field | the field embeds the ancestor type |

use super::annotation::Annotation;
use super::visibility::AccessLevel;

pub const ARG_NAME: &str = "name";
pub const ARG_INCLUDE: &str = "include";
pub const ARG_EXCLUDE: &str = "exclude";
pub const ARG_VIS: &str = "vis";

/// Typed view over an [`Annotation`] with a fixed name.
pub trait Marker: Sized {
    const NAME: &'static str;

    fn from_annotation(annotation: &Annotation) -> Self;
}

/// Arguments shared by both configuration markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Custom artifact name, validated before use.
    pub name: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl SelectionConfig {
    fn from_annotation(annotation: &Annotation) -> Self {
        Self {
            name: annotation.str_arg(ARG_NAME).map(str::to_string),
            include: annotation.list_arg(ARG_INCLUDE).to_vec(),
            exclude: annotation.list_arg(ARG_EXCLUDE).to_vec(),
        }
    }
}

fn access_level(annotation: &Annotation) -> AccessLevel {
    annotation
        .str_arg(ARG_VIS)
        .and_then(AccessLevel::parse)
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldGetters(pub SelectionConfig);

impl Marker for FieldGetters {
    const NAME: &'static str = "field_getters";

    fn from_annotation(annotation: &Annotation) -> Self {
        Self(SelectionConfig::from_annotation(annotation))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSetters(pub SelectionConfig);

impl Marker for FieldSetters {
    const NAME: &'static str = "field_setters";

    fn from_annotation(annotation: &Annotation) -> Self {
        Self(SelectionConfig::from_annotation(annotation))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetterMarker {
    pub level: AccessLevel,
}

impl Marker for GetterMarker {
    const NAME: &'static str = "getter";

    fn from_annotation(annotation: &Annotation) -> Self {
        Self {
            level: access_level(annotation),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetterMarker {
    pub level: AccessLevel,
}

impl Marker for SetterMarker {
    const NAME: &'static str = "setter";

    fn from_annotation(annotation: &Annotation) -> Self {
        Self {
            level: access_level(annotation),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllAccessors;

impl Marker for AllAccessors {
    const NAME: &'static str = "accessors";

    fn from_annotation(_: &Annotation) -> Self {
        AllAccessors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent;

impl Marker for Parent {
    const NAME: &'static str = "parent";

    fn from_annotation(_: &Annotation) -> Self {
        Parent
    }
}

/// Every marker name, in the order the derive macro registers them.
pub const MARKER_NAMES: &[&str] = &[
    FieldGetters::NAME,
    FieldSetters::NAME,
    GetterMarker::NAME,
    SetterMarker::NAME,
    AllAccessors::NAME,
    Parent::NAME,
];

pub fn is_marker(name: &str) -> bool {
    MARKER_NAMES.contains(&name)
}
