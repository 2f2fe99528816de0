//! Attribute-like annotations attached to types, fields and methods.
//!
//! The host model hands over annotations in this generic shape. Typed access goes through
//! [`crate::model::markers::Marker`].

use super::markers::Marker;

/// Value of one annotation argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    Str(String),
    List(Vec<String>),
}

/// One annotation: a name plus `key = value` arguments in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    name: String,
    args: Vec<(String, AnnotationValue)>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Builder-style argument setter.
    pub fn with_arg(mut self, key: impl Into<String>, value: AnnotationValue) -> Self {
        self.args.push((key.into(), value));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[(String, AnnotationValue)] {
        &self.args
    }

    pub fn arg(&self, key: &str) -> Option<&AnnotationValue> {
        self.args.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// String argument, if present and string-valued.
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        match self.arg(key)? {
            AnnotationValue::Str(s) => Some(s.as_str()),
            AnnotationValue::List(_) => None,
        }
    }

    /// List argument; an absent argument reads as an empty list.
    pub fn list_arg(&self, key: &str) -> &[String] {
        match self.arg(key) {
            Some(AnnotationValue::List(items)) => items,
            _ => &[],
        }
    }
}

/// The annotations of one declared element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet(Vec<Annotation>);

impl AnnotationSet {
    pub fn new(annotations: Vec<Annotation>) -> Self {
        Self(annotations)
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.iter().any(|a| a.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Annotation> {
        self.0.iter().find(|a| a.name == name)
    }

    pub fn has_marker<M: Marker>(&self) -> bool {
        self.has(M::NAME)
    }

    /// Typed marker lookup. A bare marker and a parameterized one read the same way.
    pub fn marker<M: Marker>(&self) -> Option<M> {
        self.get(M::NAME).map(M::from_annotation)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Annotation> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
