//! The host model: how a declared type looks before it is wrapped in a descriptor.
//!
//! [`TypeElement`] is the only seam between the generator and whatever produced the structural information. The syn
//! frontend implements it over parsed source; [`StaticType`] implements it over plain data for hosts that build
//! their model programmatically.

use std::rc::Rc;

use super::annotation::Annotation;
use super::visibility::Visibility;

/// How a method takes `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// Associated function without `self`.
    None,
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
    /// `self` by value
    Value,
}

/// One declared field as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement {
    pub name: String,
    /// Declared type, whitespace-normalized (`Option<String>`).
    pub ty: String,
    pub visibility: Visibility,
    pub annotations: Vec<Annotation>,
}

impl FieldElement {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            visibility: Visibility::Public,
            annotations: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// One declared method as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodElement {
    pub name: String,
    pub receiver: Receiver,
    /// Parameter types excluding the receiver.
    pub params: Vec<String>,
    /// Return type; `None` for `()`.
    pub return_type: Option<String>,
    pub visibility: Visibility,
    pub annotations: Vec<Annotation>,
}

impl MethodElement {
    pub fn new(name: impl Into<String>, receiver: Receiver) -> Self {
        Self {
            name: name.into(),
            receiver,
            params: Vec::new(),
            return_type: None,
            visibility: Visibility::Public,
            annotations: Vec::new(),
        }
    }

    /// `pub fn name(&self) -> ty`
    pub fn getter(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name, Receiver::Ref).returning(ty)
    }

    /// `pub fn name(&mut self, value: ty)`
    pub fn setter(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name, Receiver::RefMut).param(ty)
    }

    pub fn param(mut self, ty: impl Into<String>) -> Self {
        self.params.push(ty.into());
        self
    }

    pub fn returning(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Link from a type to the ancestor it embeds.
pub struct Superclass {
    /// Name of the embedding field on the child type.
    pub via: String,
    /// Visibility of the embedding field.
    pub visibility: Visibility,
    pub element: Rc<dyn TypeElement>,
}

/// Structural model of one declared type.
///
/// Every query may be expensive for the host; descriptors call each one at most once.
pub trait TypeElement {
    fn simple_name(&self) -> String;

    /// Module path relative to the crate root; `None` at the root.
    fn namespace(&self) -> Option<String>;

    fn visibility(&self) -> Visibility;

    /// Whether the type declares generic parameters.
    fn is_generic(&self) -> bool;

    fn annotations(&self) -> Vec<Annotation>;

    /// Declared data fields, excluding the ancestor link.
    fn declared_fields(&self) -> Vec<FieldElement>;

    fn declared_methods(&self) -> Vec<MethodElement>;

    fn superclass(&self) -> Option<Superclass>;
}

/// Plain-data [`TypeElement`].
#[derive(Clone, Default)]
pub struct StaticType {
    name: String,
    namespace: Option<String>,
    visibility: Option<Visibility>,
    generic: bool,
    annotations: Vec<Annotation>,
    fields: Vec<FieldElement>,
    methods: Vec<MethodElement>,
    parent: Option<(String, Visibility, Rc<dyn TypeElement>)>,
}

impl StaticType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn generic(mut self) -> Self {
        self.generic = true;
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn field(mut self, field: FieldElement) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodElement) -> Self {
        self.methods.push(method);
        self
    }

    /// Embed `parent` through a public field named `via`.
    pub fn extends(self, via: impl Into<String>, parent: Rc<dyn TypeElement>) -> Self {
        self.extends_with(via, Visibility::Public, parent)
    }

    pub fn extends_with(mut self, via: impl Into<String>, visibility: Visibility, parent: Rc<dyn TypeElement>) -> Self {
        self.parent = Some((via.into(), visibility, parent));
        self
    }

    pub fn into_element(self) -> Rc<dyn TypeElement> {
        Rc::new(self)
    }
}

impl TypeElement for StaticType {
    fn simple_name(&self) -> String {
        self.name.clone()
    }

    fn namespace(&self) -> Option<String> {
        self.namespace.clone()
    }

    fn visibility(&self) -> Visibility {
        self.visibility.unwrap_or(Visibility::Public)
    }

    fn is_generic(&self) -> bool {
        self.generic
    }

    fn annotations(&self) -> Vec<Annotation> {
        self.annotations.clone()
    }

    fn declared_fields(&self) -> Vec<FieldElement> {
        self.fields.clone()
    }

    fn declared_methods(&self) -> Vec<MethodElement> {
        self.methods.clone()
    }

    fn superclass(&self) -> Option<Superclass> {
        self.parent.as_ref().map(|(via, visibility, element)| Superclass {
            via: via.clone(),
            visibility: *visibility,
            element: Rc::clone(element),
        })
    }
}
