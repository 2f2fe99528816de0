//! Memoized, read-only descriptors over host [`TypeElement`]s.
//!
//! A [`TypeDescriptor`] is built once per generation pass and owned by it. Derived sets (fields, methods,
//! annotations, the ancestor link) are computed on first use and cached; the host element is never asked twice.
//! Nothing here fails: absence reads as an empty result.
//!
//! A pass owns its descriptor graph exclusively; the `Rc`/`RefCell` caches are not thread-safe.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::annotation::AnnotationSet;
use super::element::{FieldElement, MethodElement, Receiver, TypeElement};
use super::markers::Marker;
use super::visibility::Visibility;

/// Type name treated as boolean by the getter convention.
pub const BOOLEAN_TYPE: &str = "bool";

/// Ancestor link of a descriptor.
#[derive(Debug, Clone)]
pub struct Ancestor {
    /// Field on the child type that embeds the ancestor.
    pub via: String,
    pub visibility: Visibility,
    pub descriptor: Rc<TypeDescriptor>,
}

pub struct TypeDescriptor {
    element: Rc<dyn TypeElement>,
    this: Weak<TypeDescriptor>,
    simple_name: String,
    namespace: Option<String>,
    qualified_name: String,
    visibility: Visibility,
    generic: bool,
    annotations: OnceCell<AnnotationSet>,
    fields: OnceCell<Vec<FieldDescriptor>>,
    methods: OnceCell<Vec<MethodDescriptor>>,
    method_presence: RefCell<HashMap<String, bool>>,
    ancestor: OnceCell<Option<Ancestor>>,
}

impl TypeDescriptor {
    pub fn new(element: Rc<dyn TypeElement>) -> Rc<Self> {
        let simple_name = element.simple_name();
        let namespace = element.namespace().filter(|ns| !ns.is_empty());
        let qualified_name = match &namespace {
            Some(ns) => format!("{ns}::{simple_name}"),
            None => simple_name.clone(),
        };
        let visibility = element.visibility();
        let generic = element.is_generic();

        Rc::new_cyclic(|this| Self {
            element,
            this: this.clone(),
            simple_name,
            namespace,
            qualified_name,
            visibility,
            generic,
            annotations: OnceCell::new(),
            fields: OnceCell::new(),
            methods: OnceCell::new(),
            method_presence: RefCell::new(HashMap::new()),
            ancestor: OnceCell::new(),
        })
    }

    /// `namespace::Name`, or `Name` at the crate root.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_generic(&self) -> bool {
        self.generic
    }

    pub fn annotations(&self) -> &AnnotationSet {
        self.annotations
            .get_or_init(|| AnnotationSet::new(self.element.annotations()))
    }

    pub fn has_annotation<M: Marker>(&self) -> bool {
        self.annotations().has_marker::<M>()
    }

    pub fn annotation<M: Marker>(&self) -> Option<M> {
        self.annotations().marker::<M>()
    }

    /// Declared fields of this type only (no ancestors).
    pub fn fields(&self) -> &[FieldDescriptor] {
        self.fields.get_or_init(|| {
            self.element
                .declared_fields()
                .into_iter()
                .map(|field| FieldDescriptor::new(field, self.this.clone()))
                .collect()
        })
    }

    /// Declared methods of this type only.
    pub fn methods(&self) -> &[MethodDescriptor] {
        self.methods.get_or_init(|| {
            self.element
                .declared_methods()
                .into_iter()
                .map(|method| MethodDescriptor::new(method, self.this.clone()))
                .collect()
        })
    }

    /// Every method with this name, in declaration order.
    pub fn methods_by_name(&self, name: &str) -> Vec<&MethodDescriptor> {
        self.methods().iter().filter(|m| m.name == name).collect()
    }

    /// Whether any method with this name exists. Answers are cached per name.
    pub fn has_method(&self, name: &str) -> bool {
        if let Some(&known) = self.method_presence.borrow().get(name) {
            return known;
        }
        let found = self.methods().iter().any(|m| m.name == name);
        self.method_presence.borrow_mut().insert(name.to_string(), found);
        found
    }

    /// The embedded ancestor, if the host reports one.
    pub fn ancestor(&self) -> Option<&Ancestor> {
        self.ancestor
            .get_or_init(|| {
                self.element.superclass().map(|sc| Ancestor {
                    via: sc.via,
                    visibility: sc.visibility,
                    descriptor: TypeDescriptor::new(sc.element),
                })
            })
            .as_ref()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("qualified_name", &self.qualified_name)
            .field("visibility", &self.visibility)
            .field("generic", &self.generic)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    ty: String,
    visibility: Visibility,
    annotations: AnnotationSet,
    owner: Weak<TypeDescriptor>,
}

impl FieldDescriptor {
    fn new(element: FieldElement, owner: Weak<TypeDescriptor>) -> Self {
        Self {
            name: element.name,
            ty: element.ty,
            visibility: element.visibility,
            annotations: AnnotationSet::new(element.annotations),
            owner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type text.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_boolean(&self) -> bool {
        self.ty == BOOLEAN_TYPE
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn has_annotation<M: Marker>(&self) -> bool {
        self.annotations.has_marker::<M>()
    }

    pub fn annotation<M: Marker>(&self) -> Option<M> {
        self.annotations.marker::<M>()
    }

    /// The declaring type, while its pass is alive.
    pub fn owner(&self) -> Option<Rc<TypeDescriptor>> {
        self.owner.upgrade()
    }
}

#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    name: String,
    receiver: Receiver,
    params: Vec<String>,
    return_type: Option<String>,
    visibility: Visibility,
    annotations: AnnotationSet,
    owner: Weak<TypeDescriptor>,
}

impl MethodDescriptor {
    fn new(element: MethodElement, owner: Weak<TypeDescriptor>) -> Self {
        Self {
            name: element.name,
            receiver: element.receiver,
            params: element.params,
            return_type: element.return_type,
            visibility: element.visibility,
            annotations: AnnotationSet::new(element.annotations),
            owner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn receiver(&self) -> Receiver {
        self.receiver
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn owner(&self) -> Option<Rc<TypeDescriptor>> {
        self.owner.upgrade()
    }

    /// `fn(&self) -> <field type>`
    pub fn is_getter_for(&self, field: &FieldDescriptor) -> bool {
        self.receiver == Receiver::Ref && self.params.is_empty() && self.return_type.as_deref() == Some(field.ty())
    }

    /// `fn(&mut self, <field type>)`
    pub fn is_setter_for(&self, field: &FieldDescriptor) -> bool {
        self.receiver == Receiver::RefMut && self.params.len() == 1 && self.params[0] == field.ty()
    }
}
