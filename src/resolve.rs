//! Accessor resolution: decide whether a candidate field gets an accessor, and how it is reached.
//!
//! Decision order, first match wins:
//!
//! 1. the field carries `#[getter]` / `#[setter]` (per kind),
//! 2. the owning type carries `#[getter]` / `#[setter]`,
//! 3. the owning type carries `#[accessors]`,
//! 4. a conventional method exists (`get_x` / `is_x` for `bool` / `set_x`) with a matching signature.
//!
//! Markers at a private-equivalent level (`private`, `none`) disqualify the field outright. A marker-admitted field
//! binds to a usable conventional method when one exists and otherwise gets a synthesized closure. Convention-only
//! fields are dropped silently when no usable method exists.
//!
//! Generated code lives in the requesting namespace, so every embedding field on the path, and the field itself
//! when read or written directly, must be visible from there. Entries that would name an unreachable member are
//! dropped.
//!
//! Resolution never fails; every candidate ends up as a [`Decision`].

use std::fmt;

use crate::model::markers::AllAccessors;
use crate::model::{AccessLevel, AccessorKind, FieldDescriptor, MethodDescriptor, TypeDescriptor};
use crate::select::Candidate;

/// How a resolved entry reaches its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Statically bound call to an existing method of `owner`.
    Method {
        /// Qualified name of the declaring type.
        owner: String,
        method: String,
        path: Vec<String>,
    },
    /// Synthesized closure that reads or writes the field directly.
    Closure { field: String, path: Vec<String> },
}

impl Fragment {
    pub fn is_method(&self) -> bool {
        matches!(self, Fragment::Method { .. })
    }

    pub fn path(&self) -> &[String] {
        match self {
            Fragment::Method { path, .. } | Fragment::Closure { path, .. } => path,
        }
    }
}

/// Resolved `(field name, fragment)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorEntry {
    pub kind: AccessorKind,
    /// Mapping key.
    pub field: String,
    /// Declared type of the field, as written. Shown in traces only.
    pub value_type: String,
    pub fragment: Fragment,
}

impl AccessorEntry {
    fn receiver(&self) -> String {
        let mut receiver = String::from("instance");
        for segment in self.fragment.path() {
            receiver.push('.');
            receiver.push_str(segment);
        }
        receiver
    }

    /// Receiver argument of a bound method call.
    fn argument(&self) -> String {
        match (self.fragment.path().is_empty(), self.kind) {
            (true, _) => String::from("instance"),
            (false, AccessorKind::Getter) => format!("&{}", self.receiver()),
            (false, AccessorKind::Setter) => format!("&mut {}", self.receiver()),
        }
    }
}

impl fmt::Display for AccessorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let receiver = self.receiver();
        match (&self.fragment, self.kind) {
            (Fragment::Method { owner, method, .. }, AccessorKind::Getter) => {
                write!(f, "crate::{owner}::{method}({})", self.argument())
            }
            (Fragment::Method { owner, method, .. }, AccessorKind::Setter) => {
                write!(
                    f,
                    "crate::{owner}::{method}({}, downcast::<{}>(value))",
                    self.argument(),
                    self.value_type
                )
            }
            (Fragment::Closure { field, .. }, AccessorKind::Getter) => {
                write!(f, "|instance| {receiver}.{field}")
            }
            (Fragment::Closure { field, .. }, AccessorKind::Setter) => {
                write!(f, "|instance, value| {receiver}.{field} = downcast::<{}>(value)", self.value_type)
            }
        }
    }
}

/// Rule that admitted a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    FieldMarker,
    TypeMarker,
    AllAccessors,
    Convention,
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Via::FieldMarker => write!(f, "field marker"),
            Via::TypeMarker => write!(f, "type marker"),
            Via::AllAccessors => write!(f, "all accessors"),
            Via::Convention => write!(f, "convention"),
        }
    }
}

/// Why a field was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// A marker at a private-equivalent level.
    MarkerDisqualifies { level: AccessLevel, on_field: bool },
    /// No method with any conventional name.
    NoConventionMethod { expected: String },
    /// A conventionally named method exists but its signature does not fit.
    SignatureMismatch { method: String },
    PrivateMethod { method: String },
    /// Namespace-scoped setter requested from another namespace.
    ForeignNamespace { method: String, namespace: String },
    /// The field, or an embedding field on its path, is not visible from the requesting namespace.
    InaccessibleField { member: String, namespace: String },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MarkerDisqualifies { level, on_field } => {
                let place = if *on_field { "field" } else { "type" };
                write!(f, "{place} marker restricts access to {level}")
            }
            DropReason::NoConventionMethod { expected } => write!(f, "no method named {expected}"),
            DropReason::SignatureMismatch { method } => write!(f, "{method} does not match the expected signature"),
            DropReason::PrivateMethod { method } => write!(f, "{method} is private"),
            DropReason::ForeignNamespace { method, namespace } => {
                write!(f, "{method} is scoped to namespace `{namespace}`")
            }
            DropReason::InaccessibleField { member, namespace } => {
                write!(f, "field `{member}` is not visible outside namespace `{namespace}`")
            }
        }
    }
}

/// Outcome of resolving one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Resolved { entry: AccessorEntry, via: Via },
    Dropped { field: String, reason: DropReason },
}

impl Decision {
    pub fn field(&self) -> &str {
        match self {
            Decision::Resolved { entry, .. } => &entry.field,
            Decision::Dropped { field, .. } => field,
        }
    }

    pub fn entry(&self) -> Option<&AccessorEntry> {
        match self {
            Decision::Resolved { entry, .. } => Some(entry),
            Decision::Dropped { .. } => None,
        }
    }

    pub fn into_entry(self) -> Option<AccessorEntry> {
        match self {
            Decision::Resolved { entry, .. } => Some(entry),
            Decision::Dropped { .. } => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Resolved { entry, via } => write!(f, "{}: {entry} [{via}]", entry.field),
            Decision::Dropped { field, reason } => write!(f, "{field}: dropped ({reason})"),
        }
    }
}

/// Conventional method names for a field, in lookup order.
pub fn convention_names(kind: AccessorKind, field: &FieldDescriptor) -> Vec<String> {
    match kind {
        AccessorKind::Getter if field.is_boolean() => vec![format!("is_{}", field.name())],
        AccessorKind::Getter => vec![format!("get_{}", field.name())],
        AccessorKind::Setter => vec![format!("set_{}", field.name())],
    }
}

/// Result of the conventional method search.
enum Lookup<'t> {
    Usable(&'t MethodDescriptor),
    Rejected(DropReason),
}

/// Resolves candidates of one accessor kind on behalf of one artifact.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    kind: AccessorKind,
    /// Namespace the artifact is generated into.
    requesting_namespace: Option<&'a str>,
}

impl<'a> Resolver<'a> {
    pub fn new(kind: AccessorKind, requesting_namespace: Option<&'a str>) -> Self {
        Self {
            kind,
            requesting_namespace,
        }
    }

    pub fn kind(&self) -> AccessorKind {
        self.kind
    }

    /// Resolve one candidate to an entry, or `None` when it is dropped.
    pub fn resolve(&self, candidate: &Candidate) -> Option<AccessorEntry> {
        self.decide(candidate).into_entry()
    }

    pub fn decide_all(&self, candidates: &[Candidate]) -> Vec<Decision> {
        candidates.iter().map(|c| self.decide(c)).collect()
    }

    pub fn decide(&self, candidate: &Candidate) -> Decision {
        let field = &candidate.field;
        let owner = &candidate.owner;
        let lookup = self.lookup(owner, field);

        let decision = if let Some(level) = self.kind.accessor_level(field.annotations()) {
            self.by_marker(candidate, lookup, level, Via::FieldMarker)
        } else if let Some(level) = self.kind.accessor_level(owner.annotations()) {
            self.by_marker(candidate, lookup, level, Via::TypeMarker)
        } else if owner.has_annotation::<AllAccessors>() {
            self.by_marker(candidate, lookup, AccessLevel::Public, Via::AllAccessors)
        } else {
            match lookup {
                Lookup::Usable(method) => self.reachable(candidate, Some(method), Via::Convention),
                Lookup::Rejected(reason) => Decision::Dropped {
                    field: field.name().to_string(),
                    reason,
                },
            }
        };

        tracing::debug!(
            kind = %self.kind,
            owner = owner.qualified_name(),
            decision = %decision,
            "resolved field"
        );
        decision
    }

    fn by_marker(&self, candidate: &Candidate, lookup: Lookup<'_>, level: AccessLevel, via: Via) -> Decision {
        if !level.permits_access() {
            return Decision::Dropped {
                field: candidate.field.name().to_string(),
                reason: DropReason::MarkerDisqualifies {
                    level,
                    on_field: via == Via::FieldMarker,
                },
            };
        }
        let method = match lookup {
            Lookup::Usable(method) => Some(method),
            Lookup::Rejected(_) => None,
        };
        self.reachable(candidate, method, via)
    }

    /// Resolve `candidate` unless the generated code would name a member hidden from the requesting namespace.
    fn reachable(&self, candidate: &Candidate, method: Option<&MethodDescriptor>, via: Via) -> Decision {
        let hidden_hop = candidate
            .hops
            .iter()
            .find(|hop| !hop.visibility.is_visible_from(hop.declared_in.as_deref(), self.requesting_namespace))
            .map(|hop| (hop.field.clone(), hop.declared_in.clone()));
        let field = &candidate.field;
        let owner_namespace = candidate.owner.namespace();
        // A bound method reaches the field itself.
        let field_hidden =
            method.is_none() && !field.visibility().is_visible_from(owner_namespace, self.requesting_namespace);
        let hidden_field = field_hidden.then(|| (field.name().to_string(), owner_namespace.map(str::to_string)));

        match hidden_hop.or(hidden_field) {
            Some((member, namespace)) => Decision::Dropped {
                field: field.name().to_string(),
                reason: DropReason::InaccessibleField {
                    member,
                    namespace: namespace.unwrap_or_else(|| String::from("crate")),
                },
            },
            None => Decision::Resolved {
                entry: self.entry(candidate, method),
                via,
            },
        }
    }

    fn entry(&self, candidate: &Candidate, method: Option<&MethodDescriptor>) -> AccessorEntry {
        let fragment = match method {
            Some(method) => Fragment::Method {
                owner: candidate.owner.qualified_name().to_string(),
                method: method.name().to_string(),
                path: candidate.path(),
            },
            None => Fragment::Closure {
                field: candidate.field.name().to_string(),
                path: candidate.path(),
            },
        };
        AccessorEntry {
            kind: self.kind,
            field: candidate.field.name().to_string(),
            value_type: candidate.field.ty().to_string(),
            fragment,
        }
    }

    /// Find a usable conventional method on `owner`, inspecting every overload of every conventional name.
    fn lookup<'t>(&self, owner: &'t TypeDescriptor, field: &FieldDescriptor) -> Lookup<'t> {
        let names = convention_names(self.kind, field);
        let mut rejected: Option<DropReason> = None;
        let mut mismatched: Option<String> = None;

        for name in &names {
            if !owner.has_method(name) {
                continue;
            }
            for method in owner.methods_by_name(name) {
                let fits = match self.kind {
                    AccessorKind::Getter => method.is_getter_for(field),
                    AccessorKind::Setter => method.is_setter_for(field),
                };
                if !fits {
                    mismatched.get_or_insert_with(|| name.clone());
                    continue;
                }
                if method.visibility().is_private() {
                    rejected.get_or_insert(DropReason::PrivateMethod { method: name.clone() });
                    continue;
                }
                if self.kind == AccessorKind::Setter
                    && method.visibility().is_namespace_scoped()
                    && owner.namespace() != self.requesting_namespace
                {
                    rejected.get_or_insert(DropReason::ForeignNamespace {
                        method: name.clone(),
                        namespace: owner.namespace().unwrap_or("crate").to_string(),
                    });
                    continue;
                }
                return Lookup::Usable(method);
            }
        }

        let reason = rejected
            .or_else(|| mismatched.map(|method| DropReason::SignatureMismatch { method }))
            .unwrap_or_else(|| DropReason::NoConventionMethod {
                expected: names.join(" or "),
            });
        Lookup::Rejected(reason)
    }
}
