//! Structural descriptor model.
//!
//! Read-only views over one declared type's fields, methods, annotations, visibility and ancestor chain, built
//! from a host model behind the [`TypeElement`] trait.
//!
//! ## Modules
//!
//! - `element` - the host seam (`TypeElement`) and a plain-data implementation (`StaticType`)
//! - `descriptor` - memoized descriptors wrapping host elements
//! - `annotation` - generic annotations
//! - `markers` - the typed marker vocabulary
//! - `kind` - getter/setter axis
//! - `visibility` - member visibility and marker access levels

pub mod annotation;
pub mod descriptor;
pub mod element;
pub mod kind;
pub mod markers;
pub mod visibility;

pub use annotation::{Annotation, AnnotationSet, AnnotationValue};
pub use descriptor::{Ancestor, FieldDescriptor, MethodDescriptor, TypeDescriptor};
pub use element::{FieldElement, MethodElement, Receiver, StaticType, Superclass, TypeElement};
pub use kind::AccessorKind;
pub use markers::{Marker, SelectionConfig};
pub use visibility::{AccessLevel, Visibility};
