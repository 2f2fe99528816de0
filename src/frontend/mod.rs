//! Rust source frontend
//!
//! Builds the host model from parsed Rust sources: structs with named fields become [`TypeElement`]s, their
//! inherent methods are gathered from every `impl` block in the scanned crate, and marker attributes become
//! annotations.
//!
//! ## Modules
//!
//! - `universe` - module-tree loading, the struct index and the `TypeElement` implementation
//! - `attrs` - marker attribute parsing and validation
//! - `errors` - `FrontendError` with source spans for `miette` rendering
//!
//! [`TypeElement`]: crate::model::TypeElement

pub mod attrs;
pub mod errors;
pub mod universe;

pub use errors::FrontendError;
pub use universe::{SourceUniverse, normalize_tokens, type_text};
