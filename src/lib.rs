#![forbid(unsafe_code)]
//! fastfield: build-time generation of field accessor tables
//!
//! Structs opt in with a type-level `#[field_getters]` or `#[field_setters]` marker. For each such struct the
//! generator writes a table from field name to a typed getter or setter, resolved from conventional methods
//! (`get_x`, `is_x`, `set_x`), explicit `#[getter]`/`#[setter]` markers, or direct field access.
//!
//! ## Pipeline
//!
//! - `frontend` - scans a crate's sources into type elements
//! - `model` - descriptors, markers and visibility
//! - `select` - which fields a table covers
//! - `resolve` - how each field is read or written
//! - `backend` - renders tables as Rust source
//! - `driver` - runs one pass per (type, kind) and persists the output
//!
//! ## Panic Policy
//!
//! Production code returns `Result` and propagates with `?`. The `cli` module enforces
//! `#![deny(clippy::unwrap_used)]`. `.unwrap()` and `.expect()` are acceptable in tests.

pub mod backend;
pub mod cli;
pub mod config;
pub mod driver;
pub mod errors;
pub mod frontend;
pub mod model;
pub mod resolve;
pub mod select;
pub mod version;

pub use backend::{ArtifactName, GeneratedArtifact, SourceGenerator};
pub use config::GeneratorConfig;
pub use driver::{BuildError, BuildOutput, Builder, Filer, FsFiler, MemoryFiler, PassPlan, ProcessReport, Processor};
pub use errors::{ConfigurationError, EmitError, ProcessError};
pub use frontend::{FrontendError, SourceUniverse};
pub use model::{AccessorKind, TypeDescriptor, TypeElement};
pub use resolve::{AccessorEntry, Decision, Resolver};
pub use select::FieldSelectionRule;
