//! Processing driver
//!
//! Discovers types carrying a configuration marker and runs one pass per (type, accessor kind):
//!
//! 1. build a fresh descriptor for the type,
//! 2. name the artifact (custom names are validated),
//! 3. select candidate fields and drop same-named fields shadowed by a nearer declaration,
//! 4. resolve each candidate,
//! 5. render the artifact and hand it to the [`Filer`].
//!
//! A failing pass is recorded in the [`ProcessReport`] and never affects the other passes.
//!
//! ## Modules
//!
//! - `filer` - write-once artifact persistence
//! - `build` - build-script integration

pub mod build;
pub mod filer;

use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use crate::backend::{ArtifactName, GeneratedArtifact, SourceGenerator};
use crate::config::GeneratorConfig;
use crate::errors::ProcessError;
use crate::model::{AccessorKind, TypeDescriptor, TypeElement};
use crate::resolve::{AccessorEntry, Decision, Resolver};
use crate::select::{Candidate, FieldSelectionRule};

pub use build::{BuildError, BuildOutput, Builder};
pub use filer::{Filer, FsFiler, MemoryFiler};

/// Everything one pass decided, before rendering.
#[derive(Debug, Clone)]
pub struct PassPlan {
    pub target: String,
    pub kind: AccessorKind,
    pub artifact: ArtifactName,
    pub decisions: Vec<Decision>,
    /// Fields dropped because a nearer level declares the same name.
    pub shadowed: Vec<Candidate>,
    /// Include/exclude names matching no field.
    pub unknown: Vec<String>,
}

impl PassPlan {
    /// Resolved entries in candidate order.
    pub fn entries(&self) -> Vec<AccessorEntry> {
        self.decisions.iter().filter_map(Decision::entry).cloned().collect()
    }
}

impl fmt::Display for PassPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}) -> {}", self.target, self.kind, self.artifact)?;
        for decision in &self.decisions {
            writeln!(f, "  {decision}")?;
        }
        for candidate in &self.shadowed {
            writeln!(
                f,
                "  {}: shadowed (declared in {} via {})",
                candidate.name(),
                candidate.owner.qualified_name(),
                candidate.path().join(".")
            )?;
        }
        if !self.unknown.is_empty() {
            writeln!(f, "  unknown filter names: {}", self.unknown.join(", "))?;
        }
        Ok(())
    }
}

/// An artifact handed to the filer.
#[derive(Debug, Clone)]
pub struct WrittenArtifact {
    pub artifact: GeneratedArtifact,
    pub path: PathBuf,
}

/// A pass that failed.
#[derive(Debug)]
pub struct PassFailure {
    pub target: String,
    pub kind: AccessorKind,
    pub error: ProcessError,
}

/// Outcome of a run over many types.
#[derive(Debug, Default)]
pub struct ProcessReport {
    pub generated: Vec<WrittenArtifact>,
    pub failures: Vec<PassFailure>,
}

impl ProcessReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs passes under one generator configuration.
#[derive(Debug, Clone)]
pub struct Processor<'c> {
    config: &'c GeneratorConfig,
}

impl<'c> Processor<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self { config }
    }

    /// Every (type, kind) pair requested by a configuration marker, in discovery order.
    pub fn discover(elements: &[Rc<dyn TypeElement>]) -> Vec<(Rc<dyn TypeElement>, AccessorKind)> {
        elements
            .iter()
            .flat_map(|element| {
                let names: Vec<String> = element.annotations().iter().map(|a| a.name().to_string()).collect();
                AccessorKind::ALL
                    .into_iter()
                    .filter(move |kind| names.iter().any(|n| n == kind.config_marker()))
                    .map(move |kind| (Rc::clone(element), kind))
            })
            .collect()
    }

    /// Run selection and resolution for one type without rendering.
    pub fn plan(&self, element: Rc<dyn TypeElement>, kind: AccessorKind) -> Result<PassPlan, ProcessError> {
        let descriptor = TypeDescriptor::new(element);
        let target = descriptor.qualified_name().to_string();
        if descriptor.is_generic() {
            return Err(ProcessError::Unsupported { target });
        }

        let config = kind.selection_config(descriptor.annotations()).unwrap_or_default();
        let artifact = ArtifactName::resolve(&descriptor, kind, config.name.as_deref())?;

        let selection = FieldSelectionRule::from_config(&config).select(&descriptor);
        let unknown = selection.unknown.clone();
        let (kept, shadowed) = selection.shadow_by_nearest();
        let decisions = Resolver::new(kind, artifact.namespace()).decide_all(&kept);

        Ok(PassPlan {
            target,
            kind,
            artifact,
            decisions,
            shadowed,
            unknown,
        })
    }

    pub fn render(&self, plan: &PassPlan) -> Result<GeneratedArtifact, ProcessError> {
        let entries = plan.entries();
        Ok(SourceGenerator::new(self.config).generate(&plan.artifact, &plan.target, plan.kind, &entries)?)
    }

    /// One complete pass: plan, render, persist.
    pub fn run_pass(
        &self,
        element: Rc<dyn TypeElement>,
        kind: AccessorKind,
        filer: &mut dyn Filer,
    ) -> Result<WrittenArtifact, ProcessError> {
        let plan = self.plan(element, kind)?;
        let artifact = self.render(&plan)?;
        let path = filer.create(&artifact.name.relative_path(), &artifact.source)?;
        tracing::info!(
            target_type = %plan.target,
            artifact = %artifact.name,
            entries = artifact.keys.len(),
            path = %path.display(),
            "generated {} table",
            kind
        );
        Ok(WrittenArtifact { artifact, path })
    }

    /// Run every requested pass over `elements`.
    pub fn process(&self, elements: &[Rc<dyn TypeElement>], filer: &mut dyn Filer) -> ProcessReport {
        let mut report = ProcessReport::default();
        for (element, kind) in Self::discover(elements) {
            let target = qualified_name_of(element.as_ref());
            match self.run_pass(element, kind, filer) {
                Ok(written) => report.generated.push(written),
                Err(error) => {
                    tracing::error!(target_type = %target, %kind, "pass failed: {error}");
                    report.failures.push(PassFailure { target, kind, error });
                }
            }
        }
        report
    }
}

fn qualified_name_of(element: &dyn TypeElement) -> String {
    match element.namespace() {
        Some(ns) => format!("{ns}::{}", element.simple_name()),
        None => element.simple_name(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::model::{Annotation, AnnotationValue, FieldElement, MethodElement, StaticType};

    fn list(items: &[&str]) -> AnnotationValue {
        AnnotationValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    fn point() -> Rc<dyn TypeElement> {
        StaticType::new("Point")
            .in_namespace("geometry")
            .annotate(Annotation::new("field_getters"))
            .annotate(Annotation::new("field_setters"))
            .annotate(Annotation::new("accessors"))
            .field(FieldElement::new("x", "i32"))
            .field(FieldElement::new("y", "i32"))
            .into_element()
    }

    #[test]
    fn test_discover_finds_each_requested_kind() {
        let plain = StaticType::new("Plain").field(FieldElement::new("a", "u8")).into_element();
        let found = Processor::discover(&[point(), plain]);
        let kinds: Vec<_> = found.iter().map(|(_, kind)| *kind).collect();
        assert_eq!(kinds, [AccessorKind::Getter, AccessorKind::Setter]);
    }

    #[test]
    fn test_process_writes_one_artifact_per_pass() {
        let config = GeneratorConfig::default();
        let mut filer = MemoryFiler::new();
        let report = Processor::new(&config).process(&[point()], &mut filer);
        assert!(report.is_success());
        assert_eq!(report.generated.len(), 2);
        assert!(filer.get(Path::new("geometry/point_field_getters.rs")).is_some());
        assert!(filer.get(Path::new("geometry/point_field_setters.rs")).is_some());
        assert_eq!(report.generated[0].artifact.keys, ["x", "y"]);
    }

    #[test]
    fn test_include_filter_limits_keys() {
        let element = StaticType::new("Point")
            .annotate(Annotation::new("field_getters").with_arg("include", list(&["x"])))
            .annotate(Annotation::new("accessors"))
            .field(FieldElement::new("x", "i32"))
            .field(FieldElement::new("y", "i32"))
            .into_element();
        let config = GeneratorConfig::default();
        let plan = Processor::new(&config).plan(element, AccessorKind::Getter).unwrap();
        let keys: Vec<_> = plan.entries().into_iter().map(|e| e.field).collect();
        assert_eq!(keys, ["x"]);
    }

    #[test]
    fn test_invalid_name_fails_only_that_pass() {
        let bad = StaticType::new("Bad")
            .annotate(Annotation::new("field_getters").with_arg("name", AnnotationValue::Str("fn".into())))
            .field(FieldElement::new("a", "u8"))
            .into_element();
        let config = GeneratorConfig::default();
        let mut filer = MemoryFiler::new();
        let report = Processor::new(&config).process(&[bad, point()], &mut filer);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].target, "Bad");
        assert!(matches!(report.failures[0].error, ProcessError::Configuration(_)));
        assert_eq!(report.generated.len(), 2);
    }

    #[test]
    fn test_generic_types_are_unsupported() {
        let generic = StaticType::new("Wrapper")
            .generic()
            .annotate(Annotation::new("field_getters"))
            .into_element();
        let config = GeneratorConfig::default();
        let err = Processor::new(&config).plan(generic, AccessorKind::Getter).unwrap_err();
        assert!(matches!(err, ProcessError::Unsupported { .. }));
    }

    #[test]
    fn test_duplicate_artifact_fails_second_pass() {
        let a = StaticType::new("A")
            .annotate(Annotation::new("field_getters").with_arg("name", AnnotationValue::Str("Shared".into())))
            .into_element();
        let b = StaticType::new("B")
            .annotate(Annotation::new("field_getters").with_arg("name", AnnotationValue::Str("Shared".into())))
            .into_element();
        let config = GeneratorConfig::default();
        let mut filer = MemoryFiler::new();
        let report = Processor::new(&config).process(&[a, b], &mut filer);
        assert_eq!(report.generated.len(), 1);
        assert!(matches!(report.failures[0].error, ProcessError::AlreadyCreated { .. }));
    }

    #[test]
    fn test_shadowed_ancestor_field_is_dropped() {
        let base = StaticType::new("Base")
            .annotate(Annotation::new("accessors"))
            .field(FieldElement::new("id", "u64"))
            .into_element();
        let child = StaticType::new("Child")
            .annotate(Annotation::new("field_getters"))
            .field(FieldElement::new("id", "u64"))
            .method(MethodElement::getter("get_id", "u64"))
            .extends("base", base)
            .into_element();
        let config = GeneratorConfig::default();
        let plan = Processor::new(&config).plan(child, AccessorKind::Getter).unwrap();
        assert_eq!(plan.entries().len(), 1);
        assert_eq!(plan.shadowed.len(), 1);
        assert_eq!(
            plan.to_string(),
            concat!(
                "Child (getter) -> ChildFieldGetters\n",
                "  id: crate::Child::get_id(instance) [convention]\n",
                "  id: shadowed (declared in Base via base)\n",
            )
        );
    }
}
