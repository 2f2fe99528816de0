//! Build-script integration.
//!
//! ```no_run
//! // build.rs
//! fn main() {
//!     fastfield::Builder::new("src").generate().expect("accessor generation failed");
//! }
//! ```
//!
//! Each module that declares annotated types then includes its bundle:
//!
//! ```ignore
//! fastfield_runtime::include_accessors!("geometry/accessors.rs");
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use super::{Filer, FsFiler, ProcessReport, Processor};
use crate::backend::naming::namespace_dir;
use crate::backend::{BUNDLE_FILE, render_bundle};
use crate::config::GeneratorConfig;
use crate::errors::ProcessError;
use crate::frontend::{FrontendError, SourceUniverse};

#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Frontend(#[from] FrontendError),

    #[error("no output directory: set one with `Builder::out_dir` or run inside a build script")]
    #[diagnostic(code(fastfield::build::out_dir))]
    MissingOutDir,

    #[error("cannot prepare output directory `{}`", path.display())]
    #[diagnostic(code(fastfield::build::io))]
    OutDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Bundle(#[from] ProcessError),
}

/// Result of a build-script run.
#[derive(Debug)]
pub struct BuildOutput {
    pub out_dir: PathBuf,
    pub report: ProcessReport,
    /// Bundle files, one per namespace that received artifacts.
    pub bundles: Vec<PathBuf>,
}

/// Scans a source tree and writes accessor tables plus per-namespace bundles.
#[derive(Debug, Clone)]
pub struct Builder {
    source: PathBuf,
    out_dir: Option<PathBuf>,
    config: GeneratorConfig,
    emit_rerun_if_changed: bool,
}

impl Builder {
    /// `source` is a crate root directory or file; relative paths resolve against the working directory, which cargo
    /// sets to the package root for build scripts.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            out_dir: None,
            config: GeneratorConfig::default(),
            emit_rerun_if_changed: true,
        }
    }

    /// Output directory; defaults to `$OUT_DIR`.
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn emit_timestamp(mut self, enabled: bool) -> Self {
        self.config.emit_timestamp = enabled;
        self
    }

    pub fn lint_allows(mut self, enabled: bool) -> Self {
        self.config.lint_allows = enabled;
        self
    }

    /// Print `cargo:rerun-if-changed` for every scanned file (default on).
    pub fn emit_rerun_if_changed(mut self, enabled: bool) -> Self {
        self.emit_rerun_if_changed = enabled;
        self
    }

    pub fn generate(self) -> Result<BuildOutput, BuildError> {
        let out_dir = match self.out_dir.clone() {
            Some(dir) => dir,
            None => env::var_os("OUT_DIR").map(PathBuf::from).ok_or(BuildError::MissingOutDir)?,
        };
        fs::create_dir_all(&out_dir).map_err(|source| BuildError::OutDir {
            path: out_dir.clone(),
            source,
        })?;
        let out_dir = out_dir.canonicalize().map_err(|source| BuildError::OutDir {
            path: out_dir.clone(),
            source,
        })?;

        let universe = SourceUniverse::load(&self.source)?;
        if self.emit_rerun_if_changed {
            println!("cargo:rerun-if-changed={}", self.source.display());
            for file in universe.files() {
                println!("cargo:rerun-if-changed={}", file.display());
            }
        }

        let mut filer = FsFiler::new(&out_dir);
        let report = Processor::new(&self.config).process(&universe.elements(), &mut filer);
        for failure in &report.failures {
            if self.emit_rerun_if_changed {
                println!("cargo:warning=fastfield: {} ({}): {}", failure.target, failure.kind, failure.error);
            }
        }

        let bundles = self.write_bundles(&report, &mut filer)?;
        tracing::info!(
            out_dir = %out_dir.display(),
            artifacts = report.generated.len(),
            failures = report.failures.len(),
            "accessor generation finished"
        );
        Ok(BuildOutput {
            out_dir,
            report,
            bundles,
        })
    }

    fn write_bundles(&self, report: &ProcessReport, filer: &mut dyn Filer) -> Result<Vec<PathBuf>, ProcessError> {
        let mut by_namespace: BTreeMap<Option<&str>, Vec<&Path>> = BTreeMap::new();
        for written in &report.generated {
            by_namespace
                .entry(written.artifact.name.namespace())
                .or_default()
                .push(written.path.as_path());
        }

        let mut bundles = Vec::with_capacity(by_namespace.len());
        for (namespace, artifacts) in by_namespace {
            let source = render_bundle(&self.config, namespace, &artifacts)?;
            let relative = namespace_dir(namespace).join(BUNDLE_FILE);
            bundles.push(filer.create(&relative, &source)?);
        }
        Ok(bundles)
    }
}
