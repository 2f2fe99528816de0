//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;
use std::rc::Rc;

use crate::config::GeneratorConfig;
use crate::driver::{Builder, Processor};
use crate::frontend::SourceUniverse;
use crate::model::{AccessorKind, TypeElement};

use super::{CliError, CliResult, ExitCode};

fn load(source: &Path) -> CliResult<SourceUniverse> {
    SourceUniverse::load(source).map_err(CliError::diagnostic)
}

/// Scan `source` and write tables plus bundles into `output`.
pub fn generate(source: &Path, output: &Path, timestamp: bool, lint_allows: bool) -> CliResult<ExitCode> {
    let built = Builder::new(source)
        .out_dir(output)
        .emit_timestamp(timestamp)
        .lint_allows(lint_allows)
        .emit_rerun_if_changed(false)
        .generate()
        .map_err(CliError::diagnostic)?;

    for written in &built.report.generated {
        println!("✓ {} -> {}", written.artifact.name, written.path.display());
    }
    for bundle in &built.bundles {
        println!("  bundle {}", bundle.display());
    }
    for failure in &built.report.failures {
        eprintln!("✗ {} ({}): {}", failure.target, failure.kind, failure.error);
    }

    println!(
        "{} table(s) in {}, {} failure(s)",
        built.report.generated.len(),
        built.out_dir.display(),
        built.report.failures.len()
    );
    Ok(if built.report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print the plan of every requested pass, optionally narrowed to one type and/or kind.
pub fn inspect(source: &Path, type_name: Option<&str>, kind: Option<AccessorKind>) -> CliResult<ExitCode> {
    let universe = load(source)?;
    let elements = match type_name {
        Some(name) => vec![find(&universe, name)?],
        None => universe.elements(),
    };

    let config = GeneratorConfig::default();
    let processor = Processor::new(&config);
    let mut failed = false;
    let mut printed = 0usize;
    for (element, pass_kind) in Processor::discover(&elements) {
        if kind.is_some_and(|k| k != pass_kind) {
            continue;
        }
        match processor.plan(element, pass_kind) {
            Ok(plan) => print!("{plan}"),
            Err(e) => {
                failed = true;
                eprintln!("error: {}", e);
            }
        }
        printed += 1;
    }

    if printed == 0 {
        println!("no types request accessor tables");
    }
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Print the source one pass would write.
pub fn emit(source: &Path, type_name: &str, kind: AccessorKind) -> CliResult<ExitCode> {
    let universe = load(source)?;
    let element = find(&universe, type_name)?;
    if !element.annotations().iter().any(|a| a.name() == kind.config_marker()) {
        return Err(CliError::failure(format!(
            "`{type_name}` has no #[{}] marker",
            kind.config_marker()
        )));
    }

    let config = GeneratorConfig::default();
    let processor = Processor::new(&config);
    let artifact = processor
        .plan(element, kind)
        .and_then(|plan| processor.render(&plan))
        .map_err(CliError::diagnostic)?;
    print!("{}", artifact.source);
    Ok(ExitCode::SUCCESS)
}

fn find(universe: &SourceUniverse, name: &str) -> CliResult<Rc<dyn TypeElement>> {
    universe.element(name).ok_or_else(|| {
        let known = universe.qualified_names().join(", ");
        CliError::failure(format!("no struct named `{name}` (found: {known})"))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::env;
    use std::fs;

    use super::*;

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = env::temp_dir().join(format!("fastfield-cli-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_generate_writes_tables() {
        let dir = scratch("generate");
        let lib = dir.join("lib.rs");
        fs::write(&lib, "#[field_getters]\npub struct Point { pub x: i32 }\n").unwrap();

        let code = generate(&lib, &dir.join("out"), false, true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(dir.join("out/point_field_getters.rs").exists());
        assert!(dir.join("out/accessors.rs").exists());
    }

    #[test]
    fn test_emit_requires_marker() {
        let dir = scratch("emit");
        let lib = dir.join("lib.rs");
        fs::write(&lib, "#[field_getters]\npub struct Point { pub x: i32 }\n").unwrap();

        assert!(emit(&lib, "Point", AccessorKind::Getter).is_ok());
        let err = emit(&lib, "Point", AccessorKind::Setter).unwrap_err();
        assert!(err.message.contains("field_setters"));
    }

    #[test]
    fn test_unknown_type_lists_known_names() {
        let dir = scratch("unknown");
        let lib = dir.join("lib.rs");
        fs::write(&lib, "pub struct Point { pub x: i32 }\n").unwrap();

        let err = inspect(&lib, Some("Missing"), None).unwrap_err();
        assert!(err.message.contains("Point"));
    }
}
