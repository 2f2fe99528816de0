//! Error types for the generation pipeline.
//!
//! Every error here is scoped to one type's pass: the driver records it against that type and moves on to the next.
//! Frontend errors (reading and parsing sources) live in [`crate::frontend::FrontendError`].

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Invalid per-type configuration.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("invalid artifact name `{name}` on `{target}`: {reason}")]
    #[diagnostic(
        code(fastfield::configuration::artifact_name),
        help("custom artifact names must be Rust identifiers and must not be reserved words")
    )]
    InvalidArtifactName {
        name: String,
        target: String,
        reason: &'static str,
    },
}

impl ConfigurationError {
    /// The offending name.
    pub fn name(&self) -> &str {
        match self {
            ConfigurationError::InvalidArtifactName { name, .. } => name,
        }
    }
}

/// Failure while turning resolved entries into Rust tokens.
#[derive(Debug, Error, Diagnostic)]
pub enum EmitError {
    #[error("cannot parse `{text}` as a Rust {what}: {message}")]
    #[diagnostic(code(fastfield::emit::syntax))]
    InvalidSyntax {
        what: &'static str,
        text: String,
        message: String,
    },

    #[error("generated source for `{artifact}` does not parse: {message}")]
    #[diagnostic(code(fastfield::emit::output))]
    SynParse { artifact: String, message: String },
}

/// Failure of one type's pass.
#[derive(Debug, Error, Diagnostic)]
pub enum ProcessError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] EmitError),

    #[error("failed to write artifact `{}`", path.display())]
    #[diagnostic(code(fastfield::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("artifact `{}` was already created in this run", path.display())]
    #[diagnostic(code(fastfield::write::duplicate))]
    AlreadyCreated { path: PathBuf },

    #[error("`{target}` is generic; accessor tables need a concrete type")]
    #[diagnostic(
        code(fastfield::unsupported::generic),
        help("remove the generic parameters or drop the `field_getters` / `field_setters` marker")
    )]
    Unsupported { target: String },
}

impl ProcessError {
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ProcessError::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_carries_name() {
        let err = ConfigurationError::InvalidArtifactName {
            name: "match".into(),
            target: "geometry::Point".into(),
            reason: "reserved word",
        };
        assert_eq!(err.name(), "match");
        assert_eq!(
            err.to_string(),
            "invalid artifact name `match` on `geometry::Point`: reserved word"
        );
    }

    #[test]
    fn test_process_error_is_transparent_for_configuration() {
        let err: ProcessError = ConfigurationError::InvalidArtifactName {
            name: "1abc".into(),
            target: "Point".into(),
            reason: "not an identifier",
        }
        .into();
        assert!(err.to_string().contains("`1abc`"));
    }

    #[test]
    fn test_write_error_mentions_path() {
        let err = ProcessError::write("out/point_field_getters.rs", io::Error::other("disk full"));
        assert_eq!(err.to_string(), "failed to write artifact `out/point_field_getters.rs`");
    }
}
