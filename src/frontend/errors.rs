//! Frontend errors: reading and parsing the scanned sources.

use std::io;
use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use proc_macro2::LineColumn;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FrontendError {
    #[error("failed to read `{}`", path.display())]
    #[diagnostic(code(fastfield::frontend::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no crate root in `{}`", dir.display())]
    #[diagnostic(
        code(fastfield::frontend::root),
        help("point at a `src` directory containing lib.rs or main.rs, or at a .rs file")
    )]
    NoCrateRoot { dir: PathBuf },

    #[error("failed to parse `{}`: {message}", path.display())]
    #[diagnostic(code(fastfield::frontend::parse))]
    Parse {
        path: PathBuf,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
    },

    #[error("malformed marker in `{}`: {message}", path.display())]
    #[diagnostic(code(fastfield::frontend::marker))]
    Marker {
        path: PathBuf,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
    },
}

impl FrontendError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        FrontendError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, source: &str, err: &syn::Error) -> Self {
        FrontendError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
            src: named_source(path, source),
            span: source_span(source, err.span().start(), err.span().end()),
        }
    }

    pub(crate) fn marker(path: &Path, source: &str, err: &syn::Error) -> Self {
        FrontendError::Marker {
            path: path.to_path_buf(),
            message: err.to_string(),
            src: named_source(path, source),
            span: source_span(source, err.span().start(), err.span().end()),
        }
    }

    /// One-line message, without source context.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn named_source(path: &Path, source: &str) -> NamedSource<String> {
    NamedSource::new(path.display().to_string(), source.to_string())
}

/// Byte span between two line/column positions (1-based lines, 0-based char columns).
pub(crate) fn source_span(source: &str, start: LineColumn, end: LineColumn) -> SourceSpan {
    let start = byte_offset(source, start);
    let end = byte_offset(source, end).max(start);
    (start, end - start).into()
}

fn byte_offset(source: &str, position: LineColumn) -> usize {
    let mut offset = 0;
    for (index, line) in source.split_inclusive('\n').enumerate() {
        if index + 1 == position.line {
            let column = line
                .char_indices()
                .nth(position.column)
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            return offset + column;
        }
        offset += line.len();
    }
    offset.min(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset_counts_lines_and_chars() {
        let source = "struct A;\nstruct Bé { x: u8 }\n";
        assert_eq!(byte_offset(source, LineColumn { line: 1, column: 0 }), 0);
        assert_eq!(byte_offset(source, LineColumn { line: 2, column: 7 }), 17);
        // 'é' is two bytes
        assert_eq!(byte_offset(source, LineColumn { line: 2, column: 9 }), 20);
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        let source = "struct A;";
        assert_eq!(byte_offset(source, LineColumn { line: 5, column: 0 }), source.len());
    }

    #[test]
    fn test_parse_error_points_into_source() {
        let source = "struct Point {\n    x: ,\n}\n";
        let err = syn::parse_file(source).unwrap_err();
        let frontend = FrontendError::parse(Path::new("lib.rs"), source, &err);
        match frontend {
            FrontendError::Parse { span, .. } => assert!(span.offset() > 0),
            other => panic!("unexpected {other:?}"),
        }
    }
}
