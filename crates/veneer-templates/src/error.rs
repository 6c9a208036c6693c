//! Error types for template compilation and rendering.
//!
//! Two tiers, mirroring the two phases of the crate's lifecycle:
//!
//! - [`CompileError`] — startup-fatal. A compilation pass that hits one of
//!   these returns no set at all; the host is expected to refuse to serve
//!   traffic against an incomplete or broken template directory.
//! - [`RenderError`] — request-scoped and recoverable. The response layer
//!   folds these into a 500 response rather than tearing down the process.

use std::path::PathBuf;

/// Errors that abort a template compilation pass.
///
/// None of these are recoverable mid-pass: a broken template directory must
/// be fixed, not served around.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Directory traversal failed (unreadable directory, broken entry).
    #[error("failed to walk template directory {path}: {source}")]
    Walk {
        /// Directory that could not be traversed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A qualifying template file (or the configured layout) could not be
    /// read.
    #[error("failed to read template file {path}: {source}")]
    Read {
        /// File that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template or the shared layout failed to parse.
    #[error("failed to parse template \"{name}\": {source}")]
    Parse {
        /// Logical name of the offending template.
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Errors raised while rendering a compiled template for a request.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The requested logical name has no entry in the compiled set.
    ///
    /// Kept distinct from [`RenderError::Execution`] so hosts can map it to
    /// a different response if they want to; the built-in renderer reports
    /// both as 500.
    #[error("template not found: \"{name}\"")]
    TemplateNotFound {
        /// The name that was requested.
        name: String,
    },

    /// Executing the template (or its layout) failed.
    #[error("failed to render template \"{name}\": {source}")]
    Execution {
        /// Name of the definition that was being executed.
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_display() {
        let err = CompileError::Read {
            path: PathBuf::from("templates/broken.tmpl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let display = err.to_string();
        assert!(display.contains("templates/broken.tmpl"));
        assert!(display.contains("no such file"));
    }

    #[test]
    fn test_render_error_not_found_display() {
        let err = RenderError::TemplateNotFound {
            name: "missing".to_string(),
        };
        assert!(err.to_string().contains("template not found"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_parse_error_carries_source() {
        use std::error::Error;

        let mj = minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "unexpected end");
        let err = CompileError::Parse {
            name: "page".to_string(),
            source: mj,
        };
        assert!(err.source().is_some());
    }
}
