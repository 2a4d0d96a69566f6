//! Fatal error types for header consolidation.
//!
//! Soft exclusions (undefined symbols, unsupported types, repeated
//! declarations) are not errors; they are recorded as
//! [`Exclusion`](crate::core::declaration::Exclusion) values instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error that aborts a consolidation run.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("symbol dump tool `{tool}` not found")]
    ToolNotFound { tool: String },

    #[error("`{command}` failed: {message}")]
    ToolInvocation { command: String, message: String },

    #[error("missing input header: {}", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("no default paths for platform `{os}/{arch}`")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HeaderError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            HeaderError::ToolNotFound { tool } => Diagnostic::error(self.to_string())
                .with_context(format!("`{}` is needed to read the library's exported symbols", tool))
                .with_suggestion(suggestions::INSTALL_NM)
                .with_suggestion(suggestions::SKIP_SYMBOLS),

            HeaderError::ToolInvocation { .. } => Diagnostic::error(self.to_string())
                .with_suggestion(suggestions::CHECK_LIBRARY)
                .with_suggestion(suggestions::SKIP_SYMBOLS),

            HeaderError::MissingInputFile { path } => Diagnostic::error(self.to_string())
                .with_location(path)
                .with_suggestion(suggestions::CHECK_INCLUDE_DIR),

            HeaderError::UnsupportedPlatform { .. } => Diagnostic::error(self.to_string())
                .with_suggestion(suggestions::EXPLICIT_PATHS),

            HeaderError::Config { path, .. } => {
                Diagnostic::error(self.to_string()).with_location(path)
            }

            HeaderError::Io { path, source } => Diagnostic::error(self.to_string())
                .with_location(path)
                .with_context(source.to_string()),
        }
    }
}
