//! Error types for vitae library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vitae operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the profile and template from disk
    Load,
    /// Binding the profile into the template
    Render,
    /// Writing output files and converting to PDF
    Export,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Render => "render",
            Stage::Export => "export",
        };
        f.write_str(name)
    }
}

/// Error types that can occur while generating a resume.
#[derive(Error, Debug)]
pub enum Error {
    /// An input file does not exist.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The profile document is not well-formed YAML.
    #[error("Error parsing {}: {message}", path.display())]
    Parse {
        /// Path of the malformed document
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },

    /// The template could not be parsed or bound against the profile.
    #[error("Error rendering template '{template}': {message}")]
    Binding {
        /// Template name
        template: String,
        /// Engine diagnostic, including the chain of causes
        message: String,
    },

    /// No rendering engine was found on the search path.
    #[error("No headless browser found (looked for: {}); install Chromium or Chrome to enable PDF export", candidates.join(", "))]
    EngineNotFound {
        /// Program names that were probed, in order
        candidates: Vec<String>,
    },

    /// The rendering engine failed or timed out.
    #[error("PDF conversion with {} failed: {message}", engine.display())]
    ExportFailed {
        /// Engine executable that was invoked
        engine: PathBuf,
        /// Diagnostic output or failure reason
        message: String,
    },

    /// An input file exists but could not be read.
    #[error("Error reading {}: {source}", path.display())]
    Read {
        /// Path of the unreadable input
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing an output file failed.
    #[error("Error writing {}: {source}", path.display())]
    Write {
        /// Target path of the failed write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// I/O error without a known target path.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PDF post-processing error.
    #[error("PDF metadata error: {0}")]
    Metadata(String),
}

impl Error {
    /// Pipeline stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Error::NotFound { .. } | Error::Parse { .. } | Error::Read { .. } => Stage::Load,
            Error::Binding { .. } => Stage::Render,
            Error::EngineNotFound { .. }
            | Error::ExportFailed { .. }
            | Error::Write { .. }
            | Error::Io(_)
            | Error::Metadata(_) => Stage::Export,
        }
    }

    /// Build a binding error from a template engine error.
    ///
    /// Tera nests the useful diagnostic (e.g. the undefined variable) in the
    /// source chain, so the whole chain is flattened into the message.
    pub(crate) fn binding(template: impl Into<String>, err: tera::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Error::Binding {
            template: template.into(),
            message,
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Metadata(err.to_string()),
        }
    }
}
