//! Unified error types for bom-diff.
//!
//! Library stages return their own narrow error enums (`ParseError`,
//! `ReportError`, `ConfigError`); this module wraps them into one
//! hierarchy with a context chain for user-facing messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::parsers::ParseError;

/// Main error type for bom-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BomDiffError {
    /// Errors while reading or parsing a BOM document
    #[error("Failed to parse BOM: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseError,
    },

    /// Errors during diff computation
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    #[error("No significant fields configured for change detection")]
    NoSignificantFields,

    #[error("Duplicate significant field: {0}")]
    DuplicateField(String),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),
}

/// Convenient Result type for bom-diff operations
pub type Result<T> = std::result::Result<T, BomDiffError>;

impl BomDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a diff error
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }
}

impl From<std::io::Error> for BomDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<ParseError> for BomDiffError {
    fn from(err: ParseError) -> Self {
        Self::parse(String::new(), err)
    }
}

impl From<serde_json::Error> for BomDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::report(
            "JSON serialization",
            ReportErrorKind::JsonSerializationError(err.to_string()),
        )
    }
}

/// Extension trait for adding context to errors.
///
/// Context is prepended to whatever the error already carries, so a
/// failure deep in the parser reads as `outer: middle: inner`.
///
/// ```ignore
/// use bom_diff::error::ErrorContext;
///
/// let content = std::fs::read_to_string(path).context("reading BOM file")?;
/// let table = parse_bom_str(&content)
///     .with_context(|| format!("parsing BOM from {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<BomDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: BomDiffError, new_ctx: &str) -> BomDiffError {
    match err {
        BomDiffError::Parse {
            context: existing,
            source,
        } => BomDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BomDiffError::Diff {
            context: existing,
            source,
        } => BomDiffError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BomDiffError::Report {
            context: existing,
            source,
        } => BomDiffError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BomDiffError::Io {
            path,
            message,
            source,
        } => BomDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        BomDiffError::Config(msg) => BomDiffError::Config(chain_context(new_ctx, &msg)),
        BomDiffError::Validation(msg) => BomDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to a validation error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| BomDiffError::Validation(context.into()))
    }
}
