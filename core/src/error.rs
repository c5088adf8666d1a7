//! Error types surfaced while building and updating the live widget tree.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Raised when a description violates the widget tree structure rules.
///
/// The only structural rule enforced today is child multiplicity: a
/// single-child widget refuses a second child at description-construction
/// time, before any native call is made. The container keeps the child it
/// already had.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} accepts only one child; use a multi-child container")]
pub struct StructureError {
    kind: &'static str,
}

impl StructureError {
    /// Creates a multiplicity error for the named widget kind.
    #[must_use]
    pub const fn new(kind: &'static str) -> Self {
        Self { kind }
    }

    /// The widget kind that rejected the child.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }
}

/// A failed operation inside the native toolkit.
///
/// Carried by fallible toolkit calls such as resource loading. The node
/// whose operation failed keeps its last successfully applied state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("native operation `{operation}` failed: {message}")]
pub struct ToolkitError {
    operation: String,
    message: String,
}

impl ToolkitError {
    /// Creates an error for the named toolkit operation.
    #[must_use]
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// The toolkit operation that failed.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Human-readable failure detail reported by the toolkit.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors produced by a build or update pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A description broke a tree structure rule.
    #[error(transparent)]
    Structure(#[from] StructureError),
    /// An operation needed a running application but none is attached.
    #[error("no application is attached to this widget tree")]
    MissingApplication,
    /// The native toolkit reported a failure.
    #[error(transparent)]
    Native(#[from] ToolkitError),
}
