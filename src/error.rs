//! Error types for model resolution and pipeline assembly.
//!
//! Every failure in this crate is attributable: an unknown identifier, a
//! missing artifact with no download source, a failed download, or a failed
//! stage construction. Collaborator errors are kept reachable through
//! [`std::error::Error::source`] rather than flattened into strings.

use std::path::PathBuf;

use thiserror::Error;

use crate::locator::ModelRole;

/// Boxed error type used at the collaborator seams (downloader, stage
/// builders). Collaborators report failures in their own terms; this crate
/// propagates them without retrying or reinterpreting.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while resolving model artifacts or assembling a pipeline.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The requested vocoder identifier is not in the catalog.
    #[error("unknown vocoder: {0}")]
    UnknownVocoder(String),

    /// The artifact is absent locally and no download source is registered
    /// for it. Raised without any download attempt.
    #[error("{role} model is missing at {} and has no registered download source", .path.display())]
    ArtifactNotFound { role: ModelRole, path: PathBuf },

    /// The download collaborator failed. The transport's own error is the
    /// `source` of this one.
    #[error("downloading the {role} model from {url} failed")]
    Download {
        role: ModelRole,
        url: String,
        #[source]
        source: BoxError,
    },

    /// A stage constructor failed. The builder's own error is the `source`.
    #[error("constructing the {kind} stage failed")]
    Stage {
        kind: &'static str,
        #[source]
        source: BoxError,
    },

    /// Filesystem failure outside the collaborator seams.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the resolution and assembly layer.
pub type ModelResult<T> = Result<T, ModelError>;
