//! Write-once result sinks filled by artifact resolvers.

use std::path::PathBuf;

use graft_core::identifier::ArtifactIdentifier;
use graft_core::metadata::ArtifactMetadata;

use crate::errors::ResolveError;

/// Terminal state of a resolution request.
#[derive(Debug)]
pub enum ResolveOutcome<T> {
    Resolved(T),
    /// The artifact is legitimately absent; the caller decides whether that
    /// fails the build.
    NotFound(ArtifactIdentifier),
    Failed(ResolveError),
}

impl<T> ResolveOutcome<T> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Resolved(_) => "resolved",
            Self::NotFound(_) => "not found",
            Self::Failed(_) => "failed",
        }
    }
}

/// Holds the outcome of one request.
///
/// Starts pending and accepts exactly one write; later writes are rejected
/// with [`ResolveError::ResultAlreadySet`] and leave the first outcome intact.
#[derive(Debug)]
pub struct ResultSink<T> {
    outcome: Option<ResolveOutcome<T>>,
}

/// Sink for the artifact set of a module.
pub type ArtifactSetResult = ResultSink<Vec<ArtifactMetadata>>;

/// Sink for the file of a single artifact.
pub type ArtifactFileResult = ResultSink<PathBuf>;

impl<T> ResultSink<T> {
    pub fn new() -> Self {
        Self { outcome: None }
    }

    pub fn resolved(&mut self, value: T) -> Result<(), ResolveError> {
        self.set(ResolveOutcome::Resolved(value))
    }

    pub fn not_found(&mut self, artifact: ArtifactIdentifier) -> Result<(), ResolveError> {
        self.set(ResolveOutcome::NotFound(artifact))
    }

    pub fn failed(&mut self, error: ResolveError) -> Result<(), ResolveError> {
        self.set(ResolveOutcome::Failed(error))
    }

    fn set(&mut self, outcome: ResolveOutcome<T>) -> Result<(), ResolveError> {
        if let Some(existing) = &self.outcome {
            return Err(ResolveError::ResultAlreadySet {
                existing: existing.kind(),
            });
        }
        self.outcome = Some(outcome);
        Ok(())
    }

    pub fn has_result(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&ResolveOutcome<T>> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<ResolveOutcome<T>> {
        self.outcome
    }

    /// The resolved value, if resolution succeeded.
    pub fn value(&self) -> Option<&T> {
        match &self.outcome {
            Some(ResolveOutcome::Resolved(value)) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for ResultSink<T> {
    fn default() -> Self {
        Self::new()
    }
}
