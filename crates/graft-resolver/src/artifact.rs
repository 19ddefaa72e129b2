//! The artifact resolution chain.
//!
//! Resolvers share one contract, [`ArtifactResolver`], and are stacked by
//! ownership: each resolver answers for the identifiers it owns and hands
//! every other request unchanged to the resolver it wraps. Chains are built
//! outermost-first:
//!
//! ```ignore
//! let chain = LocalArtifactResolver::new(registry, OfflineArtifactResolver);
//! ```

use std::sync::Arc;

use graft_core::identifier::ComponentIdentifier;
use graft_core::metadata::{ArtifactMetadata, ModuleVersionMetadata};

use crate::context::ResolveContext;
use crate::errors::ResolveError;
use crate::registry::LocalComponentRegistry;
use crate::result::{ArtifactFileResult, ArtifactSetResult};

/// Where a component's metadata was found, as reported by the resolver that
/// found it. Resolvers that don't own the component pass it on untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModuleSource {
    repository: Option<String>,
}

impl ModuleSource {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn repository(name: impl Into<String>) -> Self {
        Self {
            repository: Some(name.into()),
        }
    }

    pub fn repository_name(&self) -> Option<&str> {
        self.repository.as_deref()
    }
}

/// Resolves the artifacts of components into files.
///
/// Implementations write their outcome into the result sink. An `Err` return
/// is a hard failure of the request itself; a missing artifact is reported
/// through the sink instead.
pub trait ArtifactResolver: Send + Sync {
    /// Resolve the set of artifacts `module` provides for `context`.
    fn resolve_module_artifacts(
        &self,
        module: &ModuleVersionMetadata,
        context: &ResolveContext,
        result: &mut ArtifactSetResult,
    ) -> Result<(), ResolveError>;

    /// Resolve a single artifact to a file.
    fn resolve_artifact(
        &self,
        artifact: &ArtifactMetadata,
        source: &ModuleSource,
        result: &mut ArtifactFileResult,
    ) -> Result<(), ResolveError>;
}

impl<T: ArtifactResolver + ?Sized> ArtifactResolver for Box<T> {
    fn resolve_module_artifacts(
        &self,
        module: &ModuleVersionMetadata,
        context: &ResolveContext,
        result: &mut ArtifactSetResult,
    ) -> Result<(), ResolveError> {
        (**self).resolve_module_artifacts(module, context, result)
    }

    fn resolve_artifact(
        &self,
        artifact: &ArtifactMetadata,
        source: &ModuleSource,
        result: &mut ArtifactFileResult,
    ) -> Result<(), ResolveError> {
        (**self).resolve_artifact(artifact, source, result)
    }
}

impl<T: ArtifactResolver + ?Sized> ArtifactResolver for Arc<T> {
    fn resolve_module_artifacts(
        &self,
        module: &ModuleVersionMetadata,
        context: &ResolveContext,
        result: &mut ArtifactSetResult,
    ) -> Result<(), ResolveError> {
        (**self).resolve_module_artifacts(module, context, result)
    }

    fn resolve_artifact(
        &self,
        artifact: &ArtifactMetadata,
        source: &ModuleSource,
        result: &mut ArtifactFileResult,
    ) -> Result<(), ResolveError> {
        (**self).resolve_artifact(artifact, source, result)
    }
}

/// Serves components built by sibling modules from the local registry and
/// delegates everything else.
///
/// Registry lookups return snapshots, so no lock is held while the delegate
/// runs.
#[derive(Debug)]
pub struct LocalArtifactResolver<R, D> {
    registry: R,
    delegate: D,
}

impl<R, D> LocalArtifactResolver<R, D>
where
    R: LocalComponentRegistry,
    D: ArtifactResolver,
{
    pub fn new(registry: R, delegate: D) -> Self {
        Self { registry, delegate }
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }
}

impl<R, D> ArtifactResolver for LocalArtifactResolver<R, D>
where
    R: LocalComponentRegistry,
    D: ArtifactResolver,
{
    fn resolve_module_artifacts(
        &self,
        module: &ModuleVersionMetadata,
        context: &ResolveContext,
        result: &mut ArtifactSetResult,
    ) -> Result<(), ResolveError> {
        let ComponentIdentifier::Local(local) = module.id() else {
            tracing::trace!("Delegating {context} of {}", module.id());
            return self.delegate.resolve_module_artifacts(module, context, result);
        };

        let ResolveContext::Configuration { name } = context else {
            return Err(ResolveError::UnsupportedContext {
                description: context.description(),
            });
        };

        let artifacts = module
            .configuration(name)
            .ok_or_else(|| ResolveError::UnknownConfiguration {
                component: module.id().to_string(),
                name: name.clone(),
            })?
            .to_vec();
        tracing::debug!(
            "Resolved {} artifacts of configuration '{name}' from {local}",
            artifacts.len()
        );
        result.resolved(artifacts)
    }

    fn resolve_artifact(
        &self,
        artifact: &ArtifactMetadata,
        source: &ModuleSource,
        result: &mut ArtifactFileResult,
    ) -> Result<(), ResolveError> {
        let ComponentIdentifier::Local(local) = artifact.component() else {
            tracing::trace!("Delegating artifact {}", artifact.id);
            return self.delegate.resolve_artifact(artifact, source, result);
        };

        // Looked up per artifact: a sibling module may have registered since
        // the module's metadata was read.
        let component = self.registry.lookup(&local.build_path).ok_or_else(|| {
            ResolveError::RegistryInvariantViolation {
                build_path: local.build_path.clone(),
            }
        })?;

        match component.artifact_file(&artifact.id) {
            Some(file) => {
                tracing::debug!("Resolved {} to {}", artifact.id, file.display());
                result.resolved(file.to_path_buf())
            }
            None => {
                tracing::debug!("{} is not published by {local}", artifact.id);
                result.not_found(artifact.id.clone())
            }
        }
    }
}

/// Terminal resolver for builds without external repositories.
///
/// Every request it receives fails with [`ResolveError::Offline`] through
/// the result sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineArtifactResolver;

impl ArtifactResolver for OfflineArtifactResolver {
    fn resolve_module_artifacts(
        &self,
        module: &ModuleVersionMetadata,
        context: &ResolveContext,
        result: &mut ArtifactSetResult,
    ) -> Result<(), ResolveError> {
        result.failed(ResolveError::Offline {
            request: format!("{context} of {}", module.id()),
        })
    }

    fn resolve_artifact(
        &self,
        artifact: &ArtifactMetadata,
        _source: &ModuleSource,
        result: &mut ArtifactFileResult,
    ) -> Result<(), ResolveError> {
        result.failed(ResolveError::Offline {
            request: artifact.id.to_string(),
        })
    }
}
