//! Operations: resolve the artifacts of local components through the chain.

use std::fmt;
use std::path::PathBuf;

use graft_core::identifier::{ArtifactIdentifier, ArtifactName, ComponentIdentifier};
use graft_core::metadata::ArtifactMetadata;
use graft_resolver::artifact::ModuleSource;
use graft_resolver::context::ResolveContext;
use graft_resolver::result::{ArtifactFileResult, ArtifactSetResult, ResolveOutcome};
use graft_util::errors::GraftError;

use crate::workspace::Workspace;

/// Outcome of a single-artifact lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLookup {
    Found(PathBuf),
    NotFound(ArtifactIdentifier),
}

/// Resolve the artifacts `build_path` publishes for `configuration`.
pub fn module_artifacts(
    ws: &Workspace,
    build_path: &str,
    configuration: &str,
) -> miette::Result<Vec<ArtifactMetadata>> {
    let component = ws.component(build_path)?;
    let mut result = ArtifactSetResult::new();
    ws.resolver().resolve_module_artifacts(
        component.metadata(),
        &ResolveContext::configuration(configuration),
        &mut result,
    )?;

    match result.into_outcome() {
        Some(ResolveOutcome::Resolved(artifacts)) => Ok(artifacts),
        Some(ResolveOutcome::NotFound(id)) => Err(GraftError::Resolution {
            message: format!("{id} was not found"),
        }
        .into()),
        Some(ResolveOutcome::Failed(e)) => Err(e.into()),
        None => Err(unanswered(build_path)),
    }
}

/// Resolve one artifact of `build_path` to its file.
///
/// An artifact the component doesn't publish is a [`ArtifactLookup::NotFound`],
/// not an error.
pub fn artifact(
    ws: &Workspace,
    build_path: &str,
    name: ArtifactName,
) -> miette::Result<ArtifactLookup> {
    let component = ws.component(build_path)?;
    let id = ArtifactIdentifier::new(ComponentIdentifier::local(build_path), name);

    // Undeclared artifacts are requested under their conventional file name.
    let request = component
        .metadata()
        .artifacts()
        .find(|a| a.id == id)
        .cloned()
        .unwrap_or_else(|| ArtifactMetadata::local_file(id.clone(), id.name.to_string()));

    let mut result = ArtifactFileResult::new();
    ws.resolver()
        .resolve_artifact(&request, &ModuleSource::none(), &mut result)?;

    match result.into_outcome() {
        Some(ResolveOutcome::Resolved(file)) => Ok(ArtifactLookup::Found(file)),
        Some(ResolveOutcome::NotFound(id)) => Ok(ArtifactLookup::NotFound(id)),
        Some(ResolveOutcome::Failed(e)) => Err(e.into()),
        None => Err(unanswered(build_path)),
    }
}

/// A sink left unwritten by a resolver that returned `Ok(())`.
pub(crate) fn unanswered(request: impl fmt::Display) -> miette::Report {
    GraftError::Resolution {
        message: format!("no resolver answered for {request}"),
    }
    .into()
}
