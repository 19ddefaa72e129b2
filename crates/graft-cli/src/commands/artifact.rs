//! Handler for `graft artifact`.

use miette::Result;

use graft_core::identifier::ArtifactName;
use graft_ops::ops_artifacts::{self, ArtifactLookup};
use graft_ops::workspace::Workspace;
use graft_util::errors::GraftError;

pub fn exec(build_path: &str, name: &str, extension: &str, classifier: Option<&str>) -> Result<()> {
    let ws = Workspace::discover(&super::current_dir()?)?;

    let mut artifact = ArtifactName::new(name, extension);
    if let Some(classifier) = classifier {
        artifact = artifact.with_classifier(classifier);
    }

    match ops_artifacts::artifact(&ws, build_path, artifact)? {
        ArtifactLookup::Found(file) => {
            println!("{}", file.display());
            Ok(())
        }
        ArtifactLookup::NotFound(id) => Err(GraftError::Resolution {
            message: format!("{} is not published by {build_path}", id.name),
        }
        .into()),
    }
}
