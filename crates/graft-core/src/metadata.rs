//! Module and artifact metadata produced by upstream discovery.
//!
//! The resolution core only reads these types. Construction validates the
//! invariants the resolvers rely on: configuration names are unique, every
//! artifact belongs to the component that lists it, and local components
//! publish files rather than fetch coordinates.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use graft_util::errors::GraftError;

use crate::identifier::{ArtifactIdentifier, ArtifactName, ComponentIdentifier};
use crate::status::DEFAULT_STATUS;

/// Where the bytes of an artifact live.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactLocation {
    /// Built output of a local component.
    File(PathBuf),
    /// Coordinates the external delegate turns into a file later.
    Remote { coordinates: String },
}

/// A single artifact of a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactMetadata {
    pub id: ArtifactIdentifier,
    pub location: ArtifactLocation,
}

impl ArtifactMetadata {
    pub fn local_file(id: ArtifactIdentifier, file: impl Into<PathBuf>) -> Self {
        Self {
            id,
            location: ArtifactLocation::File(file.into()),
        }
    }

    pub fn remote(id: ArtifactIdentifier, coordinates: impl Into<String>) -> Self {
        Self {
            id,
            location: ArtifactLocation::Remote {
                coordinates: coordinates.into(),
            },
        }
    }

    /// The component that owns this artifact.
    pub fn component(&self) -> &ComponentIdentifier {
        &self.id.component
    }

    pub fn file(&self) -> Option<&Path> {
        match &self.location {
            ArtifactLocation::File(path) => Some(path),
            ArtifactLocation::Remote { .. } => None,
        }
    }
}

/// A resolved component version with its configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleVersionMetadata {
    id: ComponentIdentifier,
    status: String,
    configurations: IndexMap<String, Vec<ArtifactMetadata>>,
}

impl ModuleVersionMetadata {
    pub fn new(id: ComponentIdentifier) -> Self {
        Self {
            id,
            status: DEFAULT_STATUS.to_string(),
            configurations: IndexMap::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn id(&self) -> &ComponentIdentifier {
        &self.id
    }

    /// Declared maturity of this component version.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Declare a new, empty configuration.
    pub fn add_configuration(&mut self, name: impl Into<String>) -> Result<(), GraftError> {
        let name = name.into();
        if self.configurations.contains_key(&name) {
            return Err(GraftError::Manifest {
                message: format!("configuration '{name}' is declared twice on {}", self.id),
            });
        }
        self.configurations.insert(name, Vec::new());
        Ok(())
    }

    /// Add an artifact to a declared configuration.
    ///
    /// Returns `false` when the configuration already lists the artifact.
    pub fn add_artifact(
        &mut self,
        configuration: &str,
        artifact: ArtifactMetadata,
    ) -> Result<bool, GraftError> {
        if artifact.component() != &self.id {
            return Err(GraftError::Manifest {
                message: format!(
                    "artifact {} cannot be published by {}",
                    artifact.id, self.id
                ),
            });
        }
        let id = self.id.clone();
        let artifacts =
            self.configurations
                .get_mut(configuration)
                .ok_or_else(|| GraftError::Manifest {
                    message: format!("configuration '{configuration}' is not declared on {id}"),
                })?;
        if artifacts.iter().any(|a| a.id == artifact.id) {
            return Ok(false);
        }
        artifacts.push(artifact);
        Ok(true)
    }

    /// Artifacts of the named configuration, in declaration order.
    pub fn configuration(&self, name: &str) -> Option<&[ArtifactMetadata]> {
        self.configurations.get(name).map(Vec::as_slice)
    }

    /// Configuration names in declaration order.
    pub fn configuration_names(&self) -> impl Iterator<Item = &str> {
        self.configurations.keys().map(String::as_str)
    }

    /// Every artifact of every configuration; an artifact shared by several
    /// configurations is yielded once per configuration.
    pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactMetadata> {
        self.configurations.values().flatten()
    }
}

/// Registry view of a component built by a sibling module.
#[derive(Debug, Clone)]
pub struct LocalComponentMetadata {
    build_path: String,
    metadata: ModuleVersionMetadata,
    files: HashMap<ArtifactName, PathBuf>,
}

impl LocalComponentMetadata {
    pub fn new(metadata: ModuleVersionMetadata) -> Result<Self, GraftError> {
        let build_path = match metadata.id().as_local() {
            Some(local) => local.build_path.clone(),
            None => {
                return Err(GraftError::Manifest {
                    message: format!("{} is not a local component", metadata.id()),
                })
            }
        };

        let mut files = HashMap::new();
        for artifact in metadata.artifacts() {
            let file = artifact.file().ok_or_else(|| GraftError::Manifest {
                message: format!("local artifact {} has no file", artifact.id),
            })?;
            files.insert(artifact.id.name.clone(), file.to_path_buf());
        }

        Ok(Self {
            build_path,
            metadata,
            files,
        })
    }

    pub fn build_path(&self) -> &str {
        &self.build_path
    }

    pub fn metadata(&self) -> &ModuleVersionMetadata {
        &self.metadata
    }

    /// The published file of an artifact, if this component publishes it.
    pub fn artifact_file(&self, id: &ArtifactIdentifier) -> Option<&Path> {
        if &id.component != self.metadata.id() {
            return None;
        }
        self.files.get(&id.name).map(PathBuf::as_path)
    }

    /// Number of distinct published artifacts.
    pub fn artifact_count(&self) -> usize {
        self.files.len()
    }
}
