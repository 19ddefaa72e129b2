use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use graft_util::errors::GraftError;

use crate::config::ResolutionOverrides;
use crate::identifier::{ArtifactIdentifier, ArtifactName, ComponentIdentifier};
use crate::metadata::{ArtifactMetadata, LocalComponentMetadata, ModuleVersionMetadata};
use crate::MANIFEST_FILE;

/// The parsed representation of a `Graft.toml` workspace snapshot.
///
/// The snapshot lists the components built by the workspace's modules, with
/// the files each configuration publishes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub resolution: ResolutionOverrides,

    #[serde(default, rename = "component")]
    pub components: Vec<ComponentEntry>,
}

/// A local component from a `[[component]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Build path of the producing module, e.g. `:libs:core`.
    pub path: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "configuration")]
    pub configurations: Vec<ConfigurationEntry>,
}

/// A `[[component.configuration]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationEntry {
    pub name: String,
    #[serde(default)]
    pub artifacts: Vec<ArtifactEntry>,
}

/// A published artifact; `file` is relative to the manifest directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub name: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub classifier: Option<String>,
    pub file: PathBuf,
}

fn default_extension() -> String {
    "jar".to_string()
}

impl Manifest {
    /// Load and parse a `Graft.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GraftError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    /// Parse a `Graft.toml` from a string.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            GraftError::Manifest {
                message: format!("Failed to parse {MANIFEST_FILE}: {e}"),
            }
            .into()
        })
    }

    /// Walk up from `start` to the nearest directory containing `Graft.toml`.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(MANIFEST_FILE).is_file())
            .map(Path::to_path_buf)
    }

    /// Build registry metadata for every component, resolving artifact files
    /// against `root_dir`.
    pub fn local_components(&self, root_dir: &Path) -> miette::Result<Vec<LocalComponentMetadata>> {
        let mut seen = HashSet::new();
        let mut components = Vec::with_capacity(self.components.len());

        for entry in &self.components {
            if !entry.path.starts_with(':') {
                return Err(GraftError::Manifest {
                    message: format!("build path '{}' must start with ':'", entry.path),
                }
                .into());
            }
            if !seen.insert(entry.path.as_str()) {
                return Err(GraftError::Manifest {
                    message: format!("component '{}' is declared twice", entry.path),
                }
                .into());
            }
            components.push(entry.to_metadata(root_dir)?);
        }

        Ok(components)
    }
}

impl ComponentEntry {
    fn to_metadata(&self, root_dir: &Path) -> miette::Result<LocalComponentMetadata> {
        let id = ComponentIdentifier::local(&self.path);
        let mut module = ModuleVersionMetadata::new(id.clone());
        if let Some(status) = &self.status {
            module = module.with_status(status);
        }

        for configuration in &self.configurations {
            module.add_configuration(&configuration.name)?;
            for artifact in &configuration.artifacts {
                let mut name = ArtifactName::new(&artifact.name, &artifact.extension);
                if let Some(classifier) = &artifact.classifier {
                    name = name.with_classifier(classifier);
                }
                let metadata = ArtifactMetadata::local_file(
                    ArtifactIdentifier::new(id.clone(), name),
                    root_dir.join(&artifact.file),
                );
                module.add_artifact(&configuration.name, metadata)?;
            }
        }

        Ok(LocalComponentMetadata::new(module)?)
    }
}
