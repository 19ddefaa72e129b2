//! Loading a workspace snapshot into a ready-to-use resolution chain.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use graft_core::config::{GlobalConfig, ResolutionConfig};
use graft_core::manifest::Manifest;
use graft_core::metadata::LocalComponentMetadata;
use graft_core::MANIFEST_FILE;
use graft_resolver::artifact::{ArtifactResolver, LocalArtifactResolver, OfflineArtifactResolver};
use graft_resolver::matcher::VersionMatcher;
use graft_resolver::registry::{InMemoryComponentRegistry, LocalComponentRegistry};
use graft_util::errors::GraftError;

/// A `Graft.toml` snapshot with its components registered.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    resolution: ResolutionConfig,
    jobs: usize,
    registry: Arc<InMemoryComponentRegistry>,
}

impl Workspace {
    /// Find the nearest `Graft.toml` above `cwd` and load it with the global
    /// configuration.
    pub fn discover(cwd: &Path) -> miette::Result<Self> {
        let root = Manifest::discover(cwd).ok_or_else(|| GraftError::Manifest {
            message: format!(
                "could not find {MANIFEST_FILE} in {} or any parent directory",
                cwd.display()
            ),
        })?;
        Self::load(&root, &GlobalConfig::load()?)
    }

    /// Load the workspace rooted at `root`.
    pub fn load(root: &Path, config: &GlobalConfig) -> miette::Result<Self> {
        let manifest = Manifest::from_path(&root.join(MANIFEST_FILE))?;
        let components = manifest.local_components(root)?;
        tracing::info!(
            "Loaded {} components from {}",
            components.len(),
            root.display()
        );

        Ok(Self {
            root: root.to_path_buf(),
            resolution: config.resolution.merged_with(&manifest.resolution),
            jobs: config.build.jobs.max(1) as usize,
            registry: Arc::new(InMemoryComponentRegistry::from_components(components)),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Global resolution settings with this workspace's overrides applied.
    pub fn resolution(&self) -> &ResolutionConfig {
        &self.resolution
    }

    /// Maximum number of resolutions run at once.
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    pub fn registry(&self) -> &Arc<InMemoryComponentRegistry> {
        &self.registry
    }

    pub fn matcher(&self) -> VersionMatcher {
        VersionMatcher::from_config(&self.resolution)
    }

    /// The registered component at `build_path`.
    pub fn component(&self, build_path: &str) -> miette::Result<Arc<LocalComponentMetadata>> {
        self.registry.lookup(build_path).ok_or_else(|| {
            GraftError::Resolution {
                message: format!("no component '{build_path}' in {MANIFEST_FILE}"),
            }
            .into()
        })
    }

    /// The resolution chain for this workspace: local components first, with
    /// no external repositories behind them.
    pub fn resolver(&self) -> Arc<dyn ArtifactResolver> {
        Arc::new(LocalArtifactResolver::new(
            self.registry.clone(),
            OfflineArtifactResolver,
        ))
    }
}

/// Resolution settings for commands that don't need a workspace: the global
/// configuration, with the overrides of the nearest `Graft.toml` when there
/// is one.
pub fn resolution_config(cwd: &Path) -> miette::Result<ResolutionConfig> {
    let config = GlobalConfig::load()?;
    match Manifest::discover(cwd) {
        Some(root) => {
            let manifest = Manifest::from_path(&root.join(MANIFEST_FILE))?;
            Ok(config.resolution.merged_with(&manifest.resolution))
        }
        None => Ok(config.resolution),
    }
}
