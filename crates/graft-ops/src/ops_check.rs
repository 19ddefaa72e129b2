//! Operation: resolve every published artifact of the workspace.
//!
//! Each component is resolved on the blocking pool, with at most
//! `build.jobs` components in flight. An artifact is reported when the chain
//! can't find it or when the file it resolves to doesn't exist on disk.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use graft_core::identifier::ArtifactIdentifier;
use graft_core::metadata::LocalComponentMetadata;
use graft_resolver::artifact::{ArtifactResolver, ModuleSource};
use graft_resolver::context::ResolveContext;
use graft_resolver::result::{ArtifactFileResult, ArtifactSetResult, ResolveOutcome};

use crate::ops_artifacts::unanswered;
use crate::workspace::Workspace;

/// Findings of `graft check`.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub components: usize,
    pub resolved: usize,
    pub not_found: Vec<ArtifactIdentifier>,
    pub missing_files: Vec<(ArtifactIdentifier, PathBuf)>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.not_found.is_empty() && self.missing_files.is_empty()
    }

    fn merge(&mut self, other: CheckReport) {
        self.components += other.components;
        self.resolved += other.resolved;
        self.not_found.extend(other.not_found);
        self.missing_files.extend(other.missing_files);
    }
}

/// Resolve every artifact of every configuration of every component.
pub async fn check(ws: &Workspace) -> miette::Result<CheckReport> {
    let resolver = ws.resolver();
    let semaphore = Arc::new(Semaphore::new(ws.jobs()));
    let mut join_set = JoinSet::new();

    for component in ws.registry().snapshot() {
        let resolver = resolver.clone();
        let sem = semaphore.clone();

        join_set.spawn(async move {
            let _permit = sem
                .acquire_owned()
                .await
                .map_err(|e| miette::miette!("Resolution pool closed: {e}"))?;
            tokio::task::spawn_blocking(move || check_component(resolver.as_ref(), &component))
                .await
                .map_err(|e| miette::miette!("Resolution task failed: {e}"))?
        });
    }

    let mut report = CheckReport::default();
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(Ok(component_report)) => report.merge(component_report),
            Ok(Err(e)) => return Err(e),
            Err(e) => return Err(miette::miette!("Background task failed: {e}")),
        }
    }

    report.not_found.sort();
    report.missing_files.sort();
    Ok(report)
}

fn check_component(
    resolver: &dyn ArtifactResolver,
    component: &LocalComponentMetadata,
) -> miette::Result<CheckReport> {
    let module = component.metadata();
    tracing::debug!("Checking {}", module.id());

    let mut report = CheckReport {
        components: 1,
        ..CheckReport::default()
    };
    let mut seen = HashSet::new();

    for configuration in module.configuration_names() {
        let mut artifacts = ArtifactSetResult::new();
        resolver.resolve_module_artifacts(
            module,
            &ResolveContext::configuration(configuration),
            &mut artifacts,
        )?;
        let artifacts = match artifacts.into_outcome() {
            Some(ResolveOutcome::Resolved(artifacts)) => artifacts,
            Some(ResolveOutcome::NotFound(id)) => {
                report.not_found.push(id);
                continue;
            }
            Some(ResolveOutcome::Failed(e)) => return Err(e.into()),
            None => {
                return Err(unanswered(format_args!(
                    "configuration '{configuration}' of {}",
                    module.id()
                )));
            }
        };

        for artifact in artifacts {
            if !seen.insert(artifact.id.clone()) {
                continue;
            }
            let mut file = ArtifactFileResult::new();
            resolver.resolve_artifact(&artifact, &ModuleSource::none(), &mut file)?;
            match file.into_outcome() {
                Some(ResolveOutcome::Resolved(path)) if path.is_file() => report.resolved += 1,
                Some(ResolveOutcome::Resolved(path)) => report.missing_files.push((artifact.id, path)),
                Some(ResolveOutcome::NotFound(id)) => report.not_found.push(id),
                Some(ResolveOutcome::Failed(e)) => return Err(e.into()),
                None => return Err(unanswered(&artifact.id)),
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::config::{BuildConfig, GlobalConfig};
    use graft_core::metadata::{ArtifactMetadata, ModuleVersionMetadata};
    use graft_core::MANIFEST_FILE;
    use graft_resolver::errors::ResolveError;

    const MANIFEST: &str = r#"
[[component]]
path = ":app"

[[component.configuration]]
name = "default"
artifacts = [{ name = "app", file = "app/build/app.jar" }]

[[component]]
path = ":lib"

[[component.configuration]]
name = "default"
artifacts = [{ name = "lib", file = "lib/build/lib.jar" }]

[[component.configuration]]
name = "runtime"
artifacts = [
    { name = "lib", file = "lib/build/lib.jar" },
    { name = "lib", classifier = "natives", file = "lib/build/lib-natives.jar" },
]
"#;

    fn workspace(jobs: u32) -> (tempfile::TempDir, Workspace) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), MANIFEST).unwrap();
        let config = GlobalConfig {
            build: BuildConfig { jobs },
            ..GlobalConfig::default()
        };
        let ws = Workspace::load(dir.path(), &config).unwrap();
        (dir, ws)
    }

    fn touch(dir: &tempfile::TempDir, file: &str) {
        let path = dir.path().join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"PK").unwrap();
    }

    #[tokio::test]
    async fn clean_when_all_files_exist() {
        let (dir, ws) = workspace(2);
        for file in ["app/build/app.jar", "lib/build/lib.jar", "lib/build/lib-natives.jar"] {
            touch(&dir, file);
        }
        let report = check(&ws).await.unwrap();
        assert!(report.is_clean());
        assert_eq!(report.components, 2);
        assert_eq!(report.resolved, 3);
    }

    #[tokio::test]
    async fn reports_missing_files() {
        let (dir, ws) = workspace(1);
        touch(&dir, "app/build/app.jar");
        touch(&dir, "lib/build/lib.jar");

        let report = check(&ws).await.unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.resolved, 2);
        assert_eq!(report.missing_files.len(), 1);
        let (id, path) = &report.missing_files[0];
        assert_eq!(id.name.to_string(), "lib-natives.jar");
        assert_eq!(path, &dir.path().join("lib/build/lib-natives.jar"));
    }

    /// Answers module requests with `answer_modules`, never writes file sinks.
    struct Silent {
        answer_modules: bool,
    }

    impl ArtifactResolver for Silent {
        fn resolve_module_artifacts(
            &self,
            module: &ModuleVersionMetadata,
            _context: &ResolveContext,
            result: &mut ArtifactSetResult,
        ) -> Result<(), ResolveError> {
            if self.answer_modules {
                result.resolved(module.artifacts().cloned().collect())?;
            }
            Ok(())
        }

        fn resolve_artifact(
            &self,
            _artifact: &ArtifactMetadata,
            _source: &ModuleSource,
            _result: &mut ArtifactFileResult,
        ) -> Result<(), ResolveError> {
            Ok(())
        }
    }

    #[test]
    fn unanswered_requests_are_errors() {
        let (_dir, ws) = workspace(1);
        let lib = ws.component(":lib").unwrap();

        let silent = Silent {
            answer_modules: false,
        };
        let err = check_component(&silent, &lib).unwrap_err();
        assert!(err.to_string().contains("no resolver answered for configuration"));

        let silent = Silent {
            answer_modules: true,
        };
        let err = check_component(&silent, &lib).unwrap_err();
        assert!(err.to_string().contains("no resolver answered for"));
        assert!(err.to_string().contains("lib.jar"));
    }

    #[tokio::test]
    async fn empty_workspace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "").unwrap();
        let ws = Workspace::load(dir.path(), &GlobalConfig::default()).unwrap();
        let report = check(&ws).await.unwrap();
        assert_eq!(report.components, 0);
        assert!(report.is_clean());
    }
}
