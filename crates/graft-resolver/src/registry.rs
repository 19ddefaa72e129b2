//! Registry of components produced by the modules of the current build.

use std::collections::HashMap;
use std::sync::Arc;

use graft_core::metadata::LocalComponentMetadata;
use parking_lot::RwLock;

/// Read access to the local components of the build.
///
/// Implementations must tolerate lookups running concurrently with
/// registrations from other module builds. Every lookup returns a snapshot
/// that later registrations do not change.
pub trait LocalComponentRegistry: Send + Sync {
    fn lookup(&self, build_path: &str) -> Option<Arc<LocalComponentMetadata>>;
}

impl<T: LocalComponentRegistry + ?Sized> LocalComponentRegistry for Arc<T> {
    fn lookup(&self, build_path: &str) -> Option<Arc<LocalComponentMetadata>> {
        (**self).lookup(build_path)
    }
}

impl<T: LocalComponentRegistry + ?Sized> LocalComponentRegistry for &T {
    fn lookup(&self, build_path: &str) -> Option<Arc<LocalComponentMetadata>> {
        (**self).lookup(build_path)
    }
}

/// A registry kept in memory, filled as module builds complete.
#[derive(Debug, Default)]
pub struct InMemoryComponentRegistry {
    components: RwLock<HashMap<String, Arc<LocalComponentMetadata>>>,
}

impl InMemoryComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_components(components: impl IntoIterator<Item = LocalComponentMetadata>) -> Self {
        let registry = Self::new();
        for component in components {
            registry.register(component);
        }
        registry
    }

    /// Publish a component, replacing any earlier registration for the same
    /// build path. Returns the replaced registration.
    pub fn register(&self, component: LocalComponentMetadata) -> Option<Arc<LocalComponentMetadata>> {
        let build_path = component.build_path().to_string();
        tracing::debug!("Registering local component {build_path}");
        self.components
            .write()
            .insert(build_path, Arc::new(component))
    }

    pub fn len(&self) -> usize {
        self.components.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.read().is_empty()
    }

    /// All registered components, ordered by build path.
    pub fn snapshot(&self) -> Vec<Arc<LocalComponentMetadata>> {
        let mut components: Vec<_> = self.components.read().values().cloned().collect();
        components.sort_by(|a, b| a.build_path().cmp(b.build_path()));
        components
    }
}

impl LocalComponentRegistry for InMemoryComponentRegistry {
    fn lookup(&self, build_path: &str) -> Option<Arc<LocalComponentMetadata>> {
        self.components.read().get(build_path).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::identifier::ComponentIdentifier;
    use graft_core::metadata::ModuleVersionMetadata;

    fn component(path: &str, status: &str) -> LocalComponentMetadata {
        let module =
            ModuleVersionMetadata::new(ComponentIdentifier::local(path)).with_status(status);
        LocalComponentMetadata::new(module).unwrap()
    }

    #[test]
    fn lookup_by_build_path() {
        let registry = InMemoryComponentRegistry::from_components([
            component(":app", "integration"),
            component(":lib", "release"),
        ]);
        assert_eq!(registry.len(), 2);
        let lib = registry.lookup(":lib").unwrap();
        assert_eq!(lib.metadata().status(), "release");
        assert!(registry.lookup(":missing").is_none());
    }

    #[test]
    fn lookups_are_snapshots() {
        let registry = InMemoryComponentRegistry::new();
        registry.register(component(":lib", "integration"));
        let before = registry.lookup(":lib").unwrap();

        let replaced = registry.register(component(":lib", "release"));
        assert!(replaced.is_some());
        assert_eq!(before.metadata().status(), "integration");
        assert_eq!(registry.lookup(":lib").unwrap().metadata().status(), "release");
    }

    #[test]
    fn snapshot_is_sorted() {
        let registry = InMemoryComponentRegistry::from_components([
            component(":b", "integration"),
            component(":a", "integration"),
        ]);
        let paths: Vec<String> = registry
            .snapshot()
            .iter()
            .map(|c| c.build_path().to_string())
            .collect();
        assert_eq!(paths, [":a", ":b"]);
    }

    #[test]
    fn concurrent_register_and_lookup() {
        let registry = InMemoryComponentRegistry::new();
        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..100 {
                    registry.register(component(&format!(":m{i}"), "integration"));
                }
            });
            s.spawn(|| {
                for i in 0..100 {
                    if let Some(found) = registry.lookup(&format!(":m{i}")) {
                        assert_eq!(found.build_path(), format!(":m{i}"));
                    }
                }
            });
        });
        assert_eq!(registry.len(), 100);
    }
}
