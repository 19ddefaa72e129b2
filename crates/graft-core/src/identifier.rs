//! Component and artifact identifiers.

use std::fmt;

/// Identity of a component taking part in resolution.
///
/// A component is either produced by a sibling module of the same build
/// (`Local`) or resolved from a repository (`External`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentIdentifier {
    Local(LocalComponentIdentifier),
    External(ExternalComponentIdentifier),
}

/// A component built by another module of the current build, addressed by
/// its `:`-separated build path (`:app`, `:libs:core`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalComponentIdentifier {
    pub build_path: String,
}

/// Repository coordinates of an external component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalComponentIdentifier {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ComponentIdentifier {
    pub fn local(build_path: impl Into<String>) -> Self {
        Self::Local(LocalComponentIdentifier {
            build_path: build_path.into(),
        })
    }

    pub fn external(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self::External(ExternalComponentIdentifier {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        })
    }

    /// The local identifier, if this component is built inside the workspace.
    pub fn as_local(&self) -> Option<&LocalComponentIdentifier> {
        match self {
            Self::Local(id) => Some(id),
            Self::External(_) => None,
        }
    }

    pub fn is_local(&self) -> bool {
        self.as_local().is_some()
    }
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(id) => id.fmt(f),
            Self::External(id) => id.fmt(f),
        }
    }
}

impl fmt::Display for LocalComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "project {}", self.build_path)
    }
}

impl ExternalComponentIdentifier {
    /// Parse `"group:name:version"` into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(':');
        let (group, name, version) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || [group, name, version].iter().any(|p| p.is_empty()) {
            return None;
        }
        Some(Self {
            group: group.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        })
    }
}

impl fmt::Display for ExternalComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// The file-level name of an artifact within its component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactName {
    pub name: String,
    pub extension: String,
    pub classifier: Option<String>,
}

impl ArtifactName {
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(classifier) = &self.classifier {
            write!(f, "-{classifier}")?;
        }
        if !self.extension.is_empty() {
            write!(f, ".{}", self.extension)?;
        }
        Ok(())
    }
}

/// Identity of a single artifact: the owning component plus the artifact name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactIdentifier {
    pub component: ComponentIdentifier,
    pub name: ArtifactName,
}

impl ArtifactIdentifier {
    pub fn new(component: ComponentIdentifier, name: ArtifactName) -> Self {
        Self { component, name }
    }
}

impl fmt::Display for ArtifactIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.component)
    }
}
