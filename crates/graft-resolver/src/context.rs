//! What a caller wants resolved for a component.

use std::fmt;

/// The intent behind a module artifact request.
///
/// Local components only serve `Configuration`; the other kinds need a
/// repository that can answer ad hoc queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolveContext {
    /// Artifacts published by a named configuration.
    Configuration { name: String },
    /// Auxiliary artifacts of a component type, e.g. sources of a library.
    ComponentType {
        component_type: String,
        artifact_type: String,
    },
    /// Artifacts carrying a classifier.
    Classifier { classifier: String },
}

impl ResolveContext {
    pub fn configuration(name: impl Into<String>) -> Self {
        Self::Configuration { name: name.into() }
    }

    pub fn component_type(
        component_type: impl Into<String>,
        artifact_type: impl Into<String>,
    ) -> Self {
        Self::ComponentType {
            component_type: component_type.into(),
            artifact_type: artifact_type.into(),
        }
    }

    pub fn classifier(classifier: impl Into<String>) -> Self {
        Self::Classifier {
            classifier: classifier.into(),
        }
    }

    /// Human-readable description used in error messages.
    pub fn description(&self) -> String {
        match self {
            Self::Configuration { name } => format!("artifacts for configuration '{name}'"),
            Self::ComponentType {
                component_type,
                artifact_type,
            } => format!("{artifact_type} artifacts of {component_type} components"),
            Self::Classifier { classifier } => format!("artifacts with classifier '{classifier}'"),
        }
    }
}

impl fmt::Display for ResolveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions() {
        assert_eq!(
            ResolveContext::configuration("default").description(),
            "artifacts for configuration 'default'"
        );
        assert_eq!(
            ResolveContext::component_type("jvm-library", "sources").to_string(),
            "sources artifacts of jvm-library components"
        );
        assert_eq!(
            ResolveContext::classifier("tests").description(),
            "artifacts with classifier 'tests'"
        );
    }
}
