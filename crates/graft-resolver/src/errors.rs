//! Errors raised by the artifact resolution chain.

use miette::Diagnostic;
use thiserror::Error;

use crate::selector::SelectorError;

/// Boxed error raised by an external delegate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// A local component was asked for artifacts in a context only external
    /// repositories can serve.
    #[error("Resolving {description} for local components is not supported")]
    #[diagnostic(code(graft::resolve::unsupported_context))]
    UnsupportedContext { description: String },

    /// A local component was asked for a configuration it doesn't declare.
    #[error("Configuration '{name}' is not declared on {component}")]
    #[diagnostic(code(graft::resolve::unknown_configuration))]
    UnknownConfiguration { component: String, name: String },

    /// A local identifier that the workspace registry does not know.
    #[error("Local component {build_path} is not registered in this build")]
    #[diagnostic(
        code(graft::resolve::unregistered_component),
        help("local component identifiers must be created from registered workspace modules")
    )]
    RegistryInvariantViolation { build_path: String },

    /// A result sink was written twice.
    #[error("Result was already set to {existing}")]
    #[diagnostic(code(graft::resolve::result_already_set))]
    ResultAlreadySet { existing: &'static str },

    #[error("Cannot resolve {request}: no external repositories are available")]
    #[diagnostic(
        code(graft::resolve::offline),
        help("declare the component in Graft.toml or resolve online")
    )]
    Offline { request: String },

    /// Failure reported by an external delegate.
    #[error("Failed to resolve {request}")]
    #[diagnostic(code(graft::resolve::external))]
    External {
        request: String,
        #[source]
        source: BoxError,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Selector(#[from] SelectorError),
}
