//! Command dispatch and handler modules.

mod artifact;
mod artifacts;
mod check;
mod parse;
mod select;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse { selector } => parse::exec(&selector, cli.verbose),
        Command::Select {
            selector,
            candidates,
        } => select::exec(&selector, &candidates),
        Command::Artifacts {
            build_path,
            configuration,
        } => artifacts::exec(&build_path, &configuration),
        Command::Artifact {
            build_path,
            name,
            extension,
            classifier,
        } => artifact::exec(&build_path, &name, &extension, classifier.as_deref()),
        Command::Check => check::exec(cli.verbose).await,
    }
}

fn current_dir() -> Result<std::path::PathBuf> {
    Ok(std::env::current_dir().map_err(graft_util::errors::GraftError::Io)?)
}
