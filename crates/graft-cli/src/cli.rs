//! CLI argument definitions for Graft.
//!
//! Each command corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "graft",
    version,
    about = "Version selection and local artifact resolution for multi-module builds",
    long_about = "Graft parses dependency version selectors, picks the best matching version, \
                  and resolves the artifacts of components built inside the workspace described \
                  by Graft.toml."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a version selector and print its canonical form
    Parse {
        /// Selector, e.g. 1.0, [1.0,2.0), 1.2.+ or latest.release
        selector: String,
    },

    /// Pick the newest candidate version accepted by a selector
    Select {
        /// Selector to match against
        selector: String,
        /// Candidate versions, written VERSION or VERSION@STATUS
        #[arg(required = true)]
        candidates: Vec<String>,
    },

    /// List the artifacts a local component publishes for a configuration
    Artifacts {
        /// Build path of the component, e.g. :lib
        build_path: String,
        /// Configuration to resolve
        #[arg(short, long, default_value = "default")]
        configuration: String,
    },

    /// Resolve a single artifact of a local component to its file
    Artifact {
        /// Build path of the component, e.g. :lib
        build_path: String,
        /// Artifact name
        name: String,
        /// Artifact file extension
        #[arg(short, long, default_value = "jar")]
        extension: String,
        /// Artifact classifier, e.g. sources
        #[arg(long)]
        classifier: Option<String>,
    },

    /// Resolve every artifact in the workspace and report missing ones
    Check,
}

pub fn parse() -> Cli {
    Cli::parse()
}
