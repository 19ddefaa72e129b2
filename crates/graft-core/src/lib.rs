//! Core data types for Graft.
//!
//! This crate defines the value types shared by the resolution engine and
//! its callers: component and artifact identifiers, module version metadata,
//! status scales, global configuration, and the `Graft.toml` workspace
//! snapshot manifest.
//!
//! This crate is intentionally free of async code and network I/O.

/// File name of the workspace snapshot manifest.
pub const MANIFEST_FILE: &str = "Graft.toml";

pub mod config;
pub mod identifier;
pub mod manifest;
pub mod metadata;
pub mod status;
