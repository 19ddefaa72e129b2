//! Resolution core: the version selector engine and the artifact resolution
//! chain that serves local components before external repositories.

pub mod artifact;
pub mod context;
pub mod errors;
pub mod matcher;
pub mod registry;
pub mod result;
pub mod selector;
pub mod version;
