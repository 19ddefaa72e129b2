//! Shared utilities for Graft.
//!
//! Cross-cutting concerns used by the other Graft crates: the unified error
//! type surfaced at manifest, configuration and command boundaries, and the
//! status lines commands print to stderr.

pub mod errors;
pub mod progress;
