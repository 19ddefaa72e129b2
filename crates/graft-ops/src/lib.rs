pub mod ops_artifacts;
pub mod ops_check;
pub mod ops_select;
pub mod workspace;
