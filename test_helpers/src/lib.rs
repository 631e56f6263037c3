//! Test helpers shared across the workspace.
//!
//! - [`env`] serialises environment mutation behind RAII guards.
//! - [`tree`] builds throwaway directory trees of configuration files and
//!   can enter one as the process working directory.

pub mod env;
pub mod tree;
