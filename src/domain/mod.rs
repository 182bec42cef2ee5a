//! Domain layer: entities and the note parser
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod extract;
pub mod normalize;
pub mod segment;

pub use builder::{ParseOptions, TreeBuilder};
pub use entities::*;
pub use normalize::normalize_punctuation;

/// Parse a note document with default options.
pub fn parse(text: &str) -> Vec<Category> {
    TreeBuilder::new().build(text)
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Falls back to the input when a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
