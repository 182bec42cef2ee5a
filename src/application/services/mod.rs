//! Application services

pub mod notes;

pub use notes::{NotesService, ParsedDocument};
