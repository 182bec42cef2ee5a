//! Parser for etymon study notes.
//!
//! Notes group vocabulary by topical category (`「name」類`), by root group
//! (`-fac/fec/fic- (make)`) and by word (`Factory (fac + tory = 工廠)`).
//! [`parse`] turns such a document into a [`Category`] tree; the remaining
//! layers read notes from disk and export the tree as JSON.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{parse, Category, RootGroup, VocabularyEntry};
