//! Notes service
//!
//! Reads note documents through the filesystem boundary, parses them and exports
//! the resulting category trees as JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{normalize_punctuation, Category, Summary, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Categories parsed from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Where the text came from (`-` for stdin)
    pub source: PathBuf,
    pub categories: Vec<Category>,
}

impl ParsedDocument {
    /// Concatenate the categories of several documents, in order.
    ///
    /// No merging across documents: two categories with the same name stay apart.
    pub fn flatten(documents: Vec<ParsedDocument>) -> Vec<Category> {
        documents.into_iter().flat_map(|d| d.categories).collect()
    }
}

/// Service for turning note files into category trees.
pub struct NotesService {
    fs: Arc<dyn FileSystem>,
    builder: TreeBuilder,
    extensions: Vec<String>,
}

impl NotesService {
    /// Create a new notes service.
    ///
    /// `extensions` filters files when a directory is parsed; empty accepts all.
    pub fn new(fs: Arc<dyn FileSystem>, builder: TreeBuilder, extensions: Vec<String>) -> Self {
        Self {
            fs,
            builder,
            extensions,
        }
    }

    /// Parse text that is already in memory.
    pub fn parse_text(&self, source: impl Into<PathBuf>, text: &str) -> ParsedDocument {
        ParsedDocument {
            source: source.into(),
            categories: self.builder.build(text),
        }
    }

    /// Parse a file, or every matching file below a directory.
    pub fn parse_path(&self, path: &Path) -> ApplicationResult<Vec<ParsedDocument>> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        if self.fs.is_dir(path) {
            self.parse_directory(path)
        } else {
            Ok(vec![self.parse_file(path)?])
        }
    }

    /// Parse a single note file.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn parse_file(&self, path: &Path) -> ApplicationResult<ParsedDocument> {
        let text = self
            .fs
            .read_to_string(path)
            .with_path_context("read notes", path)?;
        let document = self.parse_text(path, &text);
        debug!("parse_file: {} categories", document.categories.len());
        Ok(document)
    }

    /// Parse all note files below `dir`, one document per file, in path order.
    ///
    /// Files are parsed in parallel; each parse owns its own text and tree.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn parse_directory(&self, dir: &Path) -> ApplicationResult<Vec<ParsedDocument>> {
        let files: Vec<PathBuf> = self
            .fs
            .list_files(dir)
            .with_path_context("list notes", dir)?
            .into_iter()
            .filter(|p| self.accepts(p))
            .collect();
        info!("parse_directory: {} note files", files.len());

        files.par_iter().map(|path| self.parse_file(path)).collect()
    }

    /// Read a note file with its full-width punctuation folded to ASCII.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn normalize_file(&self, path: &Path) -> ApplicationResult<String> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        let text = self
            .fs
            .read_to_string(path)
            .with_path_context("read notes", path)?;
        Ok(normalize_punctuation(&text))
    }

    /// Serialize categories to the `{ name, rootGroups: [...] }` JSON shape.
    pub fn to_json(&self, categories: &[Category], pretty: bool) -> ApplicationResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(categories)?
        } else {
            serde_json::to_string(categories)?
        };
        Ok(json)
    }

    /// Write categories as JSON to `output`, creating parent directories.
    #[instrument(skip(self, categories), fields(output = %output.display()))]
    pub fn export_json(
        &self,
        categories: &[Category],
        output: &Path,
        pretty: bool,
    ) -> ApplicationResult<()> {
        let mut json = self.to_json(categories, pretty)?;
        json.push('\n');
        self.fs
            .ensure_parent(output)
            .with_path_context("create output directory", output)?;
        self.fs
            .write(output, &json)
            .with_path_context("write database", output)?;
        info!("export_json: {} categories", categories.len());
        Ok(())
    }

    /// Counts for `categories`, using this service's placeholder.
    pub fn summarize(&self, categories: &[Category]) -> Summary {
        Summary::of(categories, &self.builder.options().placeholder)
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}
