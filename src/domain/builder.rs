//! Tree builder: assembles categories, root groups and entries from note text.

use tracing::{debug, trace};

use crate::domain::entities::{Category, RootGroup, DEFAULT_PLACEHOLDER};
use crate::domain::extract::{EntryExtractor, HeaderExtractor};
use crate::domain::normalize::normalize_punctuation;
use crate::domain::segment::{split_root_blocks, CategorySegmenter};

/// Knobs for entry extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Definition used when a line supplies none
    pub placeholder: String,
    /// Accept `Word (breakdown)：gloss` as a definition
    pub trailing_gloss: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            trailing_gloss: true,
        }
    }
}

/// Constructs category trees from note documents.
///
/// Holds only compiled patterns, so one builder can parse any number of
/// documents, from any number of threads.
pub struct TreeBuilder {
    options: ParseOptions,
    segmenter: CategorySegmenter,
    headers: HeaderExtractor,
    entries: EntryExtractor,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            segmenter: CategorySegmenter::new(),
            headers: HeaderExtractor::new(),
            entries: EntryExtractor::new(options.placeholder.clone(), options.trailing_gloss),
            options,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a whole document.
    ///
    /// Never fails: categories without root groups, root groups without a valid
    /// header or without entries, and lines that are not entries are left out.
    pub fn build(&self, text: &str) -> Vec<Category> {
        let normalized = normalize_punctuation(text);

        let categories: Vec<Category> = self
            .segmenter
            .segment(&normalized)
            .into_iter()
            .filter_map(|block| {
                let root_groups: Vec<RootGroup> = split_root_blocks(block.body)
                    .into_iter()
                    .filter_map(|raw| self.build_root_group(raw))
                    .collect();
                if root_groups.is_empty() {
                    debug!("dropping category without root groups: {}", block.name);
                    return None;
                }
                Some(Category {
                    name: block.name.to_string(),
                    root_groups,
                })
            })
            .collect();

        debug!("built {} categories", categories.len());
        categories
    }

    fn build_root_group(&self, block: &str) -> Option<RootGroup> {
        let Some(header) = self.headers.extract(block) else {
            trace!("no root header: {:?}", block.lines().next());
            return None;
        };
        let vocabulary = self.entries.extract(block);
        if vocabulary.is_empty() {
            trace!("dropping root group without entries: {:?}", header.roots);
            return None;
        }
        Some(RootGroup {
            roots: header.roots,
            meaning: header.meaning,
            vocabulary,
        })
    }
}
