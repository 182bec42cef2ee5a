//! Document segmentation: category blocks and root-group blocks

use regex::Regex;
use tracing::trace;

/// Token that turns a quoted span into a category heading.
pub const CATEGORY_MARKER: &str = "類";

/// First character of a root-group header line.
pub const ROOT_DELIMITER: char = '-';

/// One category heading with the text that belongs to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryBlock<'a> {
    pub name: &'a str,
    pub body: &'a str,
}

/// Splits a normalized document at `"name"類` headings.
pub struct CategorySegmenter {
    heading_regex: Regex,
}

impl Default for CategorySegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl CategorySegmenter {
    pub fn new() -> Self {
        Self {
            heading_regex: Regex::new(&format!(r#""([^"\n]*)"{CATEGORY_MARKER}"#))
                .expect("category heading pattern"),
        }
    }

    /// Find every category heading and slice out its body.
    ///
    /// A body runs from the end of its marker to the start of the next heading.
    /// Text before the first heading is dropped. Headings with a blank name are
    /// not headings; their text stays in the preceding body.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<CategoryBlock<'a>> {
        let headings: Vec<(usize, usize, &'a str)> = self
            .heading_regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(1)?.as_str().trim();
                if name.is_empty() {
                    trace!("skipping unnamed category marker at byte {}", whole.start());
                    return None;
                }
                Some((whole.start(), whole.end(), name))
            })
            .collect();

        headings
            .iter()
            .enumerate()
            .map(|(i, &(_, end, name))| {
                let body_end = headings.get(i + 1).map_or(text.len(), |next| next.0);
                CategoryBlock {
                    name,
                    body: &text[end..body_end],
                }
            })
            .collect()
    }
}

/// Split a category body into root-group blocks.
///
/// A block starts at every line whose first non-blank character is
/// [`ROOT_DELIMITER`] and runs up to the next such line. Leading prose is dropped.
pub fn split_root_blocks(body: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if line.trim_start().starts_with(ROOT_DELIMITER) {
            starts.push(offset);
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(body.len());
            &body[start..end]
        })
        .collect()
}
