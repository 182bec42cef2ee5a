//! Root header and vocabulary entry extraction from a root-group block

use regex::Regex;
use tracing::trace;

use crate::domain::entities::{VocabularyEntry, DEFAULT_PLACEHOLDER};

/// Byte index of the `)` matching the `(` at byte `open`.
///
/// Nested groups are counted, so `((a)(b))` closes at the last byte rather than
/// after `a`. Returns `None` when `open` is not a `(` or the group never closes.
pub fn find_closing_paren(text: &str, open: usize) -> Option<usize> {
    let tail = text.get(open..)?;
    if !tail.starts_with('(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in tail.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a payload at its last `=` outside any nested parentheses.
///
/// Returns the trimmed breakdown and, when a separator exists, the trimmed text
/// after it.
pub fn split_payload(payload: &str) -> (&str, Option<&str>) {
    let mut depth = 0usize;
    let mut separator = None;
    for (i, c) in payload.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => separator = Some(i),
            _ => {}
        }
    }
    match separator {
        Some(i) => (payload[..i].trim(), Some(payload[i + 1..].trim())),
        None => (payload.trim(), None),
    }
}

/// Parsed first line of a root-group block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootHeader {
    pub roots: Vec<String>,
    pub meaning: String,
}

/// Reads `-fac/fec/fic- (make)` style headers.
pub struct HeaderExtractor {
    spelling_regex: Regex,
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderExtractor {
    pub fn new() -> Self {
        Self {
            spelling_regex: Regex::new(r"^-([\w/ \t-]+)-").expect("root spelling pattern"),
        }
    }

    /// Parse the first line of `block`.
    ///
    /// The line must open with a dash-enclosed spelling span followed, somewhere on
    /// the same line, by a balanced parenthesized gloss. Spellings are split on `/`
    /// and stripped of blanks and stray dashes; an empty result is no header.
    pub fn extract(&self, block: &str) -> Option<RootHeader> {
        let line = block.lines().next()?.trim_start();
        let caps = self.spelling_regex.captures(line)?;
        let span = caps.get(1)?.as_str();
        let rest = caps.get(0)?.end();

        let open = rest + line[rest..].find('(')?;
        let close = find_closing_paren(line, open)?;
        let meaning = line[open + 1..close].trim().to_string();

        let roots: Vec<String> = span
            .split('/')
            .map(|token| token.trim().trim_matches('-').trim())
            .filter(|token| !token.is_empty())
            .map(String::from)
            .collect();
        if roots.is_empty() {
            return None;
        }

        Some(RootHeader { roots, meaning })
    }
}

/// What follows a payload's closing parenthesis.
#[derive(Debug, PartialEq, Eq)]
enum Tail<'a> {
    Empty,
    Gloss(&'a str),
    Prose,
}

/// A tail of punctuation only (`。`, `.`, `;`) counts as empty.
fn classify_tail(tail: &str) -> Tail<'_> {
    let tail = tail.trim();
    if let Some(gloss) = tail.strip_prefix(':').or_else(|| tail.strip_prefix('：')) {
        return Tail::Gloss(gloss.trim());
    }
    if tail.chars().all(|c| !c.is_alphanumeric()) {
        return Tail::Empty;
    }
    Tail::Prose
}

/// Reads `Word (breakdown = definition)` lines.
pub struct EntryExtractor {
    word_regex: Regex,
    placeholder: String,
    trailing_gloss: bool,
}

impl Default for EntryExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER, true)
    }
}

impl EntryExtractor {
    pub fn new(placeholder: impl Into<String>, trailing_gloss: bool) -> Self {
        Self {
            word_regex: Regex::new(r"^(\w+(?:['’-]\w+)*)\s*\(").expect("word entry pattern"),
            placeholder: placeholder.into(),
            trailing_gloss,
        }
    }

    /// Extract entries from every line of `block` except the header line.
    pub fn extract(&self, block: &str) -> Vec<VocabularyEntry> {
        block
            .lines()
            .skip(1)
            .filter_map(|line| self.extract_line(line))
            .collect()
    }

    /// Parse one candidate line; `None` when it is not a word entry.
    pub fn extract_line(&self, line: &str) -> Option<VocabularyEntry> {
        let line = line.trim();
        let caps = self.word_regex.captures(line)?;
        let word = caps.get(1)?.as_str();
        let open = caps.get(0)?.end() - 1;

        let Some(close) = find_closing_paren(line, open) else {
            trace!("unclosed payload: {line}");
            return None;
        };
        let payload = line[open + 1..close].trim();
        if payload.is_empty() {
            trace!("empty payload: {line}");
            return None;
        }

        let (breakdown, explicit) = split_payload(payload);

        // An explicit `=` makes the line an entry whatever follows the payload
        let trailing = match classify_tail(&line[close + 1..]) {
            Tail::Empty => None,
            Tail::Gloss(gloss) => Some(gloss),
            Tail::Prose if explicit.is_some() => None,
            Tail::Prose => {
                trace!("prose after payload, not an entry: {line}");
                return None;
            }
        };

        let definition = explicit
            .filter(|d| !d.is_empty())
            .or_else(|| trailing.filter(|g| self.trailing_gloss && !g.is_empty()))
            .unwrap_or(&self.placeholder);

        Some(VocabularyEntry {
            word: word.to_string(),
            breakdown: breakdown.to_string(),
            definition: definition.to_string(),
        })
    }
}
