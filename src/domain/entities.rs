//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

/// Definition used when a word entry carries no explicit gloss.
pub const DEFAULT_PLACEHOLDER: &str = "pending review";

/// Top-level topical grouping, e.g. `「五感與行為」類`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Trimmed name from the quoted span (never empty)
    pub name: String,
    /// Root groups in document order (never empty after assembly)
    pub root_groups: Vec<RootGroup>,
}

/// Cluster of root spellings sharing one meaning, with derived words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootGroup {
    /// Spellings as written, e.g. `["fac", "fec", "fic"]`; order kept, not deduplicated
    pub roots: Vec<String>,
    /// Gloss from the header parentheses
    pub meaning: String,
    /// Word entries in document order (never empty after assembly)
    pub vocabulary: Vec<VocabularyEntry>,
}

/// One derived word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub word: String,
    /// Structural decomposition, e.g. `Contra 相反 + dict 說`
    pub breakdown: String,
    /// Gloss text, or the placeholder when the line had none
    pub definition: String,
}

/// Counts over a parsed tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub categories: usize,
    pub root_groups: usize,
    pub entries: usize,
    /// Entries whose definition equals the placeholder
    pub pending: usize,
}

impl Summary {
    /// Count the nodes of `categories`, treating `placeholder` as "no definition".
    pub fn of(categories: &[Category], placeholder: &str) -> Self {
        let mut summary = Summary {
            categories: categories.len(),
            ..Default::default()
        };
        for group in categories.iter().flat_map(|c| &c.root_groups) {
            summary.root_groups += 1;
            summary.entries += group.vocabulary.len();
            summary.pending += group
                .vocabulary
                .iter()
                .filter(|e| e.definition == placeholder)
                .count();
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.categories == 0
    }
}

impl std::ops::Add for Summary {
    type Output = Summary;

    fn add(self, rhs: Summary) -> Summary {
        Summary {
            categories: self.categories + rhs.categories,
            root_groups: self.root_groups + rhs.root_groups,
            entries: self.entries + rhs.entries,
            pending: self.pending + rhs.pending,
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} categories, {} root groups, {} words ({} pending)",
            self.categories, self.root_groups, self.entries, self.pending
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, definition: &str) -> VocabularyEntry {
        VocabularyEntry {
            word: word.into(),
            breakdown: String::new(),
            definition: definition.into(),
        }
    }

    #[test]
    fn summary_counts_every_level() {
        let categories = vec![Category {
            name: "A".into(),
            root_groups: vec![
                RootGroup {
                    roots: vec!["dict".into()],
                    meaning: "say".into(),
                    vocabulary: vec![entry("Predict", "foretell"), entry("Verdict", DEFAULT_PLACEHOLDER)],
                },
                RootGroup {
                    roots: vec!["port".into()],
                    meaning: "carry".into(),
                    vocabulary: vec![entry("Export", "ship out")],
                },
            ],
        }];

        let summary = Summary::of(&categories, DEFAULT_PLACEHOLDER);

        assert_eq!(
            summary,
            Summary {
                categories: 1,
                root_groups: 2,
                entries: 3,
                pending: 1
            }
        );
        assert_eq!(
            summary.to_string(),
            "1 categories, 2 root groups, 3 words (1 pending)"
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let category = Category {
            name: "移動".into(),
            root_groups: vec![RootGroup {
                roots: vec!["port".into()],
                meaning: "拿".into(),
                vocabulary: vec![entry("Import", "進口")],
            }],
        };

        let json = serde_json::to_string(&category).unwrap();

        assert!(json.contains("\"rootGroups\""));
        assert!(json.contains("\"vocabulary\""));
        assert!(json.contains("移動"));
    }
}
