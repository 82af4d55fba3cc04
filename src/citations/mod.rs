//! @acp:module "Citations"
//! @acp:summary "Sources block extraction from query engine output"
//! @acp:domain cli
//! @acp:layer service
//!
//! The query engine prints its answer followed by a `## Sources` block of
//! numbered markdown links. This module is the only place that knows that
//! layout; everything downstream works with [`QueryResult`].

pub mod registry;

pub use registry::{renumber, rewrite_markers, CitationRegistry};

use std::sync::LazyLock;

use regex::Regex;

/// Heading that separates the answer from its sources
pub const SOURCES_MARKER: &str = "## Sources";

/// Matches: `<n>. [label](url)`
/// Groups: 1=label, 2=url
static CITATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\.\s+\[(.*?)\]\((\S+?)\)\s*$").unwrap()
});

/// A single source entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub label: String,
    pub url: String,
}

impl Citation {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Answer text with its local citation list.
///
/// `citations[i]` is local citation `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub content: String,
    pub citations: Vec<Citation>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.citations.is_empty()
    }
}

/// Split raw engine output into content and citations.
///
/// Local numbering follows the order of the matched lines, not the numbers
/// printed by the engine. Lines in the sources block that do not look like a
/// citation are skipped.
pub fn extract_citations(raw: &str) -> QueryResult {
    let Some((content, sources)) = raw.split_once(SOURCES_MARKER) else {
        return QueryResult {
            content: raw.trim().to_string(),
            citations: Vec::new(),
        };
    };

    let citations = sources
        .lines()
        .filter_map(|line| CITATION_PATTERN.captures(line))
        .map(|caps| Citation::new(&caps[1], &caps[2]))
        .collect();

    QueryResult {
        content: content.trim().to_string(),
        citations,
    }
}
