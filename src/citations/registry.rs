//! @acp:module "Citation Registry"
//! @acp:summary "Document-wide citation deduplication and marker renumbering"
//! @acp:domain cli
//! @acp:layer service
//!
//! Each section arrives with its own `[1]`, `[2]`, ... numbering. The
//! registry assigns one global number per distinct url, in order of first
//! appearance, and section content is rewritten to use those numbers.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Citation, QueryResult};

/// Matches: `[<digits>]`
/// Groups: 1=number
static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(\d+)\]").unwrap());

/// Ordered, url-unique citation list for a whole briefing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationRegistry {
    entries: Vec<Citation>,
}

impl CitationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Citation] {
        &self.entries
    }

    /// Global (1-based) index of the entry with this url
    pub fn index_of(&self, url: &str) -> Option<usize> {
        self.entries.iter().position(|c| c.url == url).map(|i| i + 1)
    }

    /// Global index for `citation`, appending it on first sight.
    ///
    /// The label of the first occurrence wins.
    pub fn register(&mut self, citation: &Citation) -> usize {
        if let Some(index) = self.index_of(&citation.url) {
            return index;
        }
        self.entries.push(citation.clone());
        self.entries.len()
    }

    /// Iterate `(global index, citation)` in registry order
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Citation)> {
        self.entries.iter().enumerate().map(|(i, c)| (i + 1, c))
    }
}

/// Fold one section into the registry and return its renumbered content.
///
/// The registry is taken and handed back by value so a run owns exactly one
/// instance and the processing order is explicit at the call site.
pub fn renumber(mut registry: CitationRegistry, result: &QueryResult) -> (CitationRegistry, String) {
    let mapping: HashMap<usize, usize> = result
        .citations
        .iter()
        .enumerate()
        .map(|(i, citation)| (i + 1, registry.register(citation)))
        .collect();

    let content = rewrite_markers(&result.content, &mapping);
    (registry, content)
}

/// Replace `[k]` with `[mapping[k]]`.
///
/// Markers without a mapping stay as they are. Any bracketed text that is
/// not purely digits is never touched.
pub fn rewrite_markers(content: &str, mapping: &HashMap<usize, usize>) -> String {
    MARKER_PATTERN
        .replace_all(content, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|local| mapping.get(&local))
                .map(|global| format!("[{}]", global))
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
