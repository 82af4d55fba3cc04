//! @acp:module "Queries"
//! @acp:summary "Weekday queries file parsing"
//! @acp:domain cli
//! @acp:layer service
//!
//! A queries file is a sequence of blocks:
//!
//! ```text
//! SECTION: Tech
//! What happened in tech news today?
//! Focus on AI and hardware.
//!
//! SECTION: Weather
//! Weather forecast for Chicago today
//! ```
//!
//! Each block becomes one [`QuerySpec`] whose query is the block's
//! non-empty lines joined by newlines.

use std::path::Path;

use chrono::NaiveDate;

use crate::error::{BriefingError, Result};

/// Line prefix that opens a new section
pub const SECTION_PREFIX: &str = "SECTION:";

/// One section of the briefing and the query that fills it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub section: String,
    pub query: String,
}

impl QuerySpec {
    pub fn new(section: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            query: query.into(),
        }
    }
}

/// Parse queries file content into ordered section/query pairs.
///
/// Blank lines never end a section. A header with no body lines, or with an
/// empty name, contributes nothing. Text before the first header is ignored.
pub fn parse_queries(content: &str) -> Vec<QuerySpec> {
    let mut specs = Vec::new();
    let mut current: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in content.lines() {
        let line = line.trim_end();

        if let Some(name) = line.strip_prefix(SECTION_PREFIX) {
            flush(&mut specs, current.take(), &mut body);
            let name = name.trim();
            current = (!name.is_empty()).then(|| name.to_string());
        } else if current.is_some() && !line.is_empty() {
            body.push(line);
        }
    }
    flush(&mut specs, current, &mut body);

    specs
}

fn flush(specs: &mut Vec<QuerySpec>, section: Option<String>, body: &mut Vec<&str>) {
    if let Some(section) = section {
        if !body.is_empty() {
            specs.push(QuerySpec::new(section, body.join("\n")));
        }
    }
    body.clear();
}

/// Read and parse a queries file
pub fn load_queries(path: &Path) -> Result<Vec<QuerySpec>> {
    if !path.exists() {
        return Err(BriefingError::QueriesNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_queries(&content))
}

/// Serialize specs back into the queries file format
pub fn render_queries(specs: &[QuerySpec]) -> String {
    specs
        .iter()
        .map(|spec| format!("{} {}\n{}\n", SECTION_PREFIX, spec.section, spec.query))
        .collect::<Vec<_>>()
        .join("\n")
}

/// File name of the queries file used on `date`, e.g. `monday-queries.md`
pub fn queries_file_name(date: NaiveDate) -> String {
    format!("{}-queries.md", date.format("%A").to_string().to_lowercase())
}
