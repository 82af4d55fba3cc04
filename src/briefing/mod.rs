//! @acp:module "Briefing"
//! @acp:summary "Assembles section answers into the daily briefing note"
//! @acp:domain cli
//! @acp:layer output
//!
//! Section order in the note:
//! 1. the first weather section, flattened to a single line under the title
//! 2. every other section in queries file order, as `## <name>` blocks
//! 3. the deduplicated `## References` list
//!
//! Citations are renumbered in that same order so numbers ascend down the
//! page.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::citations::{renumber, CitationRegistry, QueryResult};
use crate::config::NoteConfig;
use crate::error::Result;

/// A rendered section body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingSection {
    pub name: String,
    pub content: String,
}

/// The assembled note, ready to render
#[derive(Debug, Clone)]
pub struct Briefing {
    pub created: DateTime<Utc>,
    pub date: NaiveDate,
    pub title: String,
    pub query_label: String,
    pub tags: Vec<String>,
    pub weather: Option<String>,
    pub sections: Vec<BriefingSection>,
    pub references: CitationRegistry,
}

/// Whether a section name selects the compact weather line
pub fn is_weather(name: &str, keyword: &str) -> bool {
    name.to_lowercase().contains(&keyword.to_lowercase())
}

/// Flatten content to one line
pub fn compact(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the briefing from per-section results in queries file order.
///
/// Empty results (failed queries) are left out. Only the first weather
/// section is kept.
pub fn assemble(
    results: Vec<(String, QueryResult)>,
    note: &NoteConfig,
    date: NaiveDate,
    created: DateTime<Utc>,
) -> Briefing {
    let mut weather: Option<QueryResult> = None;
    let mut regular = Vec::new();

    for (name, result) in results {
        if result.is_empty() {
            debug!(section = %name, "skipping empty section");
            continue;
        }
        if is_weather(&name, &note.weather_keyword) {
            if weather.is_some() {
                warn!(section = %name, "additional weather section dropped");
                continue;
            }
            weather = Some(result);
        } else {
            regular.push((name, result));
        }
    }

    let mut registry = CitationRegistry::new();

    let weather = match weather {
        Some(result) => {
            let (next, content) = renumber(registry, &result);
            registry = next;
            Some(compact(&content))
        }
        None => None,
    };

    let mut sections = Vec::with_capacity(regular.len());
    for (name, result) in regular {
        let (next, content) = renumber(registry, &result);
        registry = next;
        sections.push(BriefingSection { name, content });
    }

    Briefing {
        created,
        date,
        title: note.title.clone(),
        query_label: note.query_label.clone(),
        tags: note.tags.clone(),
        weather,
        sections,
        references: registry,
    }
}

/// `<archive_dir>/<YYYY-MM-DD>-<suffix>.md`
pub fn output_path(archive_dir: &Path, date: NaiveDate, suffix: &str) -> PathBuf {
    archive_dir.join(format!("{}-{}.md", date.format("%Y-%m-%d"), suffix))
}

impl Briefing {
    /// Human-readable date used in the title, e.g. `Monday, October 19, 2026`
    pub fn display_date(&self) -> String {
        self.date.format("%A, %B %d, %Y").to_string()
    }

    /// Render the full markdown note
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("---\n");
        out.push_str(&format!("created: {}\n", self.created.format("%Y-%m-%dT%H:%M:%SZ")));
        out.push_str(&format!("query: \"{}\"\n", self.query_label));
        out.push_str(&format!("tags: [{}]\n", self.tags.join(", ")));
        out.push_str("---\n\n");

        out.push_str(&format!("# {} - {}\n\n", self.title, self.display_date()));

        if let Some(ref weather) = self.weather {
            out.push_str(&format!("**Weather:** {}\n\n", weather));
        }

        for section in &self.sections {
            out.push_str(&format!("## {}\n\n{}\n\n", section.name, section.content));
        }

        if !self.references.is_empty() {
            out.push_str("## References\n\n");
            for (index, citation) in self.references.numbered() {
                out.push_str(&format!("{}. [{}]({})\n", index, citation.label, citation.url));
            }
        }

        format!("{}\n", out.trim_end())
    }

    /// Write the note into `archive_dir`, replacing any note for the same date
    pub fn write_to(&self, archive_dir: &Path, suffix: &str) -> Result<PathBuf> {
        let path = output_path(archive_dir, self.date, suffix);
        std::fs::create_dir_all(archive_dir)?;
        std::fs::write(&path, self.render())?;
        info!(
            path = %path.display(),
            sections = self.sections.len(),
            references = self.references.len(),
            "briefing written"
        );
        Ok(path)
    }
}
