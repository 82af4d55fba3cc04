//! End-to-end briefing tests
//!
//! Drives the generate pipeline with a scripted query engine so no external
//! process is needed.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tempfile::TempDir;

use briefing::commands::{execute_sections, generate_with, GenerateOptions};
use briefing::config::Config;
use briefing::{BriefingError, QueryEngine};

static MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(\d+)\]").unwrap());
static LINKED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]\((\S+?)\)").unwrap());

/// Answers known queries, fails everything else
struct ScriptedEngine {
    answers: HashMap<String, String>,
}

impl ScriptedEngine {
    fn new(answers: &[(&str, &str)]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(q, a)| (q.to_string(), a.to_string()))
                .collect(),
        }
    }
}

impl QueryEngine for ScriptedEngine {
    async fn query(&self, query: &str) -> briefing::Result<String> {
        self.answers
            .get(query)
            .cloned()
            .ok_or(BriefingError::QueryTimeout(60))
    }
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

struct Fixture {
    temp: TempDir,
    config: Config,
    archive: std::path::PathBuf,
}

fn fixture(queries: &str) -> Fixture {
    let temp = TempDir::new().unwrap();
    let prompts = temp.path().join("prompts");
    std::fs::create_dir_all(&prompts).unwrap();
    std::fs::write(prompts.join("monday-queries.md"), queries).unwrap();

    let archive = temp.path().join("vault").join("daily-briefings");
    let config = Config {
        prompts_dir: prompts,
        archive_dir: archive.clone(),
        ..Config::default()
    };
    Fixture { temp, config, archive }
}

fn options() -> GenerateOptions {
    GenerateOptions {
        date: Some(monday()),
        ..Default::default()
    }
}

const QUERIES: &str = "\
SECTION: Tech
tech query

SECTION: Weather Update
weather query

SECTION: Markets
markets query

SECTION: Sports
sports query
";

// =============================================================================
// Generate pipeline
// =============================================================================

mod generate_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_generate_writes_deduplicated_briefing() {
        let fx = fixture(QUERIES);
        let engine = ScriptedEngine::new(&[
            (
                "tech query",
                "Searching...\nChip news [1] and AI [2].\n\n## Sources\n1. [x.com](http://x.com)\n2. [ai.dev](http://ai.dev)",
            ),
            (
                "weather query",
                "Cloudy, 12C [1].\nRain later.\n## Sources\n1. [wx](http://weather.example)",
            ),
            (
                "markets query",
                "Stocks up [2], bonds flat [1].\n## Sources\n1. [x.com again](http://x.com)\n2. [ft](http://ft.com)",
            ),
        ]);

        let path = generate_with(&engine, options(), fx.config.clone()).await.unwrap();
        assert_eq!(path, fx.archive.join("2026-10-19-news-briefing.md"));

        let note = std::fs::read_to_string(&path).unwrap();
        let body = note.split("---\n\n").nth(1).unwrap();
        let expected = "\
# Morning Briefing - Monday, October 19, 2026

**Weather:** Cloudy, 12C [1]. Rain later.

## Tech

Chip news [2] and AI [3].

## Markets

Stocks up [4], bonds flat [2].

## References

1. [wx](http://weather.example)
2. [x.com](http://x.com)
3. [ai.dev](http://ai.dev)
4. [ft](http://ft.com)
";
        assert_eq!(body, expected);
        assert!(note.starts_with("---\ncreated: "));
        assert!(note.contains("query: \"Morning Briefing\"\ntags: [briefing, daily, perplexity]\n"));
        assert!(!note.contains("## Sports"));
        assert!(!note.contains("## Weather Update"));
    }

    #[tokio::test]
    async fn test_missing_queries_file_writes_nothing() {
        let fx = fixture(QUERIES);
        let engine = ScriptedEngine::new(&[]);
        let opts = GenerateOptions {
            date: NaiveDate::from_ymd_opt(2026, 10, 20),
            ..Default::default()
        };

        let err = generate_with(&engine, opts, fx.config.clone()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BriefingError>(),
            Some(BriefingError::QueriesNotFound(_))
        ));
        assert!(!fx.archive.exists());
    }

    #[tokio::test]
    async fn test_all_queries_failing_still_writes_note() {
        let fx = fixture(QUERIES);
        let engine = ScriptedEngine::new(&[]);

        let path = generate_with(&engine, options(), fx.config.clone()).await.unwrap();
        let note = std::fs::read_to_string(path).unwrap();
        assert!(note.trim_end().ends_with("# Morning Briefing - Monday, October 19, 2026"));
    }

    #[tokio::test]
    async fn test_overrides_take_precedence() {
        let fx = fixture("");
        let custom = fx.temp.path().join("custom.md");
        std::fs::write(&custom, "SECTION: Tech\ntech query\n").unwrap();
        let elsewhere = fx.temp.path().join("elsewhere");

        let engine = ScriptedEngine::new(&[("tech query", "Answer")]);
        let opts = GenerateOptions {
            queries: Some(custom),
            archive_dir: Some(elsewhere.clone()),
            date: Some(monday()),
            ..Default::default()
        };

        let path = generate_with(&engine, opts, fx.config.clone()).await.unwrap();
        assert_eq!(path, elsewhere.join("2026-10-19-news-briefing.md"));
        assert!(std::fs::read_to_string(path).unwrap().contains("## Tech\n\nAnswer\n"));
    }
}

// =============================================================================
// Citation invariants across many sections
// =============================================================================

mod invariant_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_references_unique_and_markers_valid() {
        let mut queries = String::new();
        let mut answers = Vec::new();
        for i in 0..6 {
            queries.push_str(&format!("SECTION: Topic {}\nquery {}\n", i, i));
            let answer = format!(
                "Point [1], point [2](http://unique/{}), stray [9].\n## Sources\n1. [s{}](http://shared/{})\n2. [u{}](http://unique/{})",
                i,
                i,
                i % 2,
                i,
                i
            );
            answers.push((format!("query {}", i), answer));
        }
        let fx = fixture(&queries);
        let refs: Vec<(&str, &str)> = answers.iter().map(|(q, a)| (q.as_str(), a.as_str())).collect();
        let engine = ScriptedEngine::new(&refs);

        let path = generate_with(&engine, options(), fx.config.clone()).await.unwrap();
        let note = std::fs::read_to_string(path).unwrap();
        let (body, references) = note.split_once("## References\n\n").unwrap();

        let urls: Vec<&str> = references
            .lines()
            .filter_map(|l| l.split_once("](").map(|(_, u)| u.trim_end_matches(')')))
            .collect();
        let unique: HashSet<&str> = urls.iter().copied().collect();
        assert_eq!(urls.len(), unique.len());
        assert_eq!(urls.len(), 2 + 6);

        for caps in MARKER.captures_iter(body) {
            let n: usize = caps[1].parse().unwrap();
            assert!(n == 9 || (1..=urls.len()).contains(&n), "dangling marker [{}]", n);
        }

        let linked: Vec<_> = LINKED_MARKER.captures_iter(body).collect();
        assert_eq!(linked.len(), 6);
        for caps in linked {
            let n: usize = caps[1].parse().unwrap();
            assert_eq!(urls[n - 1], &caps[2]);
        }
    }
}

// =============================================================================
// Sections dry run
// =============================================================================

mod sections_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sections_lists_parsed_queries() {
        let fx = fixture(QUERIES);
        let specs = execute_sections(options(), fx.config.clone()).unwrap();
        let names: Vec<&str> = specs.iter().map(|s| s.section.as_str()).collect();
        assert_eq!(names, vec!["Tech", "Weather Update", "Markets", "Sports"]);
        assert!(!fx.archive.exists());
    }
}
