//! @acp:module "Generate Command"
//! @acp:summary "Run every query and write the daily briefing note"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `briefing generate`, the default command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::briefing::assemble;
use crate::citations::extract_citations;
use crate::config::Config;
use crate::executor::{run_query, CommandEngine, QueryEngine};
use crate::queries::{load_queries, queries_file_name};

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Queries file, instead of `<prompts_dir>/<weekday>-queries.md`
    pub queries: Option<PathBuf>,
    /// Archive directory override
    pub archive_dir: Option<PathBuf>,
    /// Per-query timeout override in seconds
    pub timeout: Option<u64>,
    /// Briefing date, defaults to today (local time)
    pub date: Option<NaiveDate>,
}

impl GenerateOptions {
    /// Briefing date for this run
    pub fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Queries file for this run
    pub fn queries_path(&self, config: &Config) -> PathBuf {
        self.queries
            .clone()
            .unwrap_or_else(|| config.prompts_dir.join(queries_file_name(self.date())))
    }
}

/// Execute the generate command against the configured engine
pub async fn execute_generate(options: GenerateOptions, mut config: Config) -> Result<PathBuf> {
    if let Some(secs) = options.timeout {
        config.engine.timeout_secs = secs;
    }
    let engine = CommandEngine::from_config(&config.engine);
    generate_with(&engine, options, config).await
}

/// Generate a briefing using any query engine.
///
/// Fails before querying anything when the queries file is missing. Failed
/// queries only drop their section.
pub async fn generate_with<E: QueryEngine>(
    engine: &E,
    options: GenerateOptions,
    config: Config,
) -> Result<PathBuf> {
    let date = options.date();
    let queries_path = options.queries_path(&config);
    let specs = load_queries(&queries_path)?;

    println!(
        "{} Generating briefing for {}...",
        style("→").cyan(),
        date.format("%A, %B %d, %Y")
    );

    let progress = ProgressBar::new(specs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {msg}")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]),
    );
    progress.enable_steady_tick(Duration::from_millis(80));

    let mut results = Vec::with_capacity(specs.len());
    for spec in &specs {
        progress.set_message(format!("Querying: {}...", spec.section));
        let answer = run_query(
            engine,
            &spec.section,
            &spec.query,
            &config.engine.noise_prefixes,
            &progress,
        )
        .await;
        info!(section = %spec.section, answered = !answer.is_empty(), "section queried");
        results.push((spec.section.clone(), extract_citations(&answer)));
        progress.inc(1);
    }
    progress.finish_and_clear();

    let answered = results.iter().filter(|(_, r)| !r.is_empty()).count();
    println!(
        "{} Combining sections... ({} of {} answered)",
        style("→").cyan(),
        answered,
        specs.len()
    );

    let briefing = assemble(results, &config.note, date, Utc::now());
    let archive_dir = options.archive_dir.unwrap_or(config.archive_dir);
    let path = briefing.write_to(&archive_dir, &config.note.filename_suffix)?;

    println!("{} Briefing saved to: {}", style("✓").green(), path.display());
    Ok(path)
}
