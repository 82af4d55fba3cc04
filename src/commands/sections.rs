//! @acp:module "Sections Command"
//! @acp:summary "List the sections a briefing run would query"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::GenerateOptions;
use crate::briefing::is_weather;
use crate::config::Config;
use crate::queries::{load_queries, QuerySpec};

/// Execute the sections command (dry run, the engine is never called)
pub fn execute_sections(options: GenerateOptions, config: Config) -> Result<Vec<QuerySpec>> {
    let path = options.queries_path(&config);
    let specs = load_queries(&path)?;

    println!("{} {}", style("Queries:").bold(), path.display());
    for (i, spec) in specs.iter().enumerate() {
        let kind = if is_weather(&spec.section, &config.note.weather_keyword) {
            style(" (weather line)").dim().to_string()
        } else {
            String::new()
        };
        println!("{:>3}. {}{}", i + 1, style(&spec.section).cyan(), kind);
        for line in spec.query.lines() {
            println!("     {}", line);
        }
    }
    println!("  Sections: {}", specs.len());

    Ok(specs)
}
