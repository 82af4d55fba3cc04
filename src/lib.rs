#![forbid(unsafe_code)]

//! @acp:module "Briefing Library"
//! @acp:summary "Daily briefing composition from search-engine queries"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability experimental
//!
//! # Daily Briefing
//!
//! Runs one query per section of a weekday queries file through an external
//! search engine and writes a single markdown note with one shared,
//! deduplicated reference list.
//!
//! ## Example
//!
//! ```rust,no_run
//! use briefing::commands::{execute_generate, GenerateOptions};
//! use briefing::config::DEFAULT_CONFIG_FILE;
//! use briefing::Config;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default(DEFAULT_CONFIG_FILE)?;
//!     let path = execute_generate(GenerateOptions::default(), config).await?;
//!     println!("{}", path.display());
//!     Ok(())
//! }
//! ```

pub mod briefing;
pub mod citations;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod queries;

// Re-exports
pub use briefing::{assemble, Briefing, BriefingSection};
pub use citations::{extract_citations, renumber, Citation, CitationRegistry, QueryResult};
pub use config::Config;
pub use error::{BriefingError, Result};
pub use executor::{clean_output, run_query, CommandEngine, QueryEngine};
pub use queries::{load_queries, parse_queries, QuerySpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
