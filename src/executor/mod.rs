//! @acp:module "Query Executor"
//! @acp:summary "Runs the external query engine and cleans its output"
//! @acp:domain cli
//! @acp:layer service
//!
//! The engine is an opaque subprocess. One query runs at a time; a query
//! that fails or times out yields an empty answer and the run carries on.

use std::future::Future;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;

use console::style;
use indicatif::ProgressBar;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::{EngineConfig, QUERY_PLACEHOLDER};
use crate::error::{BriefingError, Result};

/// Reasoning blocks emitted by reasoning models
static THINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<think>.*?</think>").unwrap());

/// Something that can answer a query with raw text
pub trait QueryEngine {
    /// Run `query` and return the engine's raw output
    fn query(&self, query: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Query engine backed by a command-line program
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone(), config.timeout())
    }

    /// Argument list with the query substituted into the template
    pub fn args_for(&self, query: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(QUERY_PLACEHOLDER, query))
            .collect()
    }
}

impl QueryEngine for CommandEngine {
    async fn query(&self, query: &str) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args_for(query))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| BriefingError::EngineSpawn {
            program: self.program.clone(),
            source: e,
        })?;

        // Dropping the wait future on timeout drops the child, which kills it
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| BriefingError::QueryTimeout(self.timeout.as_secs()))??;

        if !output.status.success() {
            warn!(
                program = %self.program,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "query engine exited unsuccessfully, using its output anyway"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Strip reasoning blocks and progress noise from engine output
pub fn clean_output(raw: &str, noise_prefixes: &[String]) -> String {
    let without_thinking = THINK_PATTERN.replace_all(raw, "");
    without_thinking
        .split('\n')
        .filter(|line| !noise_prefixes.iter().any(|p| line.starts_with(p.as_str())))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Run one section's query, isolating failures.
///
/// Errors are reported on stderr and turned into an empty answer. The
/// report is printed with `progress` suspended so it does not tear the
/// spinner line.
pub async fn run_query<E: QueryEngine>(
    engine: &E,
    section: &str,
    query: &str,
    noise_prefixes: &[String],
    progress: &ProgressBar,
) -> String {
    match engine.query(query).await {
        Ok(raw) => {
            let cleaned = clean_output(&raw, noise_prefixes);
            debug!(section, raw_len = raw.len(), cleaned_len = cleaned.len(), "query finished");
            cleaned
        }
        Err(e) => {
            progress.suspend(|| {
                eprintln!("{} Error running query for {}: {}", style("✗").red(), section, e)
            });
            String::new()
        }
    }
}
