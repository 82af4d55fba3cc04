//! @acp:module "Configuration"
//! @acp:summary "Briefing configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::BriefingError;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".briefing.config.json";

/// Placeholder in `engine.args` replaced by the query text
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// @acp:summary "Main briefing configuration structure"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// External query engine invocation
    #[serde(default)]
    pub engine: EngineConfig,

    /// Directory holding the `<weekday>-queries.md` files
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: PathBuf,

    /// Directory the briefing notes are written to
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,

    /// Frontmatter and naming of the written note
    #[serde(default)]
    pub note: NoteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            prompts_dir: default_prompts_dir(),
            archive_dir: default_archive_dir(),
            note: NoteConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load config from a file, or defaults when it does not exist"
    ///
    /// An existing file that fails to read, parse or validate is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject settings no run could succeed with
    pub fn validate(&self) -> crate::Result<()> {
        if self.engine.program.trim().is_empty() {
            return Err(BriefingError::Config("engine.program must not be empty".into()));
        }
        if self.engine.timeout_secs == 0 {
            return Err(BriefingError::Config("engine.timeout_secs must be at least 1".into()));
        }
        if !self.engine.args.iter().any(|a| a.contains(QUERY_PLACEHOLDER)) {
            return Err(BriefingError::Config(format!(
                "engine.args must contain the {} placeholder",
                QUERY_PLACEHOLDER
            )));
        }
        if self.note.weather_keyword.trim().is_empty() {
            return Err(BriefingError::Config("note.weather_keyword must not be empty".into()));
        }
        Ok(())
    }
}

fn default_prompts_dir() -> PathBuf {
    PathBuf::from("prompts")
}

fn default_archive_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("Obsidian").join("daily-briefings"))
        .unwrap_or_else(|| PathBuf::from("daily-briefings"))
}

/// @acp:summary "External query engine settings"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Binary to invoke for each query
    #[serde(default = "default_program")]
    pub program: String,

    /// Argument template, `{query}` is substituted per call
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Per-query timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output lines starting with any of these are progress noise
    #[serde(default = "default_noise_prefixes")]
    pub noise_prefixes: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            timeout_secs: default_timeout_secs(),
            noise_prefixes: default_noise_prefixes(),
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_program() -> String {
    "pp".to_string()
}

fn default_args() -> Vec<String> {
    vec![
        "--no-interactive".to_string(),
        QUERY_PLACEHOLDER.to_string(),
        "--output".to_string(),
        "markdown".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_noise_prefixes() -> Vec<String> {
    vec![
        "- ".to_string(),
        "Searching".to_string(),
        "Thinking".to_string(),
    ]
}

/// @acp:summary "Frontmatter and file naming of the briefing note"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteConfig {
    /// Title prefix, followed by the human-readable date
    #[serde(default = "default_title")]
    pub title: String,

    /// Value of the `query` frontmatter field
    #[serde(default = "default_title")]
    pub query_label: String,

    /// Frontmatter tags
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,

    /// File name suffix after the ISO date
    #[serde(default = "default_filename_suffix")]
    pub filename_suffix: String,

    /// Sections whose name contains this (case-insensitive) render as the weather line
    #[serde(default = "default_weather_keyword")]
    pub weather_keyword: String,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            query_label: default_title(),
            tags: default_tags(),
            filename_suffix: default_filename_suffix(),
            weather_keyword: default_weather_keyword(),
        }
    }
}

fn default_title() -> String {
    "Morning Briefing".to_string()
}

fn default_tags() -> Vec<String> {
    vec![
        "briefing".to_string(),
        "daily".to_string(),
        "perplexity".to_string(),
    ]
}

fn default_filename_suffix() -> String {
    "news-briefing".to_string()
}

fn default_weather_keyword() -> String {
    "weather".to_string()
}
