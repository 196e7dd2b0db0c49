pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, OutputFormat};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_range, validate_source_location, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE: &str = "organizations.csv";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ocean-directory")]
#[command(about = "Load, validate and browse the ocean research organization directory")]
pub struct CliConfig {
    /// CSV source: a published spreadsheet URL or a local file under --base-dir
    #[arg(long, env = "CSV_URL", default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Base directory for local CSV assets and output files
    #[arg(long, default_value = ".")]
    pub base_dir: String,

    /// Write the rendered directory to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only show organizations matching this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Show a single organization by exact name
    #[arg(long)]
    pub select: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_location(&self) -> &str {
        &self.source
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn search_query(&self) -> Option<&str> {
        self.search.as_deref()
    }

    fn selected_name(&self) -> Option<&str> {
        self.select.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_source_location("source", &self.source)?;
        validate_path("base_dir", &self.base_dir)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        Ok(())
    }
}
