pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    etl::EtlEngine,
    pipeline::{DirectoryPipeline, SourceLocation},
    tokenizer::parse_csv,
    transformer::transform_rows,
};
pub use domain::model::{CsvRow, MapBounds, Organization, OutputFormat, TransformResult};
pub use utils::error::{DirectoryError, Result};
