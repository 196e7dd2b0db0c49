pub mod etl;
pub mod export;
pub mod geo;
pub mod pipeline;
pub mod search;
pub mod tokenizer;
pub mod transformer;

pub use crate::domain::model::{CsvRow, MapBounds, Organization, OutputFormat, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
