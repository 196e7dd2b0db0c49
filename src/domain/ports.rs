use crate::domain::model::{OutputFormat, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 明確傳入的設定值，取代全域常數
pub trait ConfigProvider: Send + Sync {
    fn source_location(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
    fn user_agent(&self) -> Option<&str>;
    fn output_path(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
    fn search_query(&self) -> Option<&str>;
    fn selected_name(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<String>;
    async fn transform(&self, raw_csv: String) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
