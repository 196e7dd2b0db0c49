use crate::core::export::render;
use crate::core::geo::calculate_bounds;
use crate::core::search::{filter_organizations, find_by_name};
use crate::core::tokenizer::{parse_csv, split_rows};
use crate::core::transformer::transform_rows;
use crate::core::{ConfigProvider, Organization, Pipeline, Storage, TransformResult};
use crate::utils::error::{DirectoryError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

const BODY_PREVIEW_CHARS: usize = 200;

/// CSV 來源：遠端試算表匯出 URL 或本地靜態檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Remote(Url),
    Asset(String),
}

impl SourceLocation {
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => SourceLocation::Remote(url),
            _ => SourceLocation::Asset(location.to_string()),
        }
    }
}

/// 一次載入週期：抓取 -> 解析 -> 轉換 -> 交給顯示端
pub struct DirectoryPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> DirectoryPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let mut builder =
            Client::builder().timeout(Duration::from_secs(config.request_timeout_seconds()));
        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent.to_string());
        }

        Ok(Self {
            storage,
            config,
            client: builder.build()?,
        })
    }

    async fn fetch_remote(&self, url: &Url) -> Result<String> {
        tracing::debug!("Fetching CSV from: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("CSV source response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(no body)".to_string());
            return Err(DirectoryError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
                body_preview: body.chars().take(BODY_PREVIEW_CHARS).collect(),
            });
        }

        Ok(response.text().await?)
    }

    async fn read_asset(&self, path: &str) -> Result<String> {
        tracing::debug!("Reading CSV asset: {}", path);
        let bytes = self.storage.read_file(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn visible_organizations<'a>(&self, organizations: &'a [Organization]) -> Vec<&'a Organization> {
        if let Some(name) = self.config.selected_name() {
            return match find_by_name(organizations, name) {
                Some(org) => vec![org],
                None => {
                    tracing::warn!("No organization named '{}' in the directory", name);
                    Vec::new()
                }
            };
        }

        filter_organizations(organizations, self.config.search_query().unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DirectoryPipeline<S, C> {
    async fn extract(&self) -> Result<String> {
        let text = match SourceLocation::parse(self.config.source_location()) {
            SourceLocation::Remote(url) => self.fetch_remote(&url).await?,
            SourceLocation::Asset(path) => self.read_asset(&path).await?,
        };

        tracing::debug!("Content length: {} chars", text.chars().count());
        Ok(text)
    }

    async fn transform(&self, raw_csv: String) -> Result<TransformResult> {
        let rows = parse_csv(&raw_csv);
        if rows.is_empty() {
            return Err(DirectoryError::EmptyDocument {
                non_blank_lines: split_rows(&raw_csv).len(),
            });
        }

        let organizations = transform_rows(&rows);
        let rows_parsed = rows.len();
        if organizations.is_empty() {
            return Err(DirectoryError::NoValidOrganizations { rows_parsed });
        }

        let rows_rejected = rows_parsed - organizations.len();
        if rows_rejected > 0 {
            tracing::debug!("Skipped {} incomplete rows", rows_rejected);
        }

        Ok(TransformResult {
            bounds: calculate_bounds(&organizations),
            organizations,
            rows_parsed,
            rows_rejected,
            loaded_at: chrono::Utc::now(),
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let visible = self.visible_organizations(&result.organizations);
        tracing::debug!(
            "Rendering {} of {} organizations as {:?}",
            visible.len(),
            result.organizations.len(),
            self.config.output_format()
        );

        let rendered = render(&visible, self.config.output_format())?;

        match self.config.output_path() {
            Some(path) => {
                self.storage.write_file(path, rendered.as_bytes()).await?;
                tracing::debug!("Directory written ({} bytes)", rendered.len());
                Ok(path.to_string())
            }
            None => {
                print!("{}", rendered);
                Ok("stdout".to_string())
            }
        }
    }
}
