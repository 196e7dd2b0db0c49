use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 執行一次完整載入週期，任何階段失敗即中止
    pub async fn run(&self) -> Result<String> {
        tracing::info!("📥 Fetching organization directory...");
        let raw_csv = self.pipeline.extract().await?;
        tracing::info!("Fetched {} bytes of CSV", raw_csv.len());

        tracing::info!("🔄 Parsing and validating rows...");
        let result = self.pipeline.transform(raw_csv).await?;
        tracing::info!(
            "Kept {} organizations ({} rows parsed, {} skipped)",
            result.organizations.len(),
            result.rows_parsed,
            result.rows_rejected
        );
        if let Some(bounds) = &result.bounds {
            let (lng, lat) = bounds.center();
            tracing::debug!("Map bounds {:?}, center ({:.4}, {:.4})", bounds, lng, lat);
        }

        tracing::info!("📤 Handing off directory snapshot...");
        let output = self.pipeline.load(result).await?;
        tracing::info!("Output sent to: {}", output);

        Ok(output)
    }
}
