use crate::adapters::pdf::extract_first_page_text;
use crate::core::csv_output::{flatten, render_csv};
use crate::core::{ConfigProvider, CvRecord, Pipeline, Storage, Structurer};
use crate::utils::error::Result;

/// PDF résumé to single-row CSV.
pub struct CvPipeline<S: Storage, T: Structurer, C: ConfigProvider> {
    storage: S,
    structurer: T,
    config: C,
}

impl<S: Storage, T: Structurer, C: ConfigProvider> CvPipeline<S, T, C> {
    pub fn new(storage: S, structurer: T, config: C) -> Self {
        Self {
            storage,
            structurer,
            config,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, T: Structurer, C: ConfigProvider> Pipeline for CvPipeline<S, T, C> {
    async fn extract(&self) -> Result<String> {
        let path = self.config.input_path();
        tracing::debug!("Reading PDF from: {}", path);

        // 讀取完成即釋放檔案
        let pdf_bytes = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes", pdf_bytes.len());

        extract_first_page_text(&pdf_bytes)
    }

    async fn transform(&self, raw_text: String) -> Result<CvRecord> {
        tracing::debug!("Structuring {} bytes of page text", raw_text.len());
        self.structurer.structure(&raw_text).await
    }

    async fn load(&self, record: &CvRecord) -> Result<String> {
        let output_path = self.config.output_path();
        let csv_data = render_csv(&flatten(record))?;

        tracing::debug!("Writing CSV ({} bytes) to {}", csv_data.len(), output_path);
        self.storage.write_file(output_path, &csv_data).await?;

        Ok(output_path.to_string())
    }
}
