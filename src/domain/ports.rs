use crate::domain::model::CvRecord;
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

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    /// Explicitly configured key; environment lookup happens in the client.
    fn api_key(&self) -> Option<&str> {
        None
    }
    fn timeout_seconds(&self) -> Option<u64> {
        None
    }
}

/// Turns raw résumé text into a [`CvRecord`].
#[async_trait]
pub trait Structurer: Send + Sync {
    async fn structure(&self, raw_text: &str) -> Result<CvRecord>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<String>;
    async fn transform(&self, raw_text: String) -> Result<CvRecord>;
    async fn load(&self, record: &CvRecord) -> Result<String>;
}
