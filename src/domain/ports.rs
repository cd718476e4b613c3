use crate::domain::model::{LedgerRow, ValidationReport};
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

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<LedgerRow>>;
    async fn transform(&self, rows: Vec<LedgerRow>) -> Result<ValidationReport>;
    /// Writes the workbook for `report` and returns where it was stored.
    async fn load(&self, report: &ValidationReport) -> Result<String>;
}
