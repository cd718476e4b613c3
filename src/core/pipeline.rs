use crate::adapters::xlsx::export_report;
use crate::core::{reader, reconcile::reconcile, rules::classify};
use crate::domain::model::{LedgerRow, ValidationReport, ValidationRules};
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::Result;

/// CSV in, workbook out, both through the given storage.
pub struct ValidationPipeline<S: Storage> {
    storage: S,
    input: String,
    output: String,
    rules: ValidationRules,
}

impl<S: Storage> ValidationPipeline<S> {
    pub fn new(storage: S, input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            storage,
            input: input.into(),
            output: output.into(),
            rules: ValidationRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ValidationPipeline<S> {
    async fn extract(&self) -> Result<Vec<LedgerRow>> {
        tracing::debug!("Reading input: {}", self.input);
        let bytes = self.storage.read_file(&self.input).await?;
        tracing::debug!("Input size: {} bytes", bytes.len());

        reader::read_rows(&bytes, self.rules.delimiter)
    }

    async fn transform(&self, rows: Vec<LedgerRow>) -> Result<ValidationReport> {
        let (entries, stats) = classify(&rows, &self.rules);
        let comparisons = reconcile(&entries, self.rules.tolerance);

        Ok(ValidationReport::new(comparisons, stats))
    }

    async fn load(&self, report: &ValidationReport) -> Result<String> {
        let workbook = export_report(report)?;

        tracing::debug!("Writing workbook ({} bytes) to {}", workbook.len(), self.output);
        self.storage.write_file(&self.output, &workbook).await?;

        Ok(self.output.clone())
    }
}
