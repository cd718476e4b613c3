use crate::domain::model::ValidationReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

/// Result of a full run: the report plus where the workbook was written.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub report: ValidationReport,
    pub output_path: String,
}

pub struct ValidationEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ValidationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<EngineOutput> {
        let started = Instant::now();

        // Extract
        let rows = self.pipeline.extract().await?;
        tracing::info!("Read {} rows", rows.len());

        // Transform
        let report = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Compared {} creditors: {} correct, {} divergent",
            report.comparisons.len(),
            report.correct_count(),
            report.divergent_count()
        );

        // Load
        let output_path = self.pipeline.load(&report).await?;
        tracing::info!("Workbook ready: {} ({:?})", output_path, started.elapsed());

        Ok(EngineOutput {
            report,
            output_path,
        })
    }
}
