use crate::adapters::xlsx::{COLUMNS, XLSX_MIME};
use crate::core::rules::format_brl;
use crate::domain::model::CreditorComparison;
use crate::web::handlers::ValidationOutcome;
use askama::Template;
use base64::{engine::general_purpose::STANDARD, Engine};

#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    pub error: String,
}

impl UploadTemplate {
    pub fn new() -> Self {
        Self {
            error: String::new(),
        }
    }

    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl Default for UploadTemplate {
    fn default() -> Self {
        Self::new()
    }
}

/// One table line, amounts already formatted as `R$ 1.234,56`.
pub struct ComparisonRow {
    pub mask: String,
    pub creditor: String,
    pub group7: String,
    pub group8: String,
    pub difference: String,
    pub status: &'static str,
}

impl From<&CreditorComparison> for ComparisonRow {
    fn from(comparison: &CreditorComparison) -> Self {
        Self {
            mask: comparison.mask.clone(),
            creditor: comparison.creditor.clone(),
            group7: format_brl(comparison.group7),
            group8: format_brl(comparison.group8),
            difference: format_brl(comparison.difference),
            status: comparison.status.label(),
        }
    }
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub rows_read: usize,
    pub total: usize,
    pub columns: [&'static str; 6],
    pub divergent: Vec<ComparisonRow>,
    pub correct: Vec<ComparisonRow>,
    pub file_name: String,
    pub mime: &'static str,
    pub workbook_base64: String,
}

impl From<&ValidationOutcome> for ResultTemplate {
    fn from(outcome: &ValidationOutcome) -> Self {
        let report = &outcome.report;
        let rows = |list: Vec<&CreditorComparison>| -> Vec<ComparisonRow> {
            list.into_iter().map(ComparisonRow::from).collect()
        };

        Self {
            rows_read: report.stats.rows_read,
            total: report.comparisons.len(),
            columns: COLUMNS,
            divergent: rows(report.divergent()),
            correct: rows(report.correct()),
            file_name: outcome.file_name.clone(),
            mime: XLSX_MIME,
            workbook_base64: STANDARD.encode(&outcome.workbook),
        }
    }
}
