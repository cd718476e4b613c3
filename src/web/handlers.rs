use crate::adapters::xlsx::XLSX_MIME;
use crate::adapters::MemoryStorage;
use crate::core::engine::ValidationEngine;
use crate::core::pipeline::ValidationPipeline;
use crate::domain::model::ValidationReport;
use crate::utils::error::{Result, ValidatorError};
use crate::web::error::{status_for, ApiError};
use crate::web::pages::{ResultTemplate, UploadTemplate};
use crate::web::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

const UPLOAD_KEY: &str = "upload.csv";

/// CSV received from the upload form.
struct Upload {
    file_name: String,
    data: Vec<u8>,
}

/// Validated upload plus the workbook generated for it.
pub struct ValidationOutcome {
    pub report: ValidationReport,
    pub workbook: Vec<u8>,
    pub file_name: String,
}

pub async fn index() -> impl IntoResponse {
    UploadTemplate::new()
}

pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn validate_page(State(state): State<AppState>, multipart: Multipart) -> Response {
    match process_upload(&state, multipart).await {
        Ok(outcome) => ResultTemplate::from(&outcome).into_response(),
        Err(e) => {
            tracing::warn!("Validation failed: {}", e);
            let message = format!("{} {}", e.user_friendly_message(), e.recovery_suggestion());
            (status_for(&e), UploadTemplate::with_error(message)).into_response()
        }
    }
}

pub async fn validate_workbook(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Response, ApiError> {
    let outcome = process_upload(&state, multipart).await?;
    let disposition = format!("attachment; filename=\"{}\"", outcome.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        outcome.workbook,
    )
        .into_response())
}

pub async fn validate_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Json<ValidationReport>, ApiError> {
    let outcome = process_upload(&state, multipart).await?;
    Ok(Json(outcome.report))
}

async fn process_upload(state: &AppState, multipart: Multipart) -> Result<ValidationOutcome> {
    let upload = read_upload(multipart).await?;
    tracing::info!(
        file_name = %upload.file_name,
        bytes = upload.data.len(),
        "Received upload"
    );

    run_validation(state, upload.data).await
}

/// Runs the pipeline over an in-memory upload. Nothing touches the disk.
pub async fn run_validation(state: &AppState, data: Vec<u8>) -> Result<ValidationOutcome> {
    let file_name = state.config.output.file_name.clone();
    let storage = MemoryStorage::with_file(UPLOAD_KEY, data);
    let pipeline = ValidationPipeline::new(storage, UPLOAD_KEY, file_name.clone())
        .with_rules(state.config.rules.clone());
    let engine = ValidationEngine::new(pipeline);

    let output = engine.run().await?;
    let workbook = engine
        .pipeline()
        .storage()
        .take(&output.output_path)
        .ok_or_else(|| ValidatorError::NotFound {
            path: output.output_path.clone(),
        })?;

    Ok(ValidationOutcome {
        report: output.report,
        workbook,
        file_name,
    })
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Falha ao ler o envio", e))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or(UPLOAD_KEY).to_string();
        if !is_csv_name(&file_name) {
            return Err(ValidatorError::UploadError {
                message: format!("\"{}\" não é um arquivo .csv.", file_name),
            });
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&format!("Falha ao ler o arquivo {}", file_name), e))?;

        return Ok(Upload {
            file_name,
            data: data.to_vec(),
        });
    }

    Err(ValidatorError::UploadError {
        message: "Nenhum arquivo foi enviado.".to_string(),
    })
}

fn multipart_error(context: &str, e: MultipartError) -> ValidatorError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidatorError::UploadTooLarge
    } else {
        ValidatorError::UploadError {
            message: format!("{}: {}", context, e.body_text()),
        }
    }
}

fn is_csv_name(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
