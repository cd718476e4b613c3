use crate::utils::error::ValidatorError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// JSON error body for the `/api` routes.
#[derive(Debug)]
pub struct ApiError(pub ValidatorError);

impl From<ValidatorError> for ApiError {
    fn from(err: ValidatorError) -> Self {
        Self(err)
    }
}

pub(crate) fn status_for(err: &ValidatorError) -> StatusCode {
    if matches!(err, ValidatorError::UploadTooLarge) {
        StatusCode::PAYLOAD_TOO_LARGE
    } else if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Rejected upload: {}", self.0);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.0.user_friendly_message(),
                details: Some(self.0.recovery_suggestion().to_string()),
            }),
        )
            .into_response()
    }
}
