use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

/// Application error carrying an HTTP status, a machine-readable error code
/// and the underlying cause. Rendered as `{"error": code, "message": text}`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub error: Error,
}

/// Response body shape for errors, used for API documentation only.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn new<E>(status: StatusCode, code: &'static str, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            code,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, "not_found", err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, "validation_error", err)
    }

    /// Uniqueness conflict on an identity-bearing resource (user register).
    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, "conflict", err)
    }

    /// Integrity violation reported as a 400, matching the store/tag
    /// uniqueness contract.
    pub fn integrity<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, "conflict", err)
    }

    /// 401 with a caller-supplied code from the auth taxonomy:
    /// `authorization_required`, `invalid_token`, `token_expired`,
    /// `token_revoked`, `fresh_token_required`, `invalid_credentials`,
    /// `admin_required`.
    pub fn unauthorized<E>(code: &'static str, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, code, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            // Log the full chain server-side, keep the client message generic.
            error!(code = self.code, error = format!("{:#}", self.error), "request failed");
            "An unexpected error occurred".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "error": self.code,
            "message": message,
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_map_to_expected_status_and_code() {
        let err = AppError::not_found(anyhow::anyhow!("Store not found"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "not_found");

        let err = AppError::conflict(anyhow::anyhow!("exists"));
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, "conflict");

        let err = AppError::integrity(anyhow::anyhow!("exists"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "conflict");

        let err = AppError::unauthorized("token_revoked", anyhow::anyhow!("revoked"));
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.code, "token_revoked");
    }

    #[test]
    fn unclassified_errors_become_internal() {
        let err: AppError = anyhow::anyhow!("unexpected").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "internal_error");
    }
}
