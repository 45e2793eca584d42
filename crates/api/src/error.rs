//! Error-to-response mapping.
//!
//! Every failure leaves the API as `{"error": "<snake_case code>", "message": "..."}`.
//! Server-side failures are logged and replaced by a generic message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use billbook_core::{entity::EntityError, invoicing::InvoiceError, ledger::LedgerError};
use billbook_db::repositories::{DashboardError, InvoiceRepoError, LedgerRepoError, StoreError};
use billbook_shared::AppError;
use serde_json::json;
use tracing::error;

/// An error ready to be rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: String,
    message: String,
}

impl ApiError {
    /// Creates an error from a status code, an upper-case error code and a message.
    pub fn new(status: u16, code: &str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code: code.to_ascii_lowercase(),
            message: message.into(),
        }
    }

    /// Bad request with a specific code.
    pub fn bad_request(code: &str, message: impl Into<String>) -> Self {
        Self::new(400, code, message)
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Snake-case error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.code,
                "message": self.message,
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            error!(error = %err, "Request failed");
            return Self::new(err.status_code(), err.error_code(), "An error occurred");
        }
        let message = match &err {
            AppError::NotFound(m)
            | AppError::Validation(m)
            | AppError::Database(m)
            | AppError::Internal(m) => m.clone(),
        };
        Self::new(err.status_code(), err.error_code(), message)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string()).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text()).into()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text()).into()
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string()).into()
    }
}

impl From<EntityError> for ApiError {
    fn from(err: EntityError) -> Self {
        Self::new(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self::new(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<InvoiceError> for ApiError {
    fn from(err: InvoiceError) -> Self {
        Self::new(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Entity(e) => e.into(),
            StoreError::Database(e) => e.into(),
        }
    }
}

impl From<LedgerRepoError> for ApiError {
    fn from(err: LedgerRepoError) -> Self {
        match err {
            LedgerRepoError::Ledger(e) => e.into(),
            LedgerRepoError::Database(e) => e.into(),
        }
    }
}

impl From<InvoiceRepoError> for ApiError {
    fn from(err: InvoiceRepoError) -> Self {
        match err {
            InvoiceRepoError::Invoice(e) => e.into(),
            InvoiceRepoError::Database(e) => e.into(),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Database(e) => e.into(),
        }
    }
}
