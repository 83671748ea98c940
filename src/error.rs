//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Raised while reading or validating configuration at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Failure reported by a [`Store`](crate::store::Store) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Classify a driver error, pulling Postgres unique violations (23505) out of the generic case.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some("23505") {
                return StoreError::UniqueViolation(db.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    MissingFields(&'static str),
    #[error("{0}")]
    InvalidBody(String),
    #[error("ID inválido: {0}")]
    InvalidId(String),
    #[error("El estudiante ya está inscrito en este curso")]
    DuplicateEnrollment,
    #[error("El cuerpo de la solicitud es demasiado grande")]
    PayloadTooLarge,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wrap a storage failure with the caller-facing message for the failed operation.
    pub fn storage(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Storage { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_)
            | AppError::InvalidBody(_)
            | AppError::InvalidId(_)
            | AppError::DuplicateEnrollment => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Storage { message, source } => {
                tracing::error!(error = %source, "{}", message);
                ErrorBody {
                    message: message.to_string(),
                    error: Some(source.to_string()),
                }
            }
            other => ErrorBody {
                message: other.to_string(),
                error: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_request() {
        assert_eq!(AppError::MissingFields("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidId("abc".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DuplicateEnrollment.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::PayloadTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn storage_error_keeps_context_and_source() {
        let err = AppError::storage("Error al crear estudiante")(StoreError::Unavailable("down".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error al crear estudiante: store unavailable: down");
    }

    #[test]
    fn non_database_sqlx_errors_stay_generic() {
        let err = StoreError::from_sqlx(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
    }
}
