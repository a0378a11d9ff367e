//! Error handling - every failure leaves as a `{ success: false, ... }` envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::{Map, Value};
use validator::ValidationErrors;

use devhub_core::error::{DomainError, RepoError};
use devhub_core::ports::AuthError;
use devhub_shared::Envelope;

/// Application-level error type rendered as a failure envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Field name to list of violated rules.
    #[error("Validation failed")]
    Validation(Value),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Details are logged where the error is converted, never sent.
    #[error("Database error")]
    Database,

    #[error("Internal server error")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::NotFound(_)
            | AppError::Conflict(_)
            | AppError::Database => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let envelope = match self {
            AppError::Validation(errors) => Envelope::failure_with(self.to_string(), errors.clone()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                Envelope::failure(self.to_string())
            }
            _ => Envelope::failure(self.to_string()),
        };

        HttpResponse::build(self.status_code()).json(envelope)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::NotAuthorized => AppError::Forbidden(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => {
                tracing::debug!("Constraint violation: {}", msg);
                AppError::Conflict("Resource already exists".to_string())
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Database
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Database
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::BadRequest(err.to_string()),
            AuthError::TokenExpired | AuthError::InvalidToken(_) | AuthError::MissingAuth => {
                AppError::Unauthorized(err.to_string())
            }
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, violations)| {
                let codes = violations
                    .iter()
                    .map(|v| Value::String(v.code.to_string()))
                    .collect();
                (field.to_string(), Value::Array(codes))
            })
            .collect::<Map<String, Value>>();

        AppError::Validation(Value::Object(fields))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::json;
    use uuid::Uuid;
    use validator::Validate;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_not_authorized_is_forbidden() {
        let (status, body) = body_of(DomainError::NotAuthorized.into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            json!({ "success": false, "message": "You are not authorized to perform this action" })
        );
    }

    #[actix_web::test]
    async fn test_missing_entity_names_the_entity() {
        let err: AppError = DomainError::not_found("post", Uuid::new_v4()).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Unable to find post with provided ID");
    }

    #[actix_web::test]
    async fn test_database_details_stay_server_side() {
        let err: AppError = RepoError::Query("relation \"posts\" does not exist".into()).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "message": "Database error" }));
    }

    #[actix_web::test]
    async fn test_token_problems_are_unauthorized() {
        let (status, body) = body_of(AuthError::TokenExpired.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_validation_errors_list_fields() {
        let req = devhub_shared::dto::SendMessageRequest::default();
        let err: AppError = req.validate().unwrap_err().into();
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["message"], json!(["length"]));
    }
}
