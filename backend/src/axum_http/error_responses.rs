use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

use crate::usecases::error::BookingError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<JsonRejection> for BookingError {
    fn from(rejection: JsonRejection) -> Self {
        BookingError::Validation(rejection.body_text())
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, reason) = match &self {
            BookingError::SlotUnavailable(reason) => {
                ("Slot no longer available".to_string(), Some(reason.clone()))
            }
            BookingError::Gateway(_) => ("Upstream service unavailable".to_string(), None),
            // Don't leak internal error detail to client
            BookingError::Internal(_) => ("Internal server error".to_string(), None),
            other => (other.to_string(), None),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = ?self, "http: request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "http: request rejected");
        }

        let body = Json(ErrorResponse {
            code: self.code(),
            message,
            reason,
        });

        (status, body).into_response()
    }
}

/// `Json` extractor whose rejection renders through [`ErrorResponse`].
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = BookingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode};

    async fn body_of(err: BookingError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn slot_unavailable_carries_reason() {
        let (status, body) =
            body_of(BookingError::SlotUnavailable("Date manually blocked".into())).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "SLOT_UNAVAILABLE");
        assert_eq!(body["reason"], "Date manually blocked");
    }

    #[tokio::test]
    async fn internal_errors_are_not_leaked() {
        let (status, body) = body_of(BookingError::Internal(anyhow::anyhow!(
            "connection refused to 10.0.0.3"
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("reason").is_none());
    }

    #[tokio::test]
    async fn validation_message_is_passed_through() {
        let (status, body) =
            body_of(BookingError::Validation("endTime must be after startTime".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "endTime must be after startTime");
    }
}
