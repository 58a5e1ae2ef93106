use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),
    /// Reason text comes straight from the availability rules.
    #[error("{0}")]
    SlotUnavailable(String),
    #[error("unknown service: {0}")]
    InvalidService(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("payment gateway request failed")]
    Gateway(#[source] anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BookingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::Validation(_) | BookingError::InvalidService(_) => {
                StatusCode::BAD_REQUEST
            }
            BookingError::SlotUnavailable(_) => StatusCode::CONFLICT,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Gateway(_) => StatusCode::BAD_GATEWAY,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BookingError::Validation(_) => "VALIDATION_ERROR",
            BookingError::SlotUnavailable(_) => "SLOT_UNAVAILABLE",
            BookingError::InvalidService(_) => "INVALID_SERVICE",
            BookingError::NotFound(_) => "NOT_FOUND",
            BookingError::Gateway(_) => "GATEWAY_FAILURE",
            BookingError::Internal(_) => "INTERNAL",
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_http_status() {
        assert_eq!(
            BookingError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BookingError::SlotUnavailable("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            BookingError::InvalidService("karaoke".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BookingError::NotFound("booking").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BookingError::Gateway(anyhow::anyhow!("down")).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            BookingError::Internal(anyhow::anyhow!("db")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn slot_reason_is_displayed_verbatim() {
        let err = BookingError::SlotUnavailable("Date manually blocked".into());
        assert_eq!(err.to_string(), "Date manually blocked");
    }
}
